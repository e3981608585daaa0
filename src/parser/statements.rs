//! Statement parsing implementation
//!
//! This module handles the `statement` nonterminal and the control flow it
//! generates:
//!
//! - CALL: `CALL ident` (no code)
//! - Compound: `BEGIN statement {";" statement} END`
//! - Conditional: `IF condition THEN statement`
//! - Loop: `WHILE condition DO statement`
//! - Assignment: `ident ":=" expression`
//! - Empty statement
//!
//! # Control Flow
//!
//! ```text
//! WHILE c DO s                      IF c THEN s
//!
//!   L0: <code for c, place t>         <code for c, place t>
//!       (je, t, _, Lexit)   <- patch      (je, t, _, Lexit)   <- patch
//!       <code for s>                      <code for s>
//!       (jmp, _, _, L0)             Lexit:
//! Lexit:
//! ```
//!
//! Forward exits are emitted with a placeholder target and backpatched once
//! the body has been generated.

use crate::compiler::constants::PLACEHOLDER_TARGET;
use crate::ir::{Operand, Operator};
use crate::parser::lexer::{Keyword, Punct, TokenKind};
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    pub(crate) fn parse_statement(&mut self) -> Result<(), ParseError> {
        self.enter("statement");

        if self.match_keyword(Keyword::Call) {
            let callee = self.expect_identifier("after CALL")?;
            log::trace!("call {}", callee);
            return Ok(());
        }

        if self.match_keyword(Keyword::Begin) {
            return self.parse_compound();
        }

        if self.match_keyword(Keyword::If) {
            return self.parse_if();
        }

        if self.match_keyword(Keyword::While) {
            return self.parse_while();
        }

        if matches!(self.peek().kind, TokenKind::Ident(_)) {
            return self.parse_assignment();
        }

        // Empty statement
        Ok(())
    }

    fn parse_compound(&mut self) -> Result<(), ParseError> {
        self.parse_statement()?;
        while self.match_punct(Punct::Semicolon) {
            self.parse_statement()?;
        }
        self.expect_keyword(Keyword::End, "to close BEGIN")
    }

    fn parse_if(&mut self) -> Result<(), ParseError> {
        let place = self.parse_condition()?;

        self.emit_exit_jump(place);
        self.expect_keyword(Keyword::Then, "after IF condition")?;
        self.parse_statement()?;

        self.ctx.backpatch();
        Ok(())
    }

    fn parse_while(&mut self) -> Result<(), ParseError> {
        self.ctx.mark_save_point();
        let place = self.parse_condition()?;

        self.emit_exit_jump(place);
        self.expect_keyword(Keyword::Do, "after WHILE condition")?;
        self.parse_statement()?;

        let loop_start = self
            .ctx
            .take_save_point()
            .ok_or_else(|| self.error("loop start was not recorded"))?;
        self.ctx.emit(
            Operator::Jmp,
            Operand::Empty,
            Operand::Empty,
            Operand::Line(loop_start),
        );

        self.ctx.backpatch();
        Ok(())
    }

    /// `(je, place, _, 0)`, registered for a later backpatch.
    ///
    /// An ODD condition has no place, so its jump tests an empty operand.
    fn emit_exit_jump(&mut self, place: Option<Operand>) {
        self.ctx.emit(
            Operator::Je,
            place.unwrap_or(Operand::Empty),
            Operand::Empty,
            Operand::Line(PLACEHOLDER_TARGET),
        );
        self.ctx.mark_refill_point();
    }

    fn parse_assignment(&mut self) -> Result<(), ParseError> {
        let target = self.expect_identifier("at start of assignment")?;
        self.expect_punct(Punct::Assign, "in assignment")?;

        let place = self.parse_expression()?;
        self.ctx.emit(Operator::Assign, place, Operand::Empty, Operand::Name(target));
        Ok(())
    }
}
