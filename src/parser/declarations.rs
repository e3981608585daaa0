//! Declaration parsing implementation
//!
//! This module handles the `block` nonterminal: the optional CONST and VAR
//! sections, any number of PROCEDURE definitions, and the block's statement.
//!
//! # Grammar
//!
//! ```text
//! block ::= [CONST ident "=" number {"," ident "=" number} ";"]
//!           [VAR ident {"," ident} ";"]
//!           {PROCEDURE ident ";" block ";"}
//!           statement
//! ```
//!
//! There is a single flat namespace: names declared inside a procedure body
//! land in the same symbol table as the program's own, and a redeclaration
//! silently overwrites the earlier value.

use crate::ir::SymbolValue;
use crate::parser::lexer::{Keyword, Punct};
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    pub(crate) fn parse_block(&mut self) -> Result<(), ParseError> {
        self.enter("block");

        if self.match_keyword(Keyword::Const) {
            self.parse_const_declarations()?;
        }

        if self.match_keyword(Keyword::Var) {
            self.parse_var_declarations()?;
        }

        while self.match_keyword(Keyword::Procedure) {
            self.parse_procedure()?;
        }

        self.parse_statement()
    }

    /// `ident "=" number {"," ident "=" number} ";"` after CONST
    fn parse_const_declarations(&mut self) -> Result<(), ParseError> {
        loop {
            let name = self.expect_identifier("in CONST declaration")?;
            self.expect_punct(Punct::Eq, "after constant name")?;
            let value = self.expect_number("after '=' in CONST declaration")?;
            self.ctx.declare(&name, SymbolValue::Const(value));

            if !self.match_punct(Punct::Comma) {
                break;
            }
        }
        self.expect_punct(Punct::Semicolon, "after CONST declaration")
    }

    /// `ident {"," ident} ";"` after VAR. Variables start at 0.
    fn parse_var_declarations(&mut self) -> Result<(), ParseError> {
        loop {
            let name = self.expect_identifier("in VAR declaration")?;
            self.ctx.declare(&name, SymbolValue::Var(0));

            if !self.match_punct(Punct::Comma) {
                break;
            }
        }
        self.expect_punct(Punct::Semicolon, "after VAR declaration")
    }

    /// `ident ";" block ";"` after PROCEDURE
    ///
    /// The procedure name is not entered in the symbol table and its body is
    /// emitted inline, in source order.
    fn parse_procedure(&mut self) -> Result<(), ParseError> {
        let name = self.expect_identifier("after PROCEDURE")?;
        log::trace!("procedure {}", name);

        self.expect_punct(Punct::Semicolon, "after procedure name")?;
        self.parse_block()?;
        self.expect_punct(Punct::Semicolon, "after procedure body")
    }
}
