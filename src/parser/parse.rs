//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including the error type, token helpers, and the program entry point.
//!
//! # Parser Architecture
//!
//! The Parser is a single-pass recursive descent parser that emits quadruples
//! while it recognizes the input. There is no syntax tree: every nonterminal
//! routine talks directly to the [`Compilation`] it owns.
//! - This module: Parser struct, helper methods, and `program`
//! - `declarations`: `block` with its CONST, VAR and PROCEDURE sections
//! - `statements`: CALL, BEGIN..END, IF, WHILE and assignment
//! - `expressions`: conditions, expressions, terms and factors
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.

use crate::compiler::{Compilation, Options};
use crate::parser::lexer::{Keyword, Punct, SourceLocation, Token, TokenKind};
use std::fmt;

/// Parser error type
#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub location: SourceLocation,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Syntax error at line {}, column {}: {}",
            self.location.line, self.location.column, self.message
        )
    }
}

impl std::error::Error for ParseError {}

/// Recursive descent parser for PL/0
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    pub(crate) ctx: Compilation,
}

impl Parser {
    /// Parser over `tokens` with a fresh, history-less compilation.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_context(tokens, Compilation::new(&Options::default()))
    }

    /// Parser over `tokens` that emits into `ctx`.
    ///
    /// A missing `Eof` sentinel is appended so the cursor always has a token
    /// to look at.
    pub fn with_context(mut tokens: Vec<Token>, ctx: Compilation) -> Self {
        if !tokens.last().is_some_and(Token::is_eof) {
            let line = tokens.last().map_or(1, |tok| tok.location.line + 1);
            tokens.push(Token::new(TokenKind::Eof, SourceLocation::new(line, 1)));
        }
        Self {
            tokens,
            position: 0,
            ctx,
        }
    }

    /// Parse `program = [PROGRAM [ident] [";" | "."]] block "."`.
    ///
    /// Consumes the parser and hands back the finished compilation.
    pub fn parse_program(mut self) -> Result<Compilation, ParseError> {
        self.enter("program");

        if self.match_keyword(Keyword::Program) {
            if matches!(self.peek().kind, TokenKind::Ident(_)) {
                self.advance();
            }
            // A header terminator is only taken when a body follows it;
            // otherwise it is the final '.' of an empty program.
            let terminator = self.check_punct(Punct::Semicolon) || self.check_punct(Punct::Dot);
            let body_follows = self.peek_ahead(1).is_some_and(|tok| !tok.is_eof());
            if terminator && body_follows {
                self.advance();
            }
        }

        self.parse_block()?;
        self.expect_punct(Punct::Dot, "at end of program")?;

        if !self.is_at_end() {
            let extra = self.peek();
            log::warn!(
                "ignoring {} token(s) after the final '.', starting with {} at line {}",
                self.tokens.len() - self.position - 1,
                extra,
                extra.location.line
            );
        }

        let tokens = std::mem::take(&mut self.tokens);
        self.ctx.finish(tokens);
        Ok(self.ctx)
    }

    // ===== Helper methods =====

    /// Trace entry into a nonterminal routine.
    pub(crate) fn enter(&self, rule: &str) {
        log::trace!("{}: current token {}", rule, self.peek());
    }

    pub(crate) fn check_keyword(&self, keyword: Keyword) -> bool {
        self.peek().kind == TokenKind::Keyword(keyword)
    }

    pub(crate) fn check_punct(&self, punct: Punct) -> bool {
        self.peek().kind == TokenKind::Punct(punct)
    }

    pub(crate) fn match_keyword(&mut self, keyword: Keyword) -> bool {
        if self.check_keyword(keyword) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn match_punct(&mut self, punct: Punct) -> bool {
        if self.check_punct(punct) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume the current token. The `Eof` sentinel is never consumed.
    pub(crate) fn advance(&mut self) {
        if self.is_at_end() {
            return;
        }
        let matched = self.position;
        log::trace!("matched {}, next is {}", self.tokens[matched], self.tokens[matched + 1]);
        self.position += 1;
        self.ctx.set_position(matched, self.tokens[matched].location);
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.peek().is_eof()
    }

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    pub(crate) fn peek_ahead(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.position + n)
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.peek().location
    }

    /// Syntax error at the current token.
    pub(crate) fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError {
            message: message.into(),
            location: self.current_location(),
        }
    }

    pub(crate) fn expect_keyword(
        &mut self,
        keyword: Keyword,
        ctx: &str,
    ) -> Result<(), ParseError> {
        if self.match_keyword(keyword) {
            Ok(())
        } else {
            Err(self.error(format!(
                "Expected '{}' {}, found {}",
                keyword.as_str(),
                ctx,
                self.peek()
            )))
        }
    }

    pub(crate) fn expect_punct(
        &mut self,
        punct: Punct,
        ctx: &str,
    ) -> Result<(), ParseError> {
        if self.match_punct(punct) {
            Ok(())
        } else {
            Err(self.error(format!(
                "Expected '{}' {}, found {}",
                punct.as_str(),
                ctx,
                self.peek()
            )))
        }
    }

    pub(crate) fn expect_identifier(&mut self, ctx: &str) -> Result<String, ParseError> {
        if let TokenKind::Ident(name) = &self.peek().kind {
            let name = name.clone();
            self.advance();
            Ok(name)
        } else {
            Err(self.error(format!(
                "Expected identifier {}, found {}",
                ctx,
                self.peek()
            )))
        }
    }

    pub(crate) fn expect_number(&mut self, ctx: &str) -> Result<i64, ParseError> {
        if let TokenKind::Number(value) = self.peek().kind {
            self.advance();
            Ok(value)
        } else {
            Err(self.error(format!("Expected number {}, found {}", ctx, self.peek())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Operand, Operator};
    use crate::parser::lexer::Lexer;

    fn parse(source: &str) -> Result<Compilation, ParseError> {
        let tokens = Lexer::new(source).tokenize().unwrap();
        Parser::new(tokens).parse_program()
    }

    #[test]
    fn test_parse_minimal_program() {
        let compilation = parse(".").unwrap();
        assert!(compilation.quads().is_empty());
        assert!(compilation.symbols().is_empty());
        assert_eq!(compilation.tokens().len(), 2);
    }

    #[test]
    fn test_header_terminator_before_body() {
        let compilation = parse("PROGRAM p. VAR x; x := 1 + 2.").unwrap();
        let quads = compilation.quads();
        assert_eq!(quads.len(), 2);
        assert_eq!(quads[0].op, Operator::Add);
        assert_eq!(quads[1].result, Operand::name("x"));
    }

    #[test]
    fn test_header_with_final_dot_only() {
        let compilation = parse("PROGRAM p.").unwrap();
        assert!(compilation.quads().is_empty());

        let compilation = parse("PROGRAM .").unwrap();
        assert!(compilation.quads().is_empty());
    }

    #[test]
    fn test_header_semicolon() {
        let compilation = parse("PROGRAM demo;\nCONST n = 3;\nVAR x;\nx := n.").unwrap();
        assert_eq!(compilation.quads().len(), 1);
    }

    #[test]
    fn test_missing_final_dot() {
        let err = parse("VAR x; x := 1").unwrap_err();
        assert!(err.message.contains("'.'"), "{}", err.message);
        assert!(err.message.contains("end of input"), "{}", err.message);
    }

    #[test]
    fn test_trailing_tokens_ignored() {
        let compilation = parse("VAR x; x := 1. x := 2.").unwrap();
        assert_eq!(compilation.quads().len(), 1);
    }

    #[test]
    fn test_advance_stops_at_eof() {
        let tokens = Lexer::new("x").tokenize().unwrap();
        let mut parser = Parser::new(tokens);

        parser.advance();
        assert!(parser.is_at_end());
        assert_eq!(parser.position, 1);

        parser.advance();
        assert_eq!(parser.position, 1);
        assert!(parser.peek().is_eof());
    }

    #[test]
    fn test_missing_eof_sentinel_is_added() {
        let parser = Parser::new(Vec::new());
        assert!(parser.is_at_end());
        let err = parser.parse_program().unwrap_err();
        assert_eq!(err.location, SourceLocation::new(1, 1));
    }

    #[test]
    fn test_error_display() {
        let err = parse("VAR x;\nx = 1.").unwrap_err();
        assert_eq!(err.location.line, 2);
        assert!(err
            .to_string()
            .starts_with("Syntax error at line 2, column 3:"));
    }
}
