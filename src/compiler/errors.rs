//! Compile error type
//!
//! [`CompileError`] wraps the two fatal error kinds of the pipeline. Both
//! abort the run: no partial symbol table or quadruple list is returned.

use crate::parser::lexer::{LexError, SourceLocation};
use crate::parser::parse::ParseError;
use std::fmt;

#[derive(Debug, Clone)]
pub enum CompileError {
    /// Unrecognized character or malformed two-character symbol
    Lex(LexError),
    /// Grammar expectation violated
    Syntax(ParseError),
}

impl CompileError {
    pub fn location(&self) -> SourceLocation {
        match self {
            CompileError::Lex(err) => err.location,
            CompileError::Syntax(err) => err.location,
        }
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::Lex(err) => fmt::Display::fmt(err, f),
            CompileError::Syntax(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for CompileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CompileError::Lex(err) => Some(err),
            CompileError::Syntax(err) => Some(err),
        }
    }
}

impl From<LexError> for CompileError {
    fn from(err: LexError) -> Self {
        CompileError::Lex(err)
    }
}

impl From<ParseError> for CompileError {
    fn from(err: ParseError) -> Self {
        CompileError::Syntax(err)
    }
}
