//! Text reports of a compilation
//!
//! Three renderings, each ending with a newline:
//!
//! ```text
//! tokens:          symbols:         1: (+, 1, 2, #TEMP1)
//! (VAR, _)         x: 0             2: (:=, #TEMP1, _, x)
//! (ident, x)       #TEMP1: _
//! (;, _)
//! ...
//! (EOF, _)
//! ```

use crate::ir::{Quadruple, SymbolTable};
use crate::parser::lexer::{Token, TokenKind};
use std::fmt::Write;

/// `(kind, payload)` for one token, `_` when there is no payload.
pub fn token_entry(token: &Token) -> String {
    match &token.kind {
        TokenKind::Keyword(kw) => format!("({}, _)", kw.as_str()),
        TokenKind::Punct(p) => format!("({}, _)", p.as_str()),
        TokenKind::Ident(name) => format!("(ident, {})", name),
        TokenKind::Number(value) => format!("(const, {})", value),
        TokenKind::Eof => "(EOF, _)".to_string(),
    }
}

pub fn token_report(tokens: &[Token]) -> String {
    let mut out = String::from("tokens:\n");
    for token in tokens {
        out.push_str(&token_entry(token));
        out.push('\n');
    }
    out
}

/// `name: value` per entry in declaration order.
pub fn symbol_report(symbols: &SymbolTable) -> String {
    let mut out = String::from("symbols:\n");
    for symbol in symbols.iter() {
        let _ = writeln!(out, "{}: {}", symbol.name, symbol.value);
    }
    out
}

/// The quadruple program, one `line: (op, arg1, arg2, result)` per line.
pub fn quad_program(quads: &[Quadruple]) -> String {
    let mut out = String::new();
    for quad in quads {
        let _ = writeln!(out, "{}", quad);
    }
    out
}
