//! PL/0 front end
//!
//! This module turns PL/0 source text into quadruples in a single pass:
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: [`Parser`](parse::Parser) struct, helpers and the `program` rule
//! - `declarations`, `statements`, `expressions`: the remaining nonterminals,
//!   as `impl Parser` blocks
//!
//! # Supported Language
//!
//! - Declarations: `CONST`, `VAR`, nested `PROCEDURE` (one flat namespace)
//! - Statements: `CALL`, `BEGIN ... END`, `IF ... THEN`, `WHILE ... DO`, `:=`
//! - Conditions: `ODD`, `= # < <= > >=`
//! - Expressions: integer `+ - * /` with parentheses and a leading sign
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser, one routine per nonterminal.
//! No syntax tree is built; code is emitted as the input is recognized.
//! No external parser generator dependencies.

mod declarations;
mod expressions;
pub mod lexer;
pub mod parse;
mod statements;
