//! # Introduction
//!
//! pl0quad compiles PL/0 programs into a numbered list of quadruples
//! (three-address instructions) in a single pass, optionally capturing a
//! snapshot of the symbol table and quadruple list after every emission
//! event. The snapshot history can then be stepped forward and backward
//! through a terminal UI built with [ratatui](https://docs.rs/ratatui).
//!
//! ## Compilation pipeline
//!
//! ```text
//! Source → Lexer → Parser (emits while parsing) → Quadruples → Reports / TUI
//! ```
//!
//! 1. [`parser`]: tokenises the source and parses it by recursive descent,
//!    generating code as each construct is recognized.
//! 2. [`ir`]: quadruple records, the flat symbol table and the emitter that
//!    numbers lines and backpatches forward jumps.
//! 3. [`compiler`]: the per-run [`Compilation`] context and the [`compile`]
//!    entry points.
//! 4. [`snapshot`]: bounded emission history and [`snapshot::Replay`].
//! 5. [`report`]: text renderings of tokens, symbols and quadruples.
//! 6. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! let compilation = pl0quad::compile("VAR x; x := 1 + 2.").unwrap();
//! assert_eq!(
//!     pl0quad::report::quad_program(compilation.quads()),
//!     "1: (+, 1, 2, #TEMP1)\n2: (:=, #TEMP1, _, x)\n"
//! );
//! ```

pub mod compiler;
pub mod ir;
pub mod parser;
pub mod report;
pub mod snapshot;
pub mod ui;

pub use compiler::{compile, compile_with, Compilation, CompileError, Options};
