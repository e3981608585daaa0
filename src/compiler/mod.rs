//! Compilation context and pipeline entry points
//!
//! A [`Compilation`] owns everything one run mutates: the symbol table, the
//! quadruple emitter and the optional emission history. The parser drives it
//! through the `pub(crate)` emission hooks below; callers only see the
//! finished tokens, symbols and quadruples.
//!
//! ```text
//! source ──Lexer──▶ tokens ──Parser──▶ Compilation { symbols, quads, history }
//! ```

pub mod constants;
pub mod errors;

pub use errors::CompileError;

use crate::ir::{Operand, Operator, QuadEmitter, Quadruple, SymbolTable, SymbolValue};
use crate::parser::lexer::{Lexer, SourceLocation, Token};
use crate::parser::parse::Parser;
use crate::snapshot::{Event, Snapshot, SnapshotManager};

/// Per-run settings
#[derive(Debug, Clone)]
pub struct Options {
    /// Record a snapshot after every emission event
    pub record_history: bool,
    /// Memory budget for the history in bytes
    pub history_limit: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            record_history: false,
            history_limit: constants::DEFAULT_HISTORY_LIMIT,
        }
    }
}

/// Lex and parse `source` with default options.
pub fn compile(source: &str) -> Result<Compilation, CompileError> {
    compile_with(source, &Options::default())
}

/// Lex and parse `source`, emitting quadruples as a side effect of parsing.
pub fn compile_with(source: &str, options: &Options) -> Result<Compilation, CompileError> {
    let tokens = Lexer::new(source).tokenize()?;
    let parser = Parser::with_context(tokens, Compilation::new(options));
    let compilation = parser.parse_program()?;

    log::info!(
        "compiled {} quadruples, {} symbols",
        compilation.quads().len(),
        compilation.symbols().len()
    );
    Ok(compilation)
}

/// State of one compilation run
#[derive(Debug)]
pub struct Compilation {
    tokens: Vec<Token>,
    symbols: SymbolTable,
    code: QuadEmitter,
    history: Option<SnapshotManager>,
    location: SourceLocation,
    cursor: usize,
}

impl Compilation {
    pub fn new(options: &Options) -> Self {
        let history = options
            .record_history
            .then(|| SnapshotManager::new(options.history_limit));

        let mut compilation = Compilation {
            tokens: Vec::new(),
            symbols: SymbolTable::new(),
            code: QuadEmitter::new(),
            history,
            location: SourceLocation::new(1, 1),
            cursor: 0,
        };
        compilation.record(Event::Start);
        compilation
    }

    // ========== Accessors ==========

    /// Token stream the program was parsed from
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Emitted quadruples, in line order
    pub fn quads(&self) -> &[Quadruple] {
        self.code.quads()
    }

    /// Emission history, present when recording was enabled
    pub fn history(&self) -> Option<&SnapshotManager> {
        self.history.as_ref()
    }

    // ========== Emission hooks used by the parser ==========

    /// Track where the parser is, for tagging snapshots.
    pub(crate) fn set_position(&mut self, cursor: usize, location: SourceLocation) {
        self.cursor = cursor;
        self.location = location;
    }

    pub(crate) fn declare(&mut self, name: &str, value: SymbolValue) {
        self.symbols.declare(name, value);
        self.record(Event::Declare {
            name: name.to_string(),
        });
    }

    pub(crate) fn new_temporary(&mut self) -> String {
        let name = self.symbols.new_temporary();
        self.record(Event::Temporary { name: name.clone() });
        name
    }

    pub(crate) fn emit(
        &mut self,
        op: Operator,
        arg1: Operand,
        arg2: Operand,
        result: Operand,
    ) -> usize {
        let line = self.code.emit(op, arg1, arg2, result);
        self.record(Event::Emit { line });
        line
    }

    pub(crate) fn emit_jump(
        &mut self,
        op: Operator,
        arg1: Operand,
        arg2: Operand,
        offset: usize,
    ) -> usize {
        let line = self.code.emit_jump(op, arg1, arg2, offset);
        self.record(Event::Emit { line });
        line
    }

    pub(crate) fn mark_save_point(&mut self) -> usize {
        self.code.mark_save_point()
    }

    pub(crate) fn take_save_point(&mut self) -> Option<usize> {
        self.code.take_save_point()
    }

    pub(crate) fn mark_refill_point(&mut self) -> Option<usize> {
        self.code.mark_refill_point()
    }

    pub(crate) fn backpatch(&mut self) -> Option<(usize, usize)> {
        let (line, target) = self.code.backpatch()?;
        self.record(Event::Backpatch { line, target });
        Some((line, target))
    }

    /// Close the run and take ownership of the token stream.
    pub(crate) fn finish(&mut self, tokens: Vec<Token>) {
        debug_assert!(self.code.is_resolved(), "unresolved jumps at end of program");
        self.tokens = tokens;
    }

    fn record(&mut self, event: Event) {
        let Some(history) = self.history.as_mut() else {
            return;
        };
        if history.is_truncated() {
            return;
        }

        let snapshot = Snapshot {
            event,
            source_location: self.location,
            cursor: self.cursor,
            symbols: self.symbols.clone(),
            quads: self.code.quads().to_vec(),
        };
        if let Err(message) = history.push(snapshot) {
            log::warn!("emission history truncated: {}", message);
        }
    }
}
