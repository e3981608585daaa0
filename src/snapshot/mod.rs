// Emission history for stepping through code generation

mod replay;

pub use replay::{Replay, StepError};

use crate::ir::{Quadruple, SymbolTable};
use crate::parser::lexer::SourceLocation;
use std::fmt;

/// What changed between the previous snapshot and this one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Empty tables before the first token is parsed
    Start,
    /// A `CONST` or `VAR` entry was declared
    Declare { name: String },
    /// A temporary was synthesized
    Temporary { name: String },
    /// A quadruple was appended at `line`
    Emit { line: usize },
    /// The jump at `line` was patched to `target`
    Backpatch { line: usize, target: usize },
}

impl Event {
    /// Quadruple line touched by this event, if any
    pub fn touched_line(&self) -> Option<usize> {
        match self {
            Event::Emit { line } | Event::Backpatch { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Symbol touched by this event, if any
    pub fn touched_symbol(&self) -> Option<&str> {
        match self {
            Event::Declare { name } | Event::Temporary { name } => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Start => write!(f, "start"),
            Event::Declare { name } => write!(f, "declared {}", name),
            Event::Temporary { name } => write!(f, "allocated {}", name),
            Event::Emit { line } => write!(f, "emitted line {}", line),
            Event::Backpatch { line, target } => {
                write!(f, "backpatched line {} -> {}", line, target)
            }
        }
    }
}

/// Snapshot of the compilation state after one event
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub event: Event,
    pub source_location: SourceLocation,
    /// Parser cursor (token index) when the event happened
    pub cursor: usize,
    pub symbols: SymbolTable,
    pub quads: Vec<Quadruple>,
}

impl Snapshot {
    /// Estimate the memory usage of this snapshot in bytes
    pub fn estimated_size(&self) -> usize {
        // Rough per-entry figures, names are short
        let symbol_size = self.symbols.len() * 48;
        let quad_size = self.quads.len() * std::mem::size_of::<Quadruple>();
        std::mem::size_of::<Snapshot>() + symbol_size + quad_size
    }
}

/// Bounded list of snapshots
#[derive(Debug)]
pub struct SnapshotManager {
    snapshots: Vec<Snapshot>,
    max_memory: usize,
    current_memory: usize,
    truncated: bool,
}

impl SnapshotManager {
    pub fn new(max_memory: usize) -> Self {
        SnapshotManager {
            snapshots: Vec::new(),
            max_memory,
            current_memory: 0,
            truncated: false,
        }
    }

    /// Add a snapshot to history.
    ///
    /// Once the memory limit is hit the history is marked truncated and
    /// every later push is refused. The first snapshot is always kept so a
    /// truncated history still has a starting point.
    pub fn push(&mut self, snapshot: Snapshot) -> Result<(), String> {
        if self.truncated {
            return Err("history already truncated".to_string());
        }

        let snapshot_size = snapshot.estimated_size();

        if !self.snapshots.is_empty() && self.current_memory + snapshot_size > self.max_memory {
            self.truncated = true;
            return Err(format!(
                "Snapshot memory limit exceeded: {} + {} > {}",
                self.current_memory, snapshot_size, self.max_memory
            ));
        }

        self.current_memory += snapshot_size;
        self.snapshots.push(snapshot);
        Ok(())
    }

    /// Get a snapshot by index
    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    pub fn last(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.snapshots.iter()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Whether recording stopped at the memory limit
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn memory_usage(&self) -> usize {
        self.current_memory
    }

    pub fn memory_limit(&self) -> usize {
        self.max_memory
    }
}
