//! Forward/backward navigation over a recorded emission history

use super::{Event, Snapshot, SnapshotManager};
use crate::compiler::Compilation;
use rustc_hash::FxHashSet;
use std::fmt;

/// Why a step could not be taken
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepError {
    /// The compilation was run without recording history
    NoHistory,
    AtStart,
    AtEnd,
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepError::NoHistory => write!(f, "No emission history was recorded"),
            StepError::AtStart => write!(f, "Already at the start of code generation"),
            StepError::AtEnd => write!(f, "No more snapshots available (generation finished)"),
        }
    }
}

impl std::error::Error for StepError {}

/// A finished compilation plus a position in its history
#[derive(Debug)]
pub struct Replay {
    compilation: Compilation,
    position: usize,
}

impl Replay {
    /// Start at the first snapshot. Fails when nothing was recorded.
    pub fn new(compilation: Compilation) -> Result<Self, StepError> {
        let recorded = compilation
            .history()
            .is_some_and(|history| !history.is_empty());
        if !recorded {
            return Err(StepError::NoHistory);
        }
        Ok(Replay {
            compilation,
            position: 0,
        })
    }

    pub fn compilation(&self) -> &Compilation {
        &self.compilation
    }

    fn history(&self) -> Option<&SnapshotManager> {
        self.compilation.history()
    }

    /// Snapshot at the current position
    pub fn current(&self) -> Option<&Snapshot> {
        self.history()?.get(self.position)
    }

    pub fn step_forward(&mut self) -> Result<(), StepError> {
        if self.position + 1 >= self.total_snapshots() {
            return Err(StepError::AtEnd);
        }
        self.position += 1;
        Ok(())
    }

    pub fn step_backward(&mut self) -> Result<(), StepError> {
        if self.position == 0 {
            return Err(StepError::AtStart);
        }
        self.position -= 1;
        Ok(())
    }

    /// Step forward up to `n` times, returning how many steps were taken.
    pub fn step_forward_n(&mut self, n: usize) -> usize {
        let mut stepped = 0;
        while stepped < n && self.step_forward().is_ok() {
            stepped += 1;
        }
        stepped
    }

    pub fn rewind_to_start(&mut self) {
        self.position = 0;
    }

    pub fn jump_to_end(&mut self) {
        self.position = self.total_snapshots().saturating_sub(1);
    }

    pub fn history_position(&self) -> usize {
        self.position
    }

    pub fn total_snapshots(&self) -> usize {
        self.history().map_or(0, SnapshotManager::len)
    }

    pub fn is_at_end(&self) -> bool {
        self.position + 1 >= self.total_snapshots()
    }

    /// Whether recording stopped early because of the memory limit
    pub fn is_truncated(&self) -> bool {
        self.history().is_some_and(SnapshotManager::is_truncated)
    }

    /// Lines backpatched at or before the current position, gathered in one
    /// pass over the history.
    pub fn patched_lines(&self) -> FxHashSet<usize> {
        let Some(history) = self.history() else {
            return FxHashSet::default();
        };
        history
            .iter()
            .take(self.position + 1)
            .filter_map(|snapshot| match snapshot.event {
                Event::Backpatch { line, .. } => Some(line),
                _ => None,
            })
            .collect()
    }

    /// Whether the quadruple at `line` has been backpatched at or before the
    /// current position.
    pub fn is_patched(&self, line: usize) -> bool {
        self.patched_lines().contains(&line)
    }
}
