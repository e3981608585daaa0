// Constants for the PL/0 compiler

/// Prefix of synthesized temporaries: `#TEMP1`, `#TEMP2`, ...
/// `#` cannot start an identifier, so temporaries never collide with source names
pub const TEMP_PREFIX: &str = "#TEMP";

/// Target stored in a forward jump until it is backpatched
pub const PLACEHOLDER_TARGET: usize = 0;

/// Default emission history budget (64 MiB)
pub const DEFAULT_HISTORY_LIMIT: usize = 64 * 1024 * 1024;
