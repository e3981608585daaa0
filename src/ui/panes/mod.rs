//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Source code display with syntax highlighting and current line indicator
//! - [`quads`]: Quadruples emitted so far, with the touched line and jump target states
//! - [`symbols`]: Symbol table with constants, variables and temporaries
//! - [`tokens`]: Token stream with the parser cursor
//! - [`status`]: Status bar with keybindings and replay position
//! - `utils`: Shared borders, scroll state and operand styling
//!
//! Each pane module exports a primary `render_*` function; panes are stateless
//! apart from the scroll state the app owns and passes in.

mod utils;

pub mod quads;
pub mod source;
pub mod status;
pub mod symbols;
pub mod tokens;

pub use quads::{render_quads_pane, QuadRenderData};
pub use source::{render_source_pane, SourceScrollState};
pub use status::{render_status_bar, StatusRenderData};
pub use symbols::render_symbols_pane;
pub use tokens::render_tokens_pane;
pub use utils::ScrollState;
