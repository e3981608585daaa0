//! Intermediate representation
//!
//! - [`quad`]: quadruple records, operators and operands
//! - [`symbols`]: the flat symbol table and temporary allocation
//! - [`emitter`]: line-numbered emission with save/refill points and backpatching

pub mod emitter;
pub mod quad;
pub mod symbols;

pub use emitter::QuadEmitter;
pub use quad::{Operand, Operator, Quadruple, RelOp};
pub use symbols::{Symbol, SymbolTable, SymbolValue};
