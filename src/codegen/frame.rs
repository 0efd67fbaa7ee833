//! Local-count pass
//!
//! Sizes the frame a block opens: one slot per declaration made directly in
//! the block. Declarations in nested blocks live in those blocks' frames.

use crate::ast::{Block, Stmt};

/// Slots needed by the frame of `block`
pub fn block_slots(block: &Block) -> usize {
    block
        .stmts
        .iter()
        .filter(|stmt| stmt.node.declared_name().is_some())
        .count()
}

/// Slots needed by a `for` header frame
pub fn for_header_slots(init: Option<&Stmt>) -> usize {
    match init {
        Some(stmt) if stmt.declared_name().is_some() => 1,
        _ => 0,
    }
}
