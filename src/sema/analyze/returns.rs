//! Return statement search
//!
//! A value-returning function only has to contain a `return` somewhere in its
//! body, nested blocks included. Whether every path ends in one is tracked
//! separately so the generator can close the paths that fall off the end.

use crate::ast::{Block, Stmt};

pub(super) fn block_contains_return(block: &Block) -> bool {
    block.stmts.iter().any(|stmt| stmt_contains_return(&stmt.node))
}

fn stmt_contains_return(stmt: &Stmt) -> bool {
    match stmt {
        Stmt::Return(_) => true,
        Stmt::If {
            then_block,
            else_block,
            ..
        } => {
            block_contains_return(then_block)
                || else_block.as_ref().is_some_and(block_contains_return)
        }
        Stmt::While { body, .. } | Stmt::For { body, .. } => block_contains_return(body),
        Stmt::Block(block) => block_contains_return(block),
        // A nested definition's returns belong to that function
        Stmt::Function(_) => false,
        Stmt::Declaration { .. }
        | Stmt::Assignment { .. }
        | Stmt::Reassignment { .. }
        | Stmt::Call(_)
        | Stmt::Print(_)
        | Stmt::Delay(_)
        | Stmt::Write { .. }
        | Stmt::WriteBox { .. } => false,
    }
}

/// True when no path through the block reaches its closing brace
pub(super) fn block_always_returns(block: &Block) -> bool {
    block.stmts.iter().any(|stmt| stmt_always_returns(&stmt.node))
}

fn stmt_always_returns(stmt: &Stmt) -> bool {
    match stmt {
        Stmt::Return(_) => true,
        Stmt::If {
            then_block,
            else_block: Some(else_block),
            ..
        } => block_always_returns(then_block) && block_always_returns(else_block),
        Stmt::Block(block) => block_always_returns(block),
        // loop bodies may run zero times
        _ => false,
    }
}
