//! Program root and function definitions

use super::span::{Span, Spanned};
use super::stmt::{Block, Stmt};
use super::types::Type;

/// A formal parameter: name : type
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: Spanned<String>,
    pub ty: Spanned<Type>,
}

/// A function definition
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub name: Spanned<String>,
    pub params: Vec<Param>,
    /// `None` for functions without a `->` clause
    pub return_type: Option<Spanned<Type>>,
    pub body: Block,
}

impl FunctionDef {
    pub fn returns(&self) -> Option<Type> {
        self.return_type.as_ref().map(|ty| ty.node)
    }
}

/// A whole compilation unit: the top-level block
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub block: Block,
}

impl Program {
    pub fn new(block: Block) -> Self {
        Self { block }
    }

    /// Top-level function definitions, in source order
    pub fn functions(&self) -> impl Iterator<Item = &FunctionDef> + '_ {
        self.block.stmts.iter().filter_map(|stmt| match &stmt.node {
            Stmt::Function(def) => Some(def.as_ref()),
            _ => None,
        })
    }

    pub fn span(&self) -> Span {
        self.block.span
    }
}
