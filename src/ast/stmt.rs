//! Statement AST nodes

use super::expr::{Call, Expr};
use super::item::FunctionDef;
use super::span::{Span, Spanned};
use super::types::Type;

/// A brace-delimited statement list. Every block opens its own storage frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub stmts: Vec<Spanned<Stmt>>,
    pub span: Span,
}

impl Block {
    pub fn new(stmts: Vec<Spanned<Stmt>>, span: Span) -> Self {
        Self { stmts, span }
    }
}

/// A statement in the language
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// Declaration without initializer: let x : int;
    Declaration {
        name: Spanned<String>,
        ty: Spanned<Type>,
    },

    /// Declaration with initializer: let x : int = 42;
    Assignment {
        name: Spanned<String>,
        ty: Spanned<Type>,
        value: Expr,
    },

    /// Store into an existing variable: x = 42;
    Reassignment { name: Spanned<String>, value: Expr },

    /// If statement with optional else block
    If {
        condition: Expr,
        then_block: Block,
        else_block: Option<Block>,
    },

    /// While loop
    While { condition: Expr, body: Block },

    /// for (init; condition; step) { }
    For {
        init: Option<Box<Spanned<Stmt>>>,
        condition: Expr,
        step: Option<Box<Spanned<Stmt>>>,
        body: Block,
    },

    /// return x; or return;
    Return(Option<Expr>),

    /// fun name(a : int) -> int { }
    Function(Box<FunctionDef>),

    /// Call statement: foo(1, 2);
    Call(Call),

    /// Nested block: { ... }
    Block(Block),

    /// __print expr;
    Print(Expr),

    /// __delay millis;
    Delay(Expr),

    /// __write x, y, colour;
    Write { x: Expr, y: Expr, colour: Expr },

    /// __write_box x, y, width, height, colour;
    WriteBox {
        x: Expr,
        y: Expr,
        width: Expr,
        height: Expr,
        colour: Expr,
    },
}

impl Stmt {
    /// Name introduced into the enclosing scope, if any
    pub fn declared_name(&self) -> Option<&Spanned<String>> {
        match self {
            Stmt::Declaration { name, .. } | Stmt::Assignment { name, .. } => Some(name),
            _ => None,
        }
    }
}
