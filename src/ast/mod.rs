//! Abstract Syntax Tree (AST) for the pixel language
//!
//! The node family is closed: every stage past the parser dispatches on
//! these enums with exhaustive `match`.

mod expr;
mod item;
mod span;
mod stmt;
mod types;

pub use expr::{BinaryOp, Call, Expr, ExprKind, Literal, UnaryOp};
pub use item::{FunctionDef, Param, Program};
pub use span::{LineCol, Span, Spanned};
pub use stmt::{Block, Stmt};
pub use types::{Type, display_return};
