//! Expression AST nodes

use super::span::{Span, Spanned};
use super::types::Type;

/// Binary operators, grouped by precedence layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    // Multiplicative
    Mul,
    Div,
    Mod,
    And,

    // Additive
    Add,
    Sub,
    Or,

    // Relational
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    Ne,
}

impl BinaryOp {
    pub fn is_relational(&self) -> bool {
        matches!(
            self,
            BinaryOp::Lt | BinaryOp::Gt | BinaryOp::Le | BinaryOp::Ge | BinaryOp::Eq | BinaryOp::Ne
        )
    }

    pub fn is_logical(&self) -> bool {
        matches!(self, BinaryOp::And | BinaryOp::Or)
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::And => "and",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Or => "or",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::Le => "<=",
            BinaryOp::Ge => ">=",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
        }
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Arithmetic negation: -x
    Neg,
    /// Logical negation: not x
    Not,
}

impl UnaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "not",
        }
    }
}

/// A literal value
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// Packed 0xRRGGBB
    Colour(u32),
    String(String),
}

impl Literal {
    pub fn ty(&self) -> Type {
        match self {
            Literal::Integer(_) => Type::Int,
            Literal::Float(_) => Type::Float,
            Literal::Bool(_) => Type::Bool,
            Literal::Colour(_) => Type::Colour,
            Literal::String(_) => Type::String,
        }
    }
}

/// A function call, usable both as an expression and as a statement
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub function: Spanned<String>,
    pub args: Vec<Expr>,
}

/// The shape of an expression
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Literal(Literal),

    /// Variable reference: x
    Variable(String),

    /// Binary operation: a + b
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },

    /// Unary operation: -x, not flag
    Unary { op: UnaryOp, operand: Box<Expr> },

    /// Function call: foo(a, b)
    Call(Call),

    /// Canvas width: __width
    Width,

    /// Canvas height: __height
    Height,

    /// Random integer below a bound: __random_int n
    RandomInt(Box<Expr>),

    /// Colour of the pixel at (x, y): __read x, y
    Read { x: Box<Expr>, y: Box<Expr> },
}

/// An expression node. `ty` is empty after parsing and filled in by
/// semantic analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
    pub ty: Option<Type>,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span, ty: None }
    }

    pub fn literal(lit: Literal, span: Span) -> Self {
        Self::new(ExprKind::Literal(lit), span)
    }

    pub fn binary(left: Expr, op: BinaryOp, right: Expr) -> Self {
        let span = left.span.merge(right.span);
        Self::new(
            ExprKind::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
            },
            span,
        )
    }

    pub fn unary(op: UnaryOp, operand: Expr, span: Span) -> Self {
        Self::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            span,
        )
    }
}
