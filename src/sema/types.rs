//! Typing rules for operators and built-in primitives
//!
//! Every rule is exact: there are no implicit conversions between `int` and
//! `float`, and `colour` only compares for equality.

use crate::ast::{BinaryOp, Type, UnaryOp};

/// Result type of `left op right`, or `None` if the operands are not valid
pub fn binary_result(op: BinaryOp, left: Type, right: Type) -> Option<Type> {
    if left != right {
        return None;
    }

    match op {
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div => {
            left.is_numeric().then_some(left)
        }
        BinaryOp::Mod => (left == Type::Int).then_some(Type::Int),
        BinaryOp::And | BinaryOp::Or => (left == Type::Bool).then_some(Type::Bool),
        BinaryOp::Lt | BinaryOp::Gt | BinaryOp::Le | BinaryOp::Ge => {
            left.is_numeric().then_some(Type::Bool)
        }
        BinaryOp::Eq | BinaryOp::Ne => Some(Type::Bool),
    }
}

/// Result type of `op operand`
pub fn unary_result(op: UnaryOp, operand: Type) -> Option<Type> {
    match op {
        UnaryOp::Neg => operand.is_numeric().then_some(operand),
        UnaryOp::Not => (operand == Type::Bool).then_some(Type::Bool),
    }
}

/// A built-in primitive that takes arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Delay,
    Write,
    WriteBox,
    RandomInt,
    Read,
}

impl Builtin {
    /// Operand types in source order
    pub fn params(&self) -> &'static [Type] {
        match self {
            Builtin::Delay | Builtin::RandomInt => &[Type::Int],
            Builtin::Write => &[Type::Int, Type::Int, Type::Colour],
            Builtin::WriteBox => &[Type::Int, Type::Int, Type::Int, Type::Int, Type::Colour],
            Builtin::Read => &[Type::Int, Type::Int],
        }
    }
}
