//! Comment Generation Utilities
//!
//! Helper functions for the notes attached to annotated listings

use crate::ast::{Expr, ExprKind, Literal, UnaryOp};
use crate::codegen::instr::Operand;

/// Describe a condition for branching
pub fn describe_condition(expr: &Expr) -> String {
    match &expr.kind {
        ExprKind::Binary { op, left, right } => format!(
            "{} {} {}",
            simple_expr_name(left),
            op.symbol(),
            simple_expr_name(right)
        ),
        ExprKind::Unary {
            op: UnaryOp::Not,
            operand,
        } => format!("not {}", simple_expr_name(operand)),
        _ => simple_expr_name(expr),
    }
}

/// Get simple name for expression (for comments)
fn simple_expr_name(expr: &Expr) -> String {
    match &expr.kind {
        ExprKind::Variable(name) => name.clone(),
        ExprKind::Literal(lit) => match lit {
            Literal::Integer(n) => n.to_string(),
            Literal::Float(x) => format!("{:?}", x),
            Literal::Bool(b) => b.to_string(),
            Literal::Colour(rgb) => format!("#{:06x}", rgb),
            Literal::String(_) => "string".to_string(),
        },
        ExprKind::Call(call) => format!("{}(..)", call.function.node),
        ExprKind::Width => "__width".to_string(),
        ExprKind::Height => "__height".to_string(),
        _ => "value".to_string(),
    }
}

/// Describe a store or load of a named slot
pub fn describe_slot(action: &str, name: &str, slot: &Operand) -> String {
    format!("{} {} {}", action, name, slot)
}
