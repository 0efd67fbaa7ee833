//! Expression Type Checking
//!
//! Type checking for all expression variants. The resolved type of every
//! node is stored in its `ty` field.

use crate::ast::{Call, Expr, ExprKind, Type};
use crate::sema::SemaError;
use crate::sema::types::{Builtin, binary_result, unary_result};

use super::SemanticAnalyzer;

impl SemanticAnalyzer {
    /// Type of an expression, `None` for a call to a void function
    pub(super) fn check_expr(&mut self, expr: &mut Expr) -> Result<Option<Type>, SemaError> {
        let span = expr.span;
        let ty = match &mut expr.kind {
            ExprKind::Literal(lit) => Some(lit.ty()),

            ExprKind::Variable(name) => Some(self.resolve(name, span)?.ty),

            ExprKind::Binary { left, op, right } => {
                let left_ty = self.check_value(left)?;
                let right_ty = self.check_value(right)?;
                let ty = binary_result(*op, left_ty, right_ty).ok_or(
                    SemaError::InvalidBinaryOp {
                        op: *op,
                        left: left_ty,
                        right: right_ty,
                        span,
                    },
                )?;
                Some(ty)
            }

            ExprKind::Unary { op, operand } => {
                let operand_ty = self.check_value(operand)?;
                let ty = unary_result(*op, operand_ty).ok_or(SemaError::InvalidUnaryOp {
                    op: *op,
                    operand: operand_ty,
                    span,
                })?;
                Some(ty)
            }

            ExprKind::Call(call) => self.check_call(call)?,

            ExprKind::Width | ExprKind::Height => Some(Type::Int),

            ExprKind::RandomInt(bound) => {
                self.check_builtin_args(Builtin::RandomInt, &mut [&mut **bound])?;
                Some(Type::Int)
            }

            ExprKind::Read { x, y } => {
                self.check_builtin_args(Builtin::Read, &mut [&mut **x, &mut **y])?;
                Some(Type::Colour)
            }
        };

        expr.ty = ty;
        Ok(ty)
    }

    /// Type of an expression that must produce a value
    pub(super) fn check_value(&mut self, expr: &mut Expr) -> Result<Type, SemaError> {
        match self.check_expr(expr)? {
            Some(ty) => Ok(ty),
            None => Err(SemaError::VoidValue {
                function: match &expr.kind {
                    ExprKind::Call(call) => call.function.node.clone(),
                    _ => String::new(),
                },
                span: expr.span,
            }),
        }
    }

    /// Check that an expression has exactly the expected type
    pub(super) fn expect_type(&mut self, expr: &mut Expr, expected: Type) -> Result<(), SemaError> {
        let found = self.check_value(expr)?;
        if found != expected {
            return Err(SemaError::TypeMismatch {
                expected,
                found,
                span: expr.span,
            });
        }
        Ok(())
    }

    /// Check a call against the global function table and return its result type
    pub(super) fn check_call(&mut self, call: &mut Call) -> Result<Option<Type>, SemaError> {
        let name = &call.function.node;
        let signature = self
            .signatures
            .get(name)
            .cloned()
            .ok_or_else(|| SemaError::UndefinedFunction {
                name: name.clone(),
                span: call.function.span,
            })?;

        if call.args.len() != signature.params.len() {
            return Err(SemaError::ArityMismatch {
                function: name.clone(),
                expected: signature.params.len(),
                found: call.args.len(),
                span: call.function.span,
            });
        }

        for (position, (arg, expected)) in call.args.iter_mut().zip(&signature.params).enumerate() {
            let found = self.check_value(arg)?;
            if found != *expected {
                return Err(SemaError::ArgumentTypeMismatch {
                    function: call.function.node.clone(),
                    position: position + 1,
                    expected: *expected,
                    found,
                    span: arg.span,
                });
            }
        }

        Ok(signature.returns)
    }
}
