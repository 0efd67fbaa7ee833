//! Expression Code Generation
//!
//! Every expression leaves exactly one value on the operand stack. Binary
//! operators push the right operand first so the left one is on top.

use crate::ast::{BinaryOp, Call, Expr, ExprKind, Literal, Type, UnaryOp};
use crate::codegen::comment_utils::describe_slot;
use crate::codegen::instr::{Instruction, Operand};
use crate::codegen::{CodegenError, Emitter};
use crate::sema::ProgramInfo;

pub fn generate_expr(
    expr: &Expr,
    emitter: &mut Emitter,
    info: &ProgramInfo,
) -> Result<(), CodegenError> {
    match &expr.kind {
        ExprKind::Literal(lit) => emitter.push(literal_operand(lit)),

        ExprKind::Variable(name) => {
            let entry = info
                .lookup(expr.span)
                .ok_or_else(|| CodegenError::UnresolvedSymbol {
                    name: name.clone(),
                    span: expr.span,
                })?;
            let slot = emitter.address(entry, expr.span)?;
            emitter.note(describe_slot("load", name, &slot));
            emitter.push(slot);
        }

        ExprKind::Binary { left, op, right } => {
            generate_expr(right, emitter, info)?;
            generate_expr(left, emitter, info)?;
            emitter.emit(binary_instruction(*op));
            if *op == BinaryOp::Ne {
                emitter.emit(Instruction::Not);
            }
        }

        ExprKind::Unary {
            op: UnaryOp::Neg,
            operand,
        } => {
            generate_expr(operand, emitter, info)?;
            let zero = match operand.ty {
                Some(Type::Float) => Operand::Float(0.0),
                Some(_) => Operand::Int(0),
                None => return Err(CodegenError::UntypedExpression { span: operand.span }),
            };
            emitter.push(zero);
            emitter.emit(Instruction::Sub);
        }

        ExprKind::Unary {
            op: UnaryOp::Not,
            operand,
        } => {
            generate_expr(operand, emitter, info)?;
            emitter.emit(Instruction::Not);
        }

        ExprKind::Call(call) => generate_call(call, emitter, info)?,

        ExprKind::Width => emitter.emit(Instruction::Width),
        ExprKind::Height => emitter.emit(Instruction::Height),

        ExprKind::RandomInt(bound) => {
            generate_expr(bound, emitter, info)?;
            emitter.emit(Instruction::Irnd);
        }

        ExprKind::Read { x, y } => {
            generate_expr(y, emitter, info)?;
            generate_expr(x, emitter, info)?;
            emitter.emit(Instruction::Read);
        }
    }
    Ok(())
}

/// Arguments in reverse so the first one ends up on top, then the callee
pub fn generate_call(
    call: &Call,
    emitter: &mut Emitter,
    info: &ProgramInfo,
) -> Result<(), CodegenError> {
    for arg in call.args.iter().rev() {
        generate_expr(arg, emitter, info)?;
    }
    emitter.note(format!("call {}", call.function.node));
    emitter.push(Operand::Label(call.function.node.clone()));
    emitter.emit(Instruction::Call);
    Ok(())
}

pub fn literal_operand(lit: &Literal) -> Operand {
    match lit {
        Literal::Integer(n) => Operand::Int(*n),
        Literal::Float(x) => Operand::Float(*x),
        Literal::Bool(b) => Operand::Bool(*b),
        Literal::Colour(rgb) => Operand::Colour(*rgb),
        Literal::String(s) => Operand::Str(s.clone()),
    }
}

fn binary_instruction(op: BinaryOp) -> Instruction {
    match op {
        BinaryOp::Mul => Instruction::Mul,
        BinaryOp::Div => Instruction::Div,
        BinaryOp::Mod => Instruction::Mod,
        BinaryOp::And => Instruction::And,
        BinaryOp::Add => Instruction::Add,
        BinaryOp::Sub => Instruction::Sub,
        BinaryOp::Or => Instruction::Or,
        BinaryOp::Lt => Instruction::Lt,
        BinaryOp::Gt => Instruction::Gt,
        BinaryOp::Le => Instruction::Le,
        BinaryOp::Ge => Instruction::Ge,
        // `!=` is `eq` followed by `not`
        BinaryOp::Eq | BinaryOp::Ne => Instruction::Eq,
    }
}
