//! Statement Code Generation
//!
//! Compiles statements into instructions. Structured control flow is
//! linearized with forward jumps patched once their target is known.

use crate::ast::{Block, Expr, Span, Spanned, Stmt, Type};
use crate::codegen::comment_utils::{describe_condition, describe_slot};
use crate::codegen::expr::{generate_call, generate_expr};
use crate::codegen::frame::{block_slots, for_header_slots};
use crate::codegen::instr::{Instruction, Operand};
use crate::codegen::{CodegenError, Emitter};
use crate::config::CodegenConfig;
use crate::sema::ProgramInfo;

/// Open a frame sized for `block`, generate its statements, close it
pub fn generate_block(
    block: &Block,
    emitter: &mut Emitter,
    info: &ProgramInfo,
    config: &CodegenConfig,
) -> Result<(), CodegenError> {
    let slots = block_slots(block);
    emitter.note(format!("frame: {} slot(s)", slots));
    emitter.open_frame(slots);
    generate_stmts(block, emitter, info, config)?;
    emitter.close_frame()
}

/// Generate a block's statements into the frame that is already open
pub fn generate_stmts(
    block: &Block,
    emitter: &mut Emitter,
    info: &ProgramInfo,
    config: &CodegenConfig,
) -> Result<(), CodegenError> {
    for stmt in &block.stmts {
        generate_stmt(stmt, emitter, info, config)?;
    }
    Ok(())
}

pub fn generate_stmt(
    stmt: &Spanned<Stmt>,
    emitter: &mut Emitter,
    info: &ProgramInfo,
    config: &CodegenConfig,
) -> Result<(), CodegenError> {
    match &stmt.node {
        Stmt::Declaration { name, ty } => {
            if config.zero_initialise {
                emitter.push(zero_value(ty.node));
                store(&name.node, name.span, emitter, info)?;
            }
        }
        Stmt::Assignment { name, value, .. } | Stmt::Reassignment { name, value } => {
            generate_expr(value, emitter, info)?;
            store(&name.node, name.span, emitter, info)?;
        }

        Stmt::If {
            condition,
            then_block,
            else_block,
        } => {
            generate_expr(condition, emitter, info)?;
            emitter.note(format!("if: skip then-branch unless {}", describe_condition(condition)));
            let skip_then = emitter.emit_forward_jump(true);
            generate_block(then_block, emitter, info, config)?;

            match else_block {
                Some(else_block) => {
                    emitter.note("if: skip else-branch");
                    let skip_else = emitter.emit_forward_jump(false);
                    emitter.patch_to_here(skip_then)?;
                    generate_block(else_block, emitter, info, config)?;
                    emitter.patch_to_here(skip_else)?;
                }
                None => emitter.patch_to_here(skip_then)?,
            }
        }

        Stmt::While { condition, body } => {
            let head = emitter.position();
            generate_expr(condition, emitter, info)?;
            emitter.note(format!("while: exit unless {}", describe_condition(condition)));
            let exit = emitter.emit_forward_jump(true);
            generate_block(body, emitter, info, config)?;
            emitter.note("while: back to condition");
            emitter.emit_backward_jump(head);
            emitter.patch_to_here(exit)?;
        }

        Stmt::For {
            init,
            condition,
            step,
            body,
        } => {
            let init = init.as_deref();
            let slots = for_header_slots(init.map(|s| &s.node));
            emitter.note(format!("for: header frame, {} slot(s)", slots));
            emitter.open_frame(slots);
            if let Some(init) = init {
                generate_stmt(init, emitter, info, config)?;
            }

            let head = emitter.position();
            generate_for_loop(condition, step.as_deref(), body, head, emitter, info, config)?;
            emitter.close_frame()?;
        }

        Stmt::Return(value) => {
            if let Some(value) = value {
                generate_expr(value, emitter, info)?;
            }
            let frames = emitter
                .function_frames()
                .ok_or(CodegenError::StrayReturn { span: stmt.span })?;
            for _ in 0..frames {
                emitter.emit(Instruction::Cframe);
            }
            emitter.emit(Instruction::Ret);
        }

        // Emitted after `halt` by the item pass
        Stmt::Function(_) => {}

        Stmt::Call(call) => {
            generate_call(call, emitter, info)?;
            let callee = info
                .function(&call.function.node)
                .ok_or_else(|| CodegenError::UnknownFunction {
                    name: call.function.node.clone(),
                    span: call.function.span,
                })?;
            if callee.signature.returns.is_some() {
                emitter.emit(Instruction::Drop);
            }
        }

        Stmt::Block(block) => generate_block(block, emitter, info, config)?,

        Stmt::Print(value) => {
            generate_expr(value, emitter, info)?;
            emitter.emit(Instruction::Print);
        }
        Stmt::Delay(millis) => {
            generate_expr(millis, emitter, info)?;
            emitter.emit(Instruction::Delay);
        }
        Stmt::Write { x, y, colour } => {
            generate_operands(&[colour, y, x], emitter, info)?;
            emitter.emit(Instruction::Write);
        }
        Stmt::WriteBox {
            x,
            y,
            width,
            height,
            colour,
        } => {
            generate_operands(&[colour, height, width, y, x], emitter, info)?;
            emitter.emit(Instruction::WriteBox);
        }
    }
    Ok(())
}

/// Condition, body, step and the jump back; the exit lands after the jump
fn generate_for_loop(
    condition: &Expr,
    step: Option<&Spanned<Stmt>>,
    body: &Block,
    head: usize,
    emitter: &mut Emitter,
    info: &ProgramInfo,
    config: &CodegenConfig,
) -> Result<(), CodegenError> {
    generate_expr(condition, emitter, info)?;
    emitter.note(format!("for: exit unless {}", describe_condition(condition)));
    let exit = emitter.emit_forward_jump(true);
    generate_block(body, emitter, info, config)?;
    if let Some(step) = step {
        generate_stmt(step, emitter, info, config)?;
    }
    emitter.note("for: back to condition");
    emitter.emit_backward_jump(head);
    emitter.patch_to_here(exit)
}

/// Push primitive operands in the given order (last one ends on top)
fn generate_operands(
    operands: &[&Expr],
    emitter: &mut Emitter,
    info: &ProgramInfo,
) -> Result<(), CodegenError> {
    for operand in operands {
        generate_expr(operand, emitter, info)?;
    }
    Ok(())
}

fn store(
    name: &str,
    span: Span,
    emitter: &mut Emitter,
    info: &ProgramInfo,
) -> Result<(), CodegenError> {
    let entry = info
        .lookup(span)
        .ok_or_else(|| CodegenError::UnresolvedSymbol {
            name: name.to_string(),
            span,
        })?;
    let slot = emitter.address(entry, span)?;
    emitter.note(describe_slot("store", name, &slot));
    emitter.emit_store(entry, span)
}

/// Value a declaration without initializer receives
pub fn zero_value(ty: Type) -> Operand {
    match ty {
        Type::Int => Operand::Int(0),
        Type::Float => Operand::Float(0.0),
        Type::Bool => Operand::Bool(false),
        Type::Colour => Operand::Colour(0),
        Type::String => Operand::Str(String::new()),
    }
}
