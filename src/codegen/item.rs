//! Function Code Generation
//!
//! A function opens one frame holding its parameters followed by its body's
//! top-level locals. Arguments arrive on the operand stack, first one on top,
//! and are stored into slots `0..n` before the body runs.

use crate::ast::FunctionDef;
use crate::codegen::instr::{Instruction, Operand};
use crate::codegen::stmt::{generate_stmts, zero_value};
use crate::codegen::{CodegenError, Emitter};
use crate::config::CodegenConfig;
use crate::sema::ProgramInfo;

pub fn generate_function(
    def: &FunctionDef,
    emitter: &mut Emitter,
    info: &ProgramInfo,
    config: &CodegenConfig,
) -> Result<(), CodegenError> {
    let name = &def.name.node;
    let function = info
        .function(name)
        .ok_or_else(|| CodegenError::UnknownFunction {
            name: name.clone(),
            span: def.name.span,
        })?;
    let slots = function.frame_size();

    emitter.emit_label(name);
    emitter.enter_function();
    emitter.note(format!(
        "{}: {} param(s), {} slot(s)",
        name,
        def.params.len(),
        slots
    ));
    emitter.open_frame(slots);

    for (index, param) in def.params.iter().enumerate() {
        emitter.note(format!("param {}", param.name.node));
        emitter.push(Operand::Int(index as i64));
        emitter.push(Operand::Int(0));
        emitter.emit(Instruction::St);
    }

    generate_stmts(&def.body, emitter, info, config)?;

    if let Some(ty) = function.signature.returns
        && function.falls_through
    {
        emitter.note(format!("{} falls through, returns the default {}", name, ty));
        emitter.push(zero_value(ty));
    }
    emitter.close_frame()?;
    emitter.emit(Instruction::Ret);
    emitter.exit_function();
    Ok(())
}
