//! Code Generation module
//!
//! Responsible for converting the analyzed AST into a flat instruction list
//! for the stack-frame virtual machine. `.main` comes first and ends in
//! `halt`; every function body follows it.

pub mod comment_utils;
pub mod emitter;
mod expr;
pub mod frame;
pub mod instr;
mod item;
mod stmt;

use std::fmt::Write as _;

use rustc_hash::FxHashMap as HashMap;

use crate::ast::{Program, Span, Stmt};
use crate::config::CodegenConfig;
use crate::sema::ProgramInfo;
pub use emitter::Emitter;
pub use instr::{Instruction, Operand};

/// Internal defects found while generating code. A program that passed
/// semantic analysis never produces one of these.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CodegenError {
    #[error("no storage slot recorded for '{name}'")]
    UnresolvedSymbol { name: String, span: Span },

    #[error("no analysis record for function '{name}'")]
    UnknownFunction { name: String, span: Span },

    #[error("frame underflow while addressing '{name}'")]
    FrameUnderflow { name: String, span: Option<Span> },

    #[error("instruction {at} is not a jump placeholder")]
    UnpatchableJump { at: usize },

    #[error("expression has no resolved type")]
    UntypedExpression { span: Span },

    #[error("return emitted outside a function body")]
    StrayReturn { span: Span },
}

impl CodegenError {
    pub fn span(&self) -> Option<Span> {
        match self {
            CodegenError::UnresolvedSymbol { span, .. }
            | CodegenError::UnknownFunction { span, .. }
            | CodegenError::UntypedExpression { span }
            | CodegenError::StrayReturn { span } => Some(*span),
            CodegenError::FrameUnderflow { span, .. } => *span,
            CodegenError::UnpatchableJump { .. } => None,
        }
    }
}

/// Generated program: instructions plus optional per-instruction notes
#[derive(Debug, Clone, PartialEq)]
pub struct Assembly {
    pub instructions: Vec<Instruction>,
    pub notes: HashMap<usize, String>,
}

impl Assembly {
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// One instruction per line, with `// note` suffixes when `annotate` is set
    pub fn render(&self, annotate: bool) -> String {
        let mut out = String::new();
        for (i, instruction) in self.instructions.iter().enumerate() {
            let _ = write!(out, "{}", instruction);
            if annotate && let Some(note) = self.notes.get(&i) {
                let _ = write!(out, "  // {}", note);
            }
            out.push('\n');
        }
        out
    }
}

impl std::fmt::Display for Assembly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render(false))
    }
}

/// Generate code for an analyzed program
pub fn generate(
    program: &Program,
    info: &ProgramInfo,
    config: &CodegenConfig,
) -> Result<Assembly, CodegenError> {
    let mut emitter = Emitter::new();

    emitter.emit_label("main");
    stmt::generate_block(&program.block, &mut emitter, info, config)?;
    emitter.emit(Instruction::Halt);

    for stmt in &program.block.stmts {
        if let Stmt::Function(def) = &stmt.node {
            item::generate_function(def, &mut emitter, info, config)?;
        }
    }

    let assembly = emitter.finish();
    log::debug!("generated {} instructions", assembly.len());
    Ok(assembly)
}
