//! Instruction Emitter
//!
//! Appends instructions to a flat buffer, tracks how many frames are open and
//! owns the one backpatching primitive every control-flow construct uses.

use rustc_hash::FxHashMap as HashMap;

use super::instr::{Instruction, Operand};
use super::{Assembly, CodegenError};
use crate::ast::Span;
use crate::sema::table::SymbolEntry;

/// Position of a forward jump's `push #PC+k` awaiting its offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct JumpSlot(usize);

pub struct Emitter {
    instructions: Vec<Instruction>,
    notes: HashMap<usize, String>,
    open_frames: usize,
    /// Frames open when the current function was entered
    function_base: Option<usize>,
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Emitter {
    pub fn new() -> Self {
        Self {
            instructions: Vec::new(),
            notes: HashMap::default(),
            open_frames: 0,
            function_base: None,
        }
    }

    /// Index the next instruction will get
    pub fn position(&self) -> usize {
        self.instructions.len()
    }

    pub fn emit(&mut self, instruction: Instruction) {
        log::trace!("{:>5}: {}", self.instructions.len(), instruction);
        self.instructions.push(instruction);
    }

    pub fn push(&mut self, operand: Operand) {
        self.emit(Instruction::Push(operand));
    }

    /// Attach a note to the next instruction
    pub fn note(&mut self, text: impl Into<String>) {
        self.notes.insert(self.position(), text.into());
    }

    pub fn emit_label(&mut self, name: &str) {
        self.emit(Instruction::Label(name.to_string()));
    }

    // ========================================================================
    // FRAMES
    // ========================================================================

    pub fn open_frame(&mut self, slots: usize) {
        self.push(Operand::Int(slots as i64));
        self.emit(Instruction::Oframe);
        self.open_frames += 1;
    }

    pub fn close_frame(&mut self) -> Result<(), CodegenError> {
        self.open_frames = self
            .open_frames
            .checked_sub(1)
            .ok_or(CodegenError::FrameUnderflow {
                name: "cframe".to_string(),
                span: None,
            })?;
        self.emit(Instruction::Cframe);
        Ok(())
    }

    /// Frames between the innermost open frame and the one holding `entry`
    fn frame_level(&self, entry: &SymbolEntry, span: Span) -> Result<usize, CodegenError> {
        self.open_frames
            .checked_sub(1 + entry.level)
            .ok_or_else(|| CodegenError::FrameUnderflow {
                name: entry.name.clone(),
                span: Some(span),
            })
    }

    /// Frame-relative address of a resolved symbol at the current depth
    pub fn address(&self, entry: &SymbolEntry, span: Span) -> Result<Operand, CodegenError> {
        Ok(Operand::Address {
            index: entry.index,
            level: self.frame_level(entry, span)?,
        })
    }

    /// Store the value on top of the operand stack into a symbol's slot
    pub fn emit_store(&mut self, entry: &SymbolEntry, span: Span) -> Result<(), CodegenError> {
        let level = self.frame_level(entry, span)?;
        self.push(Operand::Int(entry.index as i64));
        self.push(Operand::Int(level as i64));
        self.emit(Instruction::St);
        Ok(())
    }

    pub fn enter_function(&mut self) {
        self.function_base = Some(self.open_frames);
    }

    pub fn exit_function(&mut self) {
        self.function_base = None;
    }

    /// Frames a `return` must close, or `None` outside any function
    pub fn function_frames(&self) -> Option<usize> {
        self.function_base.map(|base| self.open_frames - base)
    }

    // ========================================================================
    // BACKPATCHING
    // ========================================================================

    /// Emit `push #PC+?` and `cjmp` (or `jmp`) with the offset left open
    pub fn emit_forward_jump(&mut self, conditional: bool) -> JumpSlot {
        let slot = JumpSlot(self.position());
        self.push(Operand::PcOffset(0));
        self.emit(if conditional {
            Instruction::Cjmp
        } else {
            Instruction::Jmp
        });
        slot
    }

    /// Point a forward jump at the next instruction to be emitted
    pub fn patch_to_here(&mut self, slot: JumpSlot) -> Result<(), CodegenError> {
        let offset = (self.position() - slot.0) as i64;
        match self.instructions.get_mut(slot.0) {
            Some(Instruction::Push(Operand::PcOffset(target))) => {
                *target = offset;
                Ok(())
            }
            _ => Err(CodegenError::UnpatchableJump { at: slot.0 }),
        }
    }

    /// Emit an unconditional jump back to an earlier position
    pub fn emit_backward_jump(&mut self, target: usize) {
        let offset = self.position() as i64 - target as i64;
        self.push(Operand::PcOffset(-offset));
        self.emit(Instruction::Jmp);
    }

    pub fn finish(self) -> Assembly {
        Assembly {
            instructions: self.instructions,
            notes: self.notes,
        }
    }
}
