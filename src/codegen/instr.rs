//! Target instruction set
//!
//! The virtual machine executes one instruction per line against an operand
//! stack and a stack of frames. The generated code relies on this contract:
//!
//! - `push v` pushes a literal, a frame slot `[index:level]`, a function
//!   address `.name` or a program counter offset `#PC+k` / `#PC-k`. Offsets
//!   are relative to the `push` instruction itself.
//! - Binary operators pop the left operand first, then the right one, and
//!   push the result. `not` pops one value.
//! - `st` pops a level, an index and a value, and stores the value into slot
//!   `index` of the frame `level` steps out from the innermost one.
//! - `oframe` pops a slot count and opens a frame of that size. `cframe`
//!   closes the innermost frame.
//! - `jmp` pops a target and jumps to it. `cjmp` pops a target, then a
//!   condition, and jumps when the condition is false.
//! - `call` pops a function address and transfers control. Arguments stay
//!   on the operand stack, first argument on top. `ret` returns to the caller
//!   and leaves any return value on the operand stack.
//! - `drop` discards the top of the operand stack.
//! - `write` pops x, y, colour. `writebox` pops x, y, width, height, colour.
//!   `read` pops x, y and pushes a colour. `irnd` pops a bound and pushes a
//!   random integer below it.

use std::fmt;

/// Operand of a `push`
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Int(i64),
    Float(f64),
    /// Rendered as `1` / `0`
    Bool(bool),
    /// Packed 0xRRGGBB
    Colour(u32),
    Str(String),
    /// Frame slot: `[index:level]`
    Address { index: usize, level: usize },
    /// Offset from the `push` instruction carrying it
    PcOffset(i64),
    /// Function entry point: `.name`
    Label(String),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Int(n) => write!(f, "{}", n),
            Operand::Float(x) => write!(f, "{:?}", x),
            Operand::Bool(b) => write!(f, "{}", u8::from(*b)),
            Operand::Colour(rgb) => write!(f, "#{:06x}", rgb),
            Operand::Str(s) => write!(f, "{:?}", s),
            Operand::Address { index, level } => write!(f, "[{}:{}]", index, level),
            Operand::PcOffset(offset) if *offset >= 0 => write!(f, "#PC+{}", offset),
            Operand::PcOffset(offset) => write!(f, "#PC{}", offset),
            Operand::Label(name) => write!(f, ".{}", name),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// Function entry: `.name`
    Label(String),
    Push(Operand),
    St,

    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    And,
    Or,
    Not,

    Oframe,
    Cframe,
    Jmp,
    Cjmp,
    Call,
    Ret,
    Halt,
    Drop,

    Width,
    Height,
    Read,
    Irnd,
    Print,
    Delay,
    Write,
    WriteBox,
}

impl Instruction {
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Instruction::Label(_) => "",
            Instruction::Push(_) => "push",
            Instruction::St => "st",
            Instruction::Add => "add",
            Instruction::Sub => "sub",
            Instruction::Mul => "mul",
            Instruction::Div => "div",
            Instruction::Mod => "mod",
            Instruction::Lt => "lt",
            Instruction::Gt => "gt",
            Instruction::Le => "le",
            Instruction::Ge => "ge",
            Instruction::Eq => "eq",
            Instruction::And => "and",
            Instruction::Or => "or",
            Instruction::Not => "not",
            Instruction::Oframe => "oframe",
            Instruction::Cframe => "cframe",
            Instruction::Jmp => "jmp",
            Instruction::Cjmp => "cjmp",
            Instruction::Call => "call",
            Instruction::Ret => "ret",
            Instruction::Halt => "halt",
            Instruction::Drop => "drop",
            Instruction::Width => "width",
            Instruction::Height => "height",
            Instruction::Read => "read",
            Instruction::Irnd => "irnd",
            Instruction::Print => "print",
            Instruction::Delay => "delay",
            Instruction::Write => "write",
            Instruction::WriteBox => "writebox",
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Label(name) => write!(f, ".{}", name),
            Instruction::Push(operand) => write!(f, "push {}", operand),
            other => f.write_str(other.mnemonic()),
        }
    }
}
