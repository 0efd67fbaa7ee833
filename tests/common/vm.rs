//! Reference interpreter for generated listings
//!
//! Executes an [`Assembly`] against the instruction contract documented in
//! `parlc::codegen::instr`: one operand stack, one stack of frames shared by
//! every activation, and a call stack of return addresses. Output goes into
//! recorded effects instead of a real display.

use parlc::Assembly;
use parlc::codegen::{Instruction, Operand};
use rustc_hash::FxHashMap as HashMap;

pub const DISPLAY_WIDTH: i64 = 36;
pub const DISPLAY_HEIGHT: i64 = 36;
const STEP_LIMIT: usize = 100_000;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    Colour(u32),
    Str(String),
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{}", x),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Colour(rgb) => write!(f, "#{:06x}", rgb),
            Value::Str(s) => f.write_str(s),
        }
    }
}

/// Everything a run left behind
#[derive(Debug, Default)]
pub struct Machine {
    pub printed: Vec<String>,
    pub pixels: HashMap<(i64, i64), u32>,
    pub delays: Vec<i64>,
    pub stack: Vec<Value>,
    frames: Vec<Vec<Option<Value>>>,
    calls: Vec<usize>,
    pub steps: usize,
}

impl Machine {
    pub fn pixel(&self, x: i64, y: i64) -> u32 {
        self.pixels.get(&(x, y)).copied().unwrap_or(0)
    }

    pub fn open_frames(&self) -> usize {
        self.frames.len()
    }

    fn pop(&mut self) -> Value {
        self.stack.pop().expect("operand stack underflow")
    }

    fn pop_int(&mut self) -> i64 {
        match self.pop() {
            Value::Int(n) => n,
            other => panic!("expected int on the stack, found {:?}", other),
        }
    }

    fn pop_bool(&mut self) -> bool {
        match self.pop() {
            Value::Bool(b) => b,
            other => panic!("expected bool on the stack, found {:?}", other),
        }
    }

    fn pop_colour(&mut self) -> u32 {
        match self.pop() {
            Value::Colour(rgb) => rgb,
            other => panic!("expected colour on the stack, found {:?}", other),
        }
    }

    fn frame_mut(&mut self, level: usize) -> &mut Vec<Option<Value>> {
        let depth = self.frames.len();
        assert!(level < depth, "frame level {} with {} open", level, depth);
        &mut self.frames[depth - 1 - level]
    }

    fn load(&mut self, index: usize, level: usize) -> Value {
        let frame = self.frame_mut(level);
        assert!(index < frame.len(), "slot {} outside frame of {}", index, frame.len());
        frame[index]
            .clone()
            .unwrap_or_else(|| panic!("read of uninitialised slot [{}:{}]", index, level))
    }

    fn store(&mut self, index: usize, level: usize, value: Value) {
        let frame = self.frame_mut(level);
        assert!(index < frame.len(), "slot {} outside frame of {}", index, frame.len());
        frame[index] = Some(value);
    }

    fn operand_value(&mut self, operand: &Operand, pc: usize, labels: &HashMap<String, usize>) -> Value {
        match operand {
            Operand::Int(n) => Value::Int(*n),
            Operand::Float(x) => Value::Float(*x),
            Operand::Bool(b) => Value::Bool(*b),
            Operand::Colour(rgb) => Value::Colour(*rgb),
            Operand::Str(s) => Value::Str(s.clone()),
            Operand::Address { index, level } => self.load(*index, *level),
            Operand::PcOffset(k) => Value::Int(pc as i64 + k),
            Operand::Label(name) => {
                let target = labels
                    .get(name)
                    .unwrap_or_else(|| panic!("call to unknown label .{}", name));
                Value::Int(*target as i64)
            }
        }
    }

    fn arithmetic(&mut self, instruction: &Instruction) -> Value {
        let left = self.pop();
        let right = self.pop();
        match (left, right) {
            (Value::Int(l), Value::Int(r)) => match instruction {
                Instruction::Add => Value::Int(l + r),
                Instruction::Sub => Value::Int(l - r),
                Instruction::Mul => Value::Int(l * r),
                Instruction::Div => Value::Int(l / r),
                Instruction::Mod => Value::Int(l % r),
                Instruction::Lt => Value::Bool(l < r),
                Instruction::Gt => Value::Bool(l > r),
                Instruction::Le => Value::Bool(l <= r),
                Instruction::Ge => Value::Bool(l >= r),
                Instruction::Eq => Value::Bool(l == r),
                other => panic!("{} on ints", other),
            },
            (Value::Float(l), Value::Float(r)) => match instruction {
                Instruction::Add => Value::Float(l + r),
                Instruction::Sub => Value::Float(l - r),
                Instruction::Mul => Value::Float(l * r),
                Instruction::Div => Value::Float(l / r),
                Instruction::Lt => Value::Bool(l < r),
                Instruction::Gt => Value::Bool(l > r),
                Instruction::Le => Value::Bool(l <= r),
                Instruction::Ge => Value::Bool(l >= r),
                Instruction::Eq => Value::Bool(l == r),
                other => panic!("{} on floats", other),
            },
            (Value::Bool(l), Value::Bool(r)) => match instruction {
                Instruction::And => Value::Bool(l && r),
                Instruction::Or => Value::Bool(l || r),
                Instruction::Eq => Value::Bool(l == r),
                other => panic!("{} on bools", other),
            },
            (l, r) if *instruction == Instruction::Eq => Value::Bool(l == r),
            (l, r) => panic!("{} on {:?} and {:?}", instruction, l, r),
        }
    }
}

/// Run a listing from `.main` until `halt`
pub fn run(assembly: &Assembly) -> Machine {
    let code = &assembly.instructions;
    let labels: HashMap<String, usize> = code
        .iter()
        .enumerate()
        .filter_map(|(i, instruction)| match instruction {
            Instruction::Label(name) => Some((name.clone(), i)),
            _ => None,
        })
        .collect();

    let mut vm = Machine::default();
    let mut pc = *labels.get("main").expect("no .main label");
    let mut seed: u64 = 0x2545_f491;

    loop {
        vm.steps += 1;
        assert!(vm.steps <= STEP_LIMIT, "step limit exceeded");
        let instruction = code
            .get(pc)
            .unwrap_or_else(|| panic!("pc {} ran off the end", pc));
        let mut next = pc + 1;

        match instruction {
            Instruction::Label(_) => {}
            Instruction::Push(operand) => {
                let value = vm.operand_value(operand, pc, &labels);
                vm.stack.push(value);
            }
            Instruction::St => {
                let level = vm.pop_int() as usize;
                let index = vm.pop_int() as usize;
                let value = vm.pop();
                vm.store(index, level, value);
            }
            Instruction::Not => {
                let b = vm.pop_bool();
                vm.stack.push(Value::Bool(!b));
            }
            Instruction::Add
            | Instruction::Sub
            | Instruction::Mul
            | Instruction::Div
            | Instruction::Mod
            | Instruction::Lt
            | Instruction::Gt
            | Instruction::Le
            | Instruction::Ge
            | Instruction::Eq
            | Instruction::And
            | Instruction::Or => {
                let result = vm.arithmetic(instruction);
                vm.stack.push(result);
            }
            Instruction::Oframe => {
                let size = vm.pop_int() as usize;
                vm.frames.push(vec![None; size]);
            }
            Instruction::Cframe => {
                vm.frames.pop().expect("cframe with no open frame");
            }
            Instruction::Jmp => next = vm.pop_int() as usize,
            Instruction::Cjmp => {
                let target = vm.pop_int() as usize;
                if !vm.pop_bool() {
                    next = target;
                }
            }
            Instruction::Call => {
                let target = vm.pop_int() as usize;
                vm.calls.push(next);
                next = target;
            }
            Instruction::Ret => next = vm.calls.pop().expect("ret with empty call stack"),
            Instruction::Halt => break,
            Instruction::Drop => {
                vm.pop();
            }
            Instruction::Width => vm.stack.push(Value::Int(DISPLAY_WIDTH)),
            Instruction::Height => vm.stack.push(Value::Int(DISPLAY_HEIGHT)),
            Instruction::Read => {
                let x = vm.pop_int();
                let y = vm.pop_int();
                let rgb = vm.pixel(x, y);
                vm.stack.push(Value::Colour(rgb));
            }
            Instruction::Irnd => {
                let bound = vm.pop_int();
                seed ^= seed << 13;
                seed ^= seed >> 7;
                seed ^= seed << 17;
                vm.stack.push(Value::Int((seed % bound.max(1) as u64) as i64));
            }
            Instruction::Print => {
                let value = vm.pop();
                vm.printed.push(value.to_string());
            }
            Instruction::Delay => {
                let millis = vm.pop_int();
                vm.delays.push(millis);
            }
            Instruction::Write => {
                let x = vm.pop_int();
                let y = vm.pop_int();
                let rgb = vm.pop_colour();
                vm.pixels.insert((x, y), rgb);
            }
            Instruction::WriteBox => {
                let x = vm.pop_int();
                let y = vm.pop_int();
                let w = vm.pop_int();
                let h = vm.pop_int();
                let rgb = vm.pop_colour();
                for dx in 0..w {
                    for dy in 0..h {
                        vm.pixels.insert((x + dx, y + dy), rgb);
                    }
                }
            }
        }
        pc = next;
    }

    vm
}
