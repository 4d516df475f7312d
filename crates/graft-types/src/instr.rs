//! Instructions and instruction streams.
//!
//! A stream owns its instructions exclusively. Combining two streams consumes
//! both and re-owns every instruction in the result; nothing is aliased.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::opcode::Opcode;

/// A single operand of an instruction.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operand {
    /// An immediate value.
    Immediate(i64),
    /// A local-variable slot reference.
    Slot(u16),
    /// An argument reference.
    Arg(u16),
    /// A branch target, as an instruction index.
    Target(u32),
    /// A callee name.
    Symbol(String),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Immediate(v) => write!(f, "{v}"),
            Operand::Slot(s) => write!(f, "$.{s}"),
            Operand::Arg(a) => write!(f, "arg.{a}"),
            Operand::Target(t) => write!(f, "@{t}"),
            Operand::Symbol(name) => write!(f, "{name}"),
        }
    }
}

/// One instruction: an opcode tag plus zero or more operands.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Instruction {
    pub opcode: Opcode,
    pub operands: Vec<Operand>,
}

impl Instruction {
    /// Create an instruction with no operands.
    pub fn new(opcode: Opcode) -> Self {
        Self {
            opcode,
            operands: Vec::new(),
        }
    }

    /// Append an operand, builder style.
    pub fn with_operand(mut self, operand: Operand) -> Self {
        self.operands.push(operand);
        self
    }

    /// Returns `true` if executing this instruction ends the method.
    pub fn is_terminator(&self) -> bool {
        self.opcode.is_terminator()
    }

    /// Returns `true` if this instruction has no observable effect.
    pub fn is_nop(&self) -> bool {
        self.opcode.is_nop()
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.opcode)?;
        for operand in &self.operands {
            write!(f, " {operand}")?;
        }
        Ok(())
    }
}

/// An ordered, owned sequence of instructions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionStream(Vec<Instruction>);

impl InstructionStream {
    /// Create an empty stream.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one instruction.
    pub fn push(&mut self, instruction: Instruction) {
        self.0.push(instruction);
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the stream holds no instructions.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The instruction at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<&Instruction> {
        self.0.get(index)
    }

    /// Iterate over the instructions in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.0.iter()
    }

    /// The instructions as a slice.
    pub fn as_slice(&self) -> &[Instruction] {
        &self.0
    }

    /// Append every instruction of `other`, consuming both streams.
    pub fn concat(mut self, other: Self) -> Self {
        self.0.extend(other.0);
        self
    }

    /// Insert every instruction of `other` at `index`, shifting instructions
    /// at or after `index` later.
    ///
    /// `index` must be at most `self.len()`.
    pub fn insert_at(mut self, index: usize, other: Self) -> Self {
        let tail = self.0.split_off(index);
        self.0.extend(other.0);
        self.0.extend(tail);
        self
    }

    /// Remove every terminator instruction.
    pub fn without_terminators(self) -> Self {
        Self(self.0.into_iter().filter(|i| !i.is_terminator()).collect())
    }

    /// Remove every no-op instruction.
    pub fn without_nops(self) -> Self {
        Self(self.0.into_iter().filter(|i| !i.is_nop()).collect())
    }

    /// The opcode tags in stream order.
    pub fn opcodes(&self) -> Vec<Opcode> {
        self.0.iter().map(|i| i.opcode).collect()
    }
}

impl From<Vec<Instruction>> for InstructionStream {
    fn from(instructions: Vec<Instruction>) -> Self {
        Self(instructions)
    }
}

impl FromIterator<Instruction> for InstructionStream {
    fn from_iter<T: IntoIterator<Item = Instruction>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for InstructionStream {
    type Item = Instruction;
    type IntoIter = std::vec::IntoIter<Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a InstructionStream {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
