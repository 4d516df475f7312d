use std::fmt;

use serde::{Deserialize, Serialize};

/// The instruction set carried by graft modules.
///
/// The merge engine treats instructions as opaque records; the only
/// classifications it consults are [`Opcode::is_terminator`] and
/// [`Opcode::is_nop`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opcode {
    /// No observable effect; padding or placeholder.
    Nop,
    /// End method execution and return control to the caller.
    Ret,
    /// Push a constant onto the operand stack.
    LoadConst,
    /// Push the value of a local slot.
    LoadLocal,
    /// Pop the top of the stack into a local slot.
    StoreLocal,
    /// Push the value of an argument.
    LoadArg,
    Add,
    Sub,
    Mul,
    Div,
    /// Call a named function.
    Call,
    /// Unconditional jump to a target instruction index.
    Jump,
    /// Jump when the popped value is false.
    JumpIfFalse,
    /// Discard the top of the operand stack.
    Pop,
    /// Duplicate the top of the operand stack.
    Dup,
}

impl Opcode {
    /// Returns `true` if executing this instruction ends the method.
    pub fn is_terminator(&self) -> bool {
        matches!(self, Opcode::Ret)
    }

    /// Returns `true` if this instruction has no observable effect.
    pub fn is_nop(&self) -> bool {
        matches!(self, Opcode::Nop)
    }

    /// Lowercase mnemonic used in listings.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Opcode::Nop => "nop",
            Opcode::Ret => "ret",
            Opcode::LoadConst => "load.const",
            Opcode::LoadLocal => "load.local",
            Opcode::StoreLocal => "store.local",
            Opcode::LoadArg => "load.arg",
            Opcode::Add => "add",
            Opcode::Sub => "sub",
            Opcode::Mul => "mul",
            Opcode::Div => "div",
            Opcode::Call => "call",
            Opcode::Jump => "jump",
            Opcode::JumpIfFalse => "jump.false",
            Opcode::Pop => "pop",
            Opcode::Dup => "dup",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
