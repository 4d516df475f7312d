//! Method bodies.

use serde::{Deserialize, Serialize};

use crate::instr::InstructionStream;
use crate::locals::VariableTable;

/// A method body: an instruction stream, a variable table, and the
/// explicit-return-value flag.
///
/// Invariant: when `has_return_value` is set, slot 0 of `locals` is the
/// return-value binding and must not be treated as a general-purpose local.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodBody {
    pub instructions: InstructionStream,
    pub locals: VariableTable,
    pub has_return_value: bool,
}

impl MethodBody {
    pub fn new(
        instructions: InstructionStream,
        locals: VariableTable,
        has_return_value: bool,
    ) -> Self {
        Self {
            instructions,
            locals,
            has_return_value,
        }
    }
}
