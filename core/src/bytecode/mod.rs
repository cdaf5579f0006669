//! Bytecode emitted by the [`compiler`](crate::compiler).
//!
//! Executing it is left to the host: this crate only defines the
//! instructions and the per-function containers they are emitted into.

mod code;
mod instruction_set;

pub use code::FunctionCode;
pub use instruction_set::Instruction;

use crate::Vec;

/// A compiled program: the top-level code and every function and class
/// body it creates, addressed by `MakeFunction`/`MakeClass` operands.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub main: FunctionCode,
    pub functions: Vec<FunctionCode>,
}

impl Program {
    /// The function a `MakeFunction(k)` or `MakeClass` operand refers to.
    pub fn function(&self, k: u32) -> Option<&FunctionCode> {
        self.functions.get(usize::try_from(k).ok()?)
    }
}
