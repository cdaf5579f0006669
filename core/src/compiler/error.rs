//! Bytecode compilation errors.

use crate::{String, ast::NodeKind};

/// Errors that can occur during bytecode compilation.
///
/// Apart from operand overflow these indicate a tree that was not resolved or
/// was handed to the compiler in pieces.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    /// A literal or identifier without a resolution result.
    #[error("'{node}' has not been resolved")]
    Unresolved { node: String },

    #[error("invalid index {index} for variable '{name}'")]
    InvalidLocalIndex { name: String, index: i32 },

    /// Nothing is being compiled: no function is on the compile target stack.
    #[error("no compile target")]
    NoCompileTarget,

    #[error("{} cannot be compiled on its own", kind.name())]
    NotCompilable { kind: NodeKind },

    #[error("invalid assignment target: {target}")]
    InvalidAssignTarget { target: String },

    /// An operand (pool index, argument count, jump offset, ...) does not fit
    /// its instruction.
    #[error("{operand} does not fit in an instruction operand")]
    OperandOverflow { operand: &'static str },
}
