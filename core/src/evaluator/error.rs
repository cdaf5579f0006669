//! Evaluation errors.
//!
//! # Error Categories
//!
//! - **Structure errors**: a node was handed to the evaluator that cannot be
//!   evaluated on its own. Always a bug in the host.
//! - **Runtime errors**: failures of the evaluated program (undefined names,
//!   bad operands, out-of-bounds access, ...).
//! - **Resource exceeded errors**: resource limit violations such as
//!   recursion deeper than [`EvaluatorOptions::max_depth`](super::EvaluatorOptions)
//!   or loops running longer than `max_iterations`.

use crate::{String, ast::StructureError};

/// Any error produced while evaluating a tree.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvalError {
    #[error(transparent)]
    Structure(#[from] StructureError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error(transparent)]
    ResourceExceeded(#[from] ResourceExceeded),
}

/// Failures of the program being evaluated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RuntimeError {
    /// The resolution pass has not visited this identifier.
    #[error("identifier '{name}' has not been resolved")]
    Unresolved { name: String },

    #[error("invalid index {index} for local variable '{name}'")]
    InvalidLocalIndex { name: String, index: i32 },

    /// A closure variable was accessed from an environment without an outer link.
    #[error("no outer environment for closure variable '{name}'")]
    NoOuterEnv { name: String },

    #[error("undefined name '{name}'")]
    UndefinedName { name: String },

    #[error("unknown superclass '{name}'")]
    UnknownSuperclass { name: String },

    /// Member not declared by the class body.
    #[error("bad member access: '{member}'")]
    AccessError { member: String },

    #[error("index {index} out of bounds (length: {len})")]
    IndexOutOfBounds { index: i64, len: usize },

    #[error("division by zero")]
    DivisionByZero,

    #[error("bad operand for '{op}': {operand}")]
    BadOperand { op: &'static str, operand: &'static str },

    #[error("bad operands for '{op}': {left} and {right}")]
    BadOperands {
        op: &'static str,
        left: &'static str,
        right: &'static str,
    },

    #[error("{type_name} is not callable")]
    NotCallable { type_name: &'static str },

    #[error("'{name}' expects {expected} arguments, got {got}")]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },

    #[error("invalid assignment target: {target}")]
    InvalidAssignTarget { target: String },

    #[error("cannot access member '{member}' of {type_name}")]
    BadMemberReceiver {
        member: String,
        type_name: &'static str,
    },

    #[error("cannot index into {type_name}")]
    BadIndexReceiver { type_name: &'static str },

    #[error("array index must be an int, got {type_name}")]
    BadIndex { type_name: &'static str },

    /// A native function rejected its arguments.
    #[error("{name}: {message}")]
    BadArgument { name: &'static str, message: String },
}

/// Resource limit violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResourceExceeded {
    #[error("evaluation stack overflow: depth {depth} exceeds maximum of {max_depth}")]
    StackOverflow { depth: usize, max_depth: usize },

    #[error("loop exceeded {max_iterations} iterations")]
    IterationLimit { max_iterations: usize },
}

impl EvalError {
    /// The runtime error, if this is one.
    pub fn as_runtime(&self) -> Option<&RuntimeError> {
        match self {
            EvalError::Runtime(e) => Some(e),
            _ => None,
        }
    }
}
