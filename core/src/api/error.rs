//! Public error type for the engine.

use crate::{compiler::CompileError, evaluator::EvalError, resolver::ResolveError};

/// Any failure of an [`Engine`](super::Engine) operation, tagged with the
/// phase it came from.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("resolution failed: {0}")]
    Resolve(#[from] ResolveError),

    #[error("compilation failed: {0}")]
    Compile(#[from] CompileError),

    #[error("evaluation failed: {0}")]
    Eval(#[from] EvalError),
}
