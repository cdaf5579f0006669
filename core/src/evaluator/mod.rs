//! Tree-walking evaluator.
//!
//! The evaluator interprets resolved syntax trees directly against an
//! [`Env`] chain and produces runtime [`Value`]s. It is the reference
//! semantics; the bytecode compiler must agree with it.
//!
//! ## Design Principles
//!
//! - **Never panic**: malformed trees and failing programs produce errors.
//! - **Stack-safe**: depth tracking stops runaway recursion before the host
//!   stack overflows.
//! - **Resolved input**: identifiers are read and written according to the
//!   kind the resolver assigned them. An unresolved identifier is an error.
//!
//! ## Example
//!
//! ```
//! use sparrow_core::ast::{BinaryOp, build::*};
//! use sparrow_core::env::Env;
//! use sparrow_core::evaluator;
//! use sparrow_core::resolver::{ConstantPools, Resolver};
//! use sparrow_core::values::Value;
//!
//! // x = 20; x * 2 + 2
//! let tree = block(vec![
//!     assign(ident("x"), int(20)),
//!     binary(binary(ident("x"), BinaryOp::Mul, int(2)), BinaryOp::Add, int(2)),
//! ]);
//! let mut pools = ConstantPools::new();
//! Resolver::new(&mut pools).resolve(&tree).unwrap();
//!
//! let result = evaluator::eval(&tree, &Env::new()).unwrap();
//! assert_eq!(result, Value::Int(42));
//! ```

mod error;
mod eval;
mod operators;


pub use error::{EvalError, ResourceExceeded, RuntimeError};
pub use operators::{binary_op, negate};

use crate::{ast::Node, env::Env, values::Value};

/// Resource limits for evaluation.
///
/// # Example
///
/// ```
/// use sparrow_core::evaluator::{Evaluator, EvaluatorOptions};
///
/// let evaluator = Evaluator::new(EvaluatorOptions {
///     max_depth: 500,
///     max_iterations: Some(10_000),
/// });
/// ```
#[derive(Debug, Clone)]
pub struct EvaluatorOptions {
    /// Maximum evaluation stack depth (for recursion protection).
    ///
    /// Counted per evaluated node. The host stack grows on demand, so this
    /// limit is what stops runaway recursion.
    ///
    /// Default: 1000
    pub max_depth: usize,

    /// Maximum number of iterations of a single loop (if Some).
    ///
    /// Default: None
    pub max_iterations: Option<usize>,
}

impl Default for EvaluatorOptions {
    fn default() -> Self {
        Self {
            max_depth: 1000,
            max_iterations: None,
        }
    }
}

/// Evaluator state for one evaluation: the options and the current depth.
#[derive(Debug, Default)]
pub struct Evaluator {
    options: EvaluatorOptions,
    depth: usize,
}

impl Evaluator {
    pub fn new(options: EvaluatorOptions) -> Self {
        Self { options, depth: 0 }
    }

    pub fn options(&self) -> &EvaluatorOptions {
        &self.options
    }

    /// Current nesting depth. Zero between evaluations.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

/// Evaluate a resolved tree in `env` with default limits.
pub fn eval(node: &Node, env: &Env) -> Result<Value, EvalError> {
    Evaluator::default().eval(node, env)
}
