//! Public API for embedding the language.
//!
//! [`Engine`] owns what a host needs to run trees produced by a parser: the
//! constant pools shared by every resolution, the global environment with the
//! native functions registered, and the evaluator limits.
//!
//! # Example
//!
//! ```
//! use sparrow_core::api::Engine;
//! use sparrow_core::ast::{BinaryOp, build::*};
//! use sparrow_core::evaluator::EvaluatorOptions;
//! use sparrow_core::values::Value;
//!
//! let mut engine = Engine::new(EvaluatorOptions::default(), |env| {
//!     env.define("answer", Value::Int(41));
//! });
//!
//! let tree = binary(ident("answer"), BinaryOp::Add, int(1));
//! assert_eq!(engine.run(&tree).unwrap(), Value::Int(42));
//! ```

mod engine;
mod error;

#[cfg(test)]
mod engine_test;

pub use engine::Engine;
pub use error::Error;
