//! Sparrow - a small dynamically-typed scripting language
//!
//! # Overview
//!
//! Sparrow programs are syntax trees of expressions, statements, functions,
//! closures and classes. This crate runs them in two ways:
//!
//! - **Evaluation**: walk the tree against a global environment
//!   ([`Engine::run`]).
//! - **Compilation**: emit stack-machine bytecode for a host interpreter
//!   ([`Engine::compile`]).
//!
//! Both go through the same resolution pass, so they agree on which names
//! are locals, captured closure variables or globals.
//!
//! # Quick Start
//!
//! ```
//! use sparrow::{BinaryOp, Engine, Value, build::*};
//!
//! let mut engine = Engine::default();
//!
//! // def make_adder(n) { fun (x) { x + n } }
//! engine
//!     .run(&def(
//!         "make_adder",
//!         &["n"],
//!         vec![lambda(&["x"], vec![binary(ident("x"), BinaryOp::Add, ident("n"))])],
//!     ))
//!     .unwrap();
//!
//! // make_adder(40)(2)
//! let tree = primary(
//!     ident("make_adder"),
//!     vec![arguments(vec![int(40)]), arguments(vec![int(2)])],
//! );
//! assert_eq!(engine.run(&tree).unwrap(), Value::Int(42));
//! ```
//!
//! # Native Functions
//!
//! Host functions take evaluated arguments and are registered as globals:
//!
//! ```
//! use sparrow::{Engine, EvaluatorOptions, NativeFunction, RuntimeError, Value, build::*};
//! use std::rc::Rc;
//!
//! fn square(args: &[Value]) -> Result<Value, RuntimeError> {
//!     let n = args[0].as_int().unwrap_or_default();
//!     Ok(Value::Int(n * n))
//! }
//!
//! let mut engine = Engine::new(EvaluatorOptions::default(), |env| {
//!     let square = NativeFunction::new("square", 1, square);
//!     env.define("square", Value::Native(Rc::new(square)));
//! });
//! assert_eq!(engine.run(&call(ident("square"), vec![int(9)])).unwrap(), Value::Int(81));
//! ```

// Re-export public API from sparrow_core
pub use sparrow_core::api::{Engine, Error};

// Re-export the tree and its builders
pub use sparrow_core::ast::{self, BinaryOp, Node, NodeKind, build};

// Re-export commonly used runtime types
pub use sparrow_core::env::Env;
pub use sparrow_core::values::{self, NativeFn, NativeFunction, Value};

// Re-export backends and errors
pub use sparrow_core::bytecode::{self, FunctionCode, Instruction, Program};
pub use sparrow_core::compiler::{self, CompileError};
pub use sparrow_core::evaluator::{self, EvalError, EvaluatorOptions, ResourceExceeded, RuntimeError};
pub use sparrow_core::resolver::{self, ConstantPools, ResolveError};
