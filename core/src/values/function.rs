//! Callable values: user functions and closures, and native functions.

use alloc::rc::Rc;
use core::fmt;

use super::Value;
use crate::{
    String,
    ast::{BlockStmnt, ParameterList},
    env::Env,
    evaluator::RuntimeError,
};

/// A user function or closure.
///
/// Holds the environment it was defined in. Every call runs in a fresh
/// activation environment chained to that definition environment, never to
/// the caller's.
pub struct Function {
    name: String,
    params: Rc<ParameterList>,
    body: Rc<BlockStmnt>,
    env: Env,
}

impl Function {
    pub fn new(
        name: impl Into<String>,
        params: Rc<ParameterList>,
        body: Rc<BlockStmnt>,
        env: Env,
    ) -> Self {
        Self {
            name: name.into(),
            params,
            body,
            env,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &Rc<ParameterList> {
        &self.params
    }

    pub fn body(&self) -> &Rc<BlockStmnt> {
        &self.body
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Environment the function was defined in.
    pub fn definition_env(&self) -> &Env {
        &self.env
    }

    /// A new, empty activation environment for one call.
    pub fn runtime_env(&self) -> Env {
        Env::with_outer(&self.env)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("arity", &self.arity())
            .finish()
    }
}

/// Signature of host functions callable from scripts.
///
/// Arguments are already evaluated and their count matches the declared
/// arity.
pub type NativeFn = fn(args: &[Value]) -> Result<Value, RuntimeError>;

/// A host function exposed to scripts.
///
/// # Example
///
/// ```
/// use sparrow_core::evaluator::RuntimeError;
/// use sparrow_core::values::{NativeFunction, Value};
///
/// fn double(args: &[Value]) -> Result<Value, RuntimeError> {
///     Ok(Value::Int(args[0].as_int().unwrap_or(0) * 2))
/// }
///
/// let func = NativeFunction::new("double", 1, double);
/// assert_eq!(func.invoke(&[Value::Int(21)]).unwrap(), Value::Int(42));
/// assert!(func.invoke(&[]).is_err());
/// ```
pub struct NativeFunction {
    name: &'static str,
    arity: usize,
    func: NativeFn,
}

impl NativeFunction {
    pub fn new(name: &'static str, arity: usize, func: NativeFn) -> Self {
        Self { name, arity, func }
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Check the argument count and call the host function.
    pub fn invoke(&self, args: &[Value]) -> Result<Value, RuntimeError> {
        if args.len() != self.arity {
            return Err(RuntimeError::ArityMismatch {
                name: String::from(self.name),
                expected: self.arity,
                got: args.len(),
            });
        }
        (self.func)(args)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish()
    }
}
