//! Native functions available to every program.
//!
//! [`register`] binds them in the global environment:
//!
//! - `print(x)`: write the display form of `x` to stdout, yields `nil`.
//! - `array(n)`: a fresh array of `n` nil slots.
//! - `len(x)`: the length of an array, or the number of characters in a string.

use alloc::rc::Rc;

use crate::{
    env::Env,
    evaluator::RuntimeError,
    format,
    values::{Array, NativeFn, NativeFunction, Value},
};

const NATIVES: &[(&str, usize, NativeFn)] = &[
    ("print", 1, print),
    ("array", 1, array),
    ("len", 1, len),
];

/// Register all native functions in the environment.
pub fn register(env: &Env) {
    for &(name, arity, func) in NATIVES {
        let native = NativeFunction::new(name, arity, func);
        env.define(name, Value::Native(Rc::new(native)));
    }
}

fn print(args: &[Value]) -> Result<Value, RuntimeError> {
    println!("{}", args[0]);
    Ok(Value::Nil)
}

fn array(args: &[Value]) -> Result<Value, RuntimeError> {
    let len = match &args[0] {
        Value::Int(n) => usize::try_from(*n).map_err(|_| RuntimeError::BadArgument {
            name: "array",
            message: format!("length must not be negative, got {}", n),
        })?,
        other => {
            return Err(RuntimeError::BadArgument {
                name: "array",
                message: format!("expected an int, got {}", other.type_name()),
            });
        }
    };
    Ok(Value::Array(Rc::new(Array::new(len))))
}

fn len(args: &[Value]) -> Result<Value, RuntimeError> {
    let n = match &args[0] {
        Value::Array(array) => array.len(),
        Value::Str(s) => s.chars().count(),
        other => {
            return Err(RuntimeError::BadArgument {
                name: "len",
                message: format!("expected an array or a string, got {}", other.type_name()),
            });
        }
    };
    // Lengths come from i64 indices or in-memory strings, both fit.
    Ok(Value::Int(n as i64))
}
