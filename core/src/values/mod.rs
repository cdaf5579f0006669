//! Runtime values.
//!
//! Scalars are stored inline. Functions, classes, instances and arrays are
//! reference values: cloning a [`Value`] clones the handle, and two handles
//! are equal only if they point at the same object.

mod array;
mod class;
mod function;

#[cfg(test)]
mod value_test;

pub use array::Array;
pub use class::{ClassInfo, ClassInstance};
pub use function::{Function, NativeFn, NativeFunction};

use alloc::rc::Rc;
use core::fmt;

/// A runtime value.
#[derive(Clone)]
pub enum Value {
    /// The absence of a value: empty array slots, loops, definitions.
    Nil,
    Int(i64),
    Float(f64),
    Str(Rc<str>),
    Function(Rc<Function>),
    Native(Rc<NativeFunction>),
    Class(Rc<ClassInfo>),
    Instance(Rc<ClassInstance>),
    Array(Rc<Array>),
}

impl Value {
    pub fn str(s: &str) -> Value {
        Value::Str(Rc::from(s))
    }

    /// Integer truth value, as produced by comparisons.
    pub fn bool(b: bool) -> Value {
        Value::Int(i64::from(b))
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Rc<Array>> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_instance(&self) -> Option<&Rc<ClassInstance>> {
        match self {
            Value::Instance(i) => Some(i),
            _ => None,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Numeric view used by mixed arithmetic.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Condition truthiness: non-zero numbers are true, `Nil` is false and
    /// every other value is true.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Nil => false,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            _ => true,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Function(_) => "function",
            Value::Native(_) => "native function",
            Value::Class(_) => "class",
            Value::Instance(_) => "object",
            Value::Array(_) => "array",
        }
    }

    /// Equality as seen by the language.
    ///
    /// Numbers compare numerically, an `Int` and a `Float` after promotion.
    /// Strings compare by content. Reference values compare by identity.
    pub fn equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
                self.as_number() == other.as_number()
            }
            _ => self == other,
        }
    }
}

/// Strict structural equality: no numeric promotion, so `Int(1) != Float(1.0)`.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Native(a), Value::Native(b)) => Rc::ptr_eq(a, b),
            (Value::Class(a), Value::Class(b)) => Rc::ptr_eq(a, b),
            (Value::Instance(a), Value::Instance(b)) => Rc::ptr_eq(a, b),
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::str(s)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{:?}", x),
            Value::Str(s) => f.write_str(s),
            Value::Function(func) => write!(f, "<fun {}>", func.name()),
            Value::Native(func) => write!(f, "<native {}>", func.name()),
            Value::Class(class) => write!(f, "<class {}>", class.name()),
            Value::Instance(obj) => write!(f, "<object {}>", obj.class().name()),
            // Arrays may contain themselves.
            Value::Array(array) => write!(f, "<array of {}>", array.len()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{:?}", s),
            other => fmt::Display::fmt(other, f),
        }
    }
}
