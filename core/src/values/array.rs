//! Fixed-length arrays.

use core::cell::RefCell;
use core::fmt;

use super::Value;
use crate::{Vec, evaluator::RuntimeError, vec};

/// A fixed-length array. Slots start out `Nil`; the length never changes.
pub struct Array {
    slots: RefCell<Vec<Value>>,
}

impl Array {
    pub fn new(len: usize) -> Self {
        Self {
            slots: RefCell::new(vec![Value::Nil; len]),
        }
    }

    pub fn from_values(values: Vec<Value>) -> Self {
        Self {
            slots: RefCell::new(values),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: i64) -> Result<Value, RuntimeError> {
        let slots = self.slots.borrow();
        let i = Self::check(index, slots.len())?;
        Ok(slots[i].clone())
    }

    pub fn set(&self, index: i64, value: Value) -> Result<(), RuntimeError> {
        let mut slots = self.slots.borrow_mut();
        let i = Self::check(index, slots.len())?;
        slots[i] = value;
        Ok(())
    }

    fn check(index: i64, len: usize) -> Result<usize, RuntimeError> {
        usize::try_from(index)
            .ok()
            .filter(|&i| i < len)
            .ok_or(RuntimeError::IndexOutOfBounds { index, len })
    }
}

impl fmt::Debug for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Array").field("len", &self.len()).finish()
    }
}
