//! Lexical environments.
//!
//! An environment maps names to values and optionally points at an outer
//! environment. Environments are shared: the scope that created one, any child
//! scope and every closure defined inside it may hold a handle, and the
//! environment lives as long as the longest holder.
//!
//! Outer links only ever point from a child to the scope it was created in, so
//! the chain itself is acyclic.
//!
//! ```
//! use sparrow_core::env::Env;
//! use sparrow_core::values::Value;
//!
//! let global = Env::new();
//! global.define("x", Value::Int(1));
//!
//! let inner = Env::with_outer(&global);
//! assert_eq!(inner.get("x").and_then(|v| v.as_int()), Some(1));
//!
//! // Unbound names are declared where the write happens.
//! inner.put("y", Value::Int(2));
//! assert!(global.get("y").is_none());
//! ```

use alloc::rc::Rc;
use core::cell::RefCell;
use core::fmt;

use hashbrown::HashMap;

use crate::{String, Vec, values::Value};

/// Shared handle to one scope of the environment chain.
///
/// Cloning the handle does not copy the scope.
#[derive(Clone)]
pub struct Env {
    inner: Rc<RefCell<Scope>>,
}

struct Scope {
    bindings: HashMap<String, Value>,
    outer: Option<Env>,
}

impl Env {
    /// Create a root environment.
    pub fn new() -> Self {
        Self::from_scope(None)
    }

    /// Create an environment whose outer link is `outer`.
    pub fn with_outer(outer: &Env) -> Self {
        Self::from_scope(Some(outer.clone()))
    }

    fn from_scope(outer: Option<Env>) -> Self {
        Env {
            inner: Rc::new(RefCell::new(Scope {
                bindings: HashMap::new(),
                outer,
            })),
        }
    }

    pub fn outer(&self) -> Option<Env> {
        self.inner.borrow().outer.clone()
    }

    /// Look a name up, walking outward. Returns `None` if no scope binds it.
    pub fn get(&self, name: &str) -> Option<Value> {
        let env = self.locate(name)?;
        let scope = env.inner.borrow();
        scope.bindings.get(name).cloned()
    }

    /// Look a name up in this scope only.
    pub fn get_local(&self, name: &str) -> Option<Value> {
        self.inner.borrow().bindings.get(name).cloned()
    }

    /// Assign `value` to `name`.
    ///
    /// Overwrites the binding in the innermost scope of the chain that already
    /// binds `name`. If none does, the binding is created in this scope.
    pub fn put(&self, name: &str, value: Value) {
        let target = self.locate(name).unwrap_or_else(|| self.clone());
        target.define(name, value);
    }

    /// Bind `name` in this scope, shadowing any outer binding.
    pub fn define(&self, name: &str, value: Value) {
        let mut scope = self.inner.borrow_mut();
        match scope.bindings.get_mut(name) {
            Some(slot) => *slot = value,
            None => {
                scope.bindings.insert(String::from(name), value);
            }
        }
    }

    /// Whether this scope (ignoring outer scopes) binds `name`.
    pub fn contains_local(&self, name: &str) -> bool {
        self.inner.borrow().bindings.contains_key(name)
    }

    /// Names bound in this scope, sorted.
    pub fn local_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.inner.borrow().bindings.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Whether both handles refer to the same scope.
    pub fn ptr_eq(&self, other: &Env) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Find the innermost scope binding `name`.
    ///
    /// Iterative so deep chains cannot overflow the stack.
    fn locate(&self, name: &str) -> Option<Env> {
        let mut current = self.clone();
        loop {
            let outer = {
                let scope = current.inner.borrow();
                if scope.bindings.contains_key(name) {
                    None
                } else {
                    match &scope.outer {
                        Some(outer) => Some(outer.clone()),
                        None => return None,
                    }
                }
            };
            match outer {
                Some(outer) => current = outer,
                None => return Some(current),
            }
        }
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}

// Values stored in a scope may hold the scope itself (a function defined in
// it), so only the names are printed.
impl fmt::Debug for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Env")
            .field("names", &self.local_names())
            .field("has_outer", &self.inner.borrow().outer.is_some())
            .finish()
    }
}
