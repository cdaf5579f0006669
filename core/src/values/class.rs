//! Classes and their instances.

use alloc::rc::Rc;
use core::fmt;

use super::Value;
use crate::{String, Vec, ast::ClassBody, ast::ClassStmnt, env::Env, evaluator::RuntimeError};

/// Class metadata created when a class statement runs.
pub struct ClassInfo {
    definition: Rc<ClassStmnt>,
    super_class: Option<Rc<ClassInfo>>,
    env: Env,
}

impl ClassInfo {
    /// Create class metadata for `definition` evaluated in `env`.
    ///
    /// The superclass name is looked up in `env`: an unbound name means no
    /// superclass, a class is linked, anything else is rejected.
    pub fn new(definition: Rc<ClassStmnt>, env: Env) -> Result<Self, RuntimeError> {
        let super_class = match definition.super_name() {
            None => None,
            Some(super_name) => match env.get(super_name.name()) {
                None => None,
                Some(Value::Class(class)) => Some(class),
                Some(_) => {
                    return Err(RuntimeError::UnknownSuperclass {
                        name: String::from(super_name.name()),
                    });
                }
            },
        };
        Ok(Self {
            definition,
            super_class,
            env,
        })
    }

    pub fn name(&self) -> &str {
        self.definition.name()
    }

    pub fn super_class(&self) -> Option<&Rc<ClassInfo>> {
        self.super_class.as_ref()
    }

    pub fn body(&self) -> &Rc<ClassBody> {
        self.definition.body()
    }

    /// Environment the class was defined in. Instance environments chain to it.
    pub fn environment(&self) -> &Env {
        &self.env
    }

    /// Bodies to run when instantiating, outermost ancestor first.
    pub fn bodies(&self) -> Vec<Rc<ClassBody>> {
        let mut bodies = Vec::new();
        let mut class = Some(self);
        while let Some(current) = class {
            bodies.push(current.body().clone());
            class = current.super_class.as_deref();
        }
        bodies.reverse();
        bodies
    }
}

impl fmt::Debug for ClassInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassInfo")
            .field("name", &self.name())
            .field("super_class", &self.super_class.as_ref().map(|c| c.name()))
            .finish()
    }
}

/// An object: a class plus the environment holding its fields and methods.
///
/// Members must be declared by a class body before they can be read or
/// written from outside.
pub struct ClassInstance {
    class: Rc<ClassInfo>,
    env: Env,
}

impl ClassInstance {
    pub fn new(class: Rc<ClassInfo>, env: Env) -> Self {
        Self { class, env }
    }

    pub fn class(&self) -> &Rc<ClassInfo> {
        &self.class
    }

    pub fn environment(&self) -> &Env {
        &self.env
    }

    pub fn read(&self, member: &str) -> Result<Value, RuntimeError> {
        self.env
            .get_local(member)
            .ok_or_else(|| Self::access_error(member))
    }

    pub fn write(&self, member: &str, value: Value) -> Result<(), RuntimeError> {
        if !self.env.contains_local(member) {
            return Err(Self::access_error(member));
        }
        self.env.define(member, value);
        Ok(())
    }

    fn access_error(member: &str) -> RuntimeError {
        RuntimeError::AccessError {
            member: String::from(member),
        }
    }
}

impl fmt::Debug for ClassInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassInstance")
            .field("class", &self.class.name())
            .field("members", &self.env.local_names())
            .finish()
    }
}
