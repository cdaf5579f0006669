use alloc::rc::Rc;

use pretty_assertions::assert_eq;

use super::*;
use crate::{
    ast::{Node, build},
    env::Env,
    evaluator::RuntimeError,
};

fn class_stmt(name: &str, super_name: Option<&str>) -> Rc<crate::ast::ClassStmnt> {
    match build::class(name, super_name, vec![]) {
        Node::Class(stmt) => stmt,
        other => panic!("expected class, got {:?}", other),
    }
}

#[test]
fn test_truthiness() {
    assert!(Value::Int(1).is_truthy());
    assert!(Value::Int(-3).is_truthy());
    assert!(!Value::Int(0).is_truthy());
    assert!(!Value::Float(0.0).is_truthy());
    assert!(Value::Float(0.5).is_truthy());
    assert!(!Value::Nil.is_truthy());
    assert!(Value::str("").is_truthy());
    assert!(Value::Array(Rc::new(Array::new(0))).is_truthy());
}

#[test]
fn test_structural_equality_is_strict() {
    assert_eq!(Value::Int(1), Value::Int(1));
    assert_ne!(Value::Int(1), Value::Float(1.0));
    assert_eq!(Value::str("a"), Value::str("a"));
    assert_ne!(Value::Nil, Value::Int(0));
}

#[test]
fn test_language_equality_promotes_numbers() {
    assert!(Value::Int(1).equals(&Value::Float(1.0)));
    assert!(Value::Float(2.0).equals(&Value::Int(2)));
    assert!(!Value::Int(1).equals(&Value::str("1")));
    assert!(Value::Nil.equals(&Value::Nil));
}

#[test]
fn test_reference_values_compare_by_identity() {
    let a = Rc::new(Array::new(2));
    let same = Value::Array(a.clone());
    assert_eq!(Value::Array(a), same);
    assert_ne!(
        Value::Array(Rc::new(Array::new(2))),
        Value::Array(Rc::new(Array::new(2)))
    );
}

#[test]
fn test_display() {
    assert_eq!(Value::Int(-4).to_string(), "-4");
    assert_eq!(Value::Float(1.0).to_string(), "1.0");
    assert_eq!(Value::str("hi").to_string(), "hi");
    assert_eq!(Value::Nil.to_string(), "nil");
    assert_eq!(format!("{:?}", Value::str("hi")), "\"hi\"");
    assert_eq!(
        Value::Array(Rc::new(Array::new(3))).to_string(),
        "<array of 3>"
    );
}

#[test]
fn test_array_bounds() {
    let array = Array::new(3);
    assert_eq!(array.len(), 3);
    for i in 0..3 {
        assert_eq!(array.get(i).unwrap(), Value::Nil);
        array.set(i, Value::Int(i * 10)).unwrap();
    }
    assert_eq!(array.get(2).unwrap(), Value::Int(20));

    for i in [-1, 3, i64::MAX, i64::MIN] {
        assert_eq!(
            array.get(i).unwrap_err(),
            RuntimeError::IndexOutOfBounds { index: i, len: 3 }
        );
        assert!(array.set(i, Value::Nil).is_err());
    }
}

#[test]
fn test_empty_array_rejects_every_index() {
    let array = Array::new(0);
    assert!(array.is_empty());
    assert!(array.get(0).is_err());
}

#[test]
fn test_class_without_superclass() {
    let env = Env::new();
    let class = ClassInfo::new(class_stmt("A", None), env.clone()).unwrap();
    assert_eq!(class.name(), "A");
    assert!(class.super_class().is_none());
    assert!(class.environment().ptr_eq(&env));
}

#[test]
fn test_unbound_superclass_means_none() {
    let class = ClassInfo::new(class_stmt("B", Some("A")), Env::new()).unwrap();
    assert!(class.super_class().is_none());
}

#[test]
fn test_superclass_must_be_a_class() {
    let env = Env::new();
    env.define("A", Value::Int(1));
    let err = ClassInfo::new(class_stmt("B", Some("A")), env).unwrap_err();
    assert_eq!(err, RuntimeError::UnknownSuperclass { name: "A".into() });
}

#[test]
fn test_superclass_bodies_run_first() {
    let env = Env::new();
    let base = Rc::new(ClassInfo::new(class_stmt("A", None), env.clone()).unwrap());
    env.define("A", Value::Class(base.clone()));
    let derived = ClassInfo::new(class_stmt("B", Some("A")), env).unwrap();

    let bodies = derived.bodies();
    assert_eq!(bodies.len(), 2);
    assert!(Rc::ptr_eq(&bodies[0], base.body()));
    assert!(Rc::ptr_eq(&bodies[1], derived.body()));
}

#[test]
fn test_instance_access_discipline() {
    let env = Env::new();
    let class = Rc::new(ClassInfo::new(class_stmt("A", None), env.clone()).unwrap());
    let instance = ClassInstance::new(class, Env::with_outer(&env));

    assert_eq!(
        instance.read("x").unwrap_err(),
        RuntimeError::AccessError { member: "x".into() }
    );
    assert!(instance.write("x", Value::Int(1)).is_err());

    instance.environment().define("x", Value::Int(0));
    instance.write("x", Value::Int(5)).unwrap();
    assert_eq!(instance.read("x").unwrap(), Value::Int(5));
}

#[test]
fn test_instance_ignores_outer_bindings() {
    let env = Env::new();
    env.define("global", Value::Int(1));
    let class = Rc::new(ClassInfo::new(class_stmt("A", None), env.clone()).unwrap());
    let instance = ClassInstance::new(class, Env::with_outer(&env));
    assert!(instance.read("global").is_err());
}

#[test]
fn test_native_arity_checked() {
    fn first(args: &[Value]) -> Result<Value, RuntimeError> {
        Ok(args[0].clone())
    }
    let native = NativeFunction::new("first", 1, first);
    assert_eq!(native.invoke(&[Value::Int(3)]).unwrap(), Value::Int(3));
    assert_eq!(
        native.invoke(&[]).unwrap_err(),
        RuntimeError::ArityMismatch {
            name: "first".into(),
            expected: 1,
            got: 0,
        }
    );
}

#[test]
fn test_function_runtime_env_chains_to_definition() {
    let definition = Env::new();
    let body = match build::block(vec![]) {
        Node::Block(body) => body,
        other => panic!("expected block, got {:?}", other),
    };
    let func = Function::new("f", build::params(&["a"]), body, definition.clone());

    let first = func.runtime_env();
    let second = func.runtime_env();
    assert!(!first.ptr_eq(&second));
    assert!(first.outer().is_some_and(|o| o.ptr_eq(&definition)));
    assert_eq!(func.arity(), 1);
}
