#[macro_use]
mod cases;

use sparrow::{
    BinaryOp::{Add, Mul},
    Error, EvalError, Node, RuntimeError, Value,
    build::*,
};

/// class Counter { count = 0; def inc() { count = count + 1 } }
fn counter_class() -> Node {
    class(
        "Counter",
        None,
        vec![
            assign(ident("count"), int(0)),
            def(
                "inc",
                &[],
                vec![assign(ident("count"), binary(ident("count"), Add, int(1)))],
            ),
        ],
    )
}

/// `object.method()`
fn invoke(object: &str, method: &str) -> Node {
    call(member(ident(object), method), vec![])
}

/// class Point { x = 0; y = 0 }
fn point_class() -> Node {
    class(
        "Point",
        None,
        vec![assign(ident("x"), int(0)), assign(ident("y"), int(0))],
    )
}

test_case!(
    methods_update_their_instance,
    program: block(vec![
        counter_class(),
        assign(ident("c"), member(ident("Counter"), "new")),
        invoke("c", "inc"),
        invoke("c", "inc"),
    ]),
    value: Value::Int(2),
);

test_case!(
    instances_do_not_share_fields,
    program: block(vec![
        counter_class(),
        assign(ident("a"), member(ident("Counter"), "new")),
        assign(ident("b"), member(ident("Counter"), "new")),
        invoke("a", "inc"),
        invoke("a", "inc"),
        invoke("b", "inc"),
        binary(
            binary(member(ident("a"), "count"), Mul, int(10)),
            Add,
            member(ident("b"), "count"),
        ),
    ]),
    value: Value::Int(21),
);

test_case!(
    fields_are_writable_from_outside,
    // p = Point.new; p.x = 3; p.y = 4; p.x * p.x + p.y * p.y
    program: block(vec![
        point_class(),
        assign(ident("p"), member(ident("Point"), "new")),
        assign(member(ident("p"), "x"), int(3)),
        assign(member(ident("p"), "y"), int(4)),
        binary(
            binary(member(ident("p"), "x"), Mul, member(ident("p"), "x")),
            Add,
            binary(member(ident("p"), "y"), Mul, member(ident("p"), "y")),
        ),
    ]),
    value: Value::Int(25),
);

test_case!(
    reading_an_undeclared_member_fails,
    program: block(vec![
        point_class(),
        member(member(ident("Point"), "new"), "z"),
    ]),
    error: Error::Eval(EvalError::Runtime(RuntimeError::AccessError { .. })),
);

test_case!(
    writing_an_undeclared_member_fails,
    program: block(vec![
        point_class(),
        assign(ident("p"), member(ident("Point"), "new")),
        assign(member(ident("p"), "z"), int(1)),
    ]),
    error: Error::Eval(EvalError::Runtime(RuntimeError::AccessError { .. })),
);

test_case!(
    subclass_sees_superclass_fields,
    // class Base { a = 1; def get_a() { a } }
    // class Derived extends Base { b = 2; def sum() { a + b } }
    // d = Derived.new; d.sum() * 10 + d.get_a()
    program: block(vec![
        class(
            "Base",
            None,
            vec![assign(ident("a"), int(1)), def("get_a", &[], vec![ident("a")])],
        ),
        class(
            "Derived",
            Some("Base"),
            vec![
                assign(ident("b"), int(2)),
                def("sum", &[], vec![binary(ident("a"), Add, ident("b"))]),
            ],
        ),
        assign(ident("d"), member(ident("Derived"), "new")),
        binary(
            binary(invoke("d", "sum"), Mul, int(10)),
            Add,
            invoke("d", "get_a"),
        ),
    ]),
    value: Value::Int(31),
);

test_case!(
    subclass_methods_update_inherited_fields,
    // class Base { a = 1 }
    // class Derived extends Base { def bump() { a = a + 10 } }
    // d = Derived.new; d.bump(); d.a
    program: block(vec![
        class("Base", None, vec![assign(ident("a"), int(1))]),
        class(
            "Derived",
            Some("Base"),
            vec![def(
                "bump",
                &[],
                vec![assign(ident("a"), binary(ident("a"), Add, int(10)))],
            )],
        ),
        assign(ident("d"), member(ident("Derived"), "new")),
        invoke("d", "bump"),
        member(ident("d"), "a"),
    ]),
    value: Value::Int(11),
);

test_case!(
    subclass_body_runs_after_its_superclass,
    program: block(vec![
        class("Base", None, vec![def("name", &[], vec![string("base")])]),
        class("Derived", Some("Base"), vec![def("name", &[], vec![string("derived")])]),
        assign(ident("d"), member(ident("Derived"), "new")),
        invoke("d", "name"),
    ]),
    value: Value::str("derived"),
);

test_case!(
    superclass_must_be_a_class,
    program: block(vec![
        assign(ident("x"), int(1)),
        class("D", Some("x"), vec![]),
    ]),
    error: Error::Eval(EvalError::Runtime(RuntimeError::UnknownSuperclass { .. })),
);

test_case!(
    class_statement_yields_nil,
    program: point_class(),
    value: Value::Nil,
);
