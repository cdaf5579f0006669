use crate::{
    api::{Engine, Error},
    ast::{BinaryOp, build::*},
    bytecode::Instruction,
    evaluator::{EvalError, EvaluatorOptions, ResourceExceeded, RuntimeError},
    resolver::ResolveError,
    test_utils,
    values::Value,
};

#[test]
fn test_natives_are_registered() {
    test_utils::init_test_logging();
    let mut engine = Engine::default();
    let tree = call(ident("len"), vec![call(ident("array"), vec![int(3)])]);
    assert_eq!(engine.run(&tree).unwrap(), Value::Int(3));
}

#[test]
fn test_init_can_shadow_natives() {
    let mut engine = Engine::new(EvaluatorOptions::default(), |env| {
        env.define("len", Value::Int(7));
    });
    assert_eq!(engine.run(&ident("len")).unwrap(), Value::Int(7));
}

#[test]
fn test_globals_persist_across_runs() {
    let mut engine = Engine::default();
    engine.run(&assign(ident("x"), int(5))).unwrap();
    engine
        .run(&def("twice", &["n"], vec![binary(ident("n"), BinaryOp::Mul, int(2))]))
        .unwrap();

    let result = engine.run(&call(ident("twice"), vec![ident("x")])).unwrap();
    assert_eq!(result, Value::Int(10));
    assert_eq!(engine.globals().get("x"), Some(Value::Int(5)));
}

#[test]
fn test_functions_update_globals_from_earlier_runs() {
    let mut engine = Engine::default();
    engine.run(&assign(ident("hits"), int(1))).unwrap();
    // def bump() { hits = hits + 1 }; bump(); hits
    let tree = block(vec![
        def(
            "bump",
            &[],
            vec![assign(ident("hits"), binary(ident("hits"), BinaryOp::Add, int(1)))],
        ),
        call(ident("bump"), vec![]),
        ident("hits"),
    ]);
    assert_eq!(engine.run(&tree).unwrap(), Value::Int(2));
    assert_eq!(engine.globals().get("hits"), Some(Value::Int(2)));
}

#[test]
fn test_pools_are_shared_across_runs() {
    let mut engine = Engine::default();
    engine.run(&int(7)).unwrap();
    engine.run(&binary(int(7), BinaryOp::Add, int(8))).unwrap();
    assert_eq!(engine.pools().ints().len(), 2);
    assert_eq!(engine.pools().int(1), Some(8));
}

#[test]
fn test_options_limit_recursion() {
    let mut engine = Engine::new(
        EvaluatorOptions {
            max_depth: 50,
            max_iterations: None,
        },
        |_| {},
    );
    // def f(n) { f(n + 1) }; f(0)
    let tree = block(vec![
        def(
            "f",
            &["n"],
            vec![call(ident("f"), vec![binary(ident("n"), BinaryOp::Add, int(1))])],
        ),
        call(ident("f"), vec![int(0)]),
    ]);
    assert!(matches!(
        engine.run(&tree),
        Err(Error::Eval(EvalError::ResourceExceeded(
            ResourceExceeded::StackOverflow { max_depth: 50, .. }
        )))
    ));
}

#[test]
fn test_errors_carry_their_phase() {
    let mut engine = Engine::default();
    assert_eq!(
        engine.run(&ident("missing")).unwrap_err(),
        Error::Eval(EvalError::Runtime(RuntimeError::UndefinedName {
            name: "missing".into()
        }))
    );

    let error = Error::from(ResolveError::PoolOverflow {
        pool: "integer",
        limit: 1,
    });
    assert_eq!(
        error.to_string(),
        "resolution failed: integer constant pool is full (limit 1)"
    );
}

#[test]
fn test_compile_uses_engine_pools() {
    let mut engine = Engine::default();
    engine.run(&int(1)).unwrap();
    let program = engine.compile(&binary(int(2), BinaryOp::Add, int(1))).unwrap();
    assert_eq!(
        program.main.instructions(),
        &[
            Instruction::IConst(1),
            Instruction::IConst(0),
            Instruction::BinOp(BinaryOp::Add),
            Instruction::Return,
        ]
    );
}
