use sparrow::{Engine, Error, Node, Value};

/// Run `program` in a fresh engine with the native functions registered.
pub fn run(program: &Node) -> Result<Value, Error> {
    Engine::default().run(program)
}

/// `test_case!(name, program: tree, value: expected)` checks the value a
/// program evaluates to; `error: pattern` checks how it fails instead.
macro_rules! test_case {
    ($name:ident, program: $program:expr, value: $value:expr $(,)?) => {
        #[test]
        fn $name() {
            let result = crate::cases::run(&$program);
            pretty_assertions::assert_eq!(result, Ok($value));
        }
    };
    ($name:ident, program: $program:expr, error: $error:pat $(,)?) => {
        #[test]
        fn $name() {
            let result = crate::cases::run(&$program);
            assert!(
                matches!(result, Err($error)),
                "unexpected result: {:?}",
                result
            );
        }
    };
}
