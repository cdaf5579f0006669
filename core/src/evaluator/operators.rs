//! Binary and unary operator implementations.
//!
//! Shared by the evaluator and by consumers of the `BinOp` instruction, so
//! both backends apply the same table.

use crate::{String, ast::BinaryOp, evaluator::RuntimeError, values::Value};

/// Apply a non-assignment binary operator.
///
/// - `==` and `!=` accept any values (see [`Value::equals`]).
/// - `+` with a string on either side concatenates display forms.
/// - Two ints use integer arithmetic, anything else numeric is promoted to
///   float.
pub fn binary_op(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, RuntimeError> {
    match (op, left, right) {
        (BinaryOp::Eq, _, _) => Ok(Value::bool(left.equals(right))),
        (BinaryOp::Ne, _, _) => Ok(Value::bool(!left.equals(right))),
        (BinaryOp::Add, Value::Str(_), _) | (BinaryOp::Add, _, Value::Str(_)) => {
            let mut s = String::new();
            s.push_str(&left.to_string());
            s.push_str(&right.to_string());
            Ok(Value::str(&s))
        }
        (_, Value::Int(l), Value::Int(r)) => eval_binary_int(op, *l, *r),
        _ => match (left.as_number(), right.as_number()) {
            (Some(l), Some(r)) => Ok(eval_binary_float(op, l, r)),
            _ => Err(RuntimeError::BadOperands {
                op: op.symbol(),
                left: left.type_name(),
                right: right.type_name(),
            }),
        },
    }
}

/// Unary minus.
pub fn negate(value: &Value) -> Result<Value, RuntimeError> {
    match value {
        Value::Int(i) => Ok(Value::Int(i.wrapping_neg())),
        Value::Float(f) => Ok(Value::Float(-f)),
        other => Err(RuntimeError::BadOperand {
            op: "-",
            operand: other.type_name(),
        }),
    }
}

/// Evaluate a binary operation on two integers.
///
/// Uses wrapping arithmetic to prevent panics on overflow.
/// Division by zero returns an error.
fn eval_binary_int(op: BinaryOp, left: i64, right: i64) -> Result<Value, RuntimeError> {
    let value = match op {
        BinaryOp::Add => left.wrapping_add(right),
        BinaryOp::Sub => left.wrapping_sub(right),
        BinaryOp::Mul => left.wrapping_mul(right),
        BinaryOp::Div | BinaryOp::Rem if right == 0 => {
            return Err(RuntimeError::DivisionByZero);
        }
        // wrapping_div/rem handle i64::MIN / -1
        BinaryOp::Div => left.wrapping_div(right),
        BinaryOp::Rem => left.wrapping_rem(right),
        BinaryOp::Eq => i64::from(left == right),
        BinaryOp::Ne => i64::from(left != right),
        BinaryOp::Lt => i64::from(left < right),
        BinaryOp::Gt => i64::from(left > right),
        BinaryOp::Le => i64::from(left <= right),
        BinaryOp::Ge => i64::from(left >= right),
    };
    Ok(Value::Int(value))
}

/// Evaluate a binary operation on two floats.
///
/// Follows IEEE 754 semantics (produces inf/nan rather than failing).
/// Comparisons still produce ints.
fn eval_binary_float(op: BinaryOp, left: f64, right: f64) -> Value {
    match op {
        BinaryOp::Add => Value::Float(left + right),
        BinaryOp::Sub => Value::Float(left - right),
        BinaryOp::Mul => Value::Float(left * right),
        BinaryOp::Div => Value::Float(left / right),
        BinaryOp::Rem => Value::Float(left % right),
        BinaryOp::Eq => Value::bool(left == right),
        BinaryOp::Ne => Value::bool(left != right),
        BinaryOp::Lt => Value::bool(left < right),
        BinaryOp::Gt => Value::bool(left > right),
        BinaryOp::Le => Value::bool(left <= right),
        BinaryOp::Ge => Value::bool(left >= right),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(op: BinaryOp, l: i64, r: i64) -> Result<Value, RuntimeError> {
        binary_op(op, &Value::Int(l), &Value::Int(r))
    }

    #[test]
    fn test_int_arithmetic() {
        assert_eq!(int(BinaryOp::Add, 2, 3).unwrap(), Value::Int(5));
        assert_eq!(int(BinaryOp::Sub, 3, 10).unwrap(), Value::Int(-7));
        assert_eq!(int(BinaryOp::Mul, -2, 5).unwrap(), Value::Int(-10));
        assert_eq!(int(BinaryOp::Div, 7, 2).unwrap(), Value::Int(3));
        assert_eq!(int(BinaryOp::Rem, 7, 2).unwrap(), Value::Int(1));
    }

    #[test]
    fn test_int_div_by_zero() {
        assert_eq!(
            int(BinaryOp::Div, 1, 0).unwrap_err(),
            RuntimeError::DivisionByZero
        );
        assert_eq!(
            int(BinaryOp::Rem, 1, 0).unwrap_err(),
            RuntimeError::DivisionByZero
        );
    }

    #[test]
    fn test_int_wrapping_overflow() {
        assert_eq!(int(BinaryOp::Add, i64::MAX, 1).unwrap(), Value::Int(i64::MIN));
        assert_eq!(int(BinaryOp::Div, i64::MIN, -1).unwrap(), Value::Int(i64::MIN));
        assert_eq!(negate(&Value::Int(i64::MIN)).unwrap(), Value::Int(i64::MIN));
    }

    #[test]
    fn test_comparisons_yield_ints() {
        assert_eq!(int(BinaryOp::Lt, 1, 2).unwrap(), Value::Int(1));
        assert_eq!(int(BinaryOp::Ge, 1, 2).unwrap(), Value::Int(0));
        assert_eq!(
            binary_op(BinaryOp::Le, &Value::Float(1.5), &Value::Int(2)).unwrap(),
            Value::Int(1)
        );
    }

    #[test]
    fn test_mixed_promotes_to_float() {
        assert_eq!(
            binary_op(BinaryOp::Add, &Value::Int(1), &Value::Float(0.5)).unwrap(),
            Value::Float(1.5)
        );
        assert_eq!(
            binary_op(BinaryOp::Div, &Value::Float(1.0), &Value::Int(0)).unwrap(),
            Value::Float(f64::INFINITY)
        );
    }

    #[test]
    fn test_string_concatenation() {
        assert_eq!(
            binary_op(BinaryOp::Add, &Value::str("n = "), &Value::Int(3)).unwrap(),
            Value::str("n = 3")
        );
        assert_eq!(
            binary_op(BinaryOp::Add, &Value::Float(2.0), &Value::str("!")).unwrap(),
            Value::str("2.0!")
        );
    }

    #[test]
    fn test_equality_on_any_values() {
        assert_eq!(
            binary_op(BinaryOp::Eq, &Value::str("a"), &Value::str("a")).unwrap(),
            Value::Int(1)
        );
        assert_eq!(
            binary_op(BinaryOp::Ne, &Value::Nil, &Value::Int(0)).unwrap(),
            Value::Int(1)
        );
        assert_eq!(
            binary_op(BinaryOp::Eq, &Value::Int(2), &Value::Float(2.0)).unwrap(),
            Value::Int(1)
        );
    }

    #[test]
    fn test_bad_operands() {
        assert_eq!(
            binary_op(BinaryOp::Sub, &Value::str("a"), &Value::Int(1)).unwrap_err(),
            RuntimeError::BadOperands {
                op: "-",
                left: "string",
                right: "int",
            }
        );
        assert_eq!(
            binary_op(BinaryOp::Lt, &Value::Nil, &Value::Nil).unwrap_err(),
            RuntimeError::BadOperands {
                op: "<",
                left: "nil",
                right: "nil",
            }
        );
        assert_eq!(
            negate(&Value::str("x")).unwrap_err(),
            RuntimeError::BadOperand {
                op: "-",
                operand: "string",
            }
        );
    }
}
