use std::cmp::Ordering;

use crate::{ast::BinaryOperator, interpreter::value::core::Value};

/// Applies a binary operator to two evaluated operands.
///
/// `&&` and `||` are normally short-circuited by the caller; here they
/// combine the operands' truthiness. `..` is only meaningful in a `cruise`
/// header and yields `null`.
///
/// # Example
/// ```
/// use blast::{
///     ast::BinaryOperator,
///     interpreter::{evaluator::binary::apply_binary, value::core::Value},
/// };
///
/// let sum = apply_binary(BinaryOperator::Add, &Value::int(2), &Value::float(0.5));
/// assert_eq!(sum, Value::float(2.5));
///
/// let joined = apply_binary(BinaryOperator::Add, &Value::string("a"), &Value::string("b"));
/// assert_eq!(joined, Value::string("ab"));
///
/// let mismatch = apply_binary(BinaryOperator::Add, &Value::string("a"), &Value::int(1));
/// assert_eq!(mismatch, Value::null());
/// ```
#[must_use]
pub fn apply_binary(op: BinaryOperator, left: &Value, right: &Value) -> Value {
    use BinaryOperator::{
        Add, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mod, Mul, NotEqual, Or,
        Range, Sub,
    };

    match op {
        Add | Sub | Mul | Div | Mod => arithmetic(op, left, right),
        Equal => Value::Bool(left.equals(right)),
        NotEqual => Value::Bool(!left.equals(right)),
        Less => compare(left, right, Ordering::is_lt),
        LessEqual => compare(left, right, Ordering::is_le),
        Greater => compare(left, right, Ordering::is_gt),
        GreaterEqual => compare(left, right, Ordering::is_ge),
        And => Value::Bool(left.is_truthy() && right.is_truthy()),
        Or => Value::Bool(left.is_truthy() || right.is_truthy()),
        Range => Value::Null,
    }
}

/// Applies `+ - * / %`.
///
/// Two integers use wrapping arithmetic. A float on either side promotes
/// both operands to floats. Division or remainder by zero is `null` for both
/// kinds. `+` also joins two strings.
fn arithmetic(op: BinaryOperator, left: &Value, right: &Value) -> Value {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => integer_arithmetic(op, *a, *b),
        (Value::Str(a), Value::Str(b)) if op == BinaryOperator::Add => {
            let mut joined = String::with_capacity(a.len() + b.len());
            joined.push_str(a);
            joined.push_str(b);
            Value::Str(joined)
        },
        _ => match (left.as_number(), right.as_number()) {
            (Some(a), Some(b)) => float_arithmetic(op, a, b),
            _ => Value::Null,
        },
    }
}

fn integer_arithmetic(op: BinaryOperator, a: i64, b: i64) -> Value {
    match op {
        BinaryOperator::Add => Value::Int(a.wrapping_add(b)),
        BinaryOperator::Sub => Value::Int(a.wrapping_sub(b)),
        BinaryOperator::Mul => Value::Int(a.wrapping_mul(b)),
        BinaryOperator::Div if b != 0 => Value::Int(a.wrapping_div(b)),
        BinaryOperator::Mod if b != 0 => Value::Int(a.wrapping_rem(b)),
        _ => Value::Null,
    }
}

fn float_arithmetic(op: BinaryOperator, a: f64, b: f64) -> Value {
    match op {
        BinaryOperator::Add => Value::Float(a + b),
        BinaryOperator::Sub => Value::Float(a - b),
        BinaryOperator::Mul => Value::Float(a * b),
        BinaryOperator::Div if b != 0.0 => Value::Float(a / b),
        BinaryOperator::Mod if b != 0.0 => Value::Float(a % b),
        _ => Value::Null,
    }
}

/// Orders two numbers or two strings; any other pairing is `null`.
fn compare(left: &Value, right: &Value, test: fn(Ordering) -> bool) -> Value {
    left.compare(right)
        .map_or(Value::Null, |ordering| Value::Bool(test(ordering)))
}
