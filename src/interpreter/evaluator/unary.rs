use crate::{ast::UnaryOperator, interpreter::value::core::Value};

/// Applies a prefix operator to an evaluated operand.
///
/// - `Negate`: integers (wrapping) and floats; anything else is `null`.
/// - `Not`: the negated truthiness of any value.
///
/// # Example
/// ```
/// use blast::{
///     ast::UnaryOperator,
///     interpreter::{evaluator::unary::apply_unary, value::core::Value},
/// };
///
/// assert_eq!(apply_unary(UnaryOperator::Negate, &Value::int(5)), Value::int(-5));
/// assert_eq!(apply_unary(UnaryOperator::Not, &Value::string("")), Value::bool(true));
/// assert_eq!(apply_unary(UnaryOperator::Negate, &Value::string("x")), Value::null());
/// ```
#[must_use]
pub fn apply_unary(op: UnaryOperator, operand: &Value) -> Value {
    match op {
        UnaryOperator::Negate => match operand {
            Value::Int(n) => Value::Int(n.wrapping_neg()),
            Value::Float(x) => Value::Float(-x),
            _ => Value::Null,
        },
        UnaryOperator::Not => Value::Bool(!operand.is_truthy()),
    }
}
