use std::cmp::Ordering;

use crate::{
    interpreter::{
        evaluator::{
            core::{EvalResult, Interpreter},
            function::core::arg,
        },
        value::core::Value,
    },
    util::num::{f64_to_i64_checked, int_to_float},
};

/// `math.sqrt(x)`: the square root as a float. Negative input gives NaN.
pub fn sqrt(_: &mut Interpreter, args: &[Value]) -> EvalResult<Value> {
    Ok(arg(args, 0).as_number()
                   .map_or(Value::Null, |x| Value::Float(x.sqrt())))
}

/// `math.abs(x)`: the absolute value, keeping the operand's kind.
///
/// `math.abs` of the smallest integer does not fit an `int` and is returned
/// as a float.
pub fn abs(_: &mut Interpreter, args: &[Value]) -> EvalResult<Value> {
    Ok(match arg(args, 0) {
        Value::Int(n) => n.checked_abs()
                          .map_or_else(|| Value::Float(int_to_float(n).abs()), Value::Int),
        Value::Float(x) => Value::Float(x.abs()),
        _ => Value::Null,
    })
}

/// `math.floor(x)`: rounds toward negative infinity.
pub fn floor(_: &mut Interpreter, args: &[Value]) -> EvalResult<Value> {
    Ok(round_with(&arg(args, 0), f64::floor))
}

/// `math.ceil(x)`: rounds toward positive infinity.
pub fn ceil(_: &mut Interpreter, args: &[Value]) -> EvalResult<Value> {
    Ok(round_with(&arg(args, 0), f64::ceil))
}

/// Integers pass through; a rounded float becomes an integer when it fits.
fn round_with(value: &Value, round: fn(f64) -> f64) -> Value {
    match value {
        Value::Int(n) => Value::Int(*n),
        Value::Float(x) => {
            let rounded = round(*x);
            f64_to_i64_checked(rounded).map_or(Value::Float(rounded), Value::Int)
        },
        _ => Value::Null,
    }
}

/// `math.pow(base, exponent)`.
///
/// An integer raised to a non-negative integer stays an integer while the
/// result fits; everything else is computed in floats.
pub fn pow(_: &mut Interpreter, args: &[Value]) -> EvalResult<Value> {
    let (base, exponent) = (arg(args, 0), arg(args, 1));

    if let (Value::Int(b), Value::Int(e)) = (&base, &exponent)
       && let Ok(e) = u32::try_from(*e)
       && let Some(result) = b.checked_pow(e)
    {
        return Ok(Value::Int(result));
    }

    Ok(match (base.as_number(), exponent.as_number()) {
        (Some(b), Some(e)) => Value::Float(b.powf(e)),
        _ => Value::Null,
    })
}

/// `math.min(a, b, ...)`: the smallest argument, unchanged.
pub fn min(_: &mut Interpreter, args: &[Value]) -> EvalResult<Value> {
    Ok(extreme(args, Ordering::Less))
}

/// `math.max(a, b, ...)`: the largest argument, unchanged.
pub fn max(_: &mut Interpreter, args: &[Value]) -> EvalResult<Value> {
    Ok(extreme(args, Ordering::Greater))
}

/// Picks the argument that orders `wanted` against all others. Ties keep the
/// earliest. Any non-numeric argument, or no arguments, gives `null`.
fn extreme(args: &[Value], wanted: Ordering) -> Value {
    let mut best: Option<&Value> = None;

    for candidate in args {
        if candidate.as_number().is_none() {
            return Value::Null;
        }

        best = match best {
            Some(current) if candidate.compare(current) != Some(wanted) => Some(current),
            _ => Some(candidate),
        };
    }

    best.cloned().unwrap_or_default()
}
