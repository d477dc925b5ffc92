use std::cmp::Ordering;

use crate::{
    interpreter::{
        evaluator::{
            core::{EvalResult, Interpreter},
            function::core::arg,
        },
        value::core::{ArrayRef, Value},
    },
    util::num::usize_to_i64,
};

/// Copies the elements out of an array argument.
///
/// Higher-order natives iterate this copy, so a callback that mutates the
/// array never observes a held borrow.
fn snapshot(array: &ArrayRef) -> Vec<Value> {
    array.borrow().clone()
}

/// `array.push(xs, value)`: appends `value` in place. Returns `null`.
pub fn push(_: &mut Interpreter, args: &[Value]) -> EvalResult<Value> {
    arg(args, 0).array_push(arg(args, 1));
    Ok(Value::Null)
}

/// `array.pop(xs)`: removes and returns the last element, or `null` if the
/// array is empty.
pub fn pop(_: &mut Interpreter, args: &[Value]) -> EvalResult<Value> {
    Ok(match arg(args, 0) {
        Value::Array(items) => items.borrow_mut().pop().unwrap_or_default(),
        _ => Value::Null,
    })
}

/// `array.length(xs)`: the number of elements.
pub fn length(_: &mut Interpreter, args: &[Value]) -> EvalResult<Value> {
    Ok(match arg(args, 0) {
        Value::Array(items) => Value::Int(usize_to_i64(items.borrow().len())),
        _ => Value::Null,
    })
}

/// `array.reverse(xs)`: reverses the array in place. Returns `null`; every
/// alias of `xs` sees the new order.
pub fn reverse(_: &mut Interpreter, args: &[Value]) -> EvalResult<Value> {
    if let Value::Array(items) = arg(args, 0) {
        items.borrow_mut().reverse();
    }
    Ok(Value::Null)
}

/// `array.sort(xs)`: sorts in place, ascending. Returns `null`.
///
/// Numbers order numerically and come before strings, which order by code
/// point. Other values keep their relative order at the end.
pub fn sort(_: &mut Interpreter, args: &[Value]) -> EvalResult<Value> {
    if let Value::Array(items) = arg(args, 0) {
        items.borrow_mut().sort_by(sort_order);
    }
    Ok(Value::Null)
}

fn sort_order(a: &Value, b: &Value) -> Ordering {
    const fn rank(value: &Value) -> u8 {
        match value {
            Value::Int(_) | Value::Float(_) => 0,
            Value::Str(_) => 1,
            _ => 2,
        }
    }

    rank(a).cmp(&rank(b))
           .then_with(|| a.compare(b).unwrap_or(Ordering::Equal))
}

/// `array.map(xs, f)`: a new array of `f(x)` for each element.
pub fn map(interpreter: &mut Interpreter, args: &[Value]) -> EvalResult<Value> {
    let (Value::Array(items), function) = (arg(args, 0), arg(args, 1)) else {
        return Ok(Value::Null);
    };

    let mapped = snapshot(&items).into_iter()
                                 .map(|item| interpreter.execute_callback(&function, &[item]))
                                 .collect::<EvalResult<Vec<_>>>()?;

    Ok(Value::from(mapped))
}

/// `array.filter(xs, predicate)`: a new array of the elements for which
/// `predicate` returns a truthy value.
pub fn filter(interpreter: &mut Interpreter, args: &[Value]) -> EvalResult<Value> {
    let (Value::Array(items), predicate) = (arg(args, 0), arg(args, 1)) else {
        return Ok(Value::Null);
    };

    let mut kept = Vec::new();
    for item in snapshot(&items) {
        if interpreter.execute_callback(&predicate, &[item.clone()])?
                      .is_truthy()
        {
            kept.push(item);
        }
    }

    Ok(Value::from(kept))
}

/// `array.reduce(xs, f, initial?)`: folds the array with `f(acc, x)`.
///
/// Without an initial value the first element seeds the accumulator. Reducing
/// an empty array without one yields `null`.
pub fn reduce(interpreter: &mut Interpreter, args: &[Value]) -> EvalResult<Value> {
    let (Value::Array(items), function) = (arg(args, 0), arg(args, 1)) else {
        return Ok(Value::Null);
    };

    let mut items = snapshot(&items).into_iter();
    let mut accumulator = if args.len() > 2 {
        arg(args, 2)
    } else {
        match items.next() {
            Some(first) => first,
            None => return Ok(Value::Null),
        }
    };

    for item in items {
        accumulator = interpreter.execute_callback(&function, &[accumulator, item])?;
    }

    Ok(accumulator)
}

/// `array.find(xs, predicate)`: the first element matching `predicate`, or
/// `null`.
pub fn find(interpreter: &mut Interpreter, args: &[Value]) -> EvalResult<Value> {
    let (Value::Array(items), predicate) = (arg(args, 0), arg(args, 1)) else {
        return Ok(Value::Null);
    };

    for item in snapshot(&items) {
        if interpreter.execute_callback(&predicate, &[item.clone()])?
                      .is_truthy()
        {
            return Ok(item);
        }
    }

    Ok(Value::Null)
}

/// `array.some(xs, predicate)`: `true` if any element matches.
pub fn some(interpreter: &mut Interpreter, args: &[Value]) -> EvalResult<Value> {
    let (Value::Array(items), predicate) = (arg(args, 0), arg(args, 1)) else {
        return Ok(Value::Null);
    };

    for item in snapshot(&items) {
        if interpreter.execute_callback(&predicate, &[item])?.is_truthy() {
            return Ok(Value::Bool(true));
        }
    }

    Ok(Value::Bool(false))
}

/// `array.every(xs, predicate)`: `true` if every element matches, including
/// for an empty array.
pub fn every(interpreter: &mut Interpreter, args: &[Value]) -> EvalResult<Value> {
    let (Value::Array(items), predicate) = (arg(args, 0), arg(args, 1)) else {
        return Ok(Value::Null);
    };

    for item in snapshot(&items) {
        if !interpreter.execute_callback(&predicate, &[item])?.is_truthy() {
            return Ok(Value::Bool(false));
        }
    }

    Ok(Value::Bool(true))
}
