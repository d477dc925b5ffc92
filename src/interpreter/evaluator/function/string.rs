use crate::{
    interpreter::{
        evaluator::{
            core::{EvalResult, Interpreter},
            function::core::arg,
        },
        value::core::Value,
    },
    util::num::usize_to_i64,
};

/// `string.length(s)`: the number of characters, not bytes.
pub fn length(_: &mut Interpreter, args: &[Value]) -> EvalResult<Value> {
    Ok(arg(args, 0).as_str()
                   .map_or(Value::Null, |s| Value::Int(usize_to_i64(s.chars().count()))))
}

/// `string.upper(s)`.
pub fn upper(_: &mut Interpreter, args: &[Value]) -> EvalResult<Value> {
    Ok(arg(args, 0).as_str()
                   .map_or(Value::Null, |s| Value::string(s.to_uppercase())))
}

/// `string.lower(s)`.
pub fn lower(_: &mut Interpreter, args: &[Value]) -> EvalResult<Value> {
    Ok(arg(args, 0).as_str()
                   .map_or(Value::Null, |s| Value::string(s.to_lowercase())))
}

/// `string.contains(s, needle)`.
pub fn contains(_: &mut Interpreter, args: &[Value]) -> EvalResult<Value> {
    Ok(match (arg(args, 0), arg(args, 1)) {
        (Value::Str(haystack), Value::Str(needle)) => Value::Bool(haystack.contains(&*needle)),
        _ => Value::Null,
    })
}

/// `string.split(s, separator)`: an array of the pieces.
///
/// An empty separator splits into single characters.
pub fn split(_: &mut Interpreter, args: &[Value]) -> EvalResult<Value> {
    let (Value::Str(text), Value::Str(separator)) = (arg(args, 0), arg(args, 1)) else {
        return Ok(Value::Null);
    };

    let pieces = if separator.is_empty() {
        text.chars().map(Value::string).collect::<Vec<_>>()
    } else {
        text.split(separator.as_str()).map(Value::string).collect()
    };

    Ok(Value::from(pieces))
}

/// `str(v)`: the value's display form as a string.
pub fn str(_: &mut Interpreter, args: &[Value]) -> EvalResult<Value> {
    Ok(Value::Str(arg(args, 0).to_string()))
}

/// `len(v)`: the length of an array, or the character count of a string.
pub fn len(_: &mut Interpreter, args: &[Value]) -> EvalResult<Value> {
    Ok(match arg(args, 0) {
        Value::Array(items) => Value::Int(usize_to_i64(items.borrow().len())),
        Value::Str(text) => Value::Int(usize_to_i64(text.chars().count())),
        _ => Value::Null,
    })
}
