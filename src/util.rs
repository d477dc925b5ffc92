/// Numeric conversion helpers.
///
/// Conversions between the language's `int` (`i64`), `float` (`f64`) and host
/// lengths (`usize`). The checked variants return `None` instead of silently
/// rounding or truncating.
pub mod num;

/// Stack growth for deeply recursive parsing and evaluation.
pub mod stack;
