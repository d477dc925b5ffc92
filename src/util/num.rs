/// Converts an `i64` to `f64` for mixed integer/float arithmetic.
///
/// Integers beyond `±2^53` round to the nearest representable float, the same
/// way a float literal of that size would.
///
/// ## Example
/// ```
/// use blast::util::num::int_to_float;
///
/// assert_eq!(int_to_float(42), 42.0);
/// assert_eq!(int_to_float(-3), -3.0);
/// ```
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub const fn int_to_float(value: i64) -> f64 {
    value as f64
}

/// Converts a whole, finite `f64` inside the `i64` range to `i64`.
///
/// Returns `None` for fractional values, NaN, infinities and anything outside
/// `[i64::MIN, i64::MAX]`.
///
/// ## Example
/// ```
/// use blast::util::num::f64_to_i64_checked;
///
/// assert_eq!(f64_to_i64_checked(10.0), Some(10));
/// assert_eq!(f64_to_i64_checked(1.5), None);
/// assert_eq!(f64_to_i64_checked(f64::NAN), None);
/// assert_eq!(f64_to_i64_checked(1e300), None);
/// ```
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
#[must_use]
pub fn f64_to_i64_checked(value: f64) -> Option<i64> {
    if !value.is_finite() || value.fract() != 0.0 {
        return None;
    }
    // i64::MAX as f64 rounds up to 2^63, which is itself out of range.
    if value < i64::MIN as f64 || value >= i64::MAX as f64 {
        return None;
    }
    Some(value as i64)
}

/// Converts a length or position to the language's integer type, saturating
/// at `i64::MAX`.
///
/// ## Example
/// ```
/// use blast::util::num::usize_to_i64;
///
/// assert_eq!(usize_to_i64(3), 3);
/// ```
#[must_use]
pub fn usize_to_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Resolves a language-level index against a sequence of `len` elements.
///
/// Returns `None` for negative indices and indices at or beyond `len`.
///
/// ## Example
/// ```
/// use blast::util::num::checked_index;
///
/// assert_eq!(checked_index(2, 3), Some(2));
/// assert_eq!(checked_index(3, 3), None);
/// assert_eq!(checked_index(-1, 3), None);
/// ```
#[must_use]
pub fn checked_index(index: i64, len: usize) -> Option<usize> {
    usize::try_from(index).ok().filter(|&i| i < len)
}
