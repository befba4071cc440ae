/// Widens an integer operand to a real.
///
/// VeLa widens silently, exactly like a numeric cast in the host language;
/// magnitudes beyond 2^53 round to the nearest representable `f64`.
///
/// ## Example
/// ```
/// use vela::util::num::widen;
///
/// assert_eq!(widen(42), 42.0);
/// assert_eq!(widen(-7), -7.0);
/// ```
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub const fn widen(value: i64) -> f64 {
    value as f64
}

/// Converts a whole-valued `f64` to `i64`.
///
/// The value must be finite, integral and within the `i64` range. Callers
/// round or truncate first when fractional input is acceptable.
///
/// ## Errors
/// Returns `Err(error)` for NaN, infinities, fractional values and values
/// outside the `i64` range.
///
/// ## Example
/// ```
/// use vela::util::num::f64_to_i64_checked;
///
/// assert_eq!(f64_to_i64_checked(1000.0, "bad"), Ok(1000));
/// assert_eq!(f64_to_i64_checked(1.5, "bad"), Err("bad"));
/// assert_eq!(f64_to_i64_checked(1e20, "bad"), Err("bad"));
/// assert_eq!(f64_to_i64_checked(f64::NAN, "bad"), Err("bad"));
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
pub fn f64_to_i64_checked<E>(value: f64, error: E) -> Result<i64, E> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(error);
    }
    // i64::MAX as f64 rounds up to 2^63, which is itself out of range.
    if value < i64::MIN as f64 || value >= i64::MAX as f64 {
        return Err(error);
    }
    Ok(value as i64)
}

/// Converts a length or count to an integer operand.
///
/// ## Errors
/// Returns `Err(error)` if `value` exceeds `i64::MAX`.
///
/// ## Example
/// ```
/// use vela::util::num::usize_to_i64_checked;
///
/// assert_eq!(usize_to_i64_checked(3, ()), Ok(3));
/// ```
pub fn usize_to_i64_checked<E>(value: usize, error: E) -> Result<i64, E> {
    i64::try_from(value).map_err(|_| error)
}

/// Converts an integer operand to an index.
///
/// Returns `None` for negative values, which callers treat as out of range.
///
/// ## Example
/// ```
/// use vela::util::num::i64_to_index;
///
/// assert_eq!(i64_to_index(2), Some(2));
/// assert_eq!(i64_to_index(-1), None);
/// ```
#[must_use]
pub fn i64_to_index(value: i64) -> Option<usize> {
    usize::try_from(value).ok()
}
