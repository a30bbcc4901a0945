use crate::error::CallError;

/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_U64_INT: u64 = 9_007_199_254_740_991;

/// Magnitude from which results are printed in exponent notation.
const EXPONENT_ABOVE: f64 = 1e16;
/// Magnitude below which non-zero results are printed in exponent notation.
const EXPONENT_BELOW: f64 = 1e-4;

/// Returns `true` if the value is finite and has no fractional part.
#[must_use]
pub fn is_integral(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0
}

/// Converts a non-finite float to the error raised when an integer result is
/// required.
///
/// Returns `None` for finite values.
#[must_use]
pub fn non_finite_error(value: f64) -> Option<CallError> {
    if value.is_nan() {
        Some(CallError::NonFinite { value: "NaN" })
    } else if value.is_infinite() {
        Some(CallError::NonFinite { value: "infinity" })
    } else {
        None
    }
}

/// Safely converts an `f64` to `u64` if the value is finite, non-negative,
/// integral and exactly representable.
///
/// ## Errors
/// - `NonFinite` for infinities and NaN.
/// - `NotIntegral` for values with a fractional part.
/// - `Negative` for values below zero.
/// - `MathRange` for values above [`MAX_SAFE_U64_INT`].
///
/// `function` names the caller in the returned error.
///
/// ## Example
/// ```
/// use calcbox::{error::CallError, util::num::f64_to_u64_checked};
///
/// assert_eq!(f64_to_u64_checked(5.0, "fact"), Ok(5));
/// assert_eq!(f64_to_u64_checked(-1.0, "fact"),
///            Err(CallError::Negative { function: "fact".to_string() }));
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_sign_loss)]
#[allow(clippy::cast_precision_loss)]
pub fn f64_to_u64_checked(value: f64, function: &str) -> Result<u64, CallError> {
    if let Some(err) = non_finite_error(value) {
        return Err(err);
    }
    if value.fract() != 0.0 {
        return Err(CallError::NotIntegral { function: function.to_string() });
    }
    if value < 0.0 {
        return Err(CallError::Negative { function: function.to_string() });
    }
    if value > MAX_SAFE_U64_INT as f64 {
        return Err(CallError::MathRange);
    }
    Ok(value as u64)
}

/// Floor division and modulo with the sign convention of the divisor.
///
/// Returns `(quotient, remainder)` such that `quotient` is `floor(a / b)`
/// (computed without the rounding error of a plain division) and
/// `remainder` has the sign of `b`. The caller must reject `b == 0`.
///
/// ## Example
/// ```
/// use calcbox::util::num::floor_div_mod;
///
/// assert_eq!(floor_div_mod(7.0, 2.0), (3.0, 1.0));
/// assert_eq!(floor_div_mod(-7.0, 2.0), (-4.0, 1.0));
/// assert_eq!(floor_div_mod(7.0, -2.0), (-4.0, -1.0));
/// ```
#[must_use]
pub fn floor_div_mod(a: f64, b: f64) -> (f64, f64) {
    let mut remainder = a % b;
    let mut quotient = (a - remainder) / b;

    if remainder == 0.0 {
        remainder = 0.0_f64.copysign(b);
    } else if (b < 0.0) != (remainder < 0.0) {
        remainder += b;
        quotient -= 1.0;
    }

    let floored = if quotient == 0.0 {
        0.0_f64.copysign(a / b)
    } else {
        let mut floored = quotient.floor();
        if quotient - floored > 0.5 {
            floored += 1.0;
        }
        floored
    };

    (floored, remainder)
}

/// Formats a number for display.
///
/// Integral values print without a fractional part, very large or very small
/// magnitudes use exponent notation, and everything else uses the shortest
/// representation that round-trips.
///
/// ## Example
/// ```
/// use calcbox::util::num::format_number;
///
/// assert_eq!(format_number(4.0), "4");
/// assert_eq!(format_number(2.5), "2.5");
/// assert_eq!(format_number(1e20), "1e20");
/// assert_eq!(format_number(f64::INFINITY), "inf");
/// ```
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let magnitude = value.abs();
    if magnitude >= EXPONENT_ABOVE || (magnitude != 0.0 && magnitude < EXPONENT_BELOW) {
        format!("{value:e}")
    } else {
        format!("{value}")
    }
}
