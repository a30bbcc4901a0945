use crate::{
    error::CallError,
    interpreter::evaluator::function::core::{Arguments, CallResult},
    util::num::{is_integral, non_finite_error},
};

/// Beyond this many digits in either direction, rounding is the identity (or
/// a signed zero).
const MAX_DIGITS: f64 = 400.0;

/// Rounds a number, halfway cases to even.
///
/// Without `ndigits` the result is a whole number, and a non-finite input is
/// an error. With `ndigits` the number is rounded to that many decimal
/// places; a negative `ndigits` rounds to tens, hundreds, and so on.
///
/// # Errors
/// - `NonFinite` for infinities and NaN without `ndigits`.
/// - `FloatAsInteger` if `ndigits` is not a whole number.
/// - `MathRange` if rounding to tens or more overflows.
///
/// # Example
/// ```
/// use calcbox::interpreter::evaluator::function::{
///     core::{Signature, bind},
///     round::round,
/// };
///
/// let signature = Signature::with_keywords("round", &["number", "ndigits"], 1);
///
/// assert_eq!(round(&bind(&signature, vec![2.5], vec![]).unwrap()), Ok(2.0));
/// assert_eq!(round(&bind(&signature, vec![3.5], vec![]).unwrap()), Ok(4.0));
/// assert_eq!(round(&bind(&signature, vec![2.675, 2.0], vec![]).unwrap()), Ok(2.67));
/// assert_eq!(round(&bind(&signature, vec![1234.0, -2.0], vec![]).unwrap()), Ok(1200.0));
/// ```
pub fn round(args: &Arguments) -> CallResult {
    let number = args.require(0)?;

    let Some(ndigits) = args.get(1) else {
        if let Some(err) = non_finite_error(number) {
            return Err(err);
        }
        return Ok(number.round_ties_even() + 0.0);
    };

    if !is_integral(ndigits) {
        return Err(CallError::FloatAsInteger);
    }
    if !number.is_finite() || number == 0.0 || ndigits > MAX_DIGITS {
        return Ok(number);
    }
    if ndigits < -MAX_DIGITS {
        return Ok(0.0 * number);
    }

    if ndigits >= 0.0 {
        Ok(round_to_decimals(number, ndigits))
    } else {
        round_to_tens(number, -ndigits)
    }
}

/// Rounds through the correctly rounded decimal expansion of `number`, so
/// that `2.675` (stored just below) becomes `2.67`.
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_sign_loss)]
fn round_to_decimals(number: f64, ndigits: f64) -> f64 {
    let precision = ndigits as usize;
    format!("{number:.precision$}").parse().unwrap_or(number)
}

/// Rounds to a multiple of `10^exponent`, again through the decimal expansion,
/// so that `round(1.5e300, -300)` is `2e300` and not a neighbour of it.
#[allow(clippy::cast_possible_truncation)]
fn round_to_tens(number: f64, exponent: f64) -> CallResult {
    if exponent > f64::from(f64::MAX_10_EXP) {
        return Ok(0.0 * number);
    }
    let exponent = exponent as i32;
    let digits = leading_exponent(number) - exponent;

    let rounded = if let Ok(precision) = usize::try_from(digits) {
        format!("{number:.precision$e}").parse().unwrap_or(number)
    } else if digits == -1 {
        // The leading digit sits just below the rounding position.
        let half: f64 = format!("5e{}", exponent - 1).parse().unwrap_or(f64::INFINITY);
        if number.abs() > half {
            format!("1e{exponent}").parse().map_or(number, |unit: f64| unit.copysign(number))
        } else {
            0.0 * number
        }
    } else {
        0.0 * number
    };

    if rounded.is_infinite() {
        return Err(CallError::MathRange);
    }
    Ok(rounded)
}

/// Decimal exponent of the leading digit of a finite, non-zero `number`.
fn leading_exponent(number: f64) -> i32 {
    let expanded = format!("{number:.40e}");
    expanded.rsplit_once('e').and_then(|(_, exp)| exp.parse().ok()).unwrap_or(0)
}

/// Largest whole number not greater than `x`.
///
/// # Errors
/// `NonFinite` for infinities and NaN.
pub fn floor(args: &Arguments) -> CallResult {
    let x = args.require(0)?;
    non_finite_error(x).map_or(Ok(x.floor() + 0.0), Err)
}

/// Smallest whole number not less than `x`.
///
/// # Errors
/// `NonFinite` for infinities and NaN.
pub fn ceil(args: &Arguments) -> CallResult {
    let x = args.require(0)?;
    non_finite_error(x).map_or(Ok(x.ceil() + 0.0), Err)
}
