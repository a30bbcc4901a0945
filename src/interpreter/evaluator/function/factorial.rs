use crate::{
    error::CallError,
    interpreter::evaluator::function::core::{Arguments, CallResult},
    util::num::f64_to_u64_checked,
};

/// Largest `n` whose factorial fits in a `u128`.
const MAX_EXACT: u64 = 34;
/// Largest `n` whose factorial fits in an `f64`.
const MAX_FINITE: u64 = 170;
/// Bits kept free at the bottom of a `u128` so that one more factor below
/// `2^8` cannot overflow it.
const FACTOR_BITS: u32 = 8;

/// Computes `n!` for a non-negative whole number.
///
/// Products up to `34!` are exact. Beyond that the product is carried as a
/// 120-bit mantissa and a binary exponent, and is rounded to an `f64` once at
/// the end, so `170!` is the nearest `f64` to the true value.
///
/// # Errors
/// - `NotIntegral` for fractional input.
/// - `Negative` for input below zero.
/// - `NonFinite` for infinities and NaN.
/// - `MathRange` once the result exceeds the largest `f64` (past `170!`).
///
/// # Example
/// ```
/// use calcbox::interpreter::evaluator::function::{
///     core::{Signature, bind},
///     factorial::factorial,
/// };
///
/// let args = bind(&Signature::positional("factorial", &["x"]), vec![5.0], vec![]).unwrap();
/// assert_eq!(factorial(&args), Ok(120.0));
/// ```
#[allow(clippy::cast_precision_loss)]
#[allow(clippy::cast_possible_wrap)]
pub fn factorial(args: &Arguments) -> CallResult {
    let n = f64_to_u64_checked(args.require(0)?, "factorial")?;
    if n > MAX_FINITE {
        return Err(CallError::MathRange);
    }

    let mut mantissa: u128 = (1..=u128::from(n.min(MAX_EXACT))).product();
    let mut shift = 0_i32;
    for k in (MAX_EXACT + 1)..=n {
        let spare = mantissa.leading_zeros();
        if spare < FACTOR_BITS {
            mantissa >>= FACTOR_BITS - spare;
            shift += (FACTOR_BITS - spare) as i32;
        }
        mantissa *= u128::from(k);
    }

    let result = mantissa as f64 * 2f64.powi(shift);
    if result.is_infinite() {
        return Err(CallError::MathRange);
    }
    Ok(result)
}
