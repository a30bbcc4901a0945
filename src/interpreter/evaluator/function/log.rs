use crate::{
    error::CallError,
    interpreter::evaluator::function::core::{Arguments, CallResult},
};

/// Base used by `log` when none is given.
const DEFAULT_BASE: f64 = 10.0;

/// Natural logarithm over the positive reals.
///
/// NaN and positive infinity pass through unchanged.
fn ln_checked(x: f64) -> CallResult {
    if x <= 0.0 {
        return Err(CallError::MathDomain);
    }
    Ok(x.ln())
}

/// Computes the logarithm of `x` to `base` (default 10).
///
/// The result is `ln(x) / ln(base)`, so `log(1000)` carries the rounding of
/// that quotient rather than being exactly `3`.
///
/// # Errors
/// - `MathDomain` if `x <= 0` or `base <= 0`.
/// - `ZeroDivision` if `base == 1`.
///
/// # Example
/// ```
/// use calcbox::{
///     error::CallError,
///     interpreter::evaluator::function::{
///         core::{Signature, bind},
///         log::log,
///     },
/// };
///
/// let signature = Signature::with_keywords("log", &["x", "base"], 1);
///
/// let args = bind(&signature, vec![8.0], vec![("base", 2.0)]).unwrap();
/// assert_eq!(log(&args), Ok(3.0));
///
/// let args = bind(&signature, vec![8.0, 1.0], vec![]).unwrap();
/// assert_eq!(log(&args), Err(CallError::ZeroDivision));
/// ```
pub fn log(args: &Arguments) -> CallResult {
    let x = args.require(0)?;
    let base = args.get(1).unwrap_or(DEFAULT_BASE);

    let numerator = ln_checked(x)?;
    let denominator = ln_checked(base)?;
    if denominator == 0.0 {
        return Err(CallError::ZeroDivision);
    }
    Ok(numerator / denominator)
}

/// Natural logarithm.
pub fn ln(args: &Arguments) -> CallResult {
    ln_checked(args.require(0)?)
}
