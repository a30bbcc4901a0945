use crate::{error::ArithmeticFault, util::num::floor_div_mod};

/// Result of one arithmetic operator.
pub type ArithmeticResult = Result<f64, ArithmeticFault>;

/// `a + b`. Infinite operands propagate.
#[allow(clippy::unnecessary_wraps)]
pub fn add(a: f64, b: f64) -> ArithmeticResult {
    Ok(a + b)
}

/// `a - b`. Infinite operands propagate.
#[allow(clippy::unnecessary_wraps)]
pub fn sub(a: f64, b: f64) -> ArithmeticResult {
    Ok(a - b)
}

/// `a * b`. Infinite operands propagate.
#[allow(clippy::unnecessary_wraps)]
pub fn mul(a: f64, b: f64) -> ArithmeticResult {
    Ok(a * b)
}

/// True division. A finite quotient may still overflow to infinity.
///
/// # Example
/// ```
/// use calcbox::{error::ArithmeticFault, interpreter::evaluator::binary::arithmetic::div};
///
/// assert_eq!(div(7.0, 2.0), Ok(3.5));
/// assert_eq!(div(1.0, 0.0), Err(ArithmeticFault::DivisionByZero));
/// ```
pub fn div(a: f64, b: f64) -> ArithmeticResult {
    if b == 0.0 {
        return Err(ArithmeticFault::DivisionByZero);
    }
    Ok(a / b)
}

/// Floor division, rounding the quotient toward negative infinity.
pub fn floor_div(a: f64, b: f64) -> ArithmeticResult {
    if b == 0.0 {
        return Err(ArithmeticFault::DivisionByZero);
    }
    Ok(floor_div_mod(a, b).0)
}

/// Modulo with the sign of the divisor, so that `a == (a // b) * b + a % b`.
///
/// # Example
/// ```
/// use calcbox::interpreter::evaluator::binary::arithmetic::modulo;
///
/// assert_eq!(modulo(-7.0, 3.0), Ok(2.0));
/// assert_eq!(modulo(7.0, -3.0), Ok(-2.0));
/// ```
pub fn modulo(a: f64, b: f64) -> ArithmeticResult {
    if b == 0.0 {
        return Err(ArithmeticFault::DivisionByZero);
    }
    Ok(floor_div_mod(a, b).1)
}

/// Exponentiation over the reals.
///
/// - anything to the power zero is one, NaN included;
/// - zero to a negative power is a division by zero;
/// - a negative finite base with a fractional finite exponent has no real
///   result;
/// - finite operands with an infinite result overflow.
///
/// # Example
/// ```
/// use calcbox::{error::ArithmeticFault, interpreter::evaluator::binary::arithmetic::pow};
///
/// assert_eq!(pow(2.0, -1.0), Ok(0.5));
/// assert_eq!(pow(-8.0, 1.0 / 3.0), Err(ArithmeticFault::NotReal));
/// assert_eq!(pow(10.0, 400.0), Err(ArithmeticFault::OutOfRange));
/// ```
pub fn pow(base: f64, exponent: f64) -> ArithmeticResult {
    if exponent == 0.0 {
        return Ok(1.0);
    }
    if base == 0.0 && exponent < 0.0 {
        return Err(ArithmeticFault::DivisionByZero);
    }
    if base.is_finite()
       && base < 0.0
       && exponent.is_finite()
       && exponent.fract() != 0.0
    {
        return Err(ArithmeticFault::NotReal);
    }
    let result = base.powf(exponent);
    if base.is_finite() && exponent.is_finite() && result.is_infinite() {
        return Err(ArithmeticFault::OutOfRange);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_division_rounds_down() {
        assert_eq!(floor_div(7.0, 2.0), Ok(3.0));
        assert_eq!(floor_div(-7.0, 2.0), Ok(-4.0));
        assert_eq!(floor_div(7.5, -2.0), Ok(-4.0));
    }

    #[test]
    fn zero_divisor_is_rejected_everywhere() {
        for op in [div, floor_div, modulo] {
            assert_eq!(op(1.0, 0.0), Err(ArithmeticFault::DivisionByZero));
            assert_eq!(op(1.0, -0.0), Err(ArithmeticFault::DivisionByZero));
        }
        assert_eq!(pow(0.0, -2.0), Err(ArithmeticFault::DivisionByZero));
    }

    #[test]
    fn overflowing_product_follows_ieee() {
        assert_eq!(mul(1e308, 10.0), Ok(f64::INFINITY));
    }

    #[test]
    fn power_edge_cases() {
        assert_eq!(pow(f64::NAN, 0.0), Ok(1.0));
        assert_eq!(pow(-2.0, 3.0), Ok(-8.0));
        assert_eq!(pow(f64::INFINITY, 2.0), Ok(f64::INFINITY));
        assert_eq!(pow(0.0, 0.5), Ok(0.0));
    }
}
