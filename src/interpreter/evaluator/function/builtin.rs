use crate::{
    error::CallError,
    interpreter::evaluator::function::core::{Arguments, CallResult},
};

/// Defines a one-argument builtin from a closure-like body.
///
/// The generated function takes its single bound argument and evaluates
/// `$body` with it in scope as `$x`.
///
/// # Example
/// ```
/// use calcbox::interpreter::evaluator::function::{
///     builtin::sin,
///     core::{Signature, bind},
/// };
///
/// let args = bind(&Signature::positional("sin", &["x"]),
///                 vec![std::f64::consts::PI / 2.0],
///                 vec![]).unwrap();
/// assert_eq!(sin(&args), Ok(1.0));
/// ```
macro_rules! unary_builtin {
    ($(#[$meta:meta])* $fname:ident, |$x:ident| $body:expr) => {
        $(#[$meta])*
        pub fn $fname(args: &Arguments) -> CallResult {
            let $x = args.require(0)?;
            $body
        }
    };
}

/// Rejects the infinities, which have no defined trigonometric value.
fn finite_angle(x: f64) -> CallResult {
    if x.is_infinite() {
        return Err(CallError::MathDomain);
    }
    Ok(x)
}

unary_builtin!(
    /// Sine of an angle in radians.
    sin, |x| Ok(finite_angle(x)?.sin())
);
unary_builtin!(
    /// Cosine of an angle in radians.
    cos, |x| Ok(finite_angle(x)?.cos())
);
unary_builtin!(
    /// Tangent of an angle in radians.
    tan, |x| Ok(finite_angle(x)?.tan())
);

unary_builtin!(
    /// Square root. Negative input is a domain error; `-0.0` is allowed.
    sqrt,
    |x| {
        if x < 0.0 {
            return Err(CallError::MathDomain);
        }
        Ok(x.sqrt())
    }
);

unary_builtin!(
    /// `e` raised to `x`.
    exp,
    |x| {
        let result = x.exp();
        if x.is_finite() && result.is_infinite() {
            return Err(CallError::MathRange);
        }
        Ok(result)
    }
);

unary_builtin!(abs, |x| Ok(x.abs()));

unary_builtin!(
    /// Radians to degrees.
    deg, |x| Ok(x.to_degrees())
);
unary_builtin!(
    /// Degrees to radians.
    rad, |x| Ok(x.to_radians())
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::evaluator::function::core::{Signature, bind};

    fn call(f: fn(&Arguments) -> CallResult, x: f64) -> CallResult {
        let args = bind(&Signature::positional("f", &["x"]), vec![x], vec![]).unwrap();
        f(&args)
    }

    #[test]
    fn trigonometry_rejects_infinity() {
        assert_eq!(call(sin, f64::INFINITY), Err(CallError::MathDomain));
        assert_eq!(call(cos, f64::NEG_INFINITY), Err(CallError::MathDomain));
        assert!(call(tan, f64::NAN).unwrap().is_nan());
        assert_eq!(call(cos, 0.0), Ok(1.0));
    }

    #[test]
    fn sqrt_domain() {
        assert_eq!(call(sqrt, 16.0), Ok(4.0));
        assert_eq!(call(sqrt, -1.0), Err(CallError::MathDomain));
        assert_eq!(call(sqrt, f64::INFINITY), Ok(f64::INFINITY));
    }

    #[test]
    fn exp_overflow_is_a_range_error() {
        assert_eq!(call(exp, 1000.0), Err(CallError::MathRange));
        assert_eq!(call(exp, f64::INFINITY), Ok(f64::INFINITY));
        assert_eq!(call(exp, f64::NEG_INFINITY), Ok(0.0));
    }

    #[test]
    fn angle_conversion() {
        assert_eq!(call(deg, std::f64::consts::PI), Ok(180.0));
        assert_eq!(call(rad, 180.0), Ok(std::f64::consts::PI));
        assert_eq!(call(abs, -2.5), Ok(2.5));
    }
}
