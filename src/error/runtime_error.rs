use thiserror::Error;

use crate::{
    ast::{BinaryOperator, LiteralValue, UnaryOperator},
    error::ErrorKind,
};

/// Represents all errors that can occur during evaluation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    /// `/`, `//` or `%` with a zero right operand, or zero raised to a
    /// negative power.
    #[error("Division by zero.")]
    DivisionByZero,
    /// A binary operator tag outside the allow-list.
    #[error("Invalid operator: {}", .op.name())]
    InvalidOperator {
        /// The rejected tag.
        op: BinaryOperator,
    },
    /// A unary operator tag outside the allow-list.
    #[error("Invalid unary operator: {}", .op.name())]
    InvalidUnaryOperator {
        /// The rejected tag.
        op: UnaryOperator,
    },
    /// Called a function that is not in the allow-list.
    #[error("Invalid function: {name}")]
    InvalidFunction {
        /// The name of the function.
        name: String,
    },
    /// An allowed function failed while running.
    #[error("Error calling {name}: {cause}")]
    FunctionCall {
        /// The name of the function.
        name:  String,
        /// What went wrong inside the function.
        cause: CallError,
    },
    /// Tried to use an undefined variable.
    #[error("Unknown name: {name}")]
    UnknownName {
        /// The name of the variable.
        name: String,
    },
    /// A literal of a non-numeric kind.
    #[error("Invalid constant: {value}")]
    InvalidConstant {
        /// The rejected literal.
        value: LiteralValue,
    },
    /// A node kind that can never be evaluated.
    #[error("Invalid structure: {kind}")]
    InvalidStructure {
        /// Conventional name of the node kind.
        kind: &'static str,
    },
    /// An allowed operator produced no representable real result.
    #[error("Arithmetic error in {}: {fault}", .op.name())]
    Arithmetic {
        /// The operator that failed.
        op:    BinaryOperator,
        /// Why it failed.
        fault: ArithmeticFault,
    },
}

impl RuntimeError {
    /// Returns the stable kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::DivisionByZero => ErrorKind::DivisionByZero,
            Self::InvalidOperator { .. } => ErrorKind::InvalidOperator,
            Self::InvalidUnaryOperator { .. } => ErrorKind::InvalidUnaryOperator,
            Self::InvalidFunction { .. } => ErrorKind::InvalidFunction,
            Self::FunctionCall { .. } => ErrorKind::FunctionCallError,
            Self::UnknownName { .. } => ErrorKind::UnknownName,
            Self::InvalidConstant { .. } => ErrorKind::InvalidConstant,
            Self::InvalidStructure { .. } => ErrorKind::InvalidStructure,
            Self::Arithmetic { .. } => ErrorKind::ArithmeticError,
        }
    }
}

/// Failure of a binary arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArithmeticFault {
    /// The divisor was zero.
    #[error("division by zero")]
    DivisionByZero,
    /// Finite operands gave a result too large for a double.
    #[error("numerical result out of range")]
    OutOfRange,
    /// The result would be a complex number.
    #[error("result is not a real number")]
    NotReal,
}

/// Failure raised inside an allowed function.
///
/// Arity and keyword failures are reported here as well, since they are only
/// detected once the call reaches the function's signature.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallError {
    /// The argument is outside the function's domain.
    #[error("math domain error")]
    MathDomain,
    /// The result does not fit in a double.
    #[error("math range error")]
    MathRange,
    /// A float division by zero inside the function.
    #[error("float division by zero")]
    ZeroDivision,
    /// A non-finite value where an integer result is required.
    #[error("cannot convert float {value} to integer")]
    NonFinite {
        /// `infinity` or `NaN`.
        value: &'static str,
    },
    /// A fractional value where an integer argument is required.
    #[error("{function}() only accepts integral values")]
    NotIntegral {
        /// The function name.
        function: String,
    },
    /// A negative value where a non-negative integer is required.
    #[error("{function}() not defined for negative values")]
    Negative {
        /// The function name.
        function: String,
    },
    /// A parameter that must be a whole number received a fraction.
    #[error("'float' object cannot be interpreted as an integer")]
    FloatAsInteger,
    /// Too many or too few arguments for a one-parameter function.
    #[error("{function}() takes exactly one argument ({given} given)")]
    ExactlyOne {
        /// The function name.
        function: String,
        /// Number of arguments supplied.
        given:    usize,
    },
    /// More positional arguments than parameters.
    #[error("{function}() takes at most {max} arguments ({given} given)")]
    TooManyArguments {
        /// The function name.
        function: String,
        /// Number of parameters.
        max:      usize,
        /// Number of arguments supplied.
        given:    usize,
    },
    /// A required parameter received no value.
    #[error("{function}() missing required argument: '{parameter}'")]
    MissingArgument {
        /// The function name.
        function:  String,
        /// The parameter name.
        parameter: String,
    },
    /// A keyword that names no parameter.
    #[error("{function}() got an unexpected keyword argument '{keyword}'")]
    UnexpectedKeyword {
        /// The function name.
        function: String,
        /// The keyword used.
        keyword:  String,
    },
    /// A parameter was given both positionally and by keyword.
    #[error("{function}() got multiple values for argument '{parameter}'")]
    DuplicateArgument {
        /// The function name.
        function:  String,
        /// The parameter name.
        parameter: String,
    },
    /// Keywords passed to a positional-only function.
    #[error("{function}() takes no keyword arguments")]
    NoKeywords {
        /// The function name.
        function: String,
    },
}
