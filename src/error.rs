/// Parsing errors.
///
/// Defines all error types that can occur during lexing and parsing of a
/// line: syntax mistakes, compound assignments, calls through something other
/// than a name, and constructs outside the supported language.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation, including
/// the causes reported by operators and functions that fail.
pub mod runtime_error;

use thiserror::Error;

pub use parse_error::ParseError;
pub use runtime_error::{ArithmeticFault, CallError, RuntimeError};

/// Any failure of a calculator line.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The line did not parse.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The line parsed but failed to evaluate.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl Error {
    /// Returns the stable kind of this error.
    ///
    /// # Example
    /// ```
    /// use calcbox::{error::ErrorKind, evaluate_expression};
    ///
    /// let err = evaluate_expression("1 / 0").unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::DivisionByZero);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Parse(e) => e.kind(),
            Self::Runtime(e) => e.kind(),
        }
    }
}

/// Stable, locale-independent classification of every failure.
///
/// Callers that localize or otherwise format messages should match on this
/// instead of on message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The line is not a single expression or simple assignment.
    SyntaxError,
    /// Assignment with compound or multiple targets, or multiple statements.
    SimpleAssignmentOnly,
    /// Division, floor division or modulo by zero.
    DivisionByZero,
    /// Binary operator outside the allow-list.
    InvalidOperator,
    /// Unary operator outside the allow-list.
    InvalidUnaryOperator,
    /// Call target is not a bare identifier.
    FunctionOnly,
    /// Call target is not an allowed function.
    InvalidFunction,
    /// An allowed function failed.
    FunctionCallError,
    /// Identifier not bound in the environment.
    UnknownName,
    /// Non-numeric literal.
    InvalidConstant,
    /// Unsupported construct or node kind.
    InvalidStructure,
    /// Overflow or non-real result of an allowed operator.
    ArithmeticError,
}
