use crate::{
    ast::{BinaryOperator, Expr},
    error::{ArithmeticFault, RuntimeError},
    interpreter::evaluator::{
        binary::arithmetic::{self, ArithmeticResult},
        core::{EvalResult, Evaluator},
    },
};

/// Signature shared by every allowed binary operator.
type BinaryFn = fn(f64, f64) -> ArithmeticResult;

/// The binary allow-list. Bitwise, shift and matrix tags are parsed but
/// absent here.
static BINARY_OPERATORS: &[(BinaryOperator, BinaryFn)] =
    &[(BinaryOperator::Add, arithmetic::add),
      (BinaryOperator::Sub, arithmetic::sub),
      (BinaryOperator::Mul, arithmetic::mul),
      (BinaryOperator::Div, arithmetic::div),
      (BinaryOperator::FloorDiv, arithmetic::floor_div),
      (BinaryOperator::Mod, arithmetic::modulo),
      (BinaryOperator::Pow, arithmetic::pow)];

impl Evaluator {
    /// Evaluates a binary operation.
    ///
    /// The left operand is evaluated, then the right one, then the operator
    /// is looked up. Errors in the operands therefore win over a disallowed
    /// operator.
    ///
    /// # Parameters
    /// - `left`: Left-hand expression.
    /// - `op`: Operator tag.
    /// - `right`: Right-hand expression.
    ///
    /// # Returns
    /// The computed value, or:
    /// - `InvalidOperator` for a tag outside the allow-list,
    /// - `DivisionByZero` for a zero divisor,
    /// - `Arithmetic` for overflow or a complex result.
    pub(crate) fn eval_binary_op(&self,
                                 left: &Expr,
                                 op: BinaryOperator,
                                 right: &Expr)
                                 -> EvalResult<f64> {
        let lhs = self.eval(left)?;
        let rhs = self.eval(right)?;
        apply_binary(op, lhs, rhs)
    }
}

/// Applies an allowed binary operator to two values.
///
/// # Example
/// ```
/// use calcbox::{
///     ast::BinaryOperator,
///     error::RuntimeError,
///     interpreter::evaluator::binary::core::apply_binary,
/// };
///
/// assert_eq!(apply_binary(BinaryOperator::Mod, -7.0, 3.0), Ok(2.0));
/// assert_eq!(apply_binary(BinaryOperator::BitOr, 1.0, 2.0),
///            Err(RuntimeError::InvalidOperator { op: BinaryOperator::BitOr }));
/// ```
pub fn apply_binary(op: BinaryOperator, lhs: f64, rhs: f64) -> EvalResult<f64> {
    let (_, apply) = BINARY_OPERATORS.iter()
                                     .find(|(tag, _)| *tag == op)
                                     .ok_or(RuntimeError::InvalidOperator { op })?;

    apply(lhs, rhs).map_err(|fault| match fault {
                       ArithmeticFault::DivisionByZero => RuntimeError::DivisionByZero,
                       fault => RuntimeError::Arithmetic { op, fault },
                   })
}
