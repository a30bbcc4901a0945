use crate::{
    ast::{Expr, UnaryOperator},
    error::RuntimeError,
    interpreter::evaluator::core::{EvalResult, Evaluator},
};

/// The unary allow-list. `not` and `~` are parsed but absent here.
static UNARY_OPERATORS: &[(UnaryOperator, fn(f64) -> f64)] =
    &[(UnaryOperator::Plus, |x| x), (UnaryOperator::Negate, |x| -x)];

impl Evaluator {
    /// Evaluates a unary operation.
    ///
    /// The operand is evaluated first, so an error inside it is reported
    /// before a disallowed operator.
    ///
    /// # Parameters
    /// - `op`: The operator tag.
    /// - `expr`: The operand.
    ///
    /// # Returns
    /// The operator applied to the operand, or `InvalidUnaryOperator` if the
    /// tag is not allowed.
    pub(crate) fn eval_unary_op(&self, op: UnaryOperator, expr: &Expr) -> EvalResult<f64> {
        let value = self.eval(expr)?;
        let (_, apply) = UNARY_OPERATORS.iter()
                                        .find(|(tag, _)| *tag == op)
                                        .ok_or(RuntimeError::InvalidUnaryOperator { op })?;
        Ok(apply(value))
    }
}
