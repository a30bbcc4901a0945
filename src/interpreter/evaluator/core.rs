use crate::{
    ast::{Expr, LiteralValue, Statement},
    error::{Error, RuntimeError},
    interpreter::{
        evaluator::environment::Environment,
        lexer::tokenize,
        parser::statement::{parse_expression_line, parse_line},
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// The outcome of one successfully evaluated line.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// The value of the expression, or the value that was assigned.
    pub value: f64,
    /// The assigned name. `None` for a bare expression.
    pub name:  Option<String>,
}

/// Evaluates calculator lines against a variable environment.
///
/// ## Usage
///
/// An `Evaluator` is created once and reused for every line of a session.
/// Assignments made through [`Evaluator::eval_line`] persist for its whole
/// lifetime; [`Evaluator::eval_expr`] only ever reads.
///
/// # Example
/// ```
/// use calcbox::Evaluator;
///
/// let mut evaluator = Evaluator::new();
/// let assigned = evaluator.eval_line("x = 5").unwrap();
/// assert_eq!(assigned.name.as_deref(), Some("x"));
///
/// assert_eq!(evaluator.eval_expr("x * 2").unwrap(), 10.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    environment: Environment,
}

impl Evaluator {
    /// Creates an evaluator whose environment holds only `pi`, `e` and `tau`.
    #[must_use]
    pub fn new() -> Self {
        Self { environment: Environment::new() }
    }

    /// Creates an evaluator with extra initial bindings.
    ///
    /// The bindings are merged over the built-in constants, so they may
    /// shadow `pi`, `e` or `tau`.
    ///
    /// # Example
    /// ```
    /// use calcbox::Evaluator;
    ///
    /// let evaluator = Evaluator::with_variables([("pi", 3.0), ("r", 2.0)]);
    /// assert_eq!(evaluator.eval_expr("pi * r ** 2").unwrap(), 12.0);
    /// ```
    #[must_use]
    pub fn with_variables<I, K>(bindings: I) -> Self
        where I: IntoIterator<Item = (K, f64)>,
              K: Into<String>
    {
        let mut environment = Environment::new();
        environment.extend(bindings);
        Self { environment }
    }

    /// Read access to the current bindings.
    #[must_use]
    pub const fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the node dispatch of the evaluator. Every node kind has an
    /// arm; those that can never produce a number reject themselves.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    ///
    /// # Returns
    /// The value of the expression, or the first error met depth-first, left
    /// to right.
    pub fn eval(&self, expr: &Expr) -> EvalResult<f64> {
        match expr {
            Expr::Literal { value, .. } => Self::eval_literal(value),
            Expr::Identifier { name, .. } => self.eval_identifier(name),
            Expr::UnaryOp { op, expr, .. } => self.eval_unary_op(*op, expr),
            Expr::BinaryOp { left, op, right, .. } => self.eval_binary_op(left, *op, right),
            Expr::FunctionCall { name,
                                 arguments,
                                 keywords,
                                 .. } => self.eval_function_call(name, arguments, keywords),
            Expr::Tuple { .. } => Err(RuntimeError::InvalidStructure { kind: expr.kind() }),
        }
    }

    /// Evaluates a single statement.
    ///
    /// For an assignment the right-hand side is evaluated against the
    /// environment as it was before the line, and the binding is made only
    /// once that succeeded.
    ///
    /// # Returns
    /// The value, with the bound name for an assignment.
    pub fn eval_statement(&mut self, statement: &Statement) -> EvalResult<Evaluation> {
        match statement {
            Statement::Expression(expr) => {
                let value = self.eval(expr)?;
                Ok(Evaluation { value, name: None })
            },
            Statement::Assignment { name, value, .. } => {
                let value = self.eval(value)?;
                self.environment.set(name.as_str(), value);
                tracing::debug!(name = %name, value, "assigned");
                Ok(Evaluation { value,
                                name: Some(name.clone()) })
            },
        }
    }

    /// Parses and evaluates a pure expression.
    ///
    /// Assignment is not available here: `x = 1` is a syntax error. The
    /// environment is only read.
    ///
    /// # Example
    /// ```
    /// use calcbox::{Evaluator, error::ErrorKind};
    ///
    /// let evaluator = Evaluator::new();
    /// assert_eq!(evaluator.eval_expr("2 ** 3 + 1").unwrap(), 9.0);
    /// assert_eq!(evaluator.eval_expr("x = 1").unwrap_err().kind(), ErrorKind::SyntaxError);
    /// ```
    #[tracing::instrument(level = "debug", skip(self), err)]
    pub fn eval_expr(&self, source: &str) -> Result<f64, Error> {
        let tokens = tokenize(source)?;
        let expr = parse_expression_line(&tokens)?;
        let value = self.eval(&expr)?;
        tracing::debug!(value, "evaluated");
        Ok(value)
    }

    /// Parses and evaluates one line: a bare expression or `NAME = expr`.
    ///
    /// The environment changes only when an assignment succeeds.
    #[tracing::instrument(level = "debug", skip(self), err)]
    pub fn eval_line(&mut self, source: &str) -> Result<Evaluation, Error> {
        let tokens = tokenize(source)?;
        let statement = parse_line(&tokens)?;
        let evaluation = self.eval_statement(&statement)?;
        tracing::debug!(value = evaluation.value, "evaluated");
        Ok(evaluation)
    }

    /// Only numeric literals have a value.
    fn eval_literal(value: &LiteralValue) -> EvalResult<f64> {
        match value {
            LiteralValue::Number(n) => Ok(*n),
            other => Err(RuntimeError::InvalidConstant { value: other.clone() }),
        }
    }

    fn eval_identifier(&self, name: &str) -> EvalResult<f64> {
        self.environment
            .get(name)
            .ok_or_else(|| RuntimeError::UnknownName { name: name.to_string() })
    }
}
