use crate::{
    ast::{Expr, Keyword},
    error::{CallError, RuntimeError},
    interpreter::evaluator::{
        core::{EvalResult, Evaluator},
        function::{builtin, factorial, log, round},
    },
};

/// Result of a builtin body.
pub type CallResult = Result<f64, CallError>;

/// Type alias for builtin function handlers.
///
/// A builtin receives its arguments already bound to its parameters.
type BuiltinFn = fn(&Arguments) -> CallResult;

/// The parameter list of a builtin.
///
/// Parameters past `required` are optional. Only builtins created with
/// [`Signature::with_keywords`] accept `name=value` arguments.
#[derive(Debug, Clone, Copy)]
pub struct Signature {
    /// Name used in argument errors.
    pub name:     &'static str,
    /// Parameter names, in positional order.
    pub params:   &'static [&'static str],
    /// Number of leading parameters that must receive a value.
    pub required: usize,
    /// Whether parameters may be passed by keyword.
    pub keywords: bool,
}

impl Signature {
    /// A signature whose parameters are all required and positional-only.
    #[must_use]
    pub const fn positional(name: &'static str, params: &'static [&'static str]) -> Self {
        Self { name,
               params,
               required: params.len(),
               keywords: false }
    }

    /// A signature whose parameters may be given by keyword, with the
    /// parameters after `required` optional.
    #[must_use]
    pub const fn with_keywords(name: &'static str,
                               params: &'static [&'static str],
                               required: usize)
                               -> Self {
        Self { name,
               params,
               required,
               keywords: true }
    }
}

/// Arguments bound to the parameters of a [`Signature`].
#[derive(Debug, Clone, PartialEq)]
pub struct Arguments {
    function: &'static str,
    params:   &'static [&'static str],
    slots:    Vec<Option<f64>>,
}

impl Arguments {
    /// The value of the parameter at `index`, if one was supplied.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.slots.get(index).copied().flatten()
    }

    /// The value of a parameter that must have been supplied.
    ///
    /// # Errors
    /// `MissingArgument` if the parameter has no value.
    pub fn require(&self, index: usize) -> CallResult {
        self.get(index).ok_or_else(|| {
                           CallError::MissingArgument { function:  self.function.to_string(),
                                                        parameter: self.params
                                                                       .get(index)
                                                                       .copied()
                                                                       .unwrap_or_default()
                                                                       .to_string(), }
                       })
    }
}

/// Binds evaluated arguments to a signature.
///
/// Positional values fill parameters in order, then keywords fill the
/// parameters they name.
///
/// # Errors
/// - `NoKeywords` if keywords are passed to a positional-only builtin.
/// - `ExactlyOne` for a wrong count on a one-parameter builtin.
/// - `TooManyArguments` for surplus positional values.
/// - `UnexpectedKeyword` for a keyword naming no parameter.
/// - `DuplicateArgument` for a parameter given twice.
/// - `MissingArgument` for a required parameter left empty.
///
/// # Example
/// ```
/// use calcbox::{
///     error::CallError,
///     interpreter::evaluator::function::core::{Signature, bind},
/// };
///
/// let signature = Signature::with_keywords("log", &["x", "base"], 1);
/// let args = bind(&signature, vec![8.0], vec![("base", 2.0)]).unwrap();
/// assert_eq!(args.get(1), Some(2.0));
///
/// assert_eq!(bind(&signature, vec![8.0], vec![("x", 1.0)]),
///            Err(CallError::DuplicateArgument { function:  "log".to_string(),
///                                               parameter: "x".to_string(), }));
/// ```
pub fn bind(signature: &Signature,
            positional: Vec<f64>,
            keywords: Vec<(&str, f64)>)
            -> Result<Arguments, CallError> {
    let function = signature.name;
    let params = signature.params;
    let single = params.len() == 1 && signature.required == 1 && !signature.keywords;

    if !signature.keywords && !keywords.is_empty() {
        return Err(CallError::NoKeywords { function: function.to_string() });
    }
    if single && positional.len() != 1 {
        return Err(CallError::ExactlyOne { function: function.to_string(),
                                           given:    positional.len(), });
    }
    if positional.len() > params.len() {
        return Err(CallError::TooManyArguments { function: function.to_string(),
                                                 max:      params.len(),
                                                 given:    positional.len()
                                                           + keywords.len(), });
    }

    let mut slots = vec![None; params.len()];
    for (slot, value) in slots.iter_mut().zip(positional) {
        *slot = Some(value);
    }

    for (keyword, value) in keywords {
        let Some(index) = params.iter().position(|p| *p == keyword) else {
            return Err(CallError::UnexpectedKeyword { function: function.to_string(),
                                                      keyword:  keyword.to_string(), });
        };
        if slots[index].replace(value).is_some() {
            return Err(CallError::DuplicateArgument { function:  function.to_string(),
                                                      parameter: keyword.to_string(), });
        }
    }

    if let Some(index) = slots[..signature.required].iter().position(Option::is_none) {
        return Err(CallError::MissingArgument { function:  function.to_string(),
                                                parameter: params[index].to_string(), });
    }

    Ok(Arguments { function,
                   params,
                   slots })
}

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - the name a line calls it by,
/// - its signature,
/// - a function pointer implementing the builtin.
///
/// The macro produces:
/// - `BuiltinDef` (internal metadata),
/// - `BUILTIN_TABLE` (static table for lookup),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                signature: $signature:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            name:      &'static str,
            signature: Signature,
            func:      BuiltinFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, signature: $signature, func: $func },
            )*
        ];
        /// Names of every function a line may call.
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "sin"       => { signature: Signature::positional("sin", &["x"]), func: builtin::sin },
    "cos"       => { signature: Signature::positional("cos", &["x"]), func: builtin::cos },
    "tan"       => { signature: Signature::positional("tan", &["x"]), func: builtin::tan },
    "sqrt"      => { signature: Signature::positional("sqrt", &["x"]), func: builtin::sqrt },
    "log"       => { signature: Signature::with_keywords("log", &["x", "base"], 1), func: log::log },
    "ln"        => { signature: Signature::positional("ln", &["x"]), func: log::ln },
    "exp"       => { signature: Signature::positional("exp", &["x"]), func: builtin::exp },
    "abs"       => { signature: Signature::positional("abs", &["x"]), func: builtin::abs },
    "round"     => { signature: Signature::with_keywords("round", &["number", "ndigits"], 1), func: round::round },
    "floor"     => { signature: Signature::positional("floor", &["x"]), func: round::floor },
    "ceil"      => { signature: Signature::positional("ceil", &["x"]), func: round::ceil },
    "fact"      => { signature: Signature::positional("factorial", &["x"]), func: factorial::factorial },
    "factorial" => { signature: Signature::positional("factorial", &["x"]), func: factorial::factorial },
    "deg"       => { signature: Signature::positional("deg", &["x"]), func: builtin::deg },
    "rad"       => { signature: Signature::positional("rad", &["x"]), func: builtin::rad },
}

impl Evaluator {
    /// Evaluates a function call.
    ///
    /// The name is checked against the allow-list before any argument is
    /// evaluated. Positional arguments are then evaluated left to right,
    /// followed by the keyword arguments, and the values are bound to the
    /// builtin's signature.
    ///
    /// # Parameters
    /// - `name`: Function name.
    /// - `arguments`: Positional argument expressions.
    /// - `keywords`: Keyword argument expressions.
    ///
    /// # Returns
    /// The function result, `InvalidFunction` for an unknown name, or
    /// `FunctionCall` wrapping whatever failed inside the call.
    pub(crate) fn eval_function_call(&self,
                                     name: &str,
                                     arguments: &[Expr],
                                     keywords: &[Keyword])
                                     -> EvalResult<f64> {
        let builtin =
            BUILTIN_TABLE.iter()
                         .find(|b| b.name == name)
                         .ok_or_else(|| RuntimeError::InvalidFunction { name: name.to_string() })?;

        let positional = arguments.iter()
                                  .map(|arg| self.eval(arg))
                                  .collect::<EvalResult<Vec<_>>>()?;
        let keyword_values = keywords.iter()
                                     .map(|k| Ok((k.name.as_str(), self.eval(&k.value)?)))
                                     .collect::<EvalResult<Vec<_>>>()?;

        tracing::trace!(name, ?positional, ?keyword_values, "calling builtin");

        let result = bind(&builtin.signature, positional, keyword_values).and_then(|args| {
                                                                             (builtin.func)(&args)
                                                                         });
        result.map_err(|cause| RuntimeError::FunctionCall { name: name.to_string(),
                                                            cause })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SINGLE: Signature = Signature::positional("sin", &["x"]);
    const ROUND: Signature = Signature::with_keywords("round", &["number", "ndigits"], 1);

    #[test]
    fn single_parameter_counts() {
        assert_eq!(bind(&SINGLE, vec![], vec![]),
                   Err(CallError::ExactlyOne { function: "sin".to_string(),
                                               given:    0, }));
        assert_eq!(bind(&SINGLE, vec![1.0, 2.0], vec![]),
                   Err(CallError::ExactlyOne { function: "sin".to_string(),
                                               given:    2, }));
    }

    #[test]
    fn positional_only_refuses_keywords() {
        assert_eq!(bind(&SINGLE, vec![], vec![("x", 1.0)]),
                   Err(CallError::NoKeywords { function: "sin".to_string() }));
    }

    #[test]
    fn keywords_fill_named_slots() {
        let args = bind(&ROUND, vec![], vec![("ndigits", 2.0), ("number", 1.234)]).unwrap();
        assert_eq!(args.require(0), Ok(1.234));
        assert_eq!(args.get(1), Some(2.0));
    }

    #[test]
    fn keyword_errors() {
        assert_eq!(bind(&ROUND, vec![1.0], vec![("digits", 2.0)]),
                   Err(CallError::UnexpectedKeyword { function: "round".to_string(),
                                                      keyword:  "digits".to_string(), }));
        assert_eq!(bind(&ROUND, vec![], vec![("ndigits", 2.0)]),
                   Err(CallError::MissingArgument { function:  "round".to_string(),
                                                    parameter: "number".to_string(), }));
        assert_eq!(bind(&ROUND, vec![1.0, 2.0, 3.0], vec![]),
                   Err(CallError::TooManyArguments { function: "round".to_string(),
                                                     max:      2,
                                                     given:    3, }));
    }

    #[test]
    fn fact_and_factorial_are_both_allowed() {
        assert!(BUILTIN_FUNCTIONS.contains(&"fact") && BUILTIN_FUNCTIONS.contains(&"factorial"));
        assert!(!BUILTIN_FUNCTIONS.contains(&"print"));
    }
}
