use clap::ValueEnum;

use crate::error::{Error, ErrorKind, ParseError, RuntimeError};

/// A language the calculator can talk in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum Language {
    /// English.
    #[default]
    En,
    /// Spanish.
    Es,
}

/// Every user-facing string of one language.
///
/// Templates use `{}` placeholders, filled in order.
#[derive(Debug)]
pub struct Messages {
    pub welcome:            &'static str,
    pub help:               &'static str,
    pub goodbye:            &'static str,
    pub empty_history:      &'static str,
    /// Prefix of every error line.
    pub error_prefix:       &'static str,
    pub syntax_error:       &'static str,
    pub zero_division:      &'static str,
    pub invalid_operator:   &'static str,
    pub invalid_unary:      &'static str,
    pub function_only:      &'static str,
    pub invalid_function:   &'static str,
    pub function_error:     &'static str,
    pub unknown_name:       &'static str,
    pub invalid_constant:   &'static str,
    pub invalid_structure:  &'static str,
    pub simple_assign_only: &'static str,
    pub arithmetic_error:   &'static str,
    /// Lines that print the help text.
    pub help_commands:      &'static [&'static str],
    /// Lines that print the history.
    pub history_commands:   &'static [&'static str],
    /// Lines that end the session.
    pub exit_commands:      &'static [&'static str],
}

static EN: Messages = Messages {
    welcome:            "🧮 Terminal Calculator (type 'help' for commands, 'exit' to quit)",
    help:               "\
Terminal Calculator
-------------------
Type mathematical expressions and press Enter.
Examples:
  2 + 2 * 3
  (5 - 2)**3 / 7
  sqrt(16) + sin(pi/2)
  log(100, 10)   # base 10 logarithm
  ln(e)          # natural logarithm
  fact(5)        # factorial
  x = 2.5
  y = x**2 + 3

Commands:
  help   -> show this help
  hist   -> show recent results
  exit   -> quit the program",
    goodbye:            "Goodbye!",
    empty_history:      "(empty history)",
    error_prefix:       "Error: ",
    syntax_error:       "Syntax error: {}",
    zero_division:      "Division by zero.",
    invalid_operator:   "Invalid operator: {}",
    invalid_unary:      "Invalid unary operator: {}",
    function_only:      "Only function calls by name are allowed.",
    invalid_function:   "Invalid function: {}",
    function_error:     "Error calling {}: {}",
    unknown_name:       "Unknown name: {}",
    invalid_constant:   "Invalid constant: {}",
    invalid_structure:  "Invalid structure: {}",
    simple_assign_only: "Only simple assignments allowed (e.g., x = 2).",
    arithmetic_error:   "Arithmetic error in {}: {}",
    help_commands:      &["help", "?"],
    history_commands:   &["hist", "history"],
    exit_commands:      &["exit", "quit"],
};

static ES: Messages = Messages {
    welcome:            "🧮 Calculadora de terminal (escribe 'ayuda' para ver comandos, 'salir' para terminar)",
    help:               "\
Calculadora de terminal
-----------------------
Escribe expresiones matemáticas y presiona Enter.
Ejemplos:
  2 + 2 * 3
  (5 - 2)**3 / 7
  sqrt(16) + sin(pi/2)
  log(100, 10)   # logaritmo base 10
  ln(e)          # logaritmo natural
  fact(5)        # factorial
  x = 2.5
  y = x**2 + 3

Comandos:
  ayuda  -> muestra esta ayuda
  hist   -> muestra los últimos resultados
  salir  -> termina el programa",
    goodbye:            "¡Hasta luego!",
    empty_history:      "(historial vacío)",
    error_prefix:       "Error: ",
    syntax_error:       "Error de sintaxis: {}",
    zero_division:      "División entre cero.",
    invalid_operator:   "Operador no permitido: {}",
    invalid_unary:      "Operador unario no permitido: {}",
    function_only:      "Solo se permiten llamadas a funciones por nombre.",
    invalid_function:   "Función no permitida: {}",
    function_error:     "Error al llamar {}: {}",
    unknown_name:       "Nombre desconocido: {}",
    invalid_constant:   "Constante no permitida: {}",
    invalid_structure:  "Estructura no permitida: {}",
    simple_assign_only: "Solo se permiten asignaciones simples (ej. x = 2).",
    arithmetic_error:   "Error aritmético en {}: {}",
    help_commands:      &["ayuda", "?"],
    history_commands:   &["hist"],
    exit_commands:      &["salir", "exit"],
};

impl Language {
    /// The message table of this language.
    #[must_use]
    pub const fn messages(self) -> &'static Messages {
        match self {
            Self::En => &EN,
            Self::Es => &ES,
        }
    }

    /// Renders an error in this language.
    ///
    /// The template is chosen by the error's [`ErrorKind`]. Names, operator
    /// tags and the causes reported by math functions are not translated. In
    /// English the result equals the error's `Display` output.
    ///
    /// # Example
    /// ```
    /// use calcbox::{evaluate_expression, i18n::Language};
    ///
    /// let err = evaluate_expression("1 / 0").unwrap_err();
    /// assert_eq!(Language::En.render(&err), "Division by zero.");
    /// assert_eq!(Language::Es.render(&err), "División entre cero.");
    /// ```
    #[must_use]
    pub fn render(self, error: &Error) -> String {
        let messages = self.messages();
        let template = match error.kind() {
            ErrorKind::SyntaxError => messages.syntax_error,
            ErrorKind::SimpleAssignmentOnly => messages.simple_assign_only,
            ErrorKind::DivisionByZero => messages.zero_division,
            ErrorKind::InvalidOperator => messages.invalid_operator,
            ErrorKind::InvalidUnaryOperator => messages.invalid_unary,
            ErrorKind::FunctionOnly => messages.function_only,
            ErrorKind::InvalidFunction => messages.invalid_function,
            ErrorKind::FunctionCallError => messages.function_error,
            ErrorKind::UnknownName => messages.unknown_name,
            ErrorKind::InvalidConstant => messages.invalid_constant,
            ErrorKind::InvalidStructure => messages.invalid_structure,
            ErrorKind::ArithmeticError => messages.arithmetic_error,
        };
        fill(template, &arguments(error))
    }

    /// Returns `true` if `line` is one of the given commands, ignoring case
    /// and surrounding whitespace.
    #[must_use]
    pub fn matches(commands: &[&str], line: &str) -> bool {
        let line = line.trim();
        commands.iter().any(|c| c.eq_ignore_ascii_case(line))
    }
}

/// The values substituted into an error's template, in order.
fn arguments(error: &Error) -> Vec<String> {
    match error {
        Error::Parse(err) => match err {
            ParseError::Syntax { .. } => err.syntax_detail().into_iter().collect(),
            ParseError::InvalidStructure { kind, .. } => vec![(*kind).to_string()],
            ParseError::SimpleAssignmentOnly | ParseError::FunctionOnly { .. } => Vec::new(),
        },
        Error::Runtime(err) => match err {
            RuntimeError::DivisionByZero => Vec::new(),
            RuntimeError::InvalidOperator { op } => vec![op.name().to_string()],
            RuntimeError::InvalidUnaryOperator { op } => vec![op.name().to_string()],
            RuntimeError::InvalidFunction { name } | RuntimeError::UnknownName { name } => {
                vec![name.clone()]
            },
            RuntimeError::FunctionCall { name, cause } => vec![name.clone(), cause.to_string()],
            RuntimeError::InvalidConstant { value } => vec![value.to_string()],
            RuntimeError::InvalidStructure { kind } => vec![(*kind).to_string()],
            RuntimeError::Arithmetic { op, fault } => {
                vec![op.name().to_string(), fault.to_string()]
            },
        },
    }
}

/// Replaces each `{}` in `template` with the next value of `values`.
fn fill(template: &str, values: &[String]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut values = values.iter();
    let mut rest = template;
    while let Some(at) = rest.find("{}") {
        out.push_str(&rest[..at]);
        if let Some(value) = values.next() {
            out.push_str(value);
        }
        rest = &rest[at + 2..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{Evaluator, evaluate_expression};

    #[test]
    fn english_rendering_matches_display() {
        let mut evaluator = Evaluator::new();
        for source in ["1 +",
                       "x, y = 1, 2",
                       "1 / 0",
                       "1 | 2",
                       "~1",
                       "2(3)",
                       "foo(2)",
                       "sqrt(-1)",
                       "z",
                       "'abc'",
                       "1 < 2",
                       "(-8) ** 0.5",
                       "(1, 2)"]
        {
            let err = evaluator.eval_line(source).unwrap_err();
            assert_eq!(Language::En.render(&err), err.to_string(), "{source}");
        }
    }

    #[test]
    fn spanish_rendering() {
        let err = evaluate_expression("foo(1)").unwrap_err();
        assert_eq!(Language::Es.render(&err), "Función no permitida: foo");

        let err = evaluate_expression("sqrt(-1)").unwrap_err();
        assert_eq!(Language::Es.render(&err), "Error al llamar sqrt: math domain error");
    }

    #[test]
    fn commands_are_case_insensitive() {
        let messages = Language::Es.messages();
        assert!(Language::matches(messages.exit_commands, "  SALIR "));
        assert!(!Language::matches(messages.history_commands, "history"));
        assert!(Language::matches(Language::En.messages().history_commands, "History"));
    }

    #[test]
    fn fill_substitutes_in_order() {
        assert_eq!(fill("{} and {}", &["a".to_string(), "b".to_string()]), "a and b");
        assert_eq!(fill("none", &[]), "none");
    }
}
