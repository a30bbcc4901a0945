use thiserror::Error;

use crate::error::ErrorKind;

/// Represents all errors that can occur while lexing or parsing a line.
///
/// Parse errors are raised before any evaluation happens, so a line that
/// fails here never touches the evaluator's environment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The line is not a well-formed expression or simple assignment.
    #[error("Syntax error: {message}{}", at_column(.column))]
    Syntax {
        /// Description of the malformed construct.
        message: String,
        /// 1-based column of the offending token, if known.
        column:  Option<usize>,
    },
    /// The line assigns, but not as `name = expression`.
    #[error("Only simple assignments allowed (e.g., x = 2).")]
    SimpleAssignmentOnly,
    /// A call target was something other than a bare identifier.
    #[error("Only function calls by name are allowed.")]
    FunctionOnly {
        /// 1-based column of the opening parenthesis.
        column: usize,
    },
    /// A construct outside the supported node kinds.
    #[error("Invalid structure: {kind}")]
    InvalidStructure {
        /// Conventional name of the construct, e.g. `Compare` or `List`.
        kind:   &'static str,
        /// 1-based column where the construct starts.
        column: usize,
    },
}

impl ParseError {
    /// Builds a [`ParseError::Syntax`].
    #[must_use]
    pub const fn syntax(message: String, column: Option<usize>) -> Self {
        Self::Syntax { message, column }
    }

    /// Returns the stable kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Syntax { .. } => ErrorKind::SyntaxError,
            Self::SimpleAssignmentOnly => ErrorKind::SimpleAssignmentOnly,
            Self::FunctionOnly { .. } => ErrorKind::FunctionOnly,
            Self::InvalidStructure { .. } => ErrorKind::InvalidStructure,
        }
    }

    /// Returns the syntax description including its position, without the
    /// `Syntax error:` prefix. `None` for other kinds.
    #[must_use]
    pub fn syntax_detail(&self) -> Option<String> {
        match self {
            Self::Syntax { message, column } => Some(format!("{message}{}", at_column(column))),
            _ => None,
        }
    }
}

fn at_column(column: &Option<usize>) -> String {
    column.map_or_else(String::new, |c| format!(" (column {c})"))
}
