//! # calcbox
//!
//! calcbox is a sandboxed calculator for untrusted arithmetic input written in
//! Rust. It parses a line into a syntax tree and evaluates it against a closed
//! allow-list of operators and math functions. Nothing outside that list can
//! be reached, so a line can compute numbers but never touch the host.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

/// Defines the structure of parsed lines.
///
/// This module declares the `Expr` enum and related types that represent the
/// syntactic structure of a line as a tree. The AST is built by the parser
/// and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for every accepted construct.
/// - Carries the operator tags the allow-lists are keyed on.
/// - Attaches source columns to nodes for error reporting.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised while lexing, parsing,
/// or evaluating a line, and classifies each one with a stable
/// [`error::ErrorKind`].
///
/// # Responsibilities
/// - Defines error enums for all failure modes (parser, evaluator, builtins).
/// - Renders the English messages through `Display`.
/// - Exposes a locale-independent kind for every failure.
pub mod error;
/// Localized messages.
///
/// Holds the English and Spanish message tables used by the interactive
/// session and the command-line front end, and renders errors from their
/// kind and payload.
pub mod i18n;
/// Orchestrates the entire process of evaluating a line.
///
/// This module ties together lexing, parsing, and evaluation, and exposes the
/// [`Evaluator`] that owns the variable environment.
///
/// # Responsibilities
/// - Coordinates the lexer, parser, and evaluator.
/// - Provides entry points for pure expressions and for assignment lines.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// The interactive session behind the REPL.
///
/// Handles commands, history, and result formatting independently of any
/// terminal, so that a whole session can be driven line by line.
pub mod session;
/// General utilities for numeric conversion and formatting.
///
/// This module provides helpers shared by the evaluator and the front ends:
/// floor division, checked conversion of floats to whole numbers, and the
/// number format used for results.
///
/// # Responsibilities
/// - Convert between `f64` and integer counts without silent data loss.
/// - Format results for display.
pub mod util;

pub use error::Error;
pub use interpreter::evaluator::core::{Evaluation, Evaluator};

/// Evaluates a pure expression against the built-in constants.
///
/// Assignment is not allowed here; use [`evaluate_line`] for that.
///
/// # Errors
/// Returns an [`Error`] if the text does not parse as a single expression or
/// if evaluating it fails.
///
/// # Examples
/// ```
/// use calcbox::{error::ErrorKind, evaluate_expression};
///
/// assert_eq!(evaluate_expression("2 + 3 * 4").unwrap(), 14.0);
/// assert_eq!(evaluate_expression("sqrt(16) + sin(pi / 2)").unwrap(), 5.0);
///
/// let err = evaluate_expression("z + 1").unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::UnknownName);
/// assert_eq!(err.to_string(), "Unknown name: z");
/// ```
pub fn evaluate_expression(source: &str) -> Result<f64, Error> {
    Evaluator::new().eval_expr(source)
}

/// Evaluates one line, a bare expression or a simple assignment, against
/// `evaluator`.
///
/// The evaluator's environment changes only when an assignment succeeds.
///
/// # Errors
/// Returns an [`Error`] if the line does not parse or if evaluating it fails.
///
/// # Examples
/// ```
/// use calcbox::{Evaluator, evaluate_line};
///
/// let mut evaluator = Evaluator::new();
///
/// let first = evaluate_line("x = 5", &mut evaluator).unwrap();
/// assert_eq!((first.value, first.name.as_deref()), (5.0, Some("x")));
///
/// let second = evaluate_line("y = x + 3", &mut evaluator).unwrap();
/// assert_eq!(second.value, 8.0);
///
/// // A failed assignment leaves the environment as it was.
/// assert!(evaluate_line("x = 1 / 0", &mut evaluator).is_err());
/// assert_eq!(evaluate_line("x * 2", &mut evaluator).unwrap().value, 10.0);
/// ```
pub fn evaluate_line(source: &str, evaluator: &mut Evaluator) -> Result<Evaluation, Error> {
    evaluator.eval_line(source)
}
