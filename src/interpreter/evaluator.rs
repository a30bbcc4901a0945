/// Core evaluation logic and the evaluator state.
///
/// Contains the node dispatch, statement evaluation and the line entry
/// points that run the lexer and parser.
pub mod core;

/// The variable environment.
pub mod environment;

/// Binary operator evaluation logic.
///
/// Holds the binary allow-list and the arithmetic each entry performs.
pub mod binary;

/// Unary operator evaluation logic.
pub mod unary;

/// Function evaluation.
///
/// Handles the function allow-list, argument binding and the built-in
/// implementations.
pub mod function;
