/// Parser entry points and the top of the precedence hierarchy.
///
/// Contains the comma-list level and the catch-all levels that reject
/// conditional, boolean and comparison constructs.
pub mod core;

/// Binary operator parsing.
///
/// Implements the precedence climbing for bitwise, additive, multiplicative
/// and exponent operators.
pub mod binary;

/// Unary, primary and postfix parsing.
///
/// Handles prefix operators, literals, identifiers, parenthesized groups and
/// function calls.
pub mod unary;

/// Statement classification.
///
/// Decides whether a line is a bare expression or a simple assignment, and
/// rejects every other statement shape.
pub mod statement;

/// Shared helpers for the parser.
///
/// Provides argument-list parsing and token expectations.
pub mod utils;
