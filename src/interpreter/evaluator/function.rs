/// Built-in function implementations.
///
/// Contains the one-argument functions: trigonometry, roots, exponentials,
/// absolute value and angle conversion.
pub mod builtin;
/// Logarithm function implementations.
///
/// Supports the natural logarithm and logarithms to any positive base.
pub mod log;
/// Rounding function implementations.
///
/// Provides `round` with an optional number of digits, `floor` and `ceil`.
pub mod round;
/// The `factorial` function implementation, also reachable as `fact`.
pub mod factorial;

/// Function lookup, signatures and argument binding.
pub mod core;
