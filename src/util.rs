/// Numeric helpers.
///
/// This module provides the floor-division convention shared by `//` and `%`,
/// checked conversion from `f64` to an integer count, and the formatting used
/// to print results.
pub mod num;
