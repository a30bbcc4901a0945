/// Dispatch of binary operators through the allow-list.
pub mod core;

/// The arithmetic behind each allowed binary operator.
pub mod arithmetic;
