/// Entry points and statement-level parsing.
///
/// Contains the public `parse_expression` function, the statement sequence
/// (`;`) level, and the assignment and function-definition forms.
pub mod core;

/// Infix operator levels.
///
/// Implements the rule, logical, equality, additive, multiplicative, and
/// string-join precedence levels.
pub mod binary;

/// High-precedence parsing.
///
/// Handles implicit multiplication, unary minus, exponentiation, call forms,
/// list literals, grouping, and atoms.
pub mod unary;

/// Utility functions for the parser.
///
/// Provides shared helpers such as comma-separated list parsing.
pub mod utils;
