/// Numeric helpers.
///
/// This module provides the handful of numeric routines shared by the
/// expression model and the evaluator: detecting exactly-representable
/// integers inside `f64` values and computing greatest common divisors for
/// rational reduction.
pub mod num;
