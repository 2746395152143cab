//! # symba
//!
//! symba is a small Mathematica-style symbolic expression engine written in
//! Rust. It parses surface syntax into a uniform expression tree and
//! evaluates that tree under an environment of bound names, performing
//! arithmetic, algebraic simplification, and a fixed catalogue of built-in
//! operations over numbers, booleans, strings, and lists.

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
)]
#![allow(clippy::missing_errors_doc)]

/// Defines the structure of parsed and evaluated code.
///
/// This module declares the `Expr` tagged sum and related types that
/// represent symbolic expressions as a tree of shared, immutable nodes. The
/// tree is built by the parser, rewritten by the evaluator, and printed in
/// round-trippable surface form.
///
/// # Responsibilities
/// - Defines every expression variant, from numbers to function definitions.
/// - Provides constructors, predicates, and numeric extraction helpers.
/// - Implements the precedence-aware surface printer.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised during lexing, parsing,
/// or evaluating code. Parse errors carry the byte offset of the problem;
/// evaluation errors carry stable, user-visible messages.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Keeps the contract error messages stable for callers and tests.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the entire process of source evaluation.
///
/// This module ties together lexing, parsing, and evaluation to provide a
/// complete pipeline from source text to a rewritten expression. It exposes
/// the individual phases for callers that need them separately.
///
/// # Responsibilities
/// - Coordinates the lexer, parser, and evaluator.
/// - Provides the expression-tree entry points used by the public API.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General numeric utilities.
///
/// This module provides reusable helpers shared by several phases, such as
/// exact-integer detection inside floats and greatest-common-divisor
/// computation for rational reduction.
pub mod util;

pub use crate::{
    ast::{Expr, ExprRef},
    interpreter::{
        evaluator::core::{Environment, evaluate},
        parser::core::parse_expression,
    },
};

/// Parses and evaluates a source string in one step.
///
/// This is the convenience entry point used by the command-line interface
/// and the REPL: the source is tokenized, parsed as a single expression
/// (which may be a `;`-separated statement sequence), and evaluated against
/// the given environment. Bindings created by assignments persist in `env`
/// across calls.
///
/// # Errors
/// Returns an error if parsing or evaluation fails. Assignments that
/// completed before an evaluation error keep their effect.
///
/// # Examples
/// ```
/// use symba::{Environment, run_source};
///
/// let mut env = Environment::new();
/// let result = run_source("x = 2; x + 3", &mut env).unwrap();
/// assert_eq!(result.to_string(), "5");
///
/// // `x` stays bound for the next call.
/// let result = run_source("x * 10", &mut env).unwrap();
/// assert_eq!(result.to_string(), "20");
/// ```
pub fn run_source(source: &str,
                  env: &mut Environment)
                  -> Result<ExprRef, Box<dyn std::error::Error>> {
    let expr = parse_expression(source)?;
    let result = evaluate(&expr, env)?;
    Ok(result)
}
