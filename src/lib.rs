//! # VeLa
//!
//! VeLa (the variable-star language) is a small, embeddable expression
//! language. A host application binds named values such as the fields of an
//! observation, then evaluates VeLa source to filter items or compute values
//! from them.
//!
//! The pipeline is the classic one: [`interpreter::lexer`] turns source text
//! into tokens, [`interpreter::parser`] builds an immutable [`ast::Program`]
//! and [`interpreter::evaluator`] walks it against a stack of scopes.
//! [`Interpreter`] ties the stages together and caches parsed programs.
//!
//! ```
//! use vela::{Bindings, Interpreter, Operand};
//!
//! let mut vela = Interpreter::new();
//!
//! vela.push_environment(Bindings::new().with("magnitude", 9.5));
//! let dimmer = vela.program("magnitude + 0.5").unwrap();
//! vela.pop_environment().unwrap();
//!
//! assert_eq!(dimmer, Some(Operand::Real(10.0)));
//! ```

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

use std::sync::Once;

/// Defines the structure of parsed code.
///
/// This module declares `Program`, `Statement`, `Expr` and the operator
/// enums that represent the syntactic structure of VeLa source as a tree.
/// Every node records its source position for error reporting.
pub mod ast;
/// Interpreter configuration.
///
/// `InterpreterConfig` bounds user-defined call depth and controls the
/// program cache.
pub mod config;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines the errors raised during lexing and parsing
/// (`ParseError`) and during evaluation (`EvalError`), and `VeLaError`, which
/// wraps either one for the interpreter's entry points.
///
/// # Responsibilities
/// - Defines an error type for each phase.
/// - Attaches source positions and detailed messages.
/// - Supports `std::error::Error`, including the cause chain of errors raised
///   inside user-defined functions.
pub mod error;
/// Host-side filtering of observations.
///
/// Defines the `BindingSource` trait, the `Observation` record and
/// `ObservationFilter`, which selects the items a boolean expression accepts.
pub mod filter;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representations and scopes to provide a complete runtime for VeLa source.
///
/// # Responsibilities
/// - Coordinates the lexer, parser and evaluator.
/// - Provides entry points for parsing and evaluating user code.
/// - Manages the push/evaluate/pop protocol hosts use per item.
pub mod interpreter;
/// General utilities for safe numeric conversion and stack growth.
///
/// # Responsibilities
/// - Safely convert between `i64`, `usize`, and `f64` without silent data
///   loss.
/// - Grow the native stack on demand in the recursive parser and evaluator.
pub mod util;

pub use config::InterpreterConfig;
pub use error::{EvalError, EvalErrorKind, ParseError, VeLaError};
pub use interpreter::{
    environment::Bindings,
    session::Interpreter,
    value::{core::Operand, function::Function, types::Type},
};

static TRACING_INIT: Once = Once::new();

/// Installs a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set, and nothing after the first call.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
                    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

                    if std::env::var("RUST_LOG").is_ok() {
                        tracing_subscriber::registry().with(fmt::layer().with_target(true)
                                                                        .with_level(true)
                                                                        .with_writer(std::io::stderr))
                                                      .with(EnvFilter::from_default_env())
                                                      .init();
                    }
                });
}

/// Evaluates VeLa source in a fresh interpreter.
///
/// # Errors
/// Returns an error if parsing or evaluation fails.
///
/// # Examples
/// ```
/// use vela::{Operand, evaluate};
///
/// assert_eq!(evaluate("1 + 2 * 3").unwrap(), Some(Operand::Integer(7)));
///
/// // 'x' is not bound.
/// assert!(evaluate("x + 1").is_err());
/// ```
pub fn evaluate(source: &str) -> Result<Option<Operand>, VeLaError> {
    Interpreter::new().program(source)
}
