//! # blast
//!
//! blast is a tree-walking interpreter for the Blast scripting language, a
//! small dynamically typed language with `turbo` variables, `blast`
//! functions, `cruise` loops and `echo` output. Source text is tokenized,
//! parsed into an AST with error recovery, and evaluated directly.

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

use tracing::debug;

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::Interpreter, parser::parse_source},
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Stmt` enums and related types that
/// represent the syntactic structure of a program as a tree. The AST is built
/// by the parser and walked by the evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches source spans to nodes for diagnostics.
/// - Shares function and struct declarations with runtime values.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// Syntax errors are collected into diagnostics carrying the offending source
/// line. Runtime errors cover the few host-level failures that cannot be
/// expressed as a `null` value.
///
/// # Responsibilities
/// - Defines the diagnostic type and its rendering.
/// - Defines runtime failures: output errors, call depth, uncaught throws.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// Ties together lexing, parsing, value representation and evaluation, and
/// exposes the public API for running programs or single statements.
///
/// # Responsibilities
/// - Coordinates the lexer, parser, evaluator and value types.
/// - Provides the native bridge for host-provided functions.
pub mod interpreter;
/// General utilities for safe numeric conversion.
///
/// Conversions between the language's integer and float types and host
/// lengths, used by the evaluator and the core natives.
pub mod util;

/// Exit status reported when the source fails to parse.
pub const PARSE_FAILURE_STATUS: i32 = 65;

/// Parses and runs a program with a default interpreter writing to stdout.
///
/// Syntax errors are written to stderr, one diagnostic block each, and yield
/// [`PARSE_FAILURE_STATUS`] without running anything. Otherwise the program's
/// exit status is returned; see [`Interpreter::interpret`].
///
/// # Errors
/// Returns a [`RuntimeError`] if output cannot be written or the call depth
/// limit is exceeded.
///
/// # Examples
/// ```
/// use blast::run_source;
///
/// let status = run_source("blast main() { return 3; }").unwrap();
/// assert_eq!(status, 3);
///
/// let status = run_source("turbo = ;").unwrap();
/// assert_eq!(status, blast::PARSE_FAILURE_STATUS);
/// ```
pub fn run_source(source: &str) -> Result<i32, RuntimeError> {
    run_source_with(source, &mut Interpreter::new())
}

/// Parses and runs a program with a caller-supplied interpreter.
///
/// Use this to capture output, change the configuration or register extra
/// natives first.
///
/// # Errors
/// Returns a [`RuntimeError`] if output cannot be written or the call depth
/// limit is exceeded.
///
/// # Examples
/// ```
/// use blast::{
///     interpreter::evaluator::{core::Interpreter, output::OutputBuffer},
///     run_source_with,
/// };
///
/// let buffer = OutputBuffer::new();
/// let mut interpreter = Interpreter::new().with_output(buffer.clone());
///
/// run_source_with("cruise (i in 0..3) { echo(i); }", &mut interpreter).unwrap();
/// assert_eq!(buffer.contents(), "0\n1\n2\n");
/// ```
pub fn run_source_with(source: &str, interpreter: &mut Interpreter) -> Result<i32, RuntimeError> {
    match parse_source(source) {
        Ok(program) => interpreter.interpret(&program),
        Err(errors) => {
            debug!(count = errors.len(), "parse failed");
            eprintln!("{errors}");
            Ok(PARSE_FAILURE_STATUS)
        },
    }
}
