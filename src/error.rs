/// Parsing errors.
///
/// Defines the diagnostic produced for every syntax error, including lexical
/// errors surfaced through error tokens, and the collection returned when a
/// source text fails to parse.
pub mod parse_error;
/// Runtime errors.
///
/// Contains the host-level failures that can stop evaluation: output
/// failures, runaway recursion and uncaught exceptions.
pub mod runtime_error;

pub use parse_error::{ParseError, ParseErrors};
pub use runtime_error::RuntimeError;
