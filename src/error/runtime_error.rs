use crate::interpreter::value::core::Value;

/// Host-level failures raised while interpreting a program.
///
/// Language-level mistakes (type mismatches, unbound names, undefined calls,
/// division by zero, bad indices) are not errors: they evaluate to `null`.
#[derive(thiserror::Error, Debug)]
pub enum RuntimeError {
    /// Writing program output failed.
    #[error("Error writing program output: {0}")]
    Io(#[from] std::io::Error),
    /// Calls nested deeper than the configured limit.
    #[error("Error on line {line}: Maximum call depth of {depth} exceeded.")]
    StackOverflow {
        /// The configured limit.
        depth: usize,
        /// The source line of the call that crossed the limit.
        line:  usize,
    },
    /// A thrown value unwinding through a function call. Reaching the host
    /// means no `try` caught it.
    #[error("Uncaught exception: {value}")]
    Thrown {
        /// The thrown value.
        value: Value,
        /// The source line of the `throw`.
        line:  usize,
    },
}
