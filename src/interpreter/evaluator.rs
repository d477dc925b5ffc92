/// Binary operator evaluation logic.
///
/// Arithmetic with integer wrapping and float promotion, string
/// concatenation, equality and ordering. Mismatched operands yield `null`.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements arithmetic negation and logical not.
pub mod unary;

/// Core evaluation logic and interpreter state.
///
/// Contains the `Interpreter`, its configuration, the control-flow `Signal`
/// and the program and REPL entry points.
pub mod core;

/// Variable storage.
///
/// A stack of frames: globals at the bottom, one frame per active call.
pub mod environment;

/// Statement execution.
///
/// Blocks, conditionals, loops, declarations, destructuring and
/// `try`/`throw`.
pub mod statement;

/// Expression evaluation.
///
/// Literals, variables, member and index access, assignment, struct and
/// array literals, optional chaining and nullish coalescing.
pub mod expression;

/// Evaluation of `cruise` loops over ranges, arrays and strings.
pub mod for_loop;

/// Function calls and the native bridge.
///
/// Handles call dispatch, user-defined function invocation, reentrant
/// callbacks from native code, and the natives every interpreter starts with.
pub mod function;

/// Capturable program output.
pub mod output;
