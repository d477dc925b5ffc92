/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator walks the AST, evaluates expressions and statements, manages
/// variable frames and dispatches calls to user functions and natives.
///
/// # Responsibilities
/// - Evaluates every statement and expression kind.
/// - Propagates `break`, `continue`, `return` and `throw` as signals.
/// - Resolves type mismatches and unbound names to `null` instead of failing.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens, each
/// corresponding to a keyword, identifier, literal, operator or delimiter,
/// with its line and column.
///
/// # Responsibilities
/// - Converts the input character stream into positioned tokens.
/// - Applies longest match, so `loopX` is one identifier.
/// - Turns malformed input into error tokens instead of stopping.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// A recursive-descent parser over the token stream. After a syntax error it
/// enters panic mode and resynchronizes at the next statement boundary, so
/// one pass reports every independent error.
///
/// # Responsibilities
/// - Converts tokens into declarations, statements and expressions.
/// - Desugars C-style `cruise` loops into blocks and `loop`s.
/// - Produces diagnostics with the offending line and a keyword suggestion.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares the `Value` enum, shared arrays and struct
/// instances, along with truthiness, equality, ordering and the display form
/// used by `echo`.
///
/// # Responsibilities
/// - Defines the `Value` enum and its constructors.
/// - Implements language-level equality and comparison.
/// - Formats values for output.
pub mod value;
