/// The parser state, token primitives and error recovery.
pub mod core;

/// Expression levels from assignment down to multiplication.
pub mod binary;

/// Prefix operators, postfix chains and primary expressions.
pub mod unary;

/// Statements: control flow, output, blocks and expression statements.
pub mod statement;

/// Declarations: functions, structs, enums, imports and variables.
pub mod declaration;

/// Shared helpers: argument lists, types, literal decoding and keyword
/// suggestions.
pub mod utils;

pub use self::core::Parser;
use crate::{ast::Program, error::ParseErrors, interpreter::lexer::Lexer};

/// Parses a complete source text.
///
/// Every independent syntax error is collected; if any occurred no program is
/// returned.
///
/// # Errors
/// Returns every diagnostic collected while parsing.
///
/// # Example
/// ```
/// use blast::interpreter::parser::parse_source;
///
/// let program = parse_source("turbo x = 1; echo(x);").unwrap();
/// assert_eq!(program.declarations.len(), 2);
///
/// let errors = parse_source("turbo = ;").unwrap_err();
/// assert_eq!(errors.len(), 1);
/// ```
pub fn parse_source(source: &str) -> Result<Program, ParseErrors> {
    Parser::new(Lexer::new(source)).parse()
}
