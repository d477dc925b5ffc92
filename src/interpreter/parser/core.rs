use tracing::debug;

use crate::{
    ast::{Program, Span, Stmt},
    error::{ParseError, ParseErrors},
    interpreter::{
        lexer::{Lexer, Token, TokenKind},
        parser::utils::suggest_keyword,
    },
    util::stack::ensure_sufficient_stack,
};

pub type ParseResult<T> = Result<T, ParseError>;

/// A recursive-descent parser with one token of lookahead.
///
/// Grammar functions return [`ParseResult`]; a failure has already been
/// recorded (unless the parser was in panic mode) and only needs to unwind to
/// the nearest declaration, which then resynchronizes at a statement boundary.
pub struct Parser<'src> {
    pub(in crate::interpreter::parser) source:          &'src str,
    pub(in crate::interpreter::parser) tokens:          Vec<Token<'src>>,
    pub(in crate::interpreter::parser) position:        usize,
    pub(in crate::interpreter::parser) previous:        usize,
    pub(in crate::interpreter::parser) statement_start: usize,
    pub(in crate::interpreter::parser) errors:          Vec<ParseError>,
    pub(in crate::interpreter::parser) panic_mode:      bool,
}

impl<'src> Parser<'src> {
    /// Creates a parser over every token of `lexer`.
    ///
    /// The tokens are buffered up front because typed declarations and
    /// struct literals need up to three tokens of lookahead. Each token still
    /// borrows its text from the source, which must outlive the parser.
    #[must_use]
    pub fn new(lexer: Lexer<'src>) -> Self {
        let source = lexer.source();
        let mut parser = Self { source,
                                tokens: lexer.collect(),
                                position: 0,
                                previous: 0,
                                statement_start: 0,
                                errors: Vec::new(),
                                panic_mode: false };
        parser.skip_error_tokens();
        parser
    }

    /// Parses every declaration up to the end of input.
    ///
    /// # Errors
    /// Returns every collected diagnostic if any syntax error occurred; the
    /// partially built declarations are dropped.
    pub fn parse(mut self) -> Result<Program, ParseErrors> {
        let mut declarations = Vec::new();

        while !self.is_at_end() {
            if let Some(statement) = self.declaration() {
                declarations.push(statement);
            }
        }

        if self.errors.is_empty() {
            Ok(Program { declarations })
        } else {
            debug!(count = self.errors.len(), "parse failed");
            Err(ParseErrors(self.errors))
        }
    }

    /// Parses a single declaration, as the REPL does for each statement of
    /// an input line.
    ///
    /// Returns `Ok(None)` once the input is exhausted.
    ///
    /// # Errors
    /// Returns the diagnostics of the failed statement. The parser has
    /// already resynchronized, so parsing may continue afterwards.
    ///
    /// # Example
    /// ```
    /// use blast::interpreter::{lexer::Lexer, parser::Parser};
    ///
    /// let mut parser = Parser::new(Lexer::new("turbo a = 1; echo(a);"));
    ///
    /// assert!(parser.parse_one_statement().unwrap().is_some());
    /// assert!(parser.parse_one_statement().unwrap().is_some());
    /// assert!(parser.parse_one_statement().unwrap().is_none());
    /// ```
    pub fn parse_one_statement(&mut self) -> Result<Option<Stmt>, ParseErrors> {
        if self.is_at_end() && self.errors.is_empty() {
            return Ok(None);
        }

        let statement = if self.is_at_end() {
            None
        } else {
            self.declaration()
        };

        if self.errors.is_empty() {
            Ok(statement)
        } else {
            Err(ParseErrors(std::mem::take(&mut self.errors)))
        }
    }

    /// Parses one declaration, recovering from a syntax error inside it.
    ///
    /// On failure the parser discards tokens up to the next statement
    /// boundary and `None` is returned, so the caller can keep collecting
    /// independent errors.
    ///
    /// Each declaration starts outside panic mode. A lexer error inside a
    /// statement that still parses must not hide a mistake in the next one.
    pub(in crate::interpreter::parser) fn declaration(&mut self) -> Option<Stmt> {
        self.panic_mode = false;
        let start = self.position;
        let enclosing_start = std::mem::replace(&mut self.statement_start, start);

        let result = ensure_sufficient_stack(|| self.parse_declaration());
        self.statement_start = enclosing_start;

        match result {
            Ok(statement) => Some(statement),
            Err(_) => {
                self.synchronize();
                if self.position == start {
                    self.advance();
                }
                None
            },
        }
    }

    /// Leaves panic mode and skips to a statement boundary: just past a `;`,
    /// or before a `}` or a token that starts a declaration.
    fn synchronize(&mut self) {
        self.panic_mode = false;

        while !self.is_at_end() {
            if self.previous < self.position
               && self.tokens[self.previous].kind == TokenKind::Semicolon
            {
                return;
            }

            let kind = self.current().kind;
            if kind == TokenKind::RightBrace || kind.starts_declaration() {
                return;
            }

            self.advance();
        }
    }

    /// The token under the cursor.
    pub(in crate::interpreter::parser) fn current(&self) -> Token<'src> {
        self.tokens[self.position]
    }

    /// The most recently consumed token.
    pub(in crate::interpreter::parser) fn previous(&self) -> Token<'src> {
        self.tokens[self.previous]
    }

    /// The kind of the token `offset` places after the cursor.
    pub(in crate::interpreter::parser) fn peek_kind(&self, offset: usize) -> TokenKind {
        self.tokens
            .get(self.position + offset)
            .map_or(TokenKind::Eof, |token| token.kind)
    }

    /// The span of the token under the cursor.
    pub(in crate::interpreter::parser) fn current_span(&self) -> Span {
        let token = self.current();
        Span::new(token.line, token.column)
    }

    /// The span of the most recently consumed token.
    pub(in crate::interpreter::parser) fn previous_span(&self) -> Span {
        let token = self.previous();
        Span::new(token.line, token.column)
    }

    pub(in crate::interpreter::parser) fn is_at_end(&self) -> bool {
        self.current().kind == TokenKind::Eof
    }

    /// Consumes the current token and returns it.
    pub(in crate::interpreter::parser) fn advance(&mut self) -> Token<'src> {
        self.previous = self.position;
        if !self.is_at_end() {
            self.position += 1;
        }
        self.skip_error_tokens();
        self.previous()
    }

    /// Reports and steps over lexer error tokens under the cursor.
    fn skip_error_tokens(&mut self) {
        while self.current().kind == TokenKind::Error {
            let token = self.current();
            let message = token.message()
                               .unwrap_or_else(|| "Unexpected character.".to_string());
            self.error_at(token, message);
            self.position += 1;
        }
    }

    pub(in crate::interpreter::parser) fn check(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    /// Consumes the current token if it has the given kind.
    pub(in crate::interpreter::parser) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes a token of the given kind or reports `message` at the current
    /// token.
    pub(in crate::interpreter::parser) fn consume(&mut self,
                                                  kind: TokenKind,
                                                  message: &str)
                                                  -> ParseResult<Token<'src>> {
        if self.check(kind) {
            return Ok(self.advance());
        }

        Err(self.error_at_current(message))
    }

    /// Consumes an identifier and returns its text.
    pub(in crate::interpreter::parser) fn consume_identifier(&mut self,
                                                             message: &str)
                                                             -> ParseResult<String> {
        Ok(self.consume(TokenKind::Identifier, message)?
               .lexeme
               .to_string())
    }

    pub(in crate::interpreter::parser) fn error_at_current(&mut self,
                                                           message: impl Into<String>)
                                                           -> ParseError {
        let token = self.current();
        self.error_at(token, message)
    }

    pub(in crate::interpreter::parser) fn error_at_previous(&mut self,
                                                            message: impl Into<String>)
                                                            -> ParseError {
        let token = self.previous();
        self.error_at(token, message)
    }

    /// Builds a diagnostic for `token` and records it unless the parser is
    /// already in panic mode.
    pub(in crate::interpreter::parser) fn error_at(&mut self,
                                                   token: Token<'src>,
                                                   message: impl Into<String>)
                                                   -> ParseError {
        let source_line = self.source
                              .lines()
                              .nth(token.line.saturating_sub(1))
                              .unwrap_or_default()
                              .to_string();

        let error = ParseError { message: message.into(),
                                 line: token.line,
                                 column: token.column,
                                 token: token.kind,
                                 lexeme: token.lexeme.to_string(),
                                 source_line,
                                 suggestion: self.suggestion_for(token) };

        if !self.panic_mode {
            debug!(line = error.line, column = error.column, message = %error.message, "syntax error");
            self.errors.push(error.clone());
        }
        self.panic_mode = true;

        error
    }

    /// Looks for a misspelled keyword among the identifiers of the current
    /// statement, up to and including `token`.
    fn suggestion_for(&self, token: Token<'src>) -> Option<&'static str> {
        let end = self.position.min(self.tokens.len() - 1);
        let start = self.statement_start.min(end);

        self.tokens[start..=end].iter()
                                .chain(std::iter::once(&token))
                                .filter(|t| t.kind == TokenKind::Identifier)
                                .find_map(|t| suggest_keyword(t.lexeme))
    }
}
