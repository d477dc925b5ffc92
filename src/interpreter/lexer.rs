use logos::Logos;

/// The kind of a lexical token.
///
/// Keywords are not recognised by the logos automaton; identifiers are
/// classified afterwards by [`identifier_kind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `,`
    Comma,
    /// `.`
    Dot,
    /// `..`
    DotDot,
    /// `...`
    Ellipsis,
    /// `;`
    Semicolon,
    /// `:`
    Colon,
    /// `::`
    ColonColon,
    /// `->`
    Arrow,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `!`
    Bang,
    /// `!=`
    BangEqual,
    /// `=`
    Equal,
    /// `==`
    EqualEqual,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
    /// `&&`
    AndAnd,
    /// `||`
    OrOr,
    /// `<<`
    ShiftLeft,
    /// `>>`
    ShiftRight,
    /// `?.`
    QuestionDot,
    /// `??`
    QuestionQuestion,
    /// Identifiers such as `x` or `add`.
    Identifier,
    /// Integer literals such as `42`.
    Integer,
    /// Float literals such as `3.14`.
    Float,
    /// String literals such as `"hi"`, quotes included.
    String,
    /// Character literals such as `'x'`, quotes included.
    Char,
    /// `async`
    Async,
    /// `await`
    Await,
    /// `blast`
    Blast,
    /// `break`
    Break,
    /// `catch`
    Catch,
    /// `continue`
    Continue,
    /// `cruise`
    Cruise,
    /// `echo`
    Echo,
    /// `elif`
    Elif,
    /// `else`
    Else,
    /// `enum`
    Enum,
    /// `false`
    False,
    /// `finally`
    Finally,
    /// `if`
    If,
    /// `import`
    Import,
    /// `in`
    In,
    /// `loop`
    Loop,
    /// `null`
    Null,
    /// `return`
    Return,
    /// `struct`
    Struct,
    /// `throw`
    Throw,
    /// `true`
    True,
    /// `try`
    Try,
    /// `turbo`
    Turbo,
    /// `typeof`
    TypeOf,
    /// A malformed token; see [`Token::error`].
    Error,
    /// End of input.
    Eof,
}

impl TokenKind {
    /// The textual token type used in diagnostics.
    ///
    /// ## Example
    /// ```
    /// use blast::interpreter::lexer::TokenKind;
    ///
    /// assert_eq!(TokenKind::LeftParen.name(), "LEFT_PAREN");
    /// assert_eq!(TokenKind::Blast.name(), "BLAST");
    /// ```
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::LeftParen => "LEFT_PAREN",
            Self::RightParen => "RIGHT_PAREN",
            Self::LeftBrace => "LEFT_BRACE",
            Self::RightBrace => "RIGHT_BRACE",
            Self::LeftBracket => "LEFT_BRACKET",
            Self::RightBracket => "RIGHT_BRACKET",
            Self::Comma => "COMMA",
            Self::Dot => "DOT",
            Self::DotDot => "DOT_DOT",
            Self::Ellipsis => "ELLIPSIS",
            Self::Semicolon => "SEMICOLON",
            Self::Colon => "COLON",
            Self::ColonColon => "COLON_COLON",
            Self::Arrow => "ARROW",
            Self::Plus => "PLUS",
            Self::Minus => "MINUS",
            Self::Star => "STAR",
            Self::Slash => "SLASH",
            Self::Percent => "PERCENT",
            Self::Bang => "BANG",
            Self::BangEqual => "BANG_EQUAL",
            Self::Equal => "EQUAL",
            Self::EqualEqual => "EQUAL_EQUAL",
            Self::Less => "LESS",
            Self::LessEqual => "LESS_EQUAL",
            Self::Greater => "GREATER",
            Self::GreaterEqual => "GREATER_EQUAL",
            Self::AndAnd => "AND_AND",
            Self::OrOr => "OR_OR",
            Self::ShiftLeft => "SHIFT_LEFT",
            Self::ShiftRight => "SHIFT_RIGHT",
            Self::QuestionDot => "QUESTION_DOT",
            Self::QuestionQuestion => "QUESTION_QUESTION",
            Self::Identifier => "IDENTIFIER",
            Self::Integer => "INTEGER",
            Self::Float => "FLOAT",
            Self::String => "STRING",
            Self::Char => "CHAR",
            Self::Async => "ASYNC",
            Self::Await => "AWAIT",
            Self::Blast => "BLAST",
            Self::Break => "BREAK",
            Self::Catch => "CATCH",
            Self::Continue => "CONTINUE",
            Self::Cruise => "CRUISE",
            Self::Echo => "ECHO",
            Self::Elif => "ELIF",
            Self::Else => "ELSE",
            Self::Enum => "ENUM",
            Self::False => "FALSE",
            Self::Finally => "FINALLY",
            Self::If => "IF",
            Self::Import => "IMPORT",
            Self::In => "IN",
            Self::Loop => "LOOP",
            Self::Null => "NULL",
            Self::Return => "RETURN",
            Self::Struct => "STRUCT",
            Self::Throw => "THROW",
            Self::True => "TRUE",
            Self::Try => "TRY",
            Self::Turbo => "TURBO",
            Self::TypeOf => "TYPEOF",
            Self::Error => "ERROR",
            Self::Eof => "EOF",
        }
    }

    /// Returns `true` for tokens that can begin a new declaration.
    ///
    /// The parser stops discarding tokens at these after a syntax error.
    #[must_use]
    pub const fn starts_declaration(self) -> bool {
        matches!(self,
                 Self::Async
                 | Self::Blast
                 | Self::Turbo
                 | Self::Struct
                 | Self::Enum
                 | Self::Import
                 | Self::Cruise
                 | Self::Loop
                 | Self::If
                 | Self::Echo
                 | Self::Return
                 | Self::Try
                 | Self::Throw
                 | Self::Break
                 | Self::Continue)
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A lexical failure, carried by an [`TokenKind::Error`] token.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexError {
    /// A character that starts no token.
    #[default]
    #[error("Unexpected character.")]
    UnexpectedCharacter,
    /// A string literal without its closing quote.
    #[error("Unterminated string.")]
    UnterminatedString,
    /// A character literal that is empty or not closed.
    #[error("Unterminated character literal.")]
    UnterminatedChar,
}

/// A token produced by the [`Lexer`].
///
/// Tokens never own text; `lexeme` borrows from the source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    /// The token kind.
    pub kind:   TokenKind,
    /// The source text of the token.
    pub lexeme: &'src str,
    /// 1-based line of the first character.
    pub line:   usize,
    /// 1-based column of the first character.
    pub column: usize,
    /// The failure behind an [`TokenKind::Error`] token.
    pub error:  Option<LexError>,
}

impl Token<'_> {
    /// The message describing an error token, if any.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        self.error.map(|e| e.to_string())
    }
}

/// The raw automaton driven by logos.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(error = LexError)]
enum RawToken {
    #[regex(r"[ \t\r\n\f]+", logos::skip)]
    Whitespace,
    #[regex(r"//[^\n]*", logos::skip, allow_greedy = true)]
    LineComment,
    #[token("/*", skip_block_comment)]
    BlockComment,
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Word,
    #[regex(r"[0-9]+")]
    Integer,
    #[regex(r"[0-9]+\.[0-9]+")]
    Float,
    #[token("\"", lex_string)]
    String,
    #[token("'", lex_char)]
    Char,
    #[token("(", |_| TokenKind::LeftParen)]
    #[token(")", |_| TokenKind::RightParen)]
    #[token("{", |_| TokenKind::LeftBrace)]
    #[token("}", |_| TokenKind::RightBrace)]
    #[token("[", |_| TokenKind::LeftBracket)]
    #[token("]", |_| TokenKind::RightBracket)]
    #[token(",", |_| TokenKind::Comma)]
    #[token(".", |_| TokenKind::Dot)]
    #[token("..", |_| TokenKind::DotDot)]
    #[token("...", |_| TokenKind::Ellipsis)]
    #[token(";", |_| TokenKind::Semicolon)]
    #[token(":", |_| TokenKind::Colon)]
    #[token("::", |_| TokenKind::ColonColon)]
    #[token("->", |_| TokenKind::Arrow)]
    #[token("+", |_| TokenKind::Plus)]
    #[token("-", |_| TokenKind::Minus)]
    #[token("*", |_| TokenKind::Star)]
    #[token("/", |_| TokenKind::Slash)]
    #[token("%", |_| TokenKind::Percent)]
    #[token("!", |_| TokenKind::Bang)]
    #[token("!=", |_| TokenKind::BangEqual)]
    #[token("=", |_| TokenKind::Equal)]
    #[token("==", |_| TokenKind::EqualEqual)]
    #[token("<", |_| TokenKind::Less)]
    #[token("<=", |_| TokenKind::LessEqual)]
    #[token(">", |_| TokenKind::Greater)]
    #[token(">=", |_| TokenKind::GreaterEqual)]
    #[token("&&", |_| TokenKind::AndAnd)]
    #[token("||", |_| TokenKind::OrOr)]
    #[token("<<", |_| TokenKind::ShiftLeft)]
    #[token(">>", |_| TokenKind::ShiftRight)]
    #[token("?.", |_| TokenKind::QuestionDot)]
    #[token("??", |_| TokenKind::QuestionQuestion)]
    Punct(TokenKind),
}

/// Skips a `/* ... */` comment. An unterminated comment runs to the end of
/// input.
fn skip_block_comment(lex: &mut logos::Lexer<RawToken>) -> logos::Skip {
    let remainder = lex.remainder();

    if let Some(end) = remainder.find("*/") {
        lex.bump(end + 2);
    } else {
        lex.bump(remainder.len());
    }

    logos::Skip
}

/// Scans the body of a string literal after its opening quote.
///
/// Backslash escapes are passed through untouched; they only protect the
/// following character from closing the literal.
fn lex_string(lex: &mut logos::Lexer<RawToken>) -> Result<(), LexError> {
    let remainder = lex.remainder();
    let mut escaped = false;

    for (offset, ch) in remainder.char_indices() {
        match ch {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '"' => {
                lex.bump(offset + 1);
                return Ok(());
            },
            _ => {},
        }
    }

    lex.bump(remainder.len());
    Err(LexError::UnterminatedString)
}

/// Scans `x'` or `\x'` after the opening quote of a character literal.
fn lex_char(lex: &mut logos::Lexer<RawToken>) -> Result<(), LexError> {
    let remainder = lex.remainder();
    let mut chars = remainder.char_indices();

    let body_end = match chars.next() {
        Some((_, '\\')) => chars.next().map(|(i, c)| i + c.len_utf8()),
        Some((_, '\'' | '\n')) | None => None,
        Some((i, c)) => Some(i + c.len_utf8()),
    };

    match body_end {
        Some(end) if remainder[end..].starts_with('\'') => {
            lex.bump(end + 1);
            Ok(())
        },
        Some(end) => {
            lex.bump(end);
            Err(LexError::UnterminatedChar)
        },
        None => Err(LexError::UnterminatedChar),
    }
}

/// Returns `kind` if `text[start..]` equals `rest`, else `Identifier`.
fn keyword_tail(text: &str, start: usize, rest: &str, kind: TokenKind) -> TokenKind {
    if text.get(start..) == Some(rest) {
        kind
    } else {
        TokenKind::Identifier
    }
}

/// Classifies an identifier-shaped lexeme as a keyword or `Identifier`.
///
/// Dispatches on the first character, and on the second where several
/// keywords share a first letter, before comparing the remaining tail.
///
/// ## Example
/// ```
/// use blast::interpreter::lexer::{TokenKind, identifier_kind};
///
/// assert_eq!(identifier_kind("cruise"), TokenKind::Cruise);
/// assert_eq!(identifier_kind("cruiser"), TokenKind::Identifier);
/// assert_eq!(identifier_kind("typeof"), TokenKind::TypeOf);
/// ```
#[must_use]
pub fn identifier_kind(text: &str) -> TokenKind {
    use TokenKind::{
        Async, Await, Blast, Break, Catch, Continue, Cruise, Echo, Elif, Else, Enum, False,
        Finally, Identifier, If, Import, In, Loop, Null, Return, Struct, Throw, True, Try, Turbo,
        TypeOf,
    };

    let bytes = text.as_bytes();
    match bytes.first() {
        Some(b'a') => match bytes.get(1) {
            Some(b's') => keyword_tail(text, 2, "ync", Async),
            Some(b'w') => keyword_tail(text, 2, "ait", Await),
            _ => Identifier,
        },
        Some(b'b') => match bytes.get(1) {
            Some(b'l') => keyword_tail(text, 2, "ast", Blast),
            Some(b'r') => keyword_tail(text, 2, "eak", Break),
            _ => Identifier,
        },
        Some(b'c') => match bytes.get(1) {
            Some(b'a') => keyword_tail(text, 2, "tch", Catch),
            Some(b'o') => keyword_tail(text, 2, "ntinue", Continue),
            Some(b'r') => keyword_tail(text, 2, "uise", Cruise),
            _ => Identifier,
        },
        Some(b'e') => match bytes.get(1) {
            Some(b'c') => keyword_tail(text, 2, "ho", Echo),
            Some(b'l') => match text.get(2..) {
                Some("if") => Elif,
                Some("se") => Else,
                _ => Identifier,
            },
            Some(b'n') => keyword_tail(text, 2, "um", Enum),
            _ => Identifier,
        },
        Some(b'f') => match bytes.get(1) {
            Some(b'a') => keyword_tail(text, 2, "lse", False),
            Some(b'i') => keyword_tail(text, 2, "nally", Finally),
            _ => Identifier,
        },
        Some(b'i') => match text.get(1..) {
            Some("f") => If,
            Some("mport") => Import,
            Some("n") => In,
            _ => Identifier,
        },
        Some(b'l') => keyword_tail(text, 1, "oop", Loop),
        Some(b'n') => keyword_tail(text, 1, "ull", Null),
        Some(b'r') => keyword_tail(text, 1, "eturn", Return),
        Some(b's') => keyword_tail(text, 1, "truct", Struct),
        Some(b't') => match bytes.get(1) {
            Some(b'h') => keyword_tail(text, 2, "row", Throw),
            Some(b'r') => match text.get(2..) {
                Some("ue") => True,
                Some("y") => Try,
                _ => Identifier,
            },
            Some(b'u') => keyword_tail(text, 2, "rbo", Turbo),
            Some(b'y') => keyword_tail(text, 2, "peof", TypeOf),
            _ => Identifier,
        },
        _ => Identifier,
    }
}

/// A cursor over source text producing [`Token`]s on demand.
///
/// Line and column bookkeeping is done lazily: before each token is handed
/// out, the cursor walks the source up to the token start and counts
/// newlines, so skipped whitespace and comments are accounted for.
pub struct Lexer<'src> {
    inner:      logos::Lexer<'src, RawToken>,
    source:     &'src str,
    line:       usize,
    line_start: usize,
    scanned:    usize,
    finished:   bool,
}

impl<'src> Lexer<'src> {
    /// Creates a lexer positioned at the start of `source`.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self { inner: RawToken::lexer(source),
               source,
               line: 1,
               line_start: 0,
               scanned: 0,
               finished: false }
    }

    /// The source text being tokenized.
    #[must_use]
    pub const fn source(&self) -> &'src str {
        self.source
    }

    /// Returns the next token, advancing the cursor.
    ///
    /// After the input is exhausted every call returns an `Eof` token.
    ///
    /// ## Example
    /// ```
    /// use blast::interpreter::lexer::{Lexer, TokenKind};
    ///
    /// let mut lexer = Lexer::new("turbo x");
    ///
    /// assert_eq!(lexer.next_token().kind, TokenKind::Turbo);
    /// let x = lexer.next_token();
    /// assert_eq!((x.kind, x.lexeme, x.column), (TokenKind::Identifier, "x", 7));
    /// assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    /// ```
    pub fn next_token(&mut self) -> Token<'src> {
        let Some(result) = self.inner.next() else {
            let end = self.source.len();
            let (line, column) = self.locate(end);
            return Token { kind: TokenKind::Eof,
                           lexeme: "",
                           line,
                           column,
                           error: None };
        };

        let span = self.inner.span();
        let lexeme = &self.source[span.clone()];
        let (line, column) = self.locate(span.start);

        let (kind, error) = match result {
            Ok(RawToken::Word) => (identifier_kind(lexeme), None),
            Ok(RawToken::Integer) => (TokenKind::Integer, None),
            Ok(RawToken::Float) => (TokenKind::Float, None),
            Ok(RawToken::String) => (TokenKind::String, None),
            Ok(RawToken::Char) => (TokenKind::Char, None),
            Ok(RawToken::Punct(kind)) => (kind, None),
            // Skipped variants never reach the caller.
            Ok(RawToken::Whitespace | RawToken::LineComment | RawToken::BlockComment) => {
                (TokenKind::Error, Some(LexError::UnexpectedCharacter))
            },
            Err(e) => (TokenKind::Error, Some(e)),
        };

        Token { kind,
                lexeme,
                line,
                column,
                error }
    }

    /// Advances the line bookkeeping to `offset` and returns its position.
    fn locate(&mut self, offset: usize) -> (usize, usize) {
        if offset > self.scanned {
            for (index, byte) in self.source.as_bytes()[self.scanned..offset].iter().enumerate() {
                if *byte == b'\n' {
                    self.line += 1;
                    self.line_start = self.scanned + index + 1;
                }
            }
            self.scanned = offset;
        }

        let column = self.source[self.line_start..offset].chars().count() + 1;
        (self.line, column.max(1))
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Token<'src>;

    /// Yields every token including a single trailing `Eof`, then `None`.
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            self.finished = true;
        }
        Some(token)
    }
}

/// Tokenizes all of `source`, ending with an `Eof` token.
///
/// ## Example
/// ```
/// use blast::interpreter::lexer::{TokenKind, tokenize};
///
/// let kinds: Vec<_> = tokenize("a ?? b").iter().map(|t| t.kind).collect();
///
/// assert_eq!(kinds,
///            [TokenKind::Identifier,
///             TokenKind::QuestionQuestion,
///             TokenKind::Identifier,
///             TokenKind::Eof]);
/// ```
#[must_use]
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    Lexer::new(source).collect()
}
