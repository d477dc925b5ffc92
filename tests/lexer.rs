use blast::interpreter::lexer::{LexError, TokenKind, tokenize};
use pretty_assertions::assert_eq;

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source).iter().map(|t| t.kind).collect()
}

#[test]
fn every_keyword_is_one_token_of_its_own_kind() {
    let keywords = [("async", TokenKind::Async),
                    ("await", TokenKind::Await),
                    ("blast", TokenKind::Blast),
                    ("break", TokenKind::Break),
                    ("catch", TokenKind::Catch),
                    ("continue", TokenKind::Continue),
                    ("cruise", TokenKind::Cruise),
                    ("echo", TokenKind::Echo),
                    ("elif", TokenKind::Elif),
                    ("else", TokenKind::Else),
                    ("enum", TokenKind::Enum),
                    ("false", TokenKind::False),
                    ("finally", TokenKind::Finally),
                    ("if", TokenKind::If),
                    ("import", TokenKind::Import),
                    ("in", TokenKind::In),
                    ("loop", TokenKind::Loop),
                    ("null", TokenKind::Null),
                    ("return", TokenKind::Return),
                    ("struct", TokenKind::Struct),
                    ("throw", TokenKind::Throw),
                    ("true", TokenKind::True),
                    ("try", TokenKind::Try),
                    ("turbo", TokenKind::Turbo),
                    ("typeof", TokenKind::TypeOf)];

    for (keyword, kind) in keywords {
        let tokens = tokenize(keyword);
        assert_eq!(tokens.len(), 2, "{keyword} should lex to one token and EOF");
        assert_eq!(tokens[0].kind, kind);
        assert_eq!(tokens[0].lexeme.len(), keyword.len());

        let extended = format!("{keyword}X");
        assert_eq!(kinds(&extended), [TokenKind::Identifier, TokenKind::Eof]);
    }
}

#[test]
fn keyword_prefixes_are_identifiers() {
    for word in ["loopX", "turbos", "blas", "e", "cruiser", "_echo", "iff", "nullish"] {
        assert_eq!(kinds(word), [TokenKind::Identifier, TokenKind::Eof], "{word}");
    }
}

#[test]
fn punctuation_uses_longest_match() {
    assert_eq!(kinds("a ... b .. c . d"),
               [TokenKind::Identifier,
                TokenKind::Ellipsis,
                TokenKind::Identifier,
                TokenKind::DotDot,
                TokenKind::Identifier,
                TokenKind::Dot,
                TokenKind::Identifier,
                TokenKind::Eof]);

    assert_eq!(kinds("== = != ! <= < >= > -> :: : ?. ?? && ||"),
               [TokenKind::EqualEqual,
                TokenKind::Equal,
                TokenKind::BangEqual,
                TokenKind::Bang,
                TokenKind::LessEqual,
                TokenKind::Less,
                TokenKind::GreaterEqual,
                TokenKind::Greater,
                TokenKind::Arrow,
                TokenKind::ColonColon,
                TokenKind::Colon,
                TokenKind::QuestionDot,
                TokenKind::QuestionQuestion,
                TokenKind::AndAnd,
                TokenKind::OrOr,
                TokenKind::Eof]);
}

#[test]
fn numbers_and_ranges() {
    assert_eq!(kinds("3.14 42"),
               [TokenKind::Float, TokenKind::Integer, TokenKind::Eof]);
    assert_eq!(kinds("0..3"),
               [TokenKind::Integer,
                TokenKind::DotDot,
                TokenKind::Integer,
                TokenKind::Eof]);
}

#[test]
fn string_and_char_literals_keep_their_quotes() {
    let tokens = tokenize(r#""a \"quoted\" word" 'x' '\n'"#);

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].lexeme, r#""a \"quoted\" word""#);
    assert_eq!(tokens[1].kind, TokenKind::Char);
    assert_eq!(tokens[1].lexeme, "'x'");
    assert_eq!(tokens[2].kind, TokenKind::Char);
    assert_eq!(tokens[2].lexeme, r"'\n'");
}

#[test]
fn comments_are_skipped() {
    let source = "turbo // line comment\n/* block\ncomment */ x";

    assert_eq!(kinds(source),
               [TokenKind::Turbo, TokenKind::Identifier, TokenKind::Eof]);
}

#[test]
fn tokens_carry_line_and_column() {
    let tokens = tokenize("turbo x = 1;\n  echo x;");
    let echo = tokens.iter()
                     .find(|t| t.kind == TokenKind::Echo)
                     .unwrap();

    assert_eq!((tokens[1].line, tokens[1].column), (1, 7));
    assert_eq!((echo.line, echo.column), (2, 3));
}

#[test]
fn malformed_input_becomes_error_tokens() {
    let tokens = tokenize("turbo s = \"open");
    let error = tokens.iter()
                      .find(|t| t.kind == TokenKind::Error)
                      .unwrap();
    assert_eq!(error.error, Some(LexError::UnterminatedString));
    assert_eq!(error.message().as_deref(), Some("Unterminated string."));

    let tokens = tokenize("a @ b");
    assert_eq!(tokens[1].kind, TokenKind::Error);
    assert_eq!(tokens[1].error, Some(LexError::UnexpectedCharacter));
    assert_eq!(tokens[2].kind, TokenKind::Identifier);

    let tokens = tokenize("'ab'");
    assert_eq!(tokens[0].kind, TokenKind::Error);
    assert_eq!(tokens[0].error, Some(LexError::UnterminatedChar));
}

#[test]
fn input_always_ends_with_eof() {
    assert_eq!(kinds(""), [TokenKind::Eof]);
    assert_eq!(kinds("   \n\t "), [TokenKind::Eof]);
}
