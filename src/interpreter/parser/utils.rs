use crate::{
    ast::{Expr, Parameter, TypeInfo},
    interpreter::{
        lexer::TokenKind,
        parser::core::{ParseResult, Parser},
    },
};

impl Parser<'_> {
    /// Parses a comma-separated list of expressions up to and including
    /// `closing`.
    ///
    /// Shared by call arguments and array literals. Each element may be
    /// prefixed with `...` to become a spread. An immediately encountered
    /// closing token produces an empty list.
    ///
    /// Grammar (simplified): `list := (element ("," element)*)? closing`
    ///
    /// # Parameters
    /// - `closing`: The token that terminates the list, `)` or `]`.
    /// - `message`: Reported when neither `,` nor `closing` follows an element.
    pub(in crate::interpreter::parser) fn element_list(&mut self,
                                                       closing: TokenKind,
                                                       message: &str)
                                                       -> ParseResult<Vec<Expr>> {
        let mut items = Vec::new();

        if !self.check(closing) {
            loop {
                items.push(self.element()?);
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }

        self.consume(closing, message)?;
        Ok(items)
    }

    /// Parses one list element: an expression or `...expression`.
    fn element(&mut self) -> ParseResult<Expr> {
        if self.match_token(TokenKind::Ellipsis) {
            let span = self.previous_span();
            let operand = self.expression()?;
            return Ok(Expr::Spread { operand: Box::new(operand),
                                     span });
        }

        self.expression()
    }

    /// Parses a type name with an optional `[]` suffix.
    ///
    /// The rule is: `type := IDENT ("[" "]")?`
    pub(in crate::interpreter::parser) fn type_info(&mut self) -> ParseResult<TypeInfo> {
        let name = self.consume_identifier("Expect type name.")?;

        let is_array = if self.match_token(TokenKind::LeftBracket) {
            self.consume(TokenKind::RightBracket, "Expect ']' after '[' in type.")?;
            true
        } else {
            false
        };

        Ok(TypeInfo::named(name, is_array))
    }

    /// Returns `true` if the cursor sits on a type annotation followed by a
    /// name: `IDENT IDENT` or `IDENT "[" "]" IDENT`.
    pub(in crate::interpreter::parser) fn at_typed_name(&self) -> bool {
        if !self.check(TokenKind::Identifier) {
            return false;
        }

        match self.peek_kind(1) {
            TokenKind::Identifier => true,
            TokenKind::LeftBracket => {
                self.peek_kind(2) == TokenKind::RightBracket
                && self.peek_kind(3) == TokenKind::Identifier
            },
            _ => false,
        }
    }

    /// Parses a parameter list up to and including `)`.
    ///
    /// The rule is: `params := (param ("," param)*)? ")"` with
    /// `param := type? IDENT`.
    pub(in crate::interpreter::parser) fn parameters(&mut self) -> ParseResult<Vec<Parameter>> {
        let mut params = Vec::new();

        if !self.check(TokenKind::RightParen) {
            loop {
                let type_info = if self.at_typed_name() {
                    Some(self.type_info()?)
                } else {
                    None
                };
                let name = self.consume_identifier("Expect parameter name.")?;
                params.push(Parameter { name, type_info });

                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }

        self.consume(TokenKind::RightParen, "Expect ')' after parameters.")?;
        Ok(params)
    }
}

/// Decodes backslash escapes in the body of a string or char literal.
///
/// `\n \t \r \0 \\ \" \'` are translated; any other escaped character is kept
/// as-is without its backslash.
///
/// ## Example
/// ```
/// use blast::interpreter::parser::utils::decode_escapes;
///
/// assert_eq!(decode_escapes(r#"a\tb\"c\q"#), "a\tb\"cq");
/// ```
#[must_use]
pub fn decode_escapes(body: &str) -> String {
    let mut decoded = String::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            decoded.push(ch);
            continue;
        }

        match chars.next() {
            Some('n') => decoded.push('\n'),
            Some('t') => decoded.push('\t'),
            Some('r') => decoded.push('\r'),
            Some('0') => decoded.push('\0'),
            Some(other) => decoded.push(other),
            None => decoded.push('\\'),
        }
    }

    decoded
}

/// Returns the keyword an author probably meant when writing `word`, a
/// spelling borrowed from another language.
///
/// ## Example
/// ```
/// use blast::interpreter::parser::utils::suggest_keyword;
///
/// assert_eq!(suggest_keyword("function"), Some("blast"));
/// assert_eq!(suggest_keyword("let"), Some("turbo"));
/// assert_eq!(suggest_keyword("total"), None);
/// ```
#[must_use]
pub fn suggest_keyword(word: &str) -> Option<&'static str> {
    let keyword = match word {
        "function" | "func" | "fn" | "def" | "fun" => "blast",
        "let" | "var" | "const" | "val" | "auto" => "turbo",
        "for" | "foreach" => "cruise",
        "while" | "do" => "loop",
        "print" | "println" | "printf" | "console" | "puts" => "echo",
        "elseif" | "elsif" | "else_if" => "elif",
        "class" | "record" => "struct",
        "nil" | "none" | "None" | "undefined" | "NULL" => "null",
        "True" => "true",
        "False" => "false",
        "except" | "rescue" => "catch",
        "raise" => "throw",
        "include" | "require" | "use" => "import",
        "ret" => "return",
        _ => return None,
    };
    Some(keyword)
}
