use crate::{
    ast::{ChainAccess, Expr, Literal, Span, UnaryOperator},
    interpreter::{
        lexer::TokenKind,
        parser::{
            core::{ParseResult, Parser},
            utils::decode_escapes,
        },
    },
};

impl Parser<'_> {
    /// Parses a unary expression.
    ///
    /// Prefix operators are right-associative, so `!-x` parses as `!(-x)`.
    /// `await` has no runtime meaning and yields its operand unchanged.
    ///
    /// Grammar:
    /// ```text
    ///     unary := ("!" | "-" | "typeof" | "await") unary
    ///            | postfix
    /// ```
    pub(in crate::interpreter::parser) fn unary(&mut self) -> ParseResult<Expr> {
        let op = match self.current().kind {
            TokenKind::Bang => Some(UnaryOperator::Not),
            TokenKind::Minus => Some(UnaryOperator::Negate),
            TokenKind::TypeOf => {
                self.advance();
                let span = self.previous_span();
                let operand = self.unary()?;
                return Ok(Expr::TypeOf { operand: Box::new(operand),
                                         span });
            },
            TokenKind::Await => {
                self.advance();
                return self.unary();
            },
            _ => None,
        };

        let Some(op) = op else {
            return self.postfix();
        };

        self.advance();
        let span = self.previous_span();
        let operand = self.unary()?;

        Ok(Expr::Unary { op,
                         operand: Box::new(operand),
                         span })
    }

    /// Parses a primary expression followed by any number of postfix
    /// operations.
    ///
    /// Grammar:
    /// ```text
    ///     postfix := primary ( "(" args? ")"
    ///                        | "." IDENT | "::" IDENT
    ///                        | "?." IDENT | "?." "[" expression "]"
    ///                        | "[" expression "]" )*
    /// ```
    fn postfix(&mut self) -> ParseResult<Expr> {
        let mut node = self.primary()?;

        loop {
            match self.current().kind {
                TokenKind::LeftParen => {
                    self.advance();
                    let span = self.previous_span();
                    let arguments = self.element_list(TokenKind::RightParen,
                                                      "Expect ')' after arguments.")?;
                    node = Expr::Call { callee: Box::new(node),
                                        arguments,
                                        span };
                },
                TokenKind::Dot | TokenKind::ColonColon => {
                    self.advance();
                    let name = self.consume_identifier("Expect property name after '.'.")?;
                    node = Expr::Member { object: Box::new(node),
                                          name,
                                          span: self.previous_span() };
                },
                TokenKind::QuestionDot => {
                    self.advance();
                    let span = self.previous_span();
                    let access = if self.match_token(TokenKind::LeftBracket) {
                        let index = self.expression()?;
                        self.consume(TokenKind::RightBracket, "Expect ']' after index.")?;
                        ChainAccess::Index(Box::new(index))
                    } else {
                        ChainAccess::Member(self.consume_identifier("Expect property name after '?.'.")?)
                    };
                    node = Expr::OptionalChain { object: Box::new(node),
                                                 access,
                                                 span };
                },
                TokenKind::LeftBracket => {
                    self.advance();
                    let span = self.previous_span();
                    let index = self.expression()?;
                    self.consume(TokenKind::RightBracket, "Expect ']' after index.")?;
                    node = Expr::Index { object: Box::new(node),
                                         index: Box::new(index),
                                         span };
                },
                _ => break,
            }
        }

        Ok(node)
    }

    /// Parses a primary (atomic) expression.
    ///
    /// Grammar (simplified):
    /// ```text
    ///     primary := INTEGER | FLOAT | STRING | CHAR | "true" | "false" | "null"
    ///              | IDENT | struct_literal
    ///              | "(" expression ")"
    ///              | "[" elements "]"
    ///              | "blast" "(" params? ")" ("->" type)? block
    /// ```
    fn primary(&mut self) -> ParseResult<Expr> {
        let token = self.current();
        let span = self.current_span();

        let literal = match token.kind {
            TokenKind::True => Literal::Bool(true),
            TokenKind::False => Literal::Bool(false),
            TokenKind::Null => Literal::Null,
            TokenKind::Integer => match token.lexeme.parse::<i64>() {
                Ok(value) => Literal::Integer(value),
                Err(_) => return Err(self.error_at_current("Integer literal out of range.")),
            },
            TokenKind::Float => match token.lexeme.parse::<f64>() {
                Ok(value) => Literal::Float(value),
                Err(_) => return Err(self.error_at_current("Invalid float literal.")),
            },
            TokenKind::String | TokenKind::Char => {
                let body = &token.lexeme[1..token.lexeme.len() - 1];
                Literal::String(decode_escapes(body))
            },
            TokenKind::Identifier => return self.identifier_or_struct_literal(),
            TokenKind::LeftParen => {
                self.advance();
                let expr = self.expression()?;
                self.consume(TokenKind::RightParen, "Expect ')' after expression.")?;
                return Ok(expr);
            },
            TokenKind::LeftBracket => {
                self.advance();
                let elements = self.element_list(TokenKind::RightBracket,
                                                 "Expect ']' after array elements.")?;
                return Ok(Expr::ArrayLiteral { elements,
                                               span });
            },
            TokenKind::Blast => {
                self.advance();
                let decl = self.function_rest(None, false, span)?;
                return Ok(Expr::Function { decl: std::rc::Rc::new(decl),
                                           span });
            },
            _ => return Err(self.error_at_current("Expect expression.")),
        };

        self.advance();
        Ok(Expr::Literal { value: literal,
                           span })
    }

    /// Parses an identifier, or a struct literal when the identifier is
    /// followed by `{` and then `}` or `IDENT ":"`.
    ///
    /// The extra lookahead keeps `if (ok) { x = 1; }` from being read as
    /// a struct literal named `ok`.
    fn identifier_or_struct_literal(&mut self) -> ParseResult<Expr> {
        let token = self.advance();
        let span = Span::new(token.line, token.column);
        let name = token.lexeme.to_string();

        let is_struct_literal = self.check(TokenKind::LeftBrace)
                                && (self.peek_kind(1) == TokenKind::RightBrace
                                    || (self.peek_kind(1) == TokenKind::Identifier
                                        && self.peek_kind(2) == TokenKind::Colon));

        if !is_struct_literal {
            return Ok(Expr::Identifier { name, span });
        }

        self.advance();
        let mut fields = Vec::new();

        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            let field = self.consume_identifier("Expect field name.")?;
            self.consume(TokenKind::Colon, "Expect ':' after field name.")?;
            let value = self.expression()?;
            fields.push((field, value));

            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }

        self.consume(TokenKind::RightBrace, "Expect '}' after struct fields.")?;

        Ok(Expr::StructLiteral { name,
                                 fields,
                                 span })
    }
}
