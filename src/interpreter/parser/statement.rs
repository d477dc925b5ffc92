use crate::{
    ast::Stmt,
    interpreter::{
        lexer::TokenKind,
        parser::core::{ParseResult, Parser},
    },
};

impl Parser<'_> {
    /// Parses a statement that is not a declaration.
    ///
    /// Dispatches on the leading keyword; anything else is an expression
    /// statement.
    pub(in crate::interpreter::parser) fn statement(&mut self) -> ParseResult<Stmt> {
        match self.current().kind {
            TokenKind::Echo => self.echo_statement(),
            TokenKind::Return => self.return_statement(),
            TokenKind::Loop => self.loop_statement(),
            TokenKind::Cruise => self.cruise_statement(),
            TokenKind::If => {
                self.advance();
                self.if_statement()
            },
            TokenKind::Try => self.try_statement(),
            TokenKind::Throw => self.throw_statement(),
            TokenKind::Break => {
                self.advance();
                let span = self.previous_span();
                self.consume(TokenKind::Semicolon, "Expect ';' after 'break'.")?;
                Ok(Stmt::Break { span })
            },
            TokenKind::Continue => {
                self.advance();
                let span = self.previous_span();
                self.consume(TokenKind::Semicolon, "Expect ';' after 'continue'.")?;
                Ok(Stmt::Continue { span })
            },
            TokenKind::LeftBrace => {
                let span = self.current_span();
                self.advance();
                let statements = self.block()?;
                Ok(Stmt::Block { statements, span })
            },
            _ => self.expression_statement(),
        }
    }

    /// Parses the declarations of a block after its opening `{`, consuming
    /// the closing `}`.
    ///
    /// Each inner declaration recovers from its own syntax errors, so one
    /// mistake inside a function body does not hide the next one.
    pub(in crate::interpreter::parser) fn block(&mut self) -> ParseResult<Vec<Stmt>> {
        let errors_before = self.errors.len();
        let mut statements = Vec::new();

        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            if let Some(statement) = self.declaration() {
                statements.push(statement);
            }
        }

        // Input ending inside a block that already failed is the same mistake.
        if self.is_at_end() && self.errors.len() > errors_before {
            self.panic_mode = true;
        }

        self.consume(TokenKind::RightBrace, "Expect '}' after block.")?;
        Ok(statements)
    }

    /// Parses a `{ ... }` block, reporting `message` if the brace is
    /// missing.
    fn braced_block(&mut self, message: &str) -> ParseResult<Box<Stmt>> {
        let span = self.current_span();
        self.consume(TokenKind::LeftBrace, message)?;
        let statements = self.block()?;

        Ok(Box::new(Stmt::Block { statements, span }))
    }

    /// The rule is: `echo := "echo" expression ("," expression)* ";"`
    fn echo_statement(&mut self) -> ParseResult<Stmt> {
        self.advance();
        let span = self.previous_span();

        let mut values = vec![self.expression()?];
        while self.match_token(TokenKind::Comma) {
            values.push(self.expression()?);
        }

        self.consume(TokenKind::Semicolon, "Expect ';' after value.")?;
        Ok(Stmt::Echo { values, span })
    }

    /// The rule is: `return := "return" expression? ";"`
    fn return_statement(&mut self) -> ParseResult<Stmt> {
        self.advance();
        let span = self.previous_span();

        let value = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.expression()?)
        };

        self.consume(TokenKind::Semicolon, "Expect ';' after return value.")?;
        Ok(Stmt::Return { value, span })
    }

    /// Parses a while-style loop. Without a parenthesized condition the loop
    /// runs until `break` or `return`.
    ///
    /// The rule is: `loop := "loop" ("(" expression ")")? statement`
    fn loop_statement(&mut self) -> ParseResult<Stmt> {
        self.advance();
        let span = self.previous_span();

        // `loop running { ... }` is a condition missing its parentheses, not
        // a struct literal named `running`.
        if self.check(TokenKind::Identifier) && self.peek_kind(1) == TokenKind::LeftBrace {
            return Err(self.error_at_current("Expect '(' before loop condition."));
        }

        let condition = if self.match_token(TokenKind::LeftParen) {
            let condition = self.expression()?;
            self.consume(TokenKind::RightParen, "Expect ')' after loop condition.")?;
            Some(condition)
        } else {
            None
        };

        let body = Box::new(self.statement()?);

        Ok(Stmt::Loop { condition,
                        body,
                        span })
    }

    /// Parses both forms of `cruise`.
    ///
    /// `cruise (x in iterable) body` becomes a [`Stmt::Cruise`]. The C-style
    /// form is rewritten here into the equivalent loop:
    ///
    /// ```text
    ///     cruise (init; cond; update) body
    ///     =>  { init; loop (cond) { body; update; } }
    /// ```
    fn cruise_statement(&mut self) -> ParseResult<Stmt> {
        self.advance();
        let span = self.previous_span();
        self.consume(TokenKind::LeftParen, "Expect '(' after 'cruise'.")?;

        if self.check(TokenKind::Identifier) && self.peek_kind(1) == TokenKind::In {
            let variable = self.advance().lexeme.to_string();
            self.advance();
            let iterable = self.expression()?;
            self.consume(TokenKind::RightParen, "Expect ')' after cruise clauses.")?;
            let body = Box::new(self.statement()?);

            return Ok(Stmt::Cruise { variable,
                                     iterable,
                                     body,
                                     span });
        }

        let initializer = if self.match_token(TokenKind::Semicolon) {
            None
        } else if self.check(TokenKind::Turbo) || self.at_typed_name() {
            let declaration = self.var_declaration()?;
            self.consume(TokenKind::Semicolon, "Expect ';' after loop initializer.")?;
            Some(declaration)
        } else {
            Some(self.expression_statement()?)
        };

        let condition = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.expression()?)
        };
        self.consume(TokenKind::Semicolon, "Expect ';' after loop condition.")?;

        let update = if self.check(TokenKind::RightParen) {
            None
        } else {
            let expr = self.expression()?;
            let span = expr.span();
            Some(Stmt::Expression { expr, span })
        };
        self.consume(TokenKind::RightParen, "Expect ')' after cruise clauses.")?;

        let body = self.statement()?;

        let mut looped = vec![body];
        looped.extend(update);
        let lowered = Stmt::Loop { condition,
                                   body: Box::new(Stmt::Block { statements: looped,
                                                                span }),
                                   span };

        let mut statements: Vec<Stmt> = initializer.into_iter().collect();
        statements.push(lowered);

        Ok(Stmt::Block { statements, span })
    }

    /// Parses an `if` after its keyword. `elif` clauses become nested `if`
    /// statements in the else branch.
    ///
    /// The rule is: `if := "if" "(" expression ")" statement ("elif" "("
    /// expression ")" statement)* ("else" statement)?`
    fn if_statement(&mut self) -> ParseResult<Stmt> {
        let span = self.previous_span();
        self.consume(TokenKind::LeftParen, "Expect '(' after 'if'.")?;
        let condition = self.expression()?;
        self.consume(TokenKind::RightParen, "Expect ')' after if condition.")?;

        let then_branch = Box::new(self.statement()?);

        let else_branch = if self.match_token(TokenKind::Elif) {
            Some(Box::new(self.if_statement()?))
        } else if self.match_token(TokenKind::Else) {
            Some(Box::new(self.statement()?))
        } else {
            None
        };

        Ok(Stmt::If { condition,
                      then_branch,
                      else_branch,
                      span })
    }

    /// The rule is: `try := "try" block ("catch" ("(" IDENT ")")? block)?
    /// ("finally" block)?`, with at least one of the two clauses.
    fn try_statement(&mut self) -> ParseResult<Stmt> {
        self.advance();
        let span = self.previous_span();
        let body = self.braced_block("Expect '{' after 'try'.")?;

        let mut catch_name = None;
        let mut catch_body = None;
        if self.match_token(TokenKind::Catch) {
            if self.match_token(TokenKind::LeftParen) {
                catch_name = Some(self.consume_identifier("Expect exception name.")?);
                self.consume(TokenKind::RightParen, "Expect ')' after exception name.")?;
            }
            catch_body = Some(self.braced_block("Expect '{' after 'catch'.")?);
        }

        let finally_body = if self.match_token(TokenKind::Finally) {
            Some(self.braced_block("Expect '{' after 'finally'.")?)
        } else {
            None
        };

        if catch_body.is_none() && finally_body.is_none() {
            return Err(self.error_at_current("Expect 'catch' or 'finally' after try block."));
        }

        Ok(Stmt::Try { body,
                       catch_name,
                       catch_body,
                       finally_body,
                       span })
    }

    /// The rule is: `throw := "throw" expression ";"`
    fn throw_statement(&mut self) -> ParseResult<Stmt> {
        self.advance();
        let span = self.previous_span();
        let value = self.expression()?;
        self.consume(TokenKind::Semicolon, "Expect ';' after thrown value.")?;

        Ok(Stmt::Throw { value, span })
    }

    /// The rule is: `expr_stmt := expression ";"`
    pub(in crate::interpreter::parser) fn expression_statement(&mut self) -> ParseResult<Stmt> {
        let span = self.current_span();
        let expr = self.expression()?;
        self.consume(TokenKind::Semicolon, "Expect ';' after expression.")?;

        Ok(Stmt::Expression { expr, span })
    }
}

