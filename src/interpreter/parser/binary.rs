use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        lexer::TokenKind,
        parser::core::{ParseResult, Parser},
    },
    util::stack::ensure_sufficient_stack,
};

impl Parser<'_> {
    /// Parses a full expression.
    ///
    /// The rule is: `expression := assignment`
    pub(in crate::interpreter::parser) fn expression(&mut self) -> ParseResult<Expr> {
        ensure_sufficient_stack(|| self.assignment())
    }

    /// Parses assignment expressions.
    ///
    /// Assignment is right-associative, so `a = b = 3` assigns `3` to `b` and
    /// then the result to `a`. Only identifiers, index and member expressions
    /// are valid targets.
    ///
    /// The rule is: `assignment := range ("=" assignment)?`
    fn assignment(&mut self) -> ParseResult<Expr> {
        let target = self.range()?;

        if self.match_token(TokenKind::Equal) {
            let span = self.previous_span();
            let equals = self.previous();
            let value = self.assignment()?;

            if !target.is_assignable() {
                return Err(self.error_at(equals, "Invalid assignment target."));
            }

            return Ok(Expr::Assign { target: Box::new(target),
                                     value: Box::new(value),
                                     span });
        }

        Ok(target)
    }

    /// Parses a half-open range.
    ///
    /// `..` is non-associative: `a..b..c` is a syntax error at the second
    /// `..`.
    ///
    /// The rule is: `range := nullish (".." nullish)?`
    fn range(&mut self) -> ParseResult<Expr> {
        let left = self.nullish()?;

        if self.match_token(TokenKind::DotDot) {
            let span = self.previous_span();
            let right = self.nullish()?;
            return Ok(binary(left, BinaryOperator::Range, right, span));
        }

        Ok(left)
    }

    /// Parses nullish coalescing.
    ///
    /// The rule is: `nullish := or ("??" or)*`
    fn nullish(&mut self) -> ParseResult<Expr> {
        let mut left = self.or()?;

        while self.match_token(TokenKind::QuestionQuestion) {
            let span = self.previous_span();
            let right = self.or()?;
            left = Expr::NullishCoalescing { left: Box::new(left),
                                             right: Box::new(right),
                                             span };
        }

        Ok(left)
    }

    /// The rule is: `or := and ("||" and)*`
    fn or(&mut self) -> ParseResult<Expr> {
        let mut left = self.and()?;

        while self.match_token(TokenKind::OrOr) {
            let span = self.previous_span();
            let right = self.and()?;
            left = binary(left, BinaryOperator::Or, right, span);
        }

        Ok(left)
    }

    /// The rule is: `and := comparison ("&&" comparison)*`
    fn and(&mut self) -> ParseResult<Expr> {
        let mut left = self.comparison()?;

        while self.match_token(TokenKind::AndAnd) {
            let span = self.previous_span();
            let right = self.comparison()?;
            left = binary(left, BinaryOperator::And, right, span);
        }

        Ok(left)
    }

    /// Parses equality and relational operators.
    ///
    /// Comparisons do not chain: `a < b < c` stops after `a < b` and the
    /// caller reports the stray operator.
    ///
    /// The rule is: `comparison := additive (("==" | "!=" | "<" | "<=" | ">" |
    /// ">=") additive)?`
    fn comparison(&mut self) -> ParseResult<Expr> {
        let left = self.additive()?;

        if let Some(op) = comparison_operator(self.current().kind) {
            self.advance();
            let span = self.previous_span();
            let right = self.additive()?;
            return Ok(binary(left, op, right, span));
        }

        Ok(left)
    }

    /// Parses addition and subtraction expressions.
    ///
    /// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
    fn additive(&mut self) -> ParseResult<Expr> {
        let mut left = self.multiplicative()?;

        loop {
            let op = match self.current().kind {
                TokenKind::Plus => BinaryOperator::Add,
                TokenKind::Minus => BinaryOperator::Sub,
                _ => break,
            };
            self.advance();
            let span = self.previous_span();
            let right = self.multiplicative()?;
            left = binary(left, op, right, span);
        }

        Ok(left)
    }

    /// Parses multiplication-level expressions.
    ///
    /// The rule is: `multiplicative := unary (("*" | "/" | "%") unary)*`
    fn multiplicative(&mut self) -> ParseResult<Expr> {
        let mut left = self.unary()?;

        loop {
            let op = match self.current().kind {
                TokenKind::Star => BinaryOperator::Mul,
                TokenKind::Slash => BinaryOperator::Div,
                TokenKind::Percent => BinaryOperator::Mod,
                _ => break,
            };
            self.advance();
            let span = self.previous_span();
            let right = self.unary()?;
            left = binary(left, op, right, span);
        }

        Ok(left)
    }
}

/// Maps a token to its comparison operator, if it is one.
const fn comparison_operator(kind: TokenKind) -> Option<BinaryOperator> {
    match kind {
        TokenKind::EqualEqual => Some(BinaryOperator::Equal),
        TokenKind::BangEqual => Some(BinaryOperator::NotEqual),
        TokenKind::Less => Some(BinaryOperator::Less),
        TokenKind::LessEqual => Some(BinaryOperator::LessEqual),
        TokenKind::Greater => Some(BinaryOperator::Greater),
        TokenKind::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        _ => None,
    }
}

fn binary(left: Expr, op: BinaryOperator, right: Expr, span: crate::ast::Span) -> Expr {
    Expr::Binary { left: Box::new(left),
                   op,
                   right: Box::new(right),
                   span }
}
