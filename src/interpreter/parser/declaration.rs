use std::rc::Rc;

use crate::{
    ast::{
        EnumDecl, FunctionDecl, Pattern, PatternElement, Span, Stmt, StructDecl, StructField,
        TypeInfo,
    },
    interpreter::{
        lexer::TokenKind,
        parser::core::{ParseResult, Parser},
    },
};

impl Parser<'_> {
    /// Parses one declaration or statement without error recovery.
    ///
    /// Grammar:
    /// ```text
    ///     declaration := import | struct_decl | enum_decl
    ///                  | "async"? "blast" IDENT function
    ///                  | var_decl ";"
    ///                  | statement
    /// ```
    pub(in crate::interpreter::parser) fn parse_declaration(&mut self) -> ParseResult<Stmt> {
        match self.current().kind {
            TokenKind::Import => self.import_declaration(),
            TokenKind::Struct => self.struct_declaration(),
            TokenKind::Enum => self.enum_declaration(),
            TokenKind::Async => {
                self.advance();
                if !self.check(TokenKind::Blast) {
                    return Err(self.error_at_current("Expect 'blast' after 'async'."));
                }
                self.function_declaration(true)
            },
            TokenKind::Blast if self.peek_kind(1) == TokenKind::Identifier => {
                self.function_declaration(false)
            },
            TokenKind::Turbo => self.var_statement(),
            _ if self.at_typed_name() => self.var_statement(),
            _ => self.statement(),
        }
    }

    /// Parses a named function after an optional `async`.
    ///
    /// The rule is: `function := "blast" IDENT "(" params? ")" ("->" type)?
    /// block`
    fn function_declaration(&mut self, is_async: bool) -> ParseResult<Stmt> {
        let span = self.current_span();
        self.advance();
        let name = self.consume_identifier("Expect function name.")?;
        let decl = self.function_rest(Some(name), is_async, span)?;

        Ok(Stmt::Function(Rc::new(decl)))
    }

    /// Parses the parameter list, optional return type and body shared by
    /// named and anonymous functions. The cursor must sit on `(`.
    pub(in crate::interpreter::parser) fn function_rest(&mut self,
                                                        name: Option<String>,
                                                        is_async: bool,
                                                        span: Span)
                                                        -> ParseResult<FunctionDecl> {
        self.consume(TokenKind::LeftParen, "Expect '(' after function name.")?;
        let params = self.parameters()?;

        let return_type = if self.match_token(TokenKind::Arrow) {
            Some(self.type_info()?)
        } else {
            None
        };

        self.consume(TokenKind::LeftBrace, "Expect '{' before function body.")?;
        let body = self.block()?;

        Ok(FunctionDecl { name,
                          params,
                          return_type,
                          body,
                          is_async,
                          span })
    }

    /// The rule is: `var_stmt := var_decl ";"`
    fn var_statement(&mut self) -> ParseResult<Stmt> {
        let declaration = self.var_declaration()?;
        self.consume(TokenKind::Semicolon, "Expect ';' after variable declaration.")?;
        Ok(declaration)
    }

    /// Parses a variable declaration without its trailing `;`, which the
    /// C-style `cruise` header supplies itself.
    ///
    /// Grammar:
    /// ```text
    ///     var_decl       := ("turbo" | type) target ("=" expression)?
    ///     target         := IDENT | array_pattern | struct_pattern
    ///     array_pattern  := "[" (IDENT | "_" | "..." IDENT) ("," ...)* "]"
    ///     struct_pattern := "{" IDENT ("," IDENT)* "}"
    /// ```
    pub(in crate::interpreter::parser) fn var_declaration(&mut self) -> ParseResult<Stmt> {
        let span = self.current_span();

        let type_info = if self.match_token(TokenKind::Turbo) {
            TypeInfo::turbo()
        } else {
            self.type_info()?
        };

        let target = match self.current().kind {
            TokenKind::LeftBracket => {
                self.advance();
                self.array_pattern()?
            },
            TokenKind::LeftBrace => {
                self.advance();
                self.struct_pattern()?
            },
            _ => Pattern::Identifier(self.consume_identifier("Expect variable name.")?),
        };

        let initializer = if self.match_token(TokenKind::Equal) {
            Some(self.expression()?)
        } else {
            None
        };

        Ok(Stmt::VarDecl { type_info,
                           target,
                           initializer,
                           span })
    }

    fn array_pattern(&mut self) -> ParseResult<Pattern> {
        let mut elements = Vec::new();

        if !self.check(TokenKind::RightBracket) {
            loop {
                let element = if self.match_token(TokenKind::Ellipsis) {
                    PatternElement::Rest(self.consume_identifier("Expect name after '...'.")?)
                } else {
                    let name = self.consume_identifier("Expect name in array pattern.")?;
                    if name == "_" {
                        PatternElement::Skip
                    } else {
                        PatternElement::Bind(name)
                    }
                };
                elements.push(element);

                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }

        self.consume(TokenKind::RightBracket, "Expect ']' after array pattern.")?;
        Ok(Pattern::Array(elements))
    }

    fn struct_pattern(&mut self) -> ParseResult<Pattern> {
        let mut fields = vec![self.consume_identifier("Expect field name in struct pattern.")?];

        while self.match_token(TokenKind::Comma) {
            fields.push(self.consume_identifier("Expect field name in struct pattern.")?);
        }

        self.consume(TokenKind::RightBrace, "Expect '}' after struct pattern.")?;
        Ok(Pattern::Struct(fields))
    }

    /// Parses a struct declaration. Fields may be typed and may be separated
    /// by `,` or `;`.
    ///
    /// The rule is: `struct_decl := "struct" IDENT "{" (type? IDENT (","|";")?)* "}"`
    fn struct_declaration(&mut self) -> ParseResult<Stmt> {
        let span = self.current_span();
        self.advance();
        let name = self.consume_identifier("Expect struct name.")?;
        self.consume(TokenKind::LeftBrace, "Expect '{' before struct body.")?;

        let mut fields = Vec::new();
        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            let type_info = if self.at_typed_name() {
                Some(self.type_info()?)
            } else {
                None
            };
            let field = self.consume_identifier("Expect field name.")?;
            fields.push(StructField { name: field,
                                      type_info });

            if !self.match_token(TokenKind::Comma) {
                self.match_token(TokenKind::Semicolon);
            }
        }

        self.consume(TokenKind::RightBrace, "Expect '}' after struct body.")?;

        Ok(Stmt::Struct(Rc::new(StructDecl { name,
                                             fields,
                                             span })))
    }

    /// Parses an enum declaration with optional explicit variant values.
    ///
    /// The rule is: `enum_decl := "enum" IDENT "{" (IDENT ("=" "-"? INTEGER)?
    /// ","?)* "}"`
    fn enum_declaration(&mut self) -> ParseResult<Stmt> {
        let span = self.current_span();
        self.advance();
        let name = self.consume_identifier("Expect enum name.")?;
        self.consume(TokenKind::LeftBrace, "Expect '{' before enum body.")?;

        let mut variants = Vec::new();
        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            let variant = self.consume_identifier("Expect variant name.")?;

            let value = if self.match_token(TokenKind::Equal) {
                let negative = self.match_token(TokenKind::Minus);
                let token = self.consume(TokenKind::Integer, "Expect integer variant value.")?;
                let Ok(magnitude) = token.lexeme.parse::<i64>() else {
                    return Err(self.error_at_previous("Integer literal out of range."));
                };
                Some(if negative { -magnitude } else { magnitude })
            } else {
                None
            };
            variants.push((variant, value));

            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }

        self.consume(TokenKind::RightBrace, "Expect '}' after enum body.")?;

        Ok(Stmt::Enum(EnumDecl { name,
                                 variants,
                                 span }))
    }

    /// Parses `import "path";` or `import a.b.c;`.
    fn import_declaration(&mut self) -> ParseResult<Stmt> {
        let span = self.current_span();
        self.advance();

        let path = if self.match_token(TokenKind::String) {
            let lexeme = self.previous().lexeme;
            lexeme[1..lexeme.len() - 1].to_string()
        } else {
            let mut path = self.consume_identifier("Expect module path after 'import'.")?;
            while self.match_token(TokenKind::Dot) {
                path.push('.');
                path.push_str(&self.consume_identifier("Expect module name after '.'.")?);
            }
            path
        };

        self.consume(TokenKind::Semicolon, "Expect ';' after import.")?;

        Ok(Stmt::Import { path, span })
    }
}
