use crate::interpreter::lexer::TokenKind;

#[derive(Debug, Clone, PartialEq, Eq)]
/// A single syntax error, rendered as a human-readable diagnostic block.
pub struct ParseError {
    /// What went wrong.
    pub message:     String,
    /// 1-based line of the offending token.
    pub line:        usize,
    /// 1-based column of the offending token.
    pub column:      usize,
    /// The offending token's kind.
    pub token:       TokenKind,
    /// The offending token's text (empty at end of input).
    pub lexeme:      String,
    /// The full source line containing the token.
    pub source_line: String,
    /// A keyword the author may have meant.
    pub suggestion:  Option<&'static str>,
}

impl std::fmt::Display for ParseError {
    /// Writes the diagnostic block:
    ///
    /// ```text
    /// error: Expect ';' after expression.
    ///  --> Line 1, Column 9
    ///   |
    /// 1 | echo(1) turbo
    ///   |         ^~~~~
    ///   = token: TURBO
    /// ```
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let gutter = " ".repeat(self.line.to_string().len());
        let width = self.lexeme
                        .lines()
                        .next()
                        .map_or(0, |first| first.chars().count())
                        .max(1);
        let padding = " ".repeat(self.column.saturating_sub(1));

        writeln!(f, "error: {}", self.message)?;
        writeln!(f, "{gutter}--> Line {}, Column {}", self.line, self.column)?;
        writeln!(f, "{gutter} |")?;
        writeln!(f, "{} | {}", self.line, self.source_line)?;
        writeln!(f, "{gutter} | {padding}^{}", "~".repeat(width - 1))?;
        write!(f, "{gutter} = token: {}", self.token)?;

        if let Some(keyword) = self.suggestion {
            write!(f, "\n{gutter} = help: did you mean `{keyword}`?")?;
        }

        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Every syntax error collected while parsing one source text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParseErrors(pub Vec<ParseError>);

impl ParseErrors {
    /// Number of collected diagnostics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if nothing was collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates the diagnostics in the order they were reported.
    pub fn iter(&self) -> std::slice::Iter<'_, ParseError> {
        self.0.iter()
    }
}

impl std::fmt::Display for ParseErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, error) in self.0.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
                writeln!(f)?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseErrors {}
