use common_framework::Span;
use lexer_framework::Token;
use thiserror::Error;

/// The payload of a successful parse.
#[derive(Debug, Clone, PartialEq)]
pub enum Content<V> {
    /// A single committed token.
    Token(Token),
    /// The kept sub-results of a tuple or the items of a repetition.
    List(Vec<ParseResult<V>>),
    /// A value built by a semantic action.
    Value(V),
}

impl<V> Content<V> {
    pub fn as_token(&self) -> Option<&Token> {
        match self {
            Content::Token(token) => Some(token),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ParseResult<V>]> {
        match self {
            Content::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_value(&self) -> Option<&V> {
        match self {
            Content::Value(value) => Some(value),
            _ => None,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Content::Token(_) => "a token",
            Content::List(_) => "a list",
            Content::Value(_) => "a value",
        }
    }
}

/// A successful parse: its content and the input region it covers.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult<V> {
    pub content: Content<V>,
    pub span: Span,
}

impl<V> ParseResult<V> {
    pub fn new(content: Content<V>, span: Span) -> Self {
        Self { content, span }
    }

    pub fn value(value: V, span: Span) -> Self {
        Self::new(Content::Value(value), span)
    }

    /// Wraps a token, spanning exactly that token.
    pub fn token(token: Token) -> Self {
        let span = token.span;
        Self::new(Content::Token(token), span)
    }

    pub fn list(items: Vec<ParseResult<V>>, span: Span) -> Self {
        Self::new(Content::List(items), span)
    }

    pub fn as_token(&self) -> Option<&Token> {
        self.content.as_token()
    }

    pub fn as_list(&self) -> Option<&[ParseResult<V>]> {
        self.content.as_list()
    }

    pub fn as_value(&self) -> Option<&V> {
        self.content.as_value()
    }

    /// Takes the semantic value out, or reports what was found instead.
    pub fn into_value(self) -> Result<V, ParseError> {
        match self.content {
            Content::Value(value) => Ok(value),
            other => Err(ParseError::new(
                format!("expected a value but found {}", other.kind()),
                self.span,
            )),
        }
    }

    pub fn into_token(self) -> Result<Token, ParseError> {
        match self.content {
            Content::Token(token) => Ok(token),
            other => Err(ParseError::new(
                format!("expected a token but found {}", other.kind()),
                self.span,
            )),
        }
    }

    pub fn into_list(self) -> Result<Vec<ParseResult<V>>, ParseError> {
        match self.content {
            Content::List(items) => Ok(items),
            other => Err(ParseError::new(
                format!("expected a list but found {}", other.kind()),
                self.span,
            )),
        }
    }

    /// Replaces the content, keeping the span.
    pub fn map<W, F>(self, f: F) -> ParseResult<W>
    where
        F: FnOnce(Content<V>) -> Content<W>,
    {
        ParseResult::new(f(self.content), self.span)
    }

    pub fn with_span(self, span: Span) -> Self {
        Self { span, ..self }
    }
}

/// A failed parse.
///
/// Syntax errors and errors raised by semantic actions share this type; only
/// the message and span tell them apart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at {span}")]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

impl ParseError {
    pub fn new<S: Into<String>>(message: S, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }

    /// Error located on a single token.
    pub fn at_token<S: Into<String>>(message: S, token: &Token) -> Self {
        Self::new(message, token.span)
    }

    /// Formats the error against the text it was produced from, underlining
    /// the offending region of its first line.
    pub fn report(&self, source: &str) -> String {
        let start = self.span.start;
        let line_text = source.lines().nth(start.line - 1).unwrap_or("");
        let line_label = start.line.to_string();
        let gutter = " ".repeat(line_label.len());

        let indent: String = line_text
            .chars()
            .take(start.column - 1)
            .map(|c| if c == '\t' { '\t' } else { ' ' })
            .collect();
        let width = if self.span.end.line == start.line {
            source
                .get(self.span.start.offset..self.span.end.offset)
                .map_or(1, |text| text.chars().count().max(1))
        } else {
            line_text.chars().count().saturating_sub(start.column - 1).max(1)
        };

        format!(
            "error: {message}\n{gutter}--> {start}\n{gutter} |\n{line_label} | {line_text}\n{gutter} | {indent}{carets}",
            message = self.message,
            carets = "^".repeat(width),
        )
    }
}

/// The outcome of running any parser.
pub type ParseOutcome<V> = Result<ParseResult<V>, ParseError>;
