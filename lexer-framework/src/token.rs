use common_framework::{Position, Span, TextSlice};
use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// The lexical category of a token, e.g. `"number"` or `"lparen"`.
///
/// Token types form an open namespace chosen by the grammar author. Cloning
/// is cheap.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenType(Arc<str>);

impl TokenType {
    /// Type of the tokens produced when no rule matches.
    pub const ERROR: &'static str = "<error>";
    /// Type of the zero-length token produced at the end of input.
    pub const EOF: &'static str = "<eof>";

    pub fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TokenType {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for TokenType {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

impl From<&TokenType> for TokenType {
    fn from(ty: &TokenType) -> Self {
        ty.clone()
    }
}

impl Borrow<str> for TokenType {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for TokenType {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for TokenType {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The three disjoint kinds of token a tokenizer can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Ordinary,
    /// No rule matched; the token covers exactly one character.
    Error,
    /// End of input; the token is zero-length.
    Eof,
}

/// A tagged, positioned slice of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub token_type: TokenType,
    pub value: TextSlice,
    pub span: Span,
    pub kind: TokenKind,
}

impl Token {
    pub fn ordinary(token_type: TokenType, value: TextSlice, span: Span) -> Self {
        Self {
            token_type,
            value,
            span,
            kind: TokenKind::Ordinary,
        }
    }

    pub fn error(value: TextSlice, span: Span) -> Self {
        Self {
            token_type: TokenType::new(TokenType::ERROR),
            value,
            span,
            kind: TokenKind::Error,
        }
    }

    pub fn eof(value: TextSlice, position: Position) -> Self {
        Self {
            token_type: TokenType::new(TokenType::EOF),
            value,
            span: Span::empty(position),
            kind: TokenKind::Eof,
        }
    }

    /// Returns the matched text.
    pub fn text(&self) -> &str {
        self.value.as_str()
    }

    pub fn start(&self) -> Position {
        self.span.start
    }

    pub fn end(&self) -> Position {
        self.span.end
    }

    pub fn is_error(&self) -> bool {
        self.kind == TokenKind::Error
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// Returns true if this is an ordinary token of type `token_type`.
    pub fn is(&self, token_type: &str) -> bool {
        self.kind == TokenKind::Ordinary && self.token_type == token_type
    }

    /// Short human-readable description used in error messages.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Ordinary => format!("{} {:?}", self.token_type, self.text()),
            TokenKind::Error => format!("unrecognized input {:?}", self.text()),
            TokenKind::Eof => "end of input".to_string(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.describe(), self.span)
    }
}
