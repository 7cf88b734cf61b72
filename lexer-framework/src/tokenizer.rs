use crate::cursor::Cursor;
use crate::rules::Rule;
use crate::token::{Token, TokenType};
use common_framework::{Position, Span};
use log::trace;

/// A position-tracking tokenizer driven by an ordered list of rules.
///
/// Tokens are produced on demand: [`peek`](Tokenizer::peek) scans at the
/// cursor without moving it and [`forward`](Tokenizer::forward) commits a
/// peeked token. Rules are tried in registration order and the first one
/// that matches wins.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    cursor: Cursor,
    rules: Vec<(TokenType, Rule)>,
}

impl Tokenizer {
    /// Creates a tokenizer with no rules over an empty input.
    pub fn new() -> Self {
        Self {
            cursor: Cursor::new(""),
            rules: Vec::new(),
        }
    }

    /// Registers `rule` as the next alternative for `token_type`.
    pub fn add_rule<T: Into<TokenType>>(&mut self, token_type: T, rule: Rule) -> &mut Self {
        self.rules.push((token_type.into(), rule));
        self
    }

    /// Builder form of [`add_rule`](Tokenizer::add_rule).
    pub fn rule<T: Into<TokenType>>(mut self, token_type: T, rule: Rule) -> Self {
        self.add_rule(token_type, rule);
        self
    }

    /// Installs `input` and moves the cursor to its start.
    pub fn from_string<S: Into<String>>(&mut self, input: S) -> &mut Self {
        self.cursor = Cursor::new(input);
        self
    }

    /// Builder form of [`from_string`](Tokenizer::from_string).
    pub fn with_input<S: Into<String>>(mut self, input: S) -> Self {
        self.from_string(input);
        self
    }

    /// Returns the registered rules in order.
    pub fn rules(&self) -> &[(TokenType, Rule)] {
        &self.rules
    }

    /// Returns the current cursor position.
    pub fn position(&self) -> Position {
        self.cursor.position()
    }

    /// Returns the whole input text.
    pub fn input(&self) -> &str {
        self.cursor.input()
    }

    pub fn is_eof(&self) -> bool {
        self.cursor.is_eof()
    }

    /// Scans the next token without moving the cursor.
    ///
    /// This method optimizes rule matching by using `quick_check()` to skip
    /// rules that definitely won't match the current character.
    pub fn peek(&self) -> Token {
        let position = self.cursor.position();
        let remaining = self.cursor.remaining();
        let Some(first_char) = remaining.chars().next() else {
            return Token::eof(self.cursor.slice_ahead(0), position);
        };

        for (token_type, rule) in &self.rules {
            if let Some(false) = rule.quick_check(Some(first_char)) {
                continue;
            }
            if let Some(len) = rule.try_match(remaining) {
                let value = self.cursor.slice_ahead(len);
                let span = Span::new(position, position.step_str(&value));
                trace!("peek {} {:?} at {}", token_type, value.as_str(), position);
                return Token::ordinary(token_type.clone(), value, span);
            }
        }

        trace!("no rule matches {:?} at {}", first_char, position);
        let value = self.cursor.slice_ahead(first_char.len_utf8());
        Token::error(value, Span::new(position, position.step(first_char)))
    }

    /// Commits `token`, which must be the token just returned by
    /// [`peek`](Tokenizer::peek).
    ///
    /// # Panics
    ///
    /// Panics if `token` was not peeked at the current cursor position.
    pub fn forward(&mut self, token: &Token) {
        let position = self.cursor.position();
        assert!(
            token.span.start == position && self.cursor.remaining().starts_with(token.text()),
            "forward: {} was not peeked at the cursor position {}",
            token,
            position
        );
        debug_assert_eq!(&self.peek(), token, "forward: token differs from peek()");
        self.cursor.advance_bytes(token.span.len());
        trace!("commit {} -> {}", token.describe(), self.cursor.position());
    }

    /// Peeks and commits in one step.
    pub fn next_token(&mut self) -> Token {
        let token = self.peek();
        self.forward(&token);
        token
    }

    /// Collects every remaining token, excluding the final end-of-input token.
    pub fn tokenize(&mut self) -> Vec<Token> {
        self.collect()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Make Tokenizer implement Iterator for stream-like processing.
/// Error tokens are yielded and stepped over; iteration ends at end of input.
impl Iterator for Tokenizer {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        (!token.is_eof()).then_some(token)
    }
}
