use crate::grammar::Grammar;
use common_framework::{Position, Span};
use lexer_framework::{Token, Tokenizer};

/// Everything a parser needs while it runs: the grammar that resolves
/// references and the tokenizer that owns the cursor.
///
/// The grammar is shared read-only; the tokenizer is the only mutable state
/// of a parse.
pub struct ParseContext<'a, V> {
    grammar: &'a Grammar<V>,
    tokenizer: &'a mut Tokenizer,
}

impl<'a, V> ParseContext<'a, V> {
    pub fn new(grammar: &'a Grammar<V>, tokenizer: &'a mut Tokenizer) -> Self {
        Self { grammar, tokenizer }
    }

    /// Returns the grammar with the context's full lifetime, so a resolved
    /// parser can be run against this same context.
    pub fn grammar(&self) -> &'a Grammar<V> {
        self.grammar
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        self.tokenizer
    }

    /// Returns the current token without advancing.
    pub fn peek(&self) -> Token {
        self.tokenizer.peek()
    }

    /// Commits a token previously returned by [`peek`](ParseContext::peek).
    pub fn commit(&mut self, token: &Token) {
        self.tokenizer.forward(token);
    }

    /// Returns the current position.
    pub fn position(&self) -> Position {
        // Through `&mut Tokenizer`, method syntax would pick `Iterator::position`.
        Tokenizer::position(&*self.tokenizer)
    }

    /// Returns the current byte offset.
    pub fn offset(&self) -> usize {
        self.position().offset
    }

    /// A zero-length span at the cursor.
    pub fn empty_span(&self) -> Span {
        Span::empty(self.position())
    }
}
