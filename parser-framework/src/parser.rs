use crate::context::ParseContext;
use crate::error::GrammarError;
use crate::grammar::Grammar;
use crate::outcome::ParseOutcome;
use lexer_framework::Tokenizer;
use log::debug;

/// Runs a grammar's entry rule over a tokenizer.
///
/// The grammar is borrowed and may be shared by any number of drivers; each
/// driver owns the tokenizer for the input it parses.
pub struct LlParsing<'g, V> {
    grammar: &'g Grammar<V>,
    tokenizer: Tokenizer,
}

impl<'g, V> LlParsing<'g, V> {
    pub fn new(grammar: &'g Grammar<V>, tokenizer: Tokenizer) -> Self {
        Self { grammar, tokenizer }
    }

    pub fn grammar(&self) -> &'g Grammar<V> {
        self.grammar
    }

    /// Returns a reference to the tokenizer.
    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// Returns a mutable reference to the tokenizer.
    pub fn tokenizer_mut(&mut self) -> &mut Tokenizer {
        &mut self.tokenizer
    }

    /// Parses from the tokenizer's current position.
    ///
    /// The input is not required to be fully consumed; grammars that must
    /// see the whole input end their entry rule with [`Parser::Eof`].
    ///
    /// # Panics
    ///
    /// Panics if the grammar has no entry or reaches an unregistered rule.
    ///
    /// [`Parser::Eof`]: crate::Parser::Eof
    pub fn parse(&mut self) -> ParseOutcome<V> {
        let entry = self
            .grammar
            .entry()
            .unwrap_or_else(|| panic!("{}", GrammarError::MissingEntry));

        debug!(
            "parse: starting at {} ({} bytes of input)",
            self.tokenizer.position(),
            self.tokenizer.input().len()
        );
        let mut ctx = ParseContext::new(self.grammar, &mut self.tokenizer);
        let outcome = entry.parse(&mut ctx);
        match &outcome {
            Ok(result) => debug!("parse: succeeded over {}", result.span),
            Err(err) => debug!("parse: failed: {}", err),
        }
        outcome
    }

    /// Installs `input` in the tokenizer and parses it from the start.
    pub fn parse_input<S: Into<String>>(&mut self, input: S) -> ParseOutcome<V> {
        self.tokenizer.from_string(input);
        self.parse()
    }
}
