use crate::combinators::Parser;
use crate::error::GrammarError;
use crate::first_set::{FirstSets, Lookahead};
use crate::pratt::OperatorHandler;
use lexer_framework::TokenType;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// A registry of named parsers and the rule parsing starts from.
///
/// Rules refer to each other through [`Parser::Ref`], resolved by name when
/// the reference runs. A rule may therefore mention rules registered after
/// it, or itself.
pub struct Grammar<V> {
    rules: HashMap<String, Parser<V>>,
    order: Vec<String>,
    entry: Option<Parser<V>>,
    stamp: u64,
}

static NEXT_STAMP: AtomicU64 = AtomicU64::new(0);

fn next_stamp() -> u64 {
    NEXT_STAMP.fetch_add(1, Ordering::Relaxed)
}

impl<V> Grammar<V> {
    pub fn new() -> Self {
        Self {
            rules: HashMap::new(),
            order: Vec::new(),
            entry: None,
            stamp: next_stamp(),
        }
    }

    /// Stores `parser` under `name`, replacing any earlier rule of that name.
    pub fn register<S, P>(&mut self, name: S, parser: P) -> &mut Self
    where
        S: Into<String>,
        P: Into<Parser<V>>,
    {
        let name = name.into();
        self.stamp = next_stamp();
        if self.rules.insert(name.clone(), parser.into()).is_none() {
            self.order.push(name);
        }
        self
    }

    /// Returns a parser that runs the rule `name` when evaluated.
    pub fn reference<S: Into<String>>(&self, name: S) -> Parser<V> {
        Parser::reference(name)
    }

    /// Designates the parser a parse starts from.
    pub fn set_entry<P: Into<Parser<V>>>(&mut self, parser: P) -> &mut Self {
        self.entry = Some(parser.into());
        self
    }

    /// The entry parser: the one set explicitly, otherwise a reference to
    /// the first registered rule.
    pub fn entry(&self) -> Option<Parser<V>> {
        match &self.entry {
            Some(entry) => Some(entry.clone()),
            None => self.order.first().map(Parser::reference),
        }
    }

    /// Identifies the current set of rules. Changes on every `register`.
    pub(crate) fn stamp(&self) -> u64 {
        self.stamp
    }

    pub fn get(&self, name: &str) -> Option<&Parser<V>> {
        self.rules.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Rule names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Looks up a rule reached during a parse.
    ///
    /// # Panics
    ///
    /// Panics if `name` was never registered; a grammar that references a
    /// missing rule is a configuration error, not a parse failure.
    pub fn resolve(&self, name: &str) -> &Parser<V> {
        self.get(name)
            .unwrap_or_else(|| panic!("{}", GrammarError::UnregisteredRule { name: name.to_string() }))
    }

    /// Checks the grammar reachable from the entry: every reference is
    /// registered, no rule is left-recursive, and the alternatives of every
    /// choice start with distinct tokens.
    ///
    /// Parsing does not require this check. A grammar that fails it may
    /// still parse some inputs, but the engine cannot backtrack out of a
    /// wrong alternative.
    pub fn validate(&self) -> Result<(), GrammarError> {
        let entry = self.entry.as_ref();
        let first_rule = self.order.first();
        let mut validator = Validator {
            grammar: self,
            visited: HashSet::new(),
        };
        match (entry, first_rule) {
            (Some(entry), _) => validator.visit("the entry", entry),
            (None, Some(name)) => validator.visit_rule(name),
            (None, None) => Err(GrammarError::MissingEntry),
        }
    }
}

impl<V> Default for Grammar<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for Grammar<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for name in &self.order {
            map.entry(name, &self.rules[name]);
        }
        map.finish()
    }
}

struct Validator<'g, V> {
    grammar: &'g Grammar<V>,
    visited: HashSet<&'g str>,
}

impl<'g, V> Validator<'g, V> {
    fn visit_rule(&mut self, name: &'g str) -> Result<(), GrammarError> {
        if !self.visited.insert(name) {
            return Ok(());
        }
        // Also detects left recursion through this rule.
        FirstSets::new(self.grammar).of_rule(name)?;
        let parser = self
            .grammar
            .get(name)
            .ok_or_else(|| GrammarError::UnregisteredRule {
                name: name.to_string(),
            })?;
        self.visit(&format!("rule '{}'", name), parser)
    }

    fn visit(&mut self, context: &str, parser: &'g Parser<V>) -> Result<(), GrammarError> {
        match parser {
            Parser::Token(_) | Parser::Eof => Ok(()),
            Parser::Tuple(tuple) => tuple
                .items()
                .iter()
                .try_for_each(|(_, item)| self.visit(context, item)),
            Parser::Choice(choice) => {
                self.check_choice(context, choice.alternatives())?;
                choice
                    .alternatives()
                    .iter()
                    .try_for_each(|alternative| self.visit(context, alternative))
            }
            Parser::Repeat { sub, .. } | Parser::Embed(sub) => self.visit(context, sub),
            Parser::Expr(expr) => {
                for (token_type, handler) in expr.handlers() {
                    if let OperatorHandler::Embed(sub) = handler {
                        self.check_embed(context, token_type, sub)?;
                        self.visit(context, sub)?;
                    }
                }
                Ok(())
            }
            Parser::Ref(name) => self.visit_rule(name),
        }
    }

    // The key token is still unconsumed when the embedded parser starts.
    fn check_embed(
        &self,
        context: &str,
        token_type: &TokenType,
        sub: &'g Parser<V>,
    ) -> Result<(), GrammarError> {
        let first = FirstSets::new(self.grammar).of(sub)?;
        if first.contains(&Lookahead::Token(token_type.clone())) {
            Ok(())
        } else {
            Err(GrammarError::EmbedMismatch {
                rule: context.to_string(),
                token_type: token_type.to_string(),
            })
        }
    }

    fn check_choice(&self, context: &str, alternatives: &'g [Parser<V>]) -> Result<(), GrammarError> {
        let firsts = alternatives
            .iter()
            .map(|alternative| FirstSets::new(self.grammar).of(alternative))
            .collect::<Result<Vec<_>, _>>()?;

        if firsts.iter().filter(|first| first.nullable).count() > 1 {
            return Err(GrammarError::AmbiguousEmptyChoice {
                rule: context.to_string(),
            });
        }
        for (i, a) in firsts.iter().enumerate() {
            for (j, b) in firsts.iter().enumerate().skip(i + 1) {
                if let Some(lookahead) = a.overlap(b).first() {
                    return Err(GrammarError::AmbiguousChoice {
                        rule: context.to_string(),
                        first: i,
                        second: j,
                        lookahead: lookahead.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}
