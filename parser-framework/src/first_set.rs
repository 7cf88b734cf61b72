use crate::combinators::Parser;
use crate::error::GrammarError;
use crate::grammar::Grammar;
use crate::pratt::OperatorHandler;
use lexer_framework::{Token, TokenKind, TokenType};
use std::collections::BTreeSet;
use std::fmt;

/// A token a parser can begin with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Lookahead {
    Token(TokenType),
    Eof,
}

impl Lookahead {
    /// The lookahead a peeked token represents. Error tokens start nothing.
    pub fn of(token: &Token) -> Option<Self> {
        match token.kind {
            TokenKind::Ordinary => Some(Lookahead::Token(token.token_type.clone())),
            TokenKind::Eof => Some(Lookahead::Eof),
            TokenKind::Error => None,
        }
    }
}

impl fmt::Display for Lookahead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookahead::Token(token_type) => write!(f, "'{}'", token_type),
            Lookahead::Eof => f.write_str("end of input"),
        }
    }
}

/// The FIRST set of a parser, plus whether it can succeed without
/// consuming anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FirstSet {
    pub tokens: BTreeSet<Lookahead>,
    pub nullable: bool,
}

impl FirstSet {
    fn single(lookahead: Lookahead) -> Self {
        Self {
            tokens: BTreeSet::from([lookahead]),
            nullable: false,
        }
    }

    pub fn contains(&self, lookahead: &Lookahead) -> bool {
        self.tokens.contains(lookahead)
    }

    /// Returns true if a parser with this FIRST set can start on `token`.
    pub fn accepts(&self, token: &Token) -> bool {
        Lookahead::of(token).is_some_and(|lookahead| self.contains(&lookahead))
    }

    /// Lookaheads shared by both sets.
    pub fn overlap(&self, other: &FirstSet) -> Vec<Lookahead> {
        self.tokens.intersection(&other.tokens).cloned().collect()
    }
}

/// Walks a parser tree collecting FIRST sets, resolving references against
/// a grammar. A reference met again while its own FIRST set is being
/// computed means the rule is left-recursive.
pub(crate) struct FirstSets<'g, V> {
    grammar: &'g Grammar<V>,
    in_progress: Vec<&'g str>,
}

impl<'g, V> FirstSets<'g, V> {
    pub(crate) fn new(grammar: &'g Grammar<V>) -> Self {
        Self {
            grammar,
            in_progress: Vec::new(),
        }
    }

    pub(crate) fn of(&mut self, parser: &'g Parser<V>) -> Result<FirstSet, GrammarError> {
        match parser {
            Parser::Token(token_type) => Ok(FirstSet::single(Lookahead::Token(token_type.clone()))),
            Parser::Eof => Ok(FirstSet::single(Lookahead::Eof)),
            Parser::Tuple(tuple) => {
                let mut first = FirstSet {
                    tokens: BTreeSet::new(),
                    nullable: true,
                };
                for (_, item) in tuple.items() {
                    let item_first = self.of(item)?;
                    first.tokens.extend(item_first.tokens);
                    if !item_first.nullable {
                        first.nullable = false;
                        break;
                    }
                }
                Ok(first)
            }
            Parser::Choice(choice) => {
                let mut first = FirstSet::default();
                for alternative in choice.alternatives() {
                    let alt_first = self.of(alternative)?;
                    first.tokens.extend(alt_first.tokens);
                    first.nullable |= alt_first.nullable;
                }
                Ok(first)
            }
            Parser::Repeat { sub, minimum } => {
                let mut first = self.of(sub)?;
                first.nullable |= *minimum == 0;
                Ok(first)
            }
            Parser::Embed(sub) => self.of(sub),
            Parser::Expr(expr) => {
                // An embed starts at its key token, so its own start counts
                // toward left recursion.
                for (_, handler) in expr.handlers() {
                    if let OperatorHandler::Embed(sub) = handler {
                        self.of(sub)?;
                    }
                }
                Ok(FirstSet {
                    tokens: expr
                        .leading_types()
                        .map(|token_type| Lookahead::Token(token_type.clone()))
                        .collect(),
                    nullable: false,
                })
            }
            Parser::Ref(name) => self.of_rule(name),
        }
    }

    pub(crate) fn of_rule(&mut self, name: &'g str) -> Result<FirstSet, GrammarError> {
        if self.in_progress.contains(&name) {
            return Err(GrammarError::LeftRecursion {
                name: name.to_string(),
            });
        }
        let parser = self
            .grammar
            .get(name)
            .ok_or_else(|| GrammarError::UnregisteredRule {
                name: name.to_string(),
            })?;
        self.in_progress.push(name);
        let first = self.of(parser);
        self.in_progress.pop();
        first
    }
}
