use crate::error::TokenizerError;
use regex::Regex;
use std::cmp::Reverse;
use std::collections::BTreeSet;

/// A matcher for one kind of lexeme.
///
/// Each rule is bound to a token type when it is registered with a
/// [`Tokenizer`](crate::Tokenizer). Matching is always anchored at the
/// cursor: a rule either recognises a non-empty prefix of the remaining
/// input or declines.
#[derive(Debug, Clone)]
pub enum Rule {
    /// A single fixed character.
    ExactChar(char),
    /// Any one character from the set.
    CharSet(BTreeSet<char>),
    /// Any one character in the inclusive interval.
    CharInterval(char, char),
    /// A fixed string.
    Literal(String),
    /// Any of the strings, longest first.
    LiteralSet(Vec<String>),
    /// A regular expression, optionally guarded by the set of characters a
    /// match can begin with.
    Regexp {
        regex: Regex,
        lookups: Option<BTreeSet<char>>,
    },
}

impl Rule {
    pub fn char(ch: char) -> Self {
        Rule::ExactChar(ch)
    }

    pub fn char_set<I: IntoIterator<Item = char>>(chars: I) -> Self {
        Rule::CharSet(chars.into_iter().collect())
    }

    pub fn interval(low: char, high: char) -> Self {
        Rule::CharInterval(low, high)
    }

    pub fn literal<S: Into<String>>(text: S) -> Self {
        Rule::Literal(text.into())
    }

    pub fn literal_set<I, S>(literals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut literals: Vec<String> = literals.into_iter().map(Into::into).collect();
        // Stable sort keeps registration order among literals of equal length.
        literals.sort_by_key(|lit| Reverse(lit.len()));
        Rule::LiteralSet(literals)
    }

    /// Compiles `pattern` into a rule anchored at the cursor.
    pub fn regex(pattern: &str) -> Result<Self, TokenizerError> {
        let regex = Regex::new(&format!("^(?:{})", pattern)).map_err(|source| {
            TokenizerError::InvalidRegex {
                pattern: pattern.to_string(),
                source,
            }
        })?;
        Ok(Rule::Regexp {
            regex,
            lookups: None,
        })
    }

    /// Restricts a regular-expression rule to inputs starting with one of
    /// `chars`. Other rule kinds are returned unchanged.
    pub fn with_lookups<I: IntoIterator<Item = char>>(self, chars: I) -> Self {
        match self {
            Rule::Regexp { regex, .. } => Rule::Regexp {
                regex,
                lookups: Some(chars.into_iter().collect()),
            },
            other => other,
        }
    }

    /// Quick check: returns whether this rule might match based on the first
    /// character.
    ///
    /// - `Some(true)`  - This rule might match
    /// - `Some(false)` - This rule definitely won't match
    /// - `None`        - Unknown, need to try full match
    #[inline]
    pub fn quick_check(&self, first_char: Option<char>) -> Option<bool> {
        let Some(ch) = first_char else {
            return Some(false);
        };
        match self {
            Rule::ExactChar(expected) => Some(ch == *expected),
            Rule::CharSet(set) => Some(set.contains(&ch)),
            Rule::CharInterval(low, high) => Some((*low..=*high).contains(&ch)),
            Rule::Literal(text) => Some(text.starts_with(ch)),
            Rule::LiteralSet(_) => None,
            Rule::Regexp { lookups, .. } => lookups.as_ref().map(|set| set.contains(&ch)),
        }
    }

    /// Attempts to match at the start of `input`, returning the matched length
    /// in bytes.
    pub fn try_match(&self, input: &str) -> Option<usize> {
        let first = input.chars().next()?;
        match self {
            Rule::ExactChar(_) | Rule::CharSet(_) | Rule::CharInterval(..) => self
                .quick_check(Some(first))
                .filter(|matched| *matched)
                .map(|_| first.len_utf8()),
            Rule::Literal(text) => literal_len(input, text),
            Rule::LiteralSet(literals) => literals.iter().find_map(|lit| literal_len(input, lit)),
            Rule::Regexp { regex, .. } => regex
                .find(input)
                .map(|m| m.end())
                .filter(|len| *len > 0),
        }
    }
}

fn literal_len(input: &str, literal: &str) -> Option<usize> {
    (!literal.is_empty() && input.starts_with(literal)).then_some(literal.len())
}
