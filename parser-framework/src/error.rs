use thiserror::Error;

/// Problems found when checking a grammar before use.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("grammar has no entry rule")]
    MissingEntry,

    #[error("rule '{name}' is referenced but never registered")]
    UnregisteredRule { name: String },

    #[error("rule '{name}' is left-recursive")]
    LeftRecursion { name: String },

    #[error("choice in {rule} has alternatives {first} and {second} both starting with {lookahead}")]
    AmbiguousChoice {
        rule: String,
        first: usize,
        second: usize,
        lookahead: String,
    },

    #[error("choice in {rule} has more than one empty alternative")]
    AmbiguousEmptyChoice { rule: String },

    #[error("embed in {rule} is registered under '{token_type}' but cannot start with it")]
    EmbedMismatch { rule: String, token_type: String },
}
