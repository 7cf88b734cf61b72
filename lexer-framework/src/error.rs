use thiserror::Error;

/// Errors raised while configuring a tokenizer.
#[derive(Debug, Error)]
pub enum TokenizerError {
    #[error("invalid regular expression {pattern:?}: {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
