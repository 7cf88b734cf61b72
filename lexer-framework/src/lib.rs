pub mod cursor;
pub mod error;
pub mod rules;
pub mod token;
pub mod tokenizer;

pub use common_framework::{Position, Span, TextSlice};
pub use cursor::Cursor;
pub use error::TokenizerError;
pub use rules::Rule;
pub use token::{Token, TokenKind, TokenType};
pub use tokenizer::Tokenizer;
