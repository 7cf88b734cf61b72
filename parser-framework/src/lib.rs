pub mod combinators;
pub mod context;
pub mod error;
pub mod first_set;
pub mod grammar;
pub mod outcome;
pub mod parser;
pub mod pratt;

pub use combinators::{Choice, Mark, Parser, Tuple, XformFn};
pub use common_framework::{Position, Span};
pub use context::ParseContext;
pub use error::GrammarError;
pub use first_set::{FirstSet, Lookahead};
pub use grammar::Grammar;
pub use lexer_framework::{Rule, Token, TokenKind, TokenType, Tokenizer};
pub use outcome::{Content, ParseError, ParseOutcome, ParseResult};
pub use parser::LlParsing;
pub use pratt::{
    AtomFn, Associativity, ExprParser, InfixFn, OperatorHandler, PrefixFn, BASE_PRIORITY,
};
