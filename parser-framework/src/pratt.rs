use crate::combinators::{unexpected, Parser};
use crate::context::ParseContext;
use crate::outcome::{ParseOutcome, ParseResult};
use common_framework::Span;
use lexer_framework::{Token, TokenKind, TokenType};
use log::trace;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

/// Minimum priority an expression starts from.
pub const BASE_PRIORITY: u32 = 0;

pub type AtomFn<V> = Arc<dyn Fn(Token) -> ParseOutcome<V> + Send + Sync>;
pub type PrefixFn<V> = Arc<dyn Fn(Token, ParseResult<V>) -> ParseOutcome<V> + Send + Sync>;
pub type InfixFn<V> =
    Arc<dyn Fn(ParseResult<V>, Token, ParseResult<V>) -> ParseOutcome<V> + Send + Sync>;

/// How operators of equal priority group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    /// `a - b - c` is `(a - b) - c`
    Left,
    /// `a ^ b ^ c` is `a ^ (b ^ c)`
    Right,
}

/// The role a token type plays in an expression.
///
/// Callbacks left unset fall back to building a generic tree: atoms yield
/// their token, prefix operators `[op, operand]` and infix operators
/// `[left, op, right]`.
pub enum OperatorHandler<V> {
    Atom {
        on_atom: Option<AtomFn<V>>,
    },
    Prefix {
        priority: u32,
        on_prefix: Option<PrefixFn<V>>,
    },
    Infix {
        priority: u32,
        associativity: Associativity,
        on_infix: Option<InfixFn<V>>,
    },
    /// Usable both as a prefix and as an infix operator.
    Mixfix {
        prefix_priority: u32,
        infix_priority: u32,
        associativity: Associativity,
        on_prefix: Option<PrefixFn<V>>,
        on_infix: Option<InfixFn<V>>,
    },
    Bracket {
        open: TokenType,
        close: TokenType,
    },
    /// An operand produced by an arbitrary parser.
    Embed(Parser<V>),
}

impl<V> OperatorHandler<V> {
    pub fn atom() -> Self {
        OperatorHandler::Atom { on_atom: None }
    }

    pub fn prefix(priority: u32) -> Self {
        OperatorHandler::Prefix {
            priority,
            on_prefix: None,
        }
    }

    pub fn infix(priority: u32, associativity: Associativity) -> Self {
        OperatorHandler::Infix {
            priority,
            associativity,
            on_infix: None,
        }
    }

    pub fn mixfix(prefix_priority: u32, infix_priority: u32, associativity: Associativity) -> Self {
        OperatorHandler::Mixfix {
            prefix_priority,
            infix_priority,
            associativity,
            on_prefix: None,
            on_infix: None,
        }
    }

    pub fn bracket<O: Into<TokenType>, C: Into<TokenType>>(open: O, close: C) -> Self {
        OperatorHandler::Bracket {
            open: open.into(),
            close: close.into(),
        }
    }

    pub fn embed<P: Into<Parser<V>>>(sub: P) -> Self {
        OperatorHandler::Embed(Parser::embed(sub))
    }

    /// Sets the atom action.
    ///
    /// # Panics
    ///
    /// Panics unless this is an atom handler.
    pub fn on_atom<F>(mut self, f: F) -> Self
    where
        F: Fn(Token) -> ParseOutcome<V> + Send + Sync + 'static,
    {
        match &mut self {
            OperatorHandler::Atom { on_atom } => *on_atom = Some(Arc::new(f)),
            other => panic!("on_atom installed on a {} handler", other.role_name()),
        }
        self
    }

    /// Sets the prefix action.
    ///
    /// # Panics
    ///
    /// Panics unless this is a prefix or mixfix handler.
    pub fn on_prefix<F>(mut self, f: F) -> Self
    where
        F: Fn(Token, ParseResult<V>) -> ParseOutcome<V> + Send + Sync + 'static,
    {
        match &mut self {
            OperatorHandler::Prefix { on_prefix, .. }
            | OperatorHandler::Mixfix { on_prefix, .. } => *on_prefix = Some(Arc::new(f)),
            other => panic!("on_prefix installed on a {} handler", other.role_name()),
        }
        self
    }

    /// Sets the infix action.
    ///
    /// # Panics
    ///
    /// Panics unless this is an infix or mixfix handler.
    pub fn on_infix<F>(mut self, f: F) -> Self
    where
        F: Fn(ParseResult<V>, Token, ParseResult<V>) -> ParseOutcome<V> + Send + Sync + 'static,
    {
        match &mut self {
            OperatorHandler::Infix { on_infix, .. } | OperatorHandler::Mixfix { on_infix, .. } => {
                *on_infix = Some(Arc::new(f))
            }
            other => panic!("on_infix installed on a {} handler", other.role_name()),
        }
        self
    }

    /// True if a token with this handler can begin an operand.
    pub fn starts_operand(&self) -> bool {
        !matches!(self, OperatorHandler::Infix { .. })
    }

    fn infix_role(&self) -> Option<(u32, Associativity, Option<&InfixFn<V>>)> {
        match self {
            OperatorHandler::Infix {
                priority,
                associativity,
                on_infix,
            } => Some((*priority, *associativity, on_infix.as_ref())),
            OperatorHandler::Mixfix {
                infix_priority,
                associativity,
                on_infix,
                ..
            } => Some((*infix_priority, *associativity, on_infix.as_ref())),
            _ => None,
        }
    }

    fn role_name(&self) -> &'static str {
        match self {
            OperatorHandler::Atom { .. } => "atom",
            OperatorHandler::Prefix { .. } => "prefix",
            OperatorHandler::Infix { .. } => "infix",
            OperatorHandler::Mixfix { .. } => "mixfix",
            OperatorHandler::Bracket { .. } => "bracket",
            OperatorHandler::Embed(_) => "embed",
        }
    }
}

/// A precedence-climbing expression parser.
///
/// Token types are mapped to [`OperatorHandler`]s. Higher priorities bind
/// tighter. Tokens of the configured skip types are stepped over before
/// every lookahead.
pub struct ExprParser<V> {
    handlers: HashMap<TokenType, OperatorHandler<V>>,
    skip: HashSet<TokenType>,
}

impl<V> ExprParser<V> {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            skip: HashSet::new(),
        }
    }

    /// Makes tokens of `token_type` transparent between expression tokens.
    pub fn skip_token<T: Into<TokenType>>(mut self, token_type: T) -> Self {
        self.skip.insert(token_type.into());
        self
    }

    /// Assigns a role to `token_type`, replacing any earlier one.
    ///
    /// # Panics
    ///
    /// Panics if `handler` is a bracket that does not open with
    /// `token_type`.
    pub fn register<T: Into<TokenType>>(mut self, token_type: T, handler: OperatorHandler<V>) -> Self {
        let key = token_type.into();
        if let OperatorHandler::Bracket { open, .. } = &handler {
            assert!(
                *open == key,
                "bracket opening with {} registered under {}",
                open,
                key
            );
        }
        self.handlers.insert(key, handler);
        self
    }

    /// Registers a bracket pair under its opening token type.
    pub fn register_bracket<O: Into<TokenType>, C: Into<TokenType>>(self, open: O, close: C) -> Self {
        let open = open.into();
        self.register(open.clone(), OperatorHandler::bracket(open, close))
    }

    /// Every registered token type with its handler.
    pub fn handlers(&self) -> impl Iterator<Item = (&TokenType, &OperatorHandler<V>)> {
        self.handlers.iter()
    }

    pub fn handler(&self, token_type: &str) -> Option<&OperatorHandler<V>> {
        self.handlers.get(token_type)
    }

    /// Token types an expression can begin with, skip types included.
    pub fn leading_types(&self) -> impl Iterator<Item = &TokenType> {
        self.handlers
            .iter()
            .filter(|(_, handler)| handler.starts_operand())
            .map(|(token_type, _)| token_type)
            .chain(self.skip.iter())
    }

    /// Parses a whole expression.
    pub fn parse(&self, ctx: &mut ParseContext<'_, V>) -> ParseOutcome<V> {
        self.parse_expr(ctx, BASE_PRIORITY)
    }

    /// Parses an expression whose infix operators all have priority at
    /// least `min_priority`.
    pub fn parse_expr(&self, ctx: &mut ParseContext<'_, V>, min_priority: u32) -> ParseOutcome<V> {
        self.parse_above(ctx, u64::from(min_priority))
    }

    // Widened so that a left-associative operator at `u32::MAX` still gets
    // a right-hand bound above its own priority.
    fn parse_above(&self, ctx: &mut ParseContext<'_, V>, min_priority: u64) -> ParseOutcome<V> {
        let token = self.skip_and_peek(ctx);
        let mut result = self.parse_operand(token, ctx)?;

        loop {
            let token = self.skip_and_peek(ctx);
            let Some((priority, associativity, on_infix)) =
                self.handler_for(&token).and_then(OperatorHandler::infix_role)
            else {
                break;
            };
            if u64::from(priority) < min_priority {
                break;
            }

            ctx.commit(&token);
            trace!("infix {} (priority {})", token.describe(), priority);
            let right_min = match associativity {
                Associativity::Left => u64::from(priority) + 1,
                Associativity::Right => u64::from(priority),
            };
            let right = self.parse_above(ctx, right_min)?;
            result = match on_infix {
                Some(f) => f(result, token, right)?,
                None => {
                    let span = Span::cover(result.span, right.span);
                    ParseResult::list(vec![result, ParseResult::token(token), right], span)
                }
            };
        }

        Ok(result)
    }

    fn parse_operand(&self, token: Token, ctx: &mut ParseContext<'_, V>) -> ParseOutcome<V> {
        match self.handler_for(&token) {
            Some(OperatorHandler::Atom { on_atom }) => {
                ctx.commit(&token);
                trace!("atom {}", token.describe());
                match on_atom {
                    Some(f) => f(token),
                    None => Ok(ParseResult::token(token)),
                }
            }
            Some(OperatorHandler::Bracket { close, .. }) => {
                ctx.commit(&token);
                let inner = self.parse_expr(ctx, BASE_PRIORITY)?;
                let closing = self.skip_and_peek(ctx);
                if !closing.is(close.as_str()) {
                    return Err(unexpected(
                        format_args!("{} to balance the bracket at {}", close, token.start()),
                        &closing,
                    ));
                }
                ctx.commit(&closing);
                Ok(inner.with_span(Span::cover(token.span, closing.span)))
            }
            Some(OperatorHandler::Prefix {
                priority,
                on_prefix,
            })
            | Some(OperatorHandler::Mixfix {
                prefix_priority: priority,
                on_prefix,
                ..
            }) => {
                ctx.commit(&token);
                trace!("prefix {} (priority {})", token.describe(), priority);
                let operand = self.parse_expr(ctx, *priority)?;
                match on_prefix {
                    Some(f) => f(token, operand),
                    None => {
                        let span = Span::cover(token.span, operand.span);
                        Ok(ParseResult::list(vec![ParseResult::token(token), operand], span))
                    }
                }
            }
            Some(OperatorHandler::Embed(parser)) => {
                trace!("embed at {}", token.describe());
                parser.parse(ctx)
            }
            Some(OperatorHandler::Infix { .. }) | None => Err(unexpected("an expression", &token)),
        }
    }

    fn handler_for(&self, token: &Token) -> Option<&OperatorHandler<V>> {
        match token.kind {
            TokenKind::Ordinary => self.handlers.get(token.token_type.as_str()),
            TokenKind::Error | TokenKind::Eof => None,
        }
    }

    fn skip_and_peek(&self, ctx: &mut ParseContext<'_, V>) -> Token {
        loop {
            let token = ctx.peek();
            if token.kind == TokenKind::Ordinary && self.skip.contains(token.token_type.as_str()) {
                ctx.commit(&token);
                continue;
            }
            return token;
        }
    }
}

impl<V> Default for ExprParser<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for OperatorHandler<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperatorHandler::Atom { .. } => f.write_str("Atom"),
            OperatorHandler::Prefix { priority, .. } => write!(f, "Prefix({})", priority),
            OperatorHandler::Infix {
                priority,
                associativity,
                ..
            } => write!(f, "Infix({}, {:?})", priority, associativity),
            OperatorHandler::Mixfix {
                prefix_priority,
                infix_priority,
                associativity,
                ..
            } => write!(
                f,
                "Mixfix({}, {}, {:?})",
                prefix_priority, infix_priority, associativity
            ),
            OperatorHandler::Bracket { open, close } => write!(f, "Bracket({}, {})", open, close),
            OperatorHandler::Embed(parser) => f.debug_tuple("Embed").field(parser).finish(),
        }
    }
}

impl<V> fmt::Debug for ExprParser<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut handlers: Vec<_> = self.handlers.iter().collect();
        handlers.sort_by(|a, b| a.0.cmp(b.0));
        let mut skip: Vec<_> = self.skip.iter().collect();
        skip.sort();
        f.debug_struct("ExprParser")
            .field("handlers", &handlers)
            .field("skip", &skip)
            .finish()
    }
}
