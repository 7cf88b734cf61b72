use crate::context::ParseContext;
use crate::first_set::{FirstSet, FirstSets};
use crate::error::GrammarError;
use crate::grammar::Grammar;
use crate::outcome::{Content, ParseError, ParseOutcome, ParseResult};
use crate::pratt::ExprParser;
use common_framework::Span;
use lexer_framework::{Token, TokenType};
use log::debug;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// Semantic action turning the kept elements of a [`Tuple`] into a value.
pub type XformFn<V> =
    Arc<dyn Fn(Vec<ParseResult<V>>, Span) -> Result<V, ParseError> + Send + Sync>;

/// Whether a tuple member contributes to the tuple's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Element,
    Skip,
}

/// The parsing combinators.
///
/// A grammar is a tree of these, with [`Parser::Ref`] nodes standing in for
/// named rules so that rules can refer to themselves and to each other.
pub enum Parser<V> {
    /// One token of the given type.
    Token(TokenType),
    /// End of input. Never consumes.
    Eof,
    Tuple(Tuple<V>),
    Choice(Choice<V>),
    Repeat {
        sub: Box<Parser<V>>,
        minimum: usize,
    },
    /// Runs the wrapped parser and returns its outcome unchanged.
    Embed(Box<Parser<V>>),
    Expr(Arc<ExprParser<V>>),
    /// A named rule, looked up in the grammar when it runs.
    Ref(String),
}

impl<V> Parser<V> {
    pub fn token<T: Into<TokenType>>(token_type: T) -> Self {
        Parser::Token(token_type.into())
    }

    pub fn eof() -> Self {
        Parser::Eof
    }

    pub fn choice<I>(alternatives: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Parser<V>>,
    {
        Parser::Choice(Choice::new(alternatives.into_iter().map(Into::into).collect()))
    }

    pub fn repeat<P: Into<Parser<V>>>(sub: P, minimum: usize) -> Self {
        Parser::Repeat {
            sub: Box::new(sub.into()),
            minimum,
        }
    }

    pub fn embed<P: Into<Parser<V>>>(sub: P) -> Self {
        Parser::Embed(Box::new(sub.into()))
    }

    pub fn reference<S: Into<String>>(name: S) -> Self {
        Parser::Ref(name.into())
    }

    /// Runs this parser at the context's cursor.
    pub fn parse(&self, ctx: &mut ParseContext<'_, V>) -> ParseOutcome<V> {
        match self {
            Parser::Token(token_type) => parse_token(token_type, ctx),
            Parser::Eof => parse_eof(ctx),
            Parser::Tuple(tuple) => tuple.parse(ctx),
            Parser::Choice(choice) => choice.parse(ctx),
            Parser::Repeat { sub, minimum } => parse_repeat(sub, *minimum, ctx),
            Parser::Embed(sub) => sub.parse(ctx),
            Parser::Expr(expr) => expr.parse(ctx),
            Parser::Ref(name) => {
                let grammar = ctx.grammar();
                grammar.resolve(name).parse(ctx)
            }
        }
    }

    /// Computes the tokens this parser can start with.
    ///
    /// References are resolved in `grammar`; an unregistered or
    /// left-recursive reference is reported as an error.
    pub fn first_set(&self, grammar: &Grammar<V>) -> Result<FirstSet, GrammarError> {
        FirstSets::new(grammar).of(self)
    }

    fn runtime_first_set(&self, grammar: &Grammar<V>) -> FirstSet {
        self.first_set(grammar)
            .unwrap_or_else(|err| panic!("invalid grammar: {}", err))
    }
}

fn parse_token<V>(expected: &TokenType, ctx: &mut ParseContext<'_, V>) -> ParseOutcome<V> {
    let token = ctx.peek();
    if token.is(expected.as_str()) {
        ctx.commit(&token);
        Ok(ParseResult::token(token))
    } else {
        Err(unexpected(expected, &token))
    }
}

fn parse_eof<V>(ctx: &mut ParseContext<'_, V>) -> ParseOutcome<V> {
    let token = ctx.peek();
    if token.is_eof() {
        Ok(ParseResult::token(token))
    } else {
        Err(unexpected("end of input", &token))
    }
}

type CachedFirsts = Option<(u64, Arc<[FirstSet]>)>;

/// Ordered alternatives, selected by the next token.
///
/// The alternatives' FIRST sets are computed on first use and kept until the
/// grammar they were computed against is changed.
pub struct Choice<V> {
    alternatives: Vec<Parser<V>>,
    firsts: RwLock<CachedFirsts>,
}

impl<V> Choice<V> {
    pub fn new(alternatives: Vec<Parser<V>>) -> Self {
        Self {
            alternatives,
            firsts: RwLock::new(None),
        }
    }

    pub fn alternatives(&self) -> &[Parser<V>] {
        &self.alternatives
    }

    fn first_sets(&self, grammar: &Grammar<V>) -> Arc<[FirstSet]> {
        let stamp = grammar.stamp();
        if let Some((cached, firsts)) = &*self.firsts.read().unwrap_or_else(PoisonError::into_inner) {
            if *cached == stamp {
                return Arc::clone(firsts);
            }
        }

        let firsts: Arc<[FirstSet]> = self
            .alternatives
            .iter()
            .map(|alternative| alternative.runtime_first_set(grammar))
            .collect();
        debug!("choice: FIRST sets computed for {} alternative(s)", firsts.len());
        *self.firsts.write().unwrap_or_else(PoisonError::into_inner) =
            Some((stamp, Arc::clone(&firsts)));
        firsts
    }

    pub fn parse(&self, ctx: &mut ParseContext<'_, V>) -> ParseOutcome<V> {
        let token = ctx.peek();
        let firsts = self.first_sets(ctx.grammar());

        let mut fallback = None;
        for (index, (alternative, first)) in self.alternatives.iter().zip(firsts.iter()).enumerate() {
            if first.accepts(&token) {
                debug!("choice: alternative {} selected by {}", index, token.describe());
                return alternative.parse(ctx);
            }
            if first.nullable && fallback.is_none() {
                fallback = Some(index);
            }
        }

        if let Some(index) = fallback {
            debug!("choice: empty alternative {} selected", index);
            return self.alternatives[index].parse(ctx);
        }

        Err(ParseError::at_token(
            format!("unexpected {} for any alternative", token.describe()),
            &token,
        ))
    }
}

impl<V> Clone for Choice<V> {
    fn clone(&self) -> Self {
        let firsts = self.firsts.read().unwrap_or_else(PoisonError::into_inner).clone();
        Self {
            alternatives: self.alternatives.clone(),
            firsts: RwLock::new(firsts),
        }
    }
}

fn parse_repeat<V>(
    sub: &Parser<V>,
    minimum: usize,
    ctx: &mut ParseContext<'_, V>,
) -> ParseOutcome<V> {
    let start = ctx.position();
    let mut items: Vec<ParseResult<V>> = Vec::new();
    let mut stop_reason = None;

    loop {
        let before = ctx.offset();
        match sub.parse(ctx) {
            Ok(result) => {
                items.push(result);
                // A zero-width repetition would match forever.
                if ctx.offset() == before {
                    break;
                }
            }
            Err(err) if ctx.offset() == before => {
                stop_reason = Some(err);
                break;
            }
            Err(err) => return Err(err),
        }
    }

    debug!("repeat: {} item(s), minimum {}", items.len(), minimum);
    if items.len() < minimum {
        let (detail, span) = match stop_reason {
            Some(err) => (format!(": {}", err.message), err.span),
            None => (String::new(), ctx.empty_span()),
        };
        return Err(ParseError::new(
            format!(
                "expected at least {} repetition(s) but found {}{}",
                minimum,
                items.len(),
                detail
            ),
            span,
        ));
    }

    let span = match (items.first(), items.last()) {
        (Some(first), Some(last)) => Span::cover(first.span, last.span),
        _ => Span::empty(start),
    };
    Ok(ParseResult::list(items, span))
}

/// An ordered sequence of parsers.
///
/// Members marked [`Mark::Element`] are kept in the content; members marked
/// [`Mark::Skip`] must still succeed and still count towards the span.
pub struct Tuple<V> {
    items: Vec<(Mark, Parser<V>)>,
    xform: Option<XformFn<V>>,
}

impl<V> Tuple<V> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            xform: None,
        }
    }

    /// Appends a member whose result is kept.
    pub fn element<P: Into<Parser<V>>>(mut self, parser: P) -> Self {
        self.items.push((Mark::Element, parser.into()));
        self
    }

    /// Appends a member whose result is discarded.
    pub fn skip<P: Into<Parser<V>>>(mut self, parser: P) -> Self {
        self.items.push((Mark::Skip, parser.into()));
        self
    }

    /// Installs the semantic action applied to the kept elements.
    pub fn xform_content<F>(mut self, xform: F) -> Self
    where
        F: Fn(Vec<ParseResult<V>>, Span) -> Result<V, ParseError> + Send + Sync + 'static,
    {
        self.xform = Some(Arc::new(xform));
        self
    }

    pub fn items(&self) -> &[(Mark, Parser<V>)] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn parse(&self, ctx: &mut ParseContext<'_, V>) -> ParseOutcome<V> {
        let start = ctx.position();
        let mut elements = Vec::new();
        let mut covered: Option<Span> = None;

        for (mark, parser) in &self.items {
            let result = parser.parse(ctx)?;
            covered = Some(match covered {
                Some(span) => Span::cover(span, result.span),
                None => result.span,
            });
            if *mark == Mark::Element {
                elements.push(result);
            }
        }

        let span = covered.unwrap_or_else(|| Span::empty(start));
        let content = match &self.xform {
            Some(xform) => Content::Value(xform(elements, span)?),
            None => Content::List(elements),
        };
        Ok(ParseResult::new(content, span))
    }
}

impl<V> Default for Tuple<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Clone for Tuple<V> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            xform: self.xform.clone(),
        }
    }
}

impl<V> Clone for Parser<V> {
    fn clone(&self) -> Self {
        match self {
            Parser::Token(token_type) => Parser::Token(token_type.clone()),
            Parser::Eof => Parser::Eof,
            Parser::Tuple(tuple) => Parser::Tuple(tuple.clone()),
            Parser::Choice(choice) => Parser::Choice(choice.clone()),
            Parser::Repeat { sub, minimum } => Parser::Repeat {
                sub: sub.clone(),
                minimum: *minimum,
            },
            Parser::Embed(sub) => Parser::Embed(sub.clone()),
            Parser::Expr(expr) => Parser::Expr(Arc::clone(expr)),
            Parser::Ref(name) => Parser::Ref(name.clone()),
        }
    }
}

impl<V> From<Tuple<V>> for Parser<V> {
    fn from(tuple: Tuple<V>) -> Self {
        Parser::Tuple(tuple)
    }
}

impl<V> From<ExprParser<V>> for Parser<V> {
    fn from(expr: ExprParser<V>) -> Self {
        Parser::Expr(Arc::new(expr))
    }
}

impl<V> fmt::Debug for Tuple<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for (mark, parser) in &self.items {
            list.entry(&(mark, parser));
        }
        list.finish()?;
        if self.xform.is_some() {
            f.write_str(" => xform")?;
        }
        Ok(())
    }
}

impl<V> fmt::Debug for Parser<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parser::Token(token_type) => write!(f, "Token({})", token_type),
            Parser::Eof => f.write_str("EOF"),
            Parser::Tuple(tuple) => f.debug_tuple("Tuple").field(tuple).finish(),
            Parser::Choice(choice) => f.debug_tuple("Choice").field(&choice.alternatives).finish(),
            Parser::Repeat { sub, minimum } => f
                .debug_struct("Repeat")
                .field("sub", sub)
                .field("minimum", minimum)
                .finish(),
            Parser::Embed(sub) => f.debug_tuple("Embed").field(sub).finish(),
            Parser::Expr(expr) => fmt::Debug::fmt(expr, f),
            Parser::Ref(name) => write!(f, "Ref({})", name),
        }
    }
}

/// Builds the error for a token that cannot be used where it was found.
pub(crate) fn unexpected<S: fmt::Display>(expected: S, token: &Token) -> ParseError {
    ParseError::at_token(
        format!("expected {} but found {}", expected, token.describe()),
        token,
    )
}
