//! An LL(1) parser for simply-typed lambda terms.
//!
//! ```text
//! expr := ref | app | lam
//! ref  := identifier ':' identifier
//! app  := '(' expr expr ')'
//! lam  := 'λ' ref '.' expr
//! ```

use lexer_framework::{Rule, Tokenizer, TokenizerError};
use parser_framework::{Grammar, LlParsing, ParseError, ParseResult, Parser, Span, Tuple};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    Var {
        name: String,
        ty: String,
    },
    App {
        rator: Box<Term>,
        rand: Box<Term>,
    },
    Lambda {
        name: String,
        ty: String,
        body: Box<Term>,
    },
}

impl Term {
    pub fn var<N: Into<String>, T: Into<String>>(name: N, ty: T) -> Self {
        Term::Var {
            name: name.into(),
            ty: ty.into(),
        }
    }

    pub fn app(rator: Term, rand: Term) -> Self {
        Term::App {
            rator: Box::new(rator),
            rand: Box::new(rand),
        }
    }

    pub fn lambda<N: Into<String>, T: Into<String>>(name: N, ty: T, body: Term) -> Self {
        Term::Lambda {
            name: name.into(),
            ty: ty.into(),
            body: Box::new(body),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Var { name, ty } => write!(f, "{}:{}", name, ty),
            Term::App { rator, rand } => write!(f, "({} {})", rator, rand),
            Term::Lambda { name, ty, body } => write!(f, "λ{}:{}. {}", name, ty, body),
        }
    }
}

pub fn lambda_tokenizer() -> Result<Tokenizer, TokenizerError> {
    let tokenizer = Tokenizer::new()
        // reserved symbols
        .rule("dot", Rule::char('.'))
        .rule("column", Rule::char(':'))
        .rule("lparen", Rule::char('('))
        .rule("rparen", Rule::char(')'))
        .rule("space", Rule::char_set([' ', '\t', '\r', '\n']))
        // lambdas
        .rule("lambda", Rule::literal("\\lambda "))
        .rule("lambda", Rule::char_set(['λ', '\\']))
        // identifiers
        .rule("identifier", Rule::regex("[a-zA-Z_][a-zA-Z_0-9]*'*")?);
    Ok(tokenizer)
}

fn take_term(result: ParseResult<Term>) -> Result<Term, ParseError> {
    result.into_value()
}

fn ref_xform(elements: Vec<ParseResult<Term>>, _: Span) -> Result<Term, ParseError> {
    let mut elements = elements.into_iter();
    match (elements.next(), elements.next()) {
        (Some(name), Some(ty)) => Ok(Term::var(name.into_token()?.text(), ty.into_token()?.text())),
        _ => unreachable!("ref keeps two identifiers"),
    }
}

fn app_xform(elements: Vec<ParseResult<Term>>, _: Span) -> Result<Term, ParseError> {
    let mut elements = elements.into_iter().map(take_term);
    match (elements.next(), elements.next()) {
        (Some(rator), Some(rand)) => Ok(Term::app(rator?, rand?)),
        _ => unreachable!("app keeps two terms"),
    }
}

fn lam_xform(elements: Vec<ParseResult<Term>>, span: Span) -> Result<Term, ParseError> {
    let mut elements = elements.into_iter().map(take_term);
    match (elements.next(), elements.next()) {
        (Some(binder), Some(body)) => match binder? {
            Term::Var { name, ty } => Ok(Term::lambda(name, ty, body?)),
            other => Err(ParseError::new(
                format!("expected a typed variable but found {}", other),
                span,
            )),
        },
        _ => unreachable!("lam keeps a binder and a body"),
    }
}

pub fn lambda_grammar() -> Grammar<Term> {
    let mut grammar = Grammar::new();

    // punctuation
    grammar.register("column", Parser::token("column"));
    grammar.register("dot", Parser::token("dot"));
    grammar.register("lparen", Parser::token("lparen"));
    grammar.register("rparen", Parser::token("rparen"));
    grammar.register("spaces", Parser::repeat(Parser::token("space"), 0));

    // constructions
    grammar.register("lambda", Parser::token("lambda"));
    grammar.register("identifier", Parser::token("identifier"));

    let r = |name: &str| -> Parser<Term> { Parser::reference(name) };

    grammar.register(
        "ref",
        Tuple::new()
            .element(r("identifier"))
            .skip(r("spaces"))
            .skip(r("column"))
            .skip(r("spaces"))
            .element(r("identifier"))
            .xform_content(ref_xform),
    );
    grammar.register(
        "app",
        Tuple::new()
            .skip(r("lparen"))
            .skip(r("spaces"))
            .element(r("expr"))
            .skip(r("spaces"))
            .element(r("expr"))
            .skip(r("spaces"))
            .skip(r("rparen"))
            .xform_content(app_xform),
    );
    grammar.register(
        "lam",
        Tuple::new()
            .skip(r("lambda"))
            .skip(r("spaces"))
            .element(r("ref"))
            .skip(r("spaces"))
            .skip(r("dot"))
            .skip(r("spaces"))
            .element(r("expr"))
            .xform_content(lam_xform),
    );
    grammar.register("expr", Parser::choice([r("ref"), r("app"), r("lam")]));

    grammar.set_entry(
        Tuple::new()
            .skip(r("spaces"))
            .element(r("expr"))
            .skip(r("spaces"))
            .skip(Parser::eof())
            .xform_content(|elements, _| match elements.into_iter().next() {
                Some(term) => term.into_value(),
                None => unreachable!("entry keeps one term"),
            }),
    );
    grammar
}

pub struct LambdaParser {
    grammar: Grammar<Term>,
    tokenizer: Tokenizer,
}

impl LambdaParser {
    pub fn new() -> Result<Self, TokenizerError> {
        Ok(Self {
            grammar: lambda_grammar(),
            tokenizer: lambda_tokenizer()?,
        })
    }

    pub fn grammar(&self) -> &Grammar<Term> {
        &self.grammar
    }

    /// Parses `input` into a term, keeping the span it covers.
    pub fn parse(&self, input: &str) -> Result<ParseResult<Term>, ParseError> {
        LlParsing::new(&self.grammar, self.tokenizer.clone()).parse_input(input)
    }

    pub fn parse_term(&self, input: &str) -> Result<Term, ParseError> {
        self.parse(input)?.into_value()
    }
}
