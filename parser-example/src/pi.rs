//! Pi-calculus processes: termination, name restriction and parallel
//! composition.
//!
//! ```text
//! process := '0' | 'nil' | 'end'
//!          | ('new' | 'res') '(' name ')' process
//!          | process '||' process
//!          | '(' process ')'
//! ```
//!
//! A restriction scopes over the whole process that follows it, so
//! `new(a) P || Q` reads as `new(a) (P || Q)`.

use common_framework::Span;
use lexer_framework::{Rule, Token, Tokenizer, TokenizerError};
use parser_framework::{
    Associativity, ExprParser, Grammar, LlParsing, OperatorHandler, ParseError, ParseOutcome,
    ParseResult, Parser, Tuple,
};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Process {
    Term,
    Restriction { name: String, body: Box<Process> },
    Parallel(Box<Process>, Box<Process>),
}

impl Process {
    pub fn restriction<N: Into<String>>(name: N, body: Process) -> Self {
        Process::Restriction {
            name: name.into(),
            body: Box::new(body),
        }
    }

    pub fn parallel(left: Process, right: Process) -> Self {
        Process::Parallel(Box::new(left), Box::new(right))
    }

    pub fn is_term(&self) -> bool {
        matches!(self, Process::Term)
    }
}

impl fmt::Display for Process {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Process::Term => f.write_str("0"),
            Process::Restriction { name, body } => write!(f, "new({}){{{}}}", name, body),
            Process::Parallel(left, right) if matches!(**left, Process::Parallel(..)) => {
                write!(f, "({}) || {}", left, right)
            }
            Process::Parallel(left, right) => write!(f, "{} || {}", left, right),
        }
    }
}

pub fn pi_tokenizer() -> Result<Tokenizer, TokenizerError> {
    let tokenizer = Tokenizer::new()
        // punctuation
        .rule("space", Rule::char_set([' ', '\t', '\r', '\n']))
        .rule("lparen", Rule::char('('))
        .rule("rparen", Rule::char(')'))
        .rule("parallel", Rule::literal("||"))
        // process elements, ahead of names so keywords are not read as names
        .rule("term", Rule::regex(r"0|(?:nil|end)\b")?)
        .rule("new", Rule::regex(r"(?:new|res)\b")?)
        // identifiers
        .rule("name", Rule::regex("[a-zA-Z_][a-zA-Z0-9_]*")?);
    Ok(tokenizer)
}

fn term_atom(token: Token) -> ParseOutcome<Process> {
    Ok(ParseResult::value(Process::Term, token.span))
}

fn parallel(
    left: ParseResult<Process>,
    _: Token,
    right: ParseResult<Process>,
) -> ParseOutcome<Process> {
    let span = Span::cover(left.span, right.span);
    Ok(ParseResult::value(
        Process::parallel(left.into_value()?, right.into_value()?),
        span,
    ))
}

fn restrict_xform(elements: Vec<ParseResult<Process>>, _: Span) -> Result<Process, ParseError> {
    let mut elements = elements.into_iter();
    match (elements.next(), elements.next()) {
        (Some(name), Some(body)) => Ok(Process::restriction(
            name.into_token()?.text(),
            body.into_value()?,
        )),
        _ => unreachable!("restriction keeps a name and a body"),
    }
}

pub fn pi_grammar() -> Grammar<Process> {
    let mut grammar = Grammar::new();
    let spaces = grammar.reference("spaces");
    let expr = grammar.reference("expr");

    grammar.register("spaces", Parser::repeat(Parser::token("space"), 0));
    grammar.register("term", Parser::token("term"));

    let restrict = Tuple::new()
        .skip(Parser::token("new"))
        .skip(spaces.clone())
        .skip(Parser::token("lparen"))
        .skip(spaces.clone())
        .element(Parser::token("name"))
        .skip(spaces.clone())
        .skip(Parser::token("rparen"))
        .skip(spaces.clone())
        .element(expr.clone())
        .xform_content(restrict_xform);

    let process = ExprParser::new()
        .skip_token("space")
        .register("term", OperatorHandler::atom().on_atom(term_atom))
        .register("new", OperatorHandler::embed(restrict))
        .register(
            "parallel",
            OperatorHandler::infix(10, Associativity::Right).on_infix(parallel),
        )
        .register_bracket("lparen", "rparen");
    grammar.register("expr", process);

    grammar.set_entry(
        Tuple::new()
            .element(expr)
            .skip(spaces)
            .skip(Parser::eof())
            .xform_content(|elements, _| match elements.into_iter().next() {
                Some(process) => process.into_value(),
                None => unreachable!("entry keeps one process"),
            }),
    );
    grammar
}

pub struct PiParser {
    grammar: Grammar<Process>,
    tokenizer: Tokenizer,
}

impl PiParser {
    pub fn new() -> Result<Self, TokenizerError> {
        Ok(Self {
            grammar: pi_grammar(),
            tokenizer: pi_tokenizer()?,
        })
    }

    pub fn grammar(&self) -> &Grammar<Process> {
        &self.grammar
    }

    pub fn parse(&self, input: &str) -> Result<ParseResult<Process>, ParseError> {
        LlParsing::new(&self.grammar, self.tokenizer.clone()).parse_input(input)
    }

    pub fn parse_process(&self, input: &str) -> Result<Process, ParseError> {
        self.parse(input)?.into_value()
    }
}
