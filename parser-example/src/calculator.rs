//! A four-function calculator that evaluates while it parses.

use common_framework::Span;
use lexer_framework::{Rule, Token, Tokenizer, TokenizerError};
use log::debug;
use parser_framework::{
    Associativity, ExprParser, Grammar, LlParsing, OperatorHandler, ParseError, ParseOutcome,
    ParseResult, Parser, Tuple,
};

pub fn calculator_tokenizer() -> Result<Tokenizer, TokenizerError> {
    let tokenizer = Tokenizer::new()
        // punctuation
        .rule("lparen", Rule::char('('))
        .rule("rparen", Rule::char(')'))
        // operators
        .rule("add", Rule::char('+'))
        .rule("sub", Rule::char('-'))
        .rule("mult", Rule::char_set(['*', '×']))
        .rule("div", Rule::char_set(['/', '÷']))
        // spaces
        .rule("space", Rule::char_set([' ', '\t', '\r']))
        .rule("newline", Rule::char('\n'))
        // numbers
        .rule("number", Rule::char('0'))
        .rule(
            "number",
            Rule::regex(r"[1-9][0-9]*(\.[0-9]*[1-9]+)?")?.with_lookups('0'..='9'),
        );
    Ok(tokenizer)
}

fn number(token: Token) -> ParseOutcome<f64> {
    let value = token
        .text()
        .parse::<f64>()
        .map_err(|err| ParseError::at_token(format!("invalid number: {}", err), &token))?;
    Ok(ParseResult::value(value, token.span))
}

fn signed(
    negate: bool,
) -> impl Fn(Token, ParseResult<f64>) -> ParseOutcome<f64> + Send + Sync + 'static {
    move |token, argument| {
        let span = Span::cover(token.span, argument.span);
        let value = argument.into_value()?;
        Ok(ParseResult::value(if negate { -value } else { value }, span))
    }
}

fn arithmetic(
    op: fn(f64, f64) -> f64,
) -> impl Fn(ParseResult<f64>, Token, ParseResult<f64>) -> ParseOutcome<f64> + Send + Sync + 'static
{
    move |left, _, right| {
        let span = Span::cover(left.span, right.span);
        Ok(ParseResult::value(op(left.into_value()?, right.into_value()?), span))
    }
}

fn divide(left: ParseResult<f64>, token: Token, right: ParseResult<f64>) -> ParseOutcome<f64> {
    let span = Span::cover(left.span, right.span);
    let divisor = right.into_value()?;
    if divisor == 0.0 {
        return Err(ParseError::new("Division by zero", Span::cover(token.span, span)));
    }
    Ok(ParseResult::value(left.into_value()? / divisor, span))
}

pub fn calculator_grammar() -> Grammar<f64> {
    let mut grammar = Grammar::new();
    let expr_ref = grammar.reference("expr");
    let spaces_ref = grammar.reference("spaces");

    grammar.set_entry(
        Tuple::new()
            .element(expr_ref)
            .skip(spaces_ref)
            .skip(Parser::eof())
            .xform_content(|mut elements, _| elements.remove(0).into_value()),
    );

    grammar.register(
        "spaces",
        Parser::repeat(
            Parser::choice([Parser::token("space"), Parser::token("newline")]),
            0,
        ),
    );

    let expr = ExprParser::new()
        .skip_token("space")
        .skip_token("newline")
        .register(
            "add",
            OperatorHandler::mixfix(100, 40, Associativity::Left)
                .on_prefix(signed(false))
                .on_infix(arithmetic(|a, b| a + b)),
        )
        .register(
            "sub",
            OperatorHandler::mixfix(100, 40, Associativity::Left)
                .on_prefix(signed(true))
                .on_infix(arithmetic(|a, b| a - b)),
        )
        .register(
            "mult",
            OperatorHandler::infix(80, Associativity::Left).on_infix(arithmetic(|a, b| a * b)),
        )
        .register(
            "div",
            OperatorHandler::infix(80, Associativity::Left).on_infix(divide),
        )
        .register("lparen", OperatorHandler::bracket("lparen", "rparen"))
        .register("number", OperatorHandler::atom().on_atom(number));
    grammar.register("expr", expr);

    grammar
}

/// Evaluates arithmetic expressions such as `3 + 4 × -6`.
pub struct Calculator {
    grammar: Grammar<f64>,
    tokenizer: Tokenizer,
}

impl Calculator {
    pub fn new() -> Result<Self, TokenizerError> {
        Ok(Self {
            grammar: calculator_grammar(),
            tokenizer: calculator_tokenizer()?,
        })
    }

    pub fn grammar(&self) -> &Grammar<f64> {
        &self.grammar
    }

    pub fn evaluate(&self, input: &str) -> Result<f64, ParseError> {
        let mut parser = LlParsing::new(&self.grammar, self.tokenizer.clone());
        let value = parser.parse_input(input)?.into_value()?;
        debug!("calculator: {:?} = {}", input, value);
        Ok(value)
    }
}
