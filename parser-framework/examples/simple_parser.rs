//! Minimal parser example.
//!
//! Demonstrates the parser-framework workflow:
//! 1. Register tokenizer rules.
//! 2. Register grammar rules.
//! 3. Run the driver over an input.
//!
//! The grammar accepts `hello world` followed by a parenthesised list of
//! integers summed by an expression parser.

use parser_framework::{
    Associativity, ExprParser, Grammar, LlParsing, OperatorHandler, ParseError, ParseResult,
    Parser, Rule, Span, Tokenizer, Tuple,
};

fn tokenizer() -> Tokenizer {
    Tokenizer::new()
        .rule("hello", Rule::literal("hello"))
        .rule("world", Rule::literal("world"))
        .rule("space", Rule::char_set([' ', '\t']))
        .rule("plus", Rule::char('+'))
        .rule("lparen", Rule::char('('))
        .rule("rparen", Rule::char(')'))
        .rule("int", Rule::regex("[0-9]+").expect("valid pattern"))
}

fn grammar() -> Grammar<i64> {
    let mut grammar = Grammar::new();

    let sum = ExprParser::new()
        .skip_token("space")
        .register(
            "int",
            OperatorHandler::atom().on_atom(|token| {
                let value = token
                    .text()
                    .parse::<i64>()
                    .map_err(|_| ParseError::at_token("integer out of range", &token))?;
                Ok(ParseResult::value(value, token.span))
            }),
        )
        .register(
            "plus",
            OperatorHandler::infix(10, Associativity::Left).on_infix(|left, _, right| {
                let span = Span::cover(left.span, right.span);
                Ok(ParseResult::value(left.into_value()? + right.into_value()?, span))
            }),
        )
        .register("lparen", OperatorHandler::bracket("lparen", "rparen"));
    grammar.register("sum", sum);

    grammar.register(
        "greeting",
        Tuple::new()
            .skip(Parser::token("hello"))
            .skip(Parser::token("space"))
            .skip(Parser::token("world"))
            .element(Parser::reference("sum"))
            .skip(Parser::eof())
            .xform_content(|mut elements, _| elements.remove(0).into_value()),
    );
    grammar.set_entry(Parser::reference("greeting"));

    grammar
}

fn main() {
    let grammar = grammar();
    if let Err(err) = grammar.validate() {
        eprintln!("invalid grammar: {}", err);
        return;
    }

    for input in ["hello world (1 + 2) + 39", "hello world 1 +", "hello there"] {
        let mut driver = LlParsing::new(&grammar, tokenizer());
        match driver.parse_input(input) {
            Ok(result) => println!("{:>28} => {:?}", input, result.content),
            Err(err) => println!("{}", err.report(input)),
        }
    }
}
