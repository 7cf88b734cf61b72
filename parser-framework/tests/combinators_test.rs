use parser_framework::{
    Content, Grammar, LlParsing, ParseError, ParseResult, Parser, Position, Rule, Span, Tokenizer,
    Tuple,
};

fn hello_tokenizer() -> Tokenizer {
    Tokenizer::new()
        .rule("hello", Rule::literal("hello"))
        .rule("space", Rule::char_set([' ', '\t', '\r']))
        .rule("world", Rule::literal("world"))
}

fn parse<V>(grammar: &Grammar<V>, tokenizer: Tokenizer, input: &str) -> Result<ParseResult<V>, ParseError> {
    LlParsing::new(grammar, tokenizer).parse_input(input)
}

#[test]
fn test_token_parser_sequence() {
    let mut grammar: Grammar<()> = Grammar::new();
    grammar.register(
        "init",
        Tuple::new()
            .element(Parser::token("hello"))
            .element(Parser::token("space"))
            .element(Parser::token("world"))
            .element(Parser::eof()),
    );

    let result = parse(&grammar, hello_tokenizer(), "hello world").unwrap();
    let items = result.as_list().unwrap();
    assert_eq!(items.len(), 4);
    assert_eq!(items[0].as_token().unwrap().text(), "hello");
    assert_eq!(items[1].as_token().unwrap().text(), " ");
    assert_eq!(items[2].as_token().unwrap().text(), "world");
    assert!(items[3].as_token().unwrap().is_eof());
}

#[test]
fn test_token_mismatch_does_not_consume() {
    let mut grammar: Grammar<()> = Grammar::new();
    grammar.register("world", Parser::token("world"));

    let mut driver = LlParsing::new(&grammar, hello_tokenizer());
    let err = driver.parse_input("hello").unwrap_err();
    assert_eq!(err.message, "expected world but found hello \"hello\"");
    assert_eq!(err.span.start, Position::new());
    assert_eq!(driver.tokenizer().position().offset, 0);
}

#[test]
fn test_token_on_error_token() {
    let mut grammar: Grammar<()> = Grammar::new();
    grammar.register("hello", Parser::token("hello"));
    let err = parse(&grammar, hello_tokenizer(), "#hello").unwrap_err();
    assert_eq!(err.message, "expected hello but found unrecognized input \"#\"");
    assert_eq!(err.span.len(), 1);
}

#[test]
fn test_eof_does_not_consume() {
    let mut grammar: Grammar<()> = Grammar::new();
    grammar.register("end", Tuple::new().element(Parser::eof()).element(Parser::eof()));
    let result = parse(&grammar, hello_tokenizer(), "").unwrap();
    assert_eq!(result.as_list().unwrap().len(), 2);
    assert!(result.span.is_empty());
}

#[test]
fn test_eof_is_explicit() {
    let mut grammar: Grammar<()> = Grammar::new();
    grammar.register("hello", Parser::token("hello"));
    let mut driver = LlParsing::new(&grammar, hello_tokenizer());
    let result = driver.parse_input("hello world").unwrap();
    assert_eq!(result.as_token().unwrap().text(), "hello");
    assert_eq!(driver.tokenizer().position().offset, 5);

    grammar.set_entry(
        Tuple::new()
            .element(Parser::token("hello"))
            .skip(Parser::eof()),
    );
    let err = parse(&grammar, hello_tokenizer(), "hello world").unwrap_err();
    assert_eq!(err.message, "expected end of input but found space \" \"");
}

#[test]
fn test_tuple_span_covers_skipped_members() {
    let mut grammar: Grammar<()> = Grammar::new();
    grammar.register(
        "greeting",
        Tuple::new()
            .skip(Parser::token("hello"))
            .skip(Parser::token("space"))
            .element(Parser::token("world"))
            .skip(Parser::repeat(Parser::token("space"), 0)),
    );

    let result = parse(&grammar, hello_tokenizer(), "hello world  ").unwrap();
    assert_eq!(result.span.start.offset, 0);
    assert_eq!(result.span.end.offset, 13);
    assert_eq!(result.as_list().unwrap().len(), 1);
}

#[test]
fn test_empty_tuple_span_at_cursor() {
    let mut grammar: Grammar<()> = Grammar::new();
    grammar.set_entry(
        Tuple::new()
            .skip(Parser::token("hello"))
            .element(Tuple::new()),
    );
    let result = parse(&grammar, hello_tokenizer(), "hello").unwrap();
    let inner = &result.as_list().unwrap()[0];
    assert_eq!(inner.span, Span::empty(Position::at(1, 6, 5)));
}

#[test]
fn test_tuple_short_circuits() {
    let mut grammar: Grammar<()> = Grammar::new();
    grammar.register(
        "greeting",
        Tuple::new()
            .element(Parser::token("hello"))
            .element(Parser::token("world")),
    );
    let mut driver = LlParsing::new(&grammar, hello_tokenizer());
    let err = driver.parse_input("hello hello").unwrap_err();
    assert_eq!(err.span.start.offset, 5);
    // The committed "hello" stays committed.
    assert_eq!(driver.tokenizer().position().offset, 5);
}

#[test]
fn test_xform_content() {
    let mut grammar: Grammar<String> = Grammar::new();
    grammar.register(
        "greeting",
        Tuple::new()
            .element(Parser::token("hello"))
            .skip(Parser::token("space"))
            .element(Parser::token("world"))
            .xform_content(|elements, _| {
                let words: Result<Vec<_>, _> = elements
                    .into_iter()
                    .map(|e| e.into_token().map(|t| t.text().to_uppercase()))
                    .collect();
                Ok(words?.join("-"))
            }),
    );
    let result = parse(&grammar, hello_tokenizer(), "hello world").unwrap();
    assert_eq!(result.content, Content::Value("HELLO-WORLD".to_string()));
}

#[test]
fn test_xform_error_is_parse_error() {
    let mut grammar: Grammar<u8> = Grammar::new();
    grammar.register(
        "greeting",
        Tuple::new()
            .element(Parser::token("hello"))
            .xform_content(|_, span| Err(ParseError::new("greetings are forbidden", span))),
    );
    let err = parse(&grammar, hello_tokenizer(), "hello").unwrap_err();
    assert_eq!(err.message, "greetings are forbidden");
    assert_eq!(err.span.len(), 5);
}

#[test]
fn test_repeat_collects_items() {
    let mut grammar: Grammar<()> = Grammar::new();
    grammar.register("spaces", Parser::repeat(Parser::token("space"), 0));
    let result = parse(&grammar, hello_tokenizer(), " \t hello").unwrap();
    assert_eq!(result.as_list().unwrap().len(), 3);
    assert_eq!(result.span.len(), 3);
}

#[test]
fn test_repeat_zero_items_is_empty_at_cursor() {
    let mut grammar: Grammar<()> = Grammar::new();
    grammar.register("spaces", Parser::repeat(Parser::token("space"), 0));
    let result = parse(&grammar, hello_tokenizer(), "hello").unwrap();
    assert!(result.as_list().unwrap().is_empty());
    assert_eq!(result.span, Span::empty(Position::new()));
}

#[test]
fn test_repeat_minimum() {
    let mut grammar: Grammar<()> = Grammar::new();
    grammar.set_entry(
        Tuple::new()
            .element(Parser::repeat(Parser::token("space"), 3))
            .element(Parser::token("hello")),
    );

    let err = parse(&grammar, hello_tokenizer(), "  hello").unwrap_err();
    assert!(err
        .message
        .starts_with("expected at least 3 repetition(s) but found 2"));
    assert_eq!(err.span.start.offset, 2);

    let result = parse(&grammar, hello_tokenizer(), "   hello").unwrap();
    let items = result.as_list().unwrap();
    assert_eq!(items[0].as_list().unwrap().len(), 3);
    assert_eq!(items[1].as_token().unwrap().text(), "hello");
}

#[test]
fn test_repeat_started_then_failed_propagates() {
    let mut grammar: Grammar<()> = Grammar::new();
    grammar.register(
        "pairs",
        Parser::repeat(
            Tuple::new()
                .element(Parser::token("hello"))
                .element(Parser::token("space")),
            0,
        ),
    );
    let err = parse(&grammar, hello_tokenizer(), "hello helloworld").unwrap_err();
    assert_eq!(err.message, "expected space but found world \"world\"");
}

#[test]
fn test_repeat_zero_width_sub_terminates() {
    let mut grammar: Grammar<()> = Grammar::new();
    grammar.register("empty", Parser::repeat(Tuple::new(), 0));
    let result = parse(&grammar, hello_tokenizer(), "hello").unwrap();
    assert_eq!(result.as_list().unwrap().len(), 1);
}

#[test]
fn test_choice_selects_by_leading_token() {
    let mut grammar: Grammar<()> = Grammar::new();
    grammar.register(
        "either",
        Parser::choice([
            Parser::token("hello"),
            Parser::token("world"),
        ]),
    );
    let result = parse(&grammar, hello_tokenizer(), "world").unwrap();
    assert_eq!(result.as_token().unwrap().text(), "world");

    let err = parse(&grammar, hello_tokenizer(), " ").unwrap_err();
    assert_eq!(err.message, "unexpected space \" \" for any alternative");
}

#[test]
fn test_choice_does_not_backtrack() {
    let mut grammar: Grammar<()> = Grammar::new();
    grammar.register(
        "either",
        Parser::choice([
            Parser::from(
                Tuple::new()
                    .element(Parser::token("hello"))
                    .element(Parser::token("world")),
            ),
            Parser::from(
                Tuple::new()
                    .element(Parser::token("hello"))
                    .element(Parser::token("space")),
            ),
        ]),
    );
    let err = parse(&grammar, hello_tokenizer(), "hello ").unwrap_err();
    assert_eq!(err.message, "expected world but found space \" \"");
}

#[test]
fn test_choice_falls_back_to_empty_alternative() {
    let mut grammar: Grammar<()> = Grammar::new();
    grammar.register(
        "maybe_hello",
        Parser::choice([
            Parser::token("hello"),
            Parser::repeat(Parser::token("space"), 0),
        ]),
    );
    let result = parse(&grammar, hello_tokenizer(), "world").unwrap();
    assert_eq!(result.as_list().unwrap().len(), 0);
}

#[test]
fn test_choice_follows_rule_replaced_after_parse() {
    let mut grammar: Grammar<()> = Grammar::new();
    grammar.register(
        "either",
        Parser::choice([Parser::reference("greeting"), Parser::token("space")]),
    );
    grammar.register("greeting", Parser::token("hello"));
    assert!(parse(&grammar, hello_tokenizer(), "hello").is_ok());
    assert!(parse(&grammar, hello_tokenizer(), "hello").is_ok());

    grammar.register("greeting", Parser::token("world"));
    let result = parse(&grammar, hello_tokenizer(), "world").unwrap();
    assert_eq!(result.as_token().unwrap().text(), "world");
    let err = parse(&grammar, hello_tokenizer(), "hello").unwrap_err();
    assert_eq!(err.message, "unexpected hello \"hello\" for any alternative");
}

#[test]
fn test_embed_is_transparent() {
    let mut grammar: Grammar<()> = Grammar::new();
    grammar.register("embedded", Parser::embed(Parser::token("hello")));
    let result = parse(&grammar, hello_tokenizer(), "hello").unwrap();
    assert_eq!(result.as_token().unwrap().text(), "hello");
    assert_eq!(result.span.len(), 5);
}
