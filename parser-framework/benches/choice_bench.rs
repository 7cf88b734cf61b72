use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use parser_framework::{Grammar, LlParsing, Parser, Rule, Tokenizer, Tuple};

fn bench_tokenizer() -> Tokenizer {
    Tokenizer::new()
        .rule("lparen", Rule::char('('))
        .rule("rparen", Rule::char(')'))
        .rule("comma", Rule::char(','))
        .rule("number", Rule::regex("[0-9]+").unwrap().with_lookups('0'..='9'))
        .rule("name", Rule::regex("[a-z]+").unwrap().with_lookups('a'..='z'))
}

/// item := number | name | '(' item (',' item)* ')'
fn bench_grammar() -> Grammar<usize> {
    let mut grammar = Grammar::new();
    let item = grammar.reference("item");
    let list = Tuple::new()
        .skip(Parser::token("lparen"))
        .element(item.clone())
        .element(Parser::repeat(
            Tuple::new().skip(Parser::token("comma")).element(item),
            0,
        ))
        .skip(Parser::token("rparen"))
        .xform_content(|elements, _| {
            let mut elements = elements.into_iter();
            let mut count = match elements.next() {
                Some(head) => head.into_value()?,
                None => 0,
            };
            if let Some(rest) = elements.next() {
                for tail in rest.into_list()? {
                    let mut tail = tail.into_list()?;
                    count += tail.remove(0).into_value()?;
                }
            }
            Ok(count)
        });
    let leaf = |token_type: &str| -> Tuple<usize> {
        Tuple::new()
            .element(Parser::token(token_type))
            .xform_content(|_, _| Ok(1))
    };

    grammar.register(
        "item",
        Parser::choice([
            Parser::from(leaf("number")),
            Parser::from(leaf("name")),
            Parser::from(list),
        ]),
    );
    grammar
}

fn generate_input(size: usize) -> String {
    let mut input = String::from("(");
    for i in 0..size {
        if i > 0 {
            input.push(',');
        }
        input.push_str(&format!("({},x,(y,{}))", i, i % 7));
    }
    input.push(')');
    input
}

fn bench_choice(c: &mut Criterion) {
    let grammar = bench_grammar();
    let tokenizer = bench_tokenizer();
    let size = 1000;
    let input = generate_input(size);

    let mut group = c.benchmark_group("choice");
    group.throughput(Throughput::Elements(size as u64));
    group.bench_function("nested_lists", |b| {
        b.iter(|| {
            let mut driver = LlParsing::new(&grammar, tokenizer.clone());
            let result = driver.parse_input(black_box(input.as_str())).unwrap();
            black_box(result.into_value().unwrap())
        })
    });
    group.finish();
}

criterion_group!(benches, bench_choice);
criterion_main!(benches);
