use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use lexer_framework::{Rule, Tokenizer};

fn bench_rules() -> Tokenizer {
    Tokenizer::new()
        .rule("space", Rule::char_set([' ', '\t', '\n']))
        .rule("lparen", Rule::char('('))
        .rule("rparen", Rule::char(')'))
        .rule("op", Rule::char_set(['+', '-', '*', '/']))
        .rule(
            "number",
            Rule::regex("[0-9]+").unwrap().with_lookups('0'..='9'),
        )
        .rule("ident", Rule::regex("[a-zA-Z_][a-zA-Z0-9_]*").unwrap())
}

fn generate_input(size: usize) -> String {
    let mut input = String::with_capacity(size * 12);
    for i in 0..size {
        input.push_str(&format!("(x{} + {}) * ", i, i * 7));
    }
    input.push('1');
    input
}

fn tokenizer_benchmark(c: &mut Criterion) {
    let input = generate_input(1000);
    let rules = bench_rules();

    let mut group = c.benchmark_group("tokenizer");
    group.throughput(Throughput::Bytes(input.len() as u64));

    group.bench_function("peek_forward", |b| {
        b.iter(|| {
            let tokens = rules.clone().with_input(input.as_str());
            tokens.count()
        })
    });

    group.bench_function("no_lookups", |b| {
        let plain = Tokenizer::new()
            .rule("space", Rule::char_set([' ', '\t', '\n']))
            .rule("lparen", Rule::char('('))
            .rule("rparen", Rule::char(')'))
            .rule("op", Rule::char_set(['+', '-', '*', '/']))
            .rule("number", Rule::regex("[0-9]+").unwrap())
            .rule("ident", Rule::regex("[a-zA-Z_][a-zA-Z0-9_]*").unwrap());
        b.iter(|| plain.clone().with_input(input.as_str()).count())
    });

    group.finish();
}

criterion_group!(benches, tokenizer_benchmark);
criterion_main!(benches);
