use lexer_framework::{Rule, Tokenizer};

#[test]
fn test_quick_check_char_rules() {
    assert_eq!(Rule::char('a').quick_check(Some('a')), Some(true));
    assert_eq!(Rule::char('a').quick_check(Some('b')), Some(false));
    assert_eq!(Rule::char_set(['x', 'y']).quick_check(Some('y')), Some(true));
    assert_eq!(Rule::interval('0', '9').quick_check(Some('x')), Some(false));
}

#[test]
fn test_quick_check_at_eof() {
    assert_eq!(Rule::char('a').quick_check(None), Some(false));
    assert_eq!(Rule::regex("a").unwrap().quick_check(None), Some(false));
}

#[test]
fn test_quick_check_literal() {
    assert_eq!(Rule::literal("new").quick_check(Some('n')), Some(true));
    assert_eq!(Rule::literal("new").quick_check(Some('e')), Some(false));
    assert_eq!(Rule::literal_set(["a", "b"]).quick_check(Some('a')), None);
}

#[test]
fn test_lookups_do_not_change_results() {
    let pattern = r"[1-9][0-9]*";
    let inputs = ["123", "x12", "0", "9 ", ""];
    for input in inputs {
        let plain = Tokenizer::new()
            .rule("number", Rule::regex(pattern).unwrap())
            .with_input(input);
        let guarded = Tokenizer::new()
            .rule(
                "number",
                Rule::regex(pattern).unwrap().with_lookups('0'..='9'),
            )
            .with_input(input);
        assert_eq!(plain.peek(), guarded.peek(), "input {:?}", input);
    }
}

#[test]
fn test_lookups_skip_rule() {
    // The lookup set is trusted: a rule is never tried outside it.
    let tokenizer = Tokenizer::new()
        .rule("word", Rule::regex("[a-z]+").unwrap().with_lookups(['x']))
        .with_input("abc");
    assert!(tokenizer.peek().is_error());
}
