use parser_example::lambda::{LambdaParser, Term};
use rstest::rstest;

#[test]
fn test_application_of_abstraction() {
    let parser = LambdaParser::new().unwrap();
    let term = parser.parse_term("(λx:Bool. x:Bool y:Bool)").unwrap();
    assert_eq!(
        term,
        Term::app(
            Term::lambda("x", "Bool", Term::var("x", "Bool")),
            Term::var("y", "Bool"),
        )
    );
}

#[rstest]
#[case("x:Bool", "x:Bool")]
#[case("x' : Nat", "x':Nat")]
#[case("\\f:Fun. (f:Fun a:Nat)", "λf:Fun. (f:Fun a:Nat)")]
#[case("\\lambda x:T. x:T", "λx:T. x:T")]
#[case("((a:T b:T) c:T)", "((a:T b:T) c:T)")]
fn test_display_round_trip(#[case] input: &str, #[case] expected: &str) {
    let parser = LambdaParser::new().unwrap();
    assert_eq!(parser.parse_term(input).unwrap().to_string(), expected);
}

#[test]
fn test_result_span_covers_input() {
    let parser = LambdaParser::new().unwrap();
    let result = parser.parse("  (a:T b:T)  ").unwrap();
    assert_eq!(result.span.start.offset, 0);
    assert_eq!(result.span.end.offset, 13);
}

#[test]
fn test_no_alternative_for_token() {
    let parser = LambdaParser::new().unwrap();
    let err = parser.parse_term(". x:T").unwrap_err();
    assert_eq!(err.message, "unexpected dot \".\" for any alternative");
}

#[test]
fn test_selected_alternative_failure_propagates() {
    let parser = LambdaParser::new().unwrap();
    let err = parser.parse_term("(a:T b:T").unwrap_err();
    assert_eq!(err.message, "expected rparen but found end of input");

    let err = parser.parse_term("x Bool").unwrap_err();
    assert_eq!(err.message, "expected column but found identifier \"Bool\"");
}

#[test]
fn test_grammar_is_valid() {
    let parser = LambdaParser::new().unwrap();
    assert_eq!(parser.grammar().validate(), Ok(()));
}
