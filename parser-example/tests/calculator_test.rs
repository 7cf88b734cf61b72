use parser_example::calculator::Calculator;
use rstest::{fixture, rstest};

#[fixture]
fn calculator() -> Calculator {
    Calculator::new().unwrap()
}

#[rstest]
#[case("3×6", 18.0)]
#[case("3 * 6", 18.0)]
#[case("3 × 6/2 × 3", 27.0)]
#[case("(3 × 6) / (2 × 3)", 3.0)]
#[case("3 + 4 × 6", 27.0)]
#[case("3 + 4 × -6", -21.0)]
#[case("3 + + 4", 7.0)]
#[case("10 - 2 - 3", 5.0)]
#[case("7 ÷ 2", 3.5)]
#[case("  1.25 + 0  ", 1.25)]
fn test_evaluates(calculator: Calculator, #[case] input: &str, #[case] expected: f64) {
    assert_eq!(calculator.evaluate(input).unwrap(), expected);
}

#[rstest]
fn test_division_by_zero(calculator: Calculator) {
    let err = calculator.evaluate("2 / 0").unwrap_err();
    assert_eq!(err.message, "Division by zero");
    assert_eq!(err.span.start.offset, 2);
    assert_eq!(err.span.end.offset, 5);
}

#[rstest]
#[case("3 +", "expected an expression but found end of input")]
#[case("(3 + 4", "expected rparen to balance the bracket at 1:1 but found end of input")]
#[case("3 4", "expected end of input but found number \"4\"")]
#[case("3 % 4", "expected end of input but found unrecognized input \"%\"")]
fn test_reports_errors(calculator: Calculator, #[case] input: &str, #[case] message: &str) {
    assert_eq!(calculator.evaluate(input).unwrap_err().message, message);
}

#[rstest]
fn test_error_report_points_at_input(calculator: Calculator) {
    let input = "1 +\n2 $ 3";
    let err = calculator.evaluate(input).unwrap_err();
    let report = err.report(input);
    assert!(report.starts_with("error: expected end of input"));
    assert!(report.contains("2 $ 3"));
    assert!(report.contains("--> 2:3"));
}

#[rstest]
fn test_calculator_reusable(calculator: Calculator) {
    assert_eq!(calculator.evaluate("1 + 1").unwrap(), 2.0);
    assert!(calculator.evaluate("1 +").is_err());
    assert_eq!(calculator.evaluate("2 × 2").unwrap(), 4.0);
}
