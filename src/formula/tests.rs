//! End-to-end tests: formula text in, replacement text out.

use super::*;
use crate::error::ErrorKind;
use proptest::prelude::*;
use rstest::rstest;

fn eval_at(text: &str, x: f64, i: usize) -> String {
    Formula::parse(text)
        .unwrap_or_else(|err| panic!("{text:?} should parse: {err}"))
        .apply(x, i)
}

fn eval(text: &str) -> String {
    eval_at(text, 0.0, 0)
}

#[rstest]
#[case("3.5", "3.5")]
#[case("2+3*4", "14")]
#[case("(2+3)*4", "20")]
#[case("8-3-2", "3")]
#[case("2**10", "1024")]
#[case("2*3**2", "36")]
#[case("7%3", "1")]
#[case("0.5*4", "2")]
#[case("1.5e3", "1500")]
#[case("0x1F + 1", "32")]
#[case("0b101", "5")]
#[case("1/0", "Infinity")]
#[case("0/0", "NaN")]
#[case("0.1+0.2", "0.30000000000000004")]
#[case("~5", "-6")]
#[case("!0", "")]
#[case("!5", "")]
#[case("!x + 1", "")]
#[case("5&3", "1")]
#[case("5|3", "7")]
#[case("5^3", "6")]
#[case("0 || 7", "7")]
#[case("0 && 7", "0")]
#[case("2 && 7", "7")]
#[case("3 == 3", "1")]
#[case("3 <= 2", "0")]
#[case("3 >= 2", "1")]
#[case("0 ? zzz : 5", "5")]
#[case("1 ? 2 : zzz", "2")]
#[case("PI", "3.141592653589793")]
#[case("y", "")]
#[case("y + 1", "")]
fn test_evaluate_constant_formulas(#[case] text: &str, #[case] expected: &str) {
    assert_eq!(eval(text), expected, "formula {text:?}");
}

#[rstest]
#[case("pow(2, 3)", "8")]
#[case("pow(0/0, 0)", "1")]
#[case("sqrt(2)", "1.4142135623730951")]
#[case("round(2.5)", "3")]
#[case("round(0-2.5)", "-2")]
#[case("max(1, 5, 3)", "5")]
#[case("max()", "-Infinity")]
#[case("min()", "Infinity")]
#[case("hypot(3, 4)", "5")]
#[case("imul(3, 4)", "12")]
#[case("clz32(1)", "31")]
#[case("atan2(1, 1)", "0.7853981633974483")]
#[case("fround(5.5)", "5.5")]
#[case("sign(0-3)", "-1")]
#[case("abs(max(0-4, 0-9))", "4")]
fn test_evaluate_function_calls(#[case] text: &str, #[case] expected: &str) {
    assert_eq!(eval(text), expected, "formula {text:?}");
}

#[rstest]
#[case("[10,20,30][1]", "20")]
#[case("[10,20,30][5]", "")]
#[case("[10,20,30][0-1]", "")]
#[case("[10,20,30][0-0.5]", "10")]
#[case("[10,20,30][1.9]", "20")]
#[case("[[1,2],[3]][0][1]", "2")]
#[case("[1, 2]", "1,2")]
#[case("[1, [2, 3]]", "1,2,3")]
#[case("[]", "")]
#[case("[1, y, 3]", "1,,3")]
#[case("[1][0] + 1", "2")]
#[case("[1] + 1", "")]
#[case("5[0]", "")]
fn test_evaluate_arrays(#[case] text: &str, #[case] expected: &str) {
    assert_eq!(eval(text), expected, "formula {text:?}");
}

#[test]
fn test_selection_bindings() {
    assert_eq!(eval_at("x*2", 10.0, 0), "20");
    assert_eq!(eval_at("x + i", 10.0, 3), "13");
    assert_eq!(eval_at("[10,20,30][i]", 0.0, 2), "30");
    assert_eq!(eval_at("i % 2 ? x : 0 - x", 4.0, 1), "4");
    assert_eq!(eval_at("i % 2 ? x : 0 - x", 4.0, 2), "-4");
    assert_eq!(eval_at("x > 5 ? 1 : 0", 6.0, 0), "1");
}

#[test]
fn test_nan_condition_is_falsy() {
    assert_eq!(eval_at("x ? 1 : 0", f64::NAN, 0), "0");
}

#[test]
fn test_extra_bindings_shadow() {
    let formula = Formula::parse("x + y").unwrap();
    let bindings = Bindings::selection(1.0, 0).with("y", 4.0);
    assert_eq!(formula.evaluate(&bindings).as_number(), Some(5.0));

    let bindings = Bindings::selection(1.0, 0).with("x", 10.0).with("y", 0.0);
    assert_eq!(formula.evaluate(&bindings).render(), "10");
}

#[test]
fn test_evaluate_returns_lazy_array() {
    let formula = Formula::parse("[x, x * 2, y]").unwrap();
    let bindings = Bindings::selection(3.0, 0);
    let array = formula.evaluate(&bindings).as_array().unwrap();
    assert_eq!(array.len(), 3);
    assert_eq!(array.get(1).and_then(|v| v.as_number()), Some(6.0));
    assert!(array.get(2).unwrap().is_empty());
    assert!(array.get(3).is_none());
}

#[rstest]
#[case("(1+2", ErrorKind::UnbalancedParentheses, 0)]
#[case("1+2)", ErrorKind::UnbalancedParentheses, 3)]
#[case("  (1+2", ErrorKind::UnbalancedParentheses, 2)]
#[case("pow(2)", ErrorKind::WrongArgumentCount, 0)]
#[case("foo(1)", ErrorKind::UnknownFunction, 0)]
#[case("", ErrorKind::EmptyInput, 0)]
#[case("1 +", ErrorKind::EmptyInput, 3)]
#[case("x ? 1", ErrorKind::UnparsableToken, 0)]
#[case("1 + (x : 2)", ErrorKind::UnparsableToken, 5)]
fn test_parse_errors(#[case] text: &str, #[case] kind: ErrorKind, #[case] location: usize) {
    let err = Formula::parse(text).unwrap_err();
    assert_eq!((err.kind, err.location), (kind, location), "formula {text:?}");
    assert!(Formula::validate(text).is_err());
}

#[test]
fn test_error_keys() {
    let err = Formula::parse("(1+2").unwrap_err();
    assert_eq!(err.key(), "map.error.parentheses");
    assert_eq!(err.column(), 1);

    let err = Formula::parse("pow(2)").unwrap_err();
    assert_eq!(err.key(), "map.error.function.argument");
}

#[test]
fn test_error_location_counts_characters() {
    // U+3000 is three bytes of whitespace, U+00A0 two.
    let err = Formula::parse("\u{3000}1+").unwrap_err();
    assert_eq!((err.kind, err.location), (ErrorKind::EmptyInput, 3));

    let err = Formula::parse("\u{a0}\u{a0}(1").unwrap_err();
    assert_eq!((err.kind, err.location), (ErrorKind::UnbalancedParentheses, 2));
}

#[test]
fn test_validate_accepts_good_formulas() {
    assert!(Formula::validate("x * 2 + i").is_ok());
    assert!(Formula::validate("  max(x, 1)  ").is_ok());
}

#[test]
fn test_random_formulas() {
    let formula = Formula::parse("random()").unwrap();
    assert!(!formula.is_deterministic());
    for i in 0..32 {
        let value = formula.evaluate(&Bindings::selection(0.0, i)).as_number().unwrap();
        assert!((0.0..1.0).contains(&value));
    }

    let formula = Formula::parse("[1, floor(random() * 10)][1]").unwrap();
    assert!(!formula.is_deterministic());
    let value = formula.evaluate(&Bindings::selection(0.0, 0)).as_number().unwrap();
    assert!((0.0..10.0).contains(&value));
    assert_eq!(value, value.trunc());
}

#[test]
fn test_random_is_drawn_on_every_evaluation() {
    let formula = Formula::parse("random()").unwrap();
    let bindings = Bindings::selection(0.0, 0);
    let first = formula.evaluate(&bindings).as_number().unwrap();
    let varied = (0..32).any(|_| formula.evaluate(&bindings).as_number() != Some(first));
    assert!(varied, "32 evaluations of random() all gave {first}");
}

#[test]
fn test_array_elements_are_not_cached() {
    let formula = Formula::parse("[random()]").unwrap();
    let bindings = Bindings::selection(0.0, 0);
    let array = formula.evaluate(&bindings).as_array().unwrap();

    let first = array.at(0.0).as_number().unwrap();
    let varied_at = (0..32).any(|_| array.at(0.0).as_number() != Some(first));
    assert!(varied_at, "32 reads of element 0 all gave {first}");

    let first = array.get(0).and_then(|v| v.as_number()).unwrap();
    let varied_get = (0..32).any(|_| array.get(0).and_then(|v| v.as_number()) != Some(first));
    assert!(varied_get, "32 reads of element 0 all gave {first}");

    let first = formula.evaluate(&bindings).render();
    let varied_render = (0..32).any(|_| formula.evaluate(&bindings).render() != first);
    assert!(varied_render, "32 renders all gave {first}");
}

#[test]
fn test_deterministic_formula() {
    let formula = Formula::parse("x * 2 + i").unwrap();
    assert!(formula.is_deterministic());
    assert_eq!(formula.apply(1.5, 2), formula.apply(1.5, 2));
}

#[test]
fn test_from_str_and_display() {
    let formula: Formula = " x + 1 ".parse().unwrap();
    assert_eq!(formula.to_string(), " x + 1 ");
    assert_eq!(formula.source(), " x + 1 ");
    assert_eq!(formula.root().to_string(), "(x + 1)");
    assert!("x +".parse::<Formula>().is_err());
}

#[test]
fn test_coerce_number_feeds_x() {
    let formula = Formula::parse("x + 1").unwrap();
    assert_eq!(formula.apply(coerce_number(" 41 "), 0), "42");
    assert_eq!(formula.apply(coerce_number("abc"), 0), "NaN");
    assert_eq!(formula.apply(coerce_number(""), 0), "1");
}

proptest! {
    #[test]
    fn prop_deterministic_formulas_render_identically(
        text in "(x|i|[1-9][0-9]{0,2})([-+*/%](x|i|[1-9][0-9]{0,2})){0,4}",
        x in -1.0e6f64..1.0e6,
        i in 0usize..100,
    ) {
        let formula = Formula::parse(&text).unwrap();
        prop_assert!(formula.is_deterministic());
        prop_assert_eq!(formula.apply(x, i), formula.apply(x, i));
    }

    #[test]
    fn prop_error_location_within_input(text in "\\PC{0,24}") {
        if let Err(err) = Formula::parse(&text) {
            prop_assert!(err.location <= text.chars().count());
        }
    }
}
