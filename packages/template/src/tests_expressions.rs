//! Comprehensive tests for embedded expression evaluation
use crate::substitute::render;
use sitewright_model::{ParamValue, ParameterMap};

fn params(entries: &[(&str, ParamValue)]) -> ParameterMap {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

#[test]
fn test_ternary_true_branch() {
    let p = params(&[("a", ParamValue::from(1.0))]);
    assert_eq!(render("{{a === 1 ? 'yes' : 'no'}}", &p), "yes");
}

#[test]
fn test_ternary_false_branch() {
    let p = params(&[("a", ParamValue::from(2.0))]);
    assert_eq!(render("{{a === 1 ? 'yes' : 'no'}}", &p), "no");
}

#[test]
fn test_logical_or_fallback_on_missing_key() {
    let p = ParameterMap::new();
    assert_eq!(render("{{missing || 'fallback'}}", &p), "fallback");
}

#[test]
fn test_logical_or_prefers_non_empty_value() {
    let p = params(&[("name", ParamValue::from("Ada"))]);
    assert_eq!(render("{{name || 'anonymous'}}", &p), "Ada");
}

#[test]
fn test_logical_or_skips_empty_string() {
    let p = params(&[("name", ParamValue::from(""))]);
    assert_eq!(render("{{name || 'anonymous'}}", &p), "anonymous");
}

#[test]
fn test_arithmetic_addition() {
    let p = ParameterMap::new();
    assert_eq!(render("{{2 + 3}}", &p), "5");
}

#[test]
fn test_arithmetic_with_parameter() {
    let p = params(&[("count", ParamValue::from(4.0))]);
    assert_eq!(render("{{count * 2}}", &p), "8");
}

#[test]
fn test_division_by_zero_is_ieee() {
    let p = ParameterMap::new();
    assert_eq!(render("{{1 / 0}}", &p), "inf");
}

#[test]
fn test_string_concatenation_with_plus() {
    let p = params(&[
        ("first", ParamValue::from("Ada")),
        ("last", ParamValue::from("Lovelace")),
    ]);
    assert_eq!(render("{{first + ' ' + last}}", &p), "Ada Lovelace");
}

#[test]
fn test_loose_equality_coerces_numbers() {
    let p = params(&[("n", ParamValue::from("5"))]);
    assert_eq!(render("{{n == 5 ? 'eq' : 'ne'}}", &p), "eq");
}

#[test]
fn test_strict_equality_does_not_coerce() {
    let p = params(&[("n", ParamValue::from("5"))]);
    assert_eq!(render("{{n === 5 ? 'eq' : 'ne'}}", &p), "ne");
}

#[test]
fn test_relational_condition() {
    let p = params(&[("count", ParamValue::from(12.0))]);
    assert_eq!(
        render("{{count > 10 ? 'many' : 'few'}}", &p),
        "many"
    );
}

#[test]
fn test_logical_and_in_condition() {
    let p = params(&[
        ("a", ParamValue::Bool(true)),
        ("b", ParamValue::Bool(false)),
    ]);
    assert_eq!(render("{{a && b ? 'both' : 'not'}}", &p), "not");
}

#[test]
fn test_negation_in_condition() {
    let p = params(&[("hidden", ParamValue::Bool(false))]);
    assert_eq!(
        render("{{!hidden ? 'shown' : 'hidden'}}", &p),
        "shown"
    );
}

#[test]
fn test_dotted_property_access() {
    let json = r#"{"user": {"address": {"city": "Lisbon"}}}"#;
    let p: ParameterMap = serde_json::from_str(json).unwrap();
    assert_eq!(render("{{user.address.city}}", &p), "Lisbon");
}

#[test]
fn test_nested_ternary() {
    let p = params(&[("n", ParamValue::from(0.0))]);
    assert_eq!(
        render("{{n > 0 ? 'pos' : n < 0 ? 'neg' : 'zero'}}", &p),
        "zero"
    );
}

#[test]
fn test_boolean_literal() {
    let p = ParameterMap::new();
    assert_eq!(render("{{true ? 'on' : 'off'}}", &p), "on");
}

#[test]
fn test_quoted_string_literal() {
    let p = ParameterMap::new();
    assert_eq!(render("{{'verbatim'}}", &p), "verbatim");
}

#[test]
fn test_substitution_total_on_mixed_template() {
    // A template mixing resolvable and unresolvable tokens still renders,
    // with only the broken expression left as literal text.
    let p = params(&[("title", ParamValue::from("Hi"))]);
    let out = render("<h1>{{title}}</h1><p>{{broken ..}}</p>", &p);
    assert_eq!(out, "<h1>Hi</h1><p>{{broken ..}}</p>");
}

#[test]
fn test_no_raw_tokens_remain_for_present_keys() {
    let p = params(&[
        ("a", ParamValue::from("x")),
        ("b", ParamValue::from(2.0)),
        ("c", ParamValue::Bool(true)),
    ]);
    let out = render("{{a}}-{{b}}-{{c}}-{{a}}", &p);
    assert!(!out.contains("{{"));
    assert_eq!(out, "x-2-true-x");
}
