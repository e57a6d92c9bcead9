//! Tests for the postfix formula evaluator.

use crate::rpn::{evaluate, evaluate_or, try_evaluate, FormulaError, Variables};

fn vars(pairs: &[(&str, i32)]) -> Variables {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

// ---- Arithmetic ----

#[test]
fn test_binary_operators() {
    let none = Variables::new();
    assert_eq!(evaluate("5 3 +", &none), 8);
    assert_eq!(evaluate("10 5 -", &none), 5);
    assert_eq!(evaluate("4 3 *", &none), 12);
    assert_eq!(evaluate("20 4 /", &none), 5);
    assert_eq!(evaluate("10 3 %", &none), 1);
}

#[test]
fn test_operand_order() {
    // First pop is the right operand: "2 10 -" is 2 - 10.
    let none = Variables::new();
    assert_eq!(evaluate("2 10 -", &none), -8);
    assert_eq!(evaluate("3 12 /", &none), 0);
}

#[test]
fn test_variables_substituted() {
    let v = vars(&[("base", 20), ("wave", 3)]);
    assert_eq!(evaluate("base 5 wave * +", &v), 35);
    assert_eq!(evaluate("wave 2 *", &v), 6);
}

#[test]
fn test_truncating_division() {
    let none = Variables::new();
    assert_eq!(evaluate("7 2 /", &none), 3);
    assert_eq!(evaluate("-7 2 /", &none), -3);
}

// ---- Fast path ----

#[test]
fn test_integer_literal_fast_path() {
    assert_eq!(evaluate("42", &Variables::new()), 42);
    assert_eq!(evaluate("42", &vars(&[("42", 7)])), 42);
    assert_eq!(evaluate("  -6  ", &Variables::new()), -6);
}

#[test]
fn test_empty_expression_is_zero() {
    assert_eq!(evaluate("", &Variables::new()), 0);
    assert_eq!(evaluate("   ", &Variables::new()), 0);
}

// ---- Degraded results ----

#[test]
fn test_division_by_zero_falls_back() {
    assert_eq!(evaluate("20 0 /", &Variables::new()), 0);
    assert_eq!(evaluate("20 0 %", &Variables::new()), 0);
    assert!(matches!(
        try_evaluate("20 0 /", &Variables::new()),
        Err(FormulaError::DivisionByZero { .. })
    ));
    assert!(matches!(
        try_evaluate("1 wave %", &vars(&[("wave", 0)])),
        Err(FormulaError::ModuloByZero { .. })
    ));
}

#[test]
fn test_missing_operands_falls_back() {
    assert_eq!(evaluate("+", &Variables::new()), 0);
    assert_eq!(evaluate("5 *", &Variables::new()), 0);
    assert_eq!(
        try_evaluate("5 *", &Variables::new()),
        Err(FormulaError::MissingOperands {
            op: '*',
            expression: "5 *".to_string(),
        })
    );
}

#[test]
fn test_unknown_token_counts_as_zero() {
    assert_eq!(evaluate("hp 5 +", &Variables::new()), 5);
    assert_eq!(evaluate("3 bogus *", &Variables::new()), 0);
}

#[test]
fn test_leftover_stack_returns_top() {
    assert_eq!(evaluate("1 2 3", &Variables::new()), 3);
    assert_eq!(evaluate("4 5 6 +", &Variables::new()), 11);
}

#[test]
fn test_overflow_wraps() {
    let none = Variables::new();
    assert_eq!(evaluate("2147483647 1 +", &none), i32::MIN);
    assert_eq!(evaluate("-2147483648 -1 /", &none), i32::MIN);
}

// ---- Optional expressions ----

#[test]
fn test_evaluate_or_uses_fallback_when_absent() {
    let v = vars(&[("base", 10), ("wave", 2)]);
    assert_eq!(evaluate_or(None, &v, 10), 10);
    assert_eq!(evaluate_or(Some("base wave *"), &v, 10), 20);
}
