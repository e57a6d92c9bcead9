//! Stack-based postfix evaluator with named variable substitution.

use std::collections::HashMap;

use thiserror::Error;
use tracing::warn;

/// Variable bindings visible to an expression (`wave`, `base`, ...).
pub type Variables = HashMap<String, i32>;

/// Conditions that abort an evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormulaError {
    #[error("not enough operands for operator `{op}` in `{expression}`")]
    MissingOperands { op: char, expression: String },

    #[error("division by zero in `{expression}`")]
    DivisionByZero { expression: String },

    #[error("modulo by zero in `{expression}`")]
    ModuloByZero { expression: String },
}

/// Evaluate `expression` with `variables` bound.
///
/// Never fails: aborted evaluations (missing operands, division or modulo
/// by zero) yield `0`, unknown tokens count as `0`, and a final stack that
/// does not hold exactly one value yields its top (or `0` when empty).
/// Each of these is logged as a warning.
pub fn evaluate(expression: &str, variables: &Variables) -> i32 {
    match try_evaluate(expression, variables) {
        Ok(value) => value,
        Err(err) => {
            warn!("formula aborted: {err}");
            0
        }
    }
}

/// Evaluate an optional expression, using `fallback` when it is absent.
pub fn evaluate_or(expression: Option<&str>, variables: &Variables, fallback: i32) -> i32 {
    match expression {
        Some(expr) => evaluate(expr, variables),
        None => fallback,
    }
}

/// Like [`evaluate`], but surfaces aborting conditions as errors.
///
/// Unknown tokens and leftover stack values are still degraded (and
/// logged) rather than reported, since they produce a usable result.
pub fn try_evaluate(expression: &str, variables: &Variables) -> Result<i32, FormulaError> {
    let trimmed = expression.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }

    // Plain integer literals bypass tokenization entirely.
    if let Ok(value) = trimmed.parse::<i32>() {
        return Ok(value);
    }

    let mut stack: Vec<i32> = Vec::new();

    for token in trimmed.split_whitespace() {
        if let Some(op) = Op::parse(token) {
            // First pop is the right operand.
            let (Some(b), Some(a)) = (stack.pop(), stack.pop()) else {
                return Err(FormulaError::MissingOperands {
                    op: op.symbol(),
                    expression: expression.to_string(),
                });
            };
            stack.push(op.apply(a, b, expression)?);
        } else if let Some(&value) = variables.get(token) {
            stack.push(value);
        } else if let Ok(number) = token.parse::<i32>() {
            stack.push(number);
        } else {
            warn!("unknown token `{token}` in formula `{expression}`, using 0");
            stack.push(0);
        }
    }

    if stack.len() != 1 {
        warn!(
            "formula `{expression}` left {} values on the stack",
            stack.len()
        );
    }
    Ok(stack.last().copied().unwrap_or(0))
}

#[derive(Debug, Clone, Copy)]
enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl Op {
    fn parse(token: &str) -> Option<Op> {
        match token {
            "+" => Some(Op::Add),
            "-" => Some(Op::Sub),
            "*" => Some(Op::Mul),
            "/" => Some(Op::Div),
            "%" => Some(Op::Rem),
            _ => None,
        }
    }

    fn symbol(self) -> char {
        match self {
            Op::Add => '+',
            Op::Sub => '-',
            Op::Mul => '*',
            Op::Div => '/',
            Op::Rem => '%',
        }
    }

    /// Apply `a OP b`. Integer overflow wraps instead of panicking.
    fn apply(self, a: i32, b: i32, expression: &str) -> Result<i32, FormulaError> {
        let value = match self {
            Op::Add => a.wrapping_add(b),
            Op::Sub => a.wrapping_sub(b),
            Op::Mul => a.wrapping_mul(b),
            Op::Div => {
                if b == 0 {
                    return Err(FormulaError::DivisionByZero {
                        expression: expression.to_string(),
                    });
                }
                a.wrapping_div(b)
            }
            Op::Rem => {
                if b == 0 {
                    return Err(FormulaError::ModuloByZero {
                        expression: expression.to_string(),
                    });
                }
                a.wrapping_rem(b)
            }
        };
        Ok(value)
    }
}
