//! Wave-scaling formulas for level data.
//!
//! Levels describe enemy counts and stats as small postfix (reverse Polish)
//! integer expressions such as `"base 5 wave * +"`. This crate evaluates
//! them. Pure functions, no state: every failure degrades to a defined
//! fallback and is reported through `tracing`.

pub mod rpn;

pub use rpn::{evaluate, evaluate_or, try_evaluate, FormulaError, Variables};

#[cfg(test)]
mod tests;
