//! # tally-expr
//!
//! Formula evaluation and resolution engine for tally.
//!
//! This crate provides:
//! - Tokenization of formula text, validated against a context-sensitive
//!   grammar table (unary vs. binary `+`/`-` resolved by predecessor sets)
//! - Infix → postfix conversion (shunting-yard)
//! - Postfix evaluation with typed scalar values and typed errors
//! - Resolution of systems of named, cross-referencing formulas
//!   (topological ordering with cycle detection)
//!
//! The pipeline is purely functional over its inputs: the only shared
//! state is the read-only grammar and function tables, initialized once
//! and safe for unlimited concurrent readers.
//!
//! ## Example
//!
//! ```rust
//! use tally_expr::{eval, Value};
//!
//! assert_eq!(eval("2+3*4^2").unwrap(), Value::Number(50.0));
//! assert_eq!(eval("min(3,4) > 2").unwrap(), Value::Boolean(true));
//! ```

pub mod dependency;
pub mod error;
pub mod evaluator;
pub mod functions;
pub mod grammar;
pub mod shunting_yard;
pub mod system;
pub mod token;
pub mod tokenizer;
pub mod value;

pub use error::{ExprError, ExprResult};
pub use evaluator::{evaluate, Bindings};
pub use shunting_yard::to_postfix;
pub use system::{resolve, Resolution};
pub use token::{Payload, Token, TokenKind};
pub use tokenizer::tokenize;
pub use value::Value;

/// A formula parsed to postfix, ready for repeated evaluation.
#[derive(Debug, Clone)]
pub struct Formula {
    postfix: Vec<Token>,
}

impl Formula {
    /// Tokenize and convert formula text.
    ///
    /// `variables` lists the names the formula may reference; their values
    /// are supplied later, at evaluation time.
    pub fn parse(text: &str, variables: &[String]) -> ExprResult<Self> {
        let tokens = tokenizer::tokenize(text, variables)?;
        Ok(Self {
            postfix: shunting_yard::to_postfix(tokens),
        })
    }

    /// Evaluate against a binding table covering every referenced variable.
    pub fn evaluate(&self, bindings: &Bindings) -> ExprResult<Value> {
        evaluator::evaluate(&self.postfix, bindings)
    }
}

/// Evaluate a closed formula (one that references no variables).
///
/// ```rust
/// use tally_expr::{eval, Value};
///
/// assert_eq!(eval("if(5==8 | 6>5, 3, 4)").unwrap(), Value::Number(3.0));
/// ```
pub fn eval(text: &str) -> ExprResult<Value> {
    eval_with(text, &Bindings::new())
}

/// Evaluate a formula whose variables are all bound in `bindings`.
///
/// ```rust
/// use tally_expr::{eval_with, Bindings, Value};
///
/// let mut bindings = Bindings::new();
/// bindings.insert(String::from("x"), Value::Number(4.0));
/// assert_eq!(eval_with("x^2", &bindings).unwrap(), Value::Number(16.0));
/// ```
pub fn eval_with(text: &str, bindings: &Bindings) -> ExprResult<Value> {
    let variables: Vec<String> = bindings.keys().cloned().collect();
    Formula::parse(text, &variables)?.evaluate(bindings)
}
