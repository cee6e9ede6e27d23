//! Postfix evaluator
//!
//! Walks a postfix token sequence with an operand stack, substitutes
//! variable bindings and applies each operation according to its
//! signature. Failures are always typed: an operand of the wrong type is
//! `WrongType`, a short stack is `WrongArgsCount`, and anything a
//! validated pipeline should never produce is `Unknown` — never a numeric
//! sentinel.

use std::collections::HashMap;

use crate::error::{ExprError, ExprResult};
use crate::functions::{self, Operation};
use crate::token::{Token, TokenKind};
use crate::value::Value;

/// Name → value table for variable substitution. The caller must bind
/// every variable the formula references.
pub type Bindings = HashMap<String, Value>;

/// Evaluate a postfix token sequence down to a single value.
pub fn evaluate(postfix: &[Token], bindings: &Bindings) -> ExprResult<Value> {
    let mut stack: Vec<Value> = Vec::new();

    for token in postfix {
        match token.kind {
            TokenKind::Number => stack.push(Value::Number(token.as_number()?)),
            TokenKind::Boolean => stack.push(Value::Boolean(token.as_boolean()?)),
            TokenKind::Variable => {
                // an unbound variable is a broken caller contract
                let value = bindings
                    .get(token.as_name()?)
                    .copied()
                    .ok_or(ExprError::Unknown)?;
                stack.push(value);
            }
            TokenKind::Constant => {
                let op = functions::constant_op(token.as_name()?).ok_or(ExprError::Unknown)?;
                apply(&mut stack, op, token.n_args)?;
            }
            TokenKind::Function => {
                let def = functions::registry()
                    .get(token.as_name()?)
                    .ok_or(ExprError::Unknown)?;
                apply(&mut stack, def.op, token.n_args)?;
            }
            kind if kind.is_operator() => {
                let op = functions::operator_op(kind).ok_or(ExprError::Unknown)?;
                apply(&mut stack, op, token.n_args)?;
            }
            // markers and punctuation never reach a postfix sequence
            _ => return Err(ExprError::Unknown),
        }
    }

    match (stack.pop(), stack.is_empty()) {
        (Some(result), true) => Ok(result),
        _ => Err(ExprError::Unknown),
    }
}

/// Pop the operation's operands (restoring source order), type-check and
/// apply. The variadic extrema arrive as a `Binary` operation with more
/// than two resolved arguments and are folded from the left.
fn apply(stack: &mut Vec<Value>, op: Operation, n_args: usize) -> ExprResult<()> {
    let take = match op {
        Operation::Binary(_) => n_args.max(2),
        _ => op.arity(),
    };
    if stack.len() < take {
        return Err(ExprError::WrongArgsCount);
    }
    let args = stack.split_off(stack.len() - take);

    let result = match op {
        Operation::Constant(f) => Value::Number(f()),
        Operation::Unary(f) => Value::Number(f(args[0].as_number()?)),
        Operation::Binary(f) => {
            let mut acc = args[0].as_number()?;
            for value in &args[1..] {
                acc = f(acc, value.as_number()?);
            }
            Value::Number(acc)
        }
        Operation::Conditional(f) => Value::Number(f(
            args[0].as_boolean()?,
            args[1].as_number()?,
            args[2].as_number()?,
        )),
        Operation::Comparison(f) => Value::Boolean(f(args[0].as_number()?, args[1].as_number()?)),
        Operation::Logical(f) => Value::Boolean(f(args[0].as_boolean()?, args[1].as_boolean()?)),
    };

    stack.push(result);
    Ok(())
}
