//! End-to-end formula evaluation tests

use pretty_assertions::assert_eq;
use tally_expr::{eval, eval_with, Bindings, ExprError, Value};

/// Power binds before multiplication, multiplication before addition
#[test]
fn test_operator_precedence() {
    assert_eq!(eval("2+3*4^2"), Ok(Value::Number(50.0)));
}

/// Exponentiation groups right-to-left
#[test]
fn test_power_right_associativity() {
    assert_eq!(eval("2^3^2"), Ok(Value::Number(512.0)));
    assert_eq!(eval("(2^3)^2"), Ok(Value::Number(64.0)));
}

/// Unary minus inside a grouped product
#[test]
fn test_unary_minus() {
    assert_eq!(eval("(-2*3)*2"), Ok(Value::Number(-12.0)));
    assert_eq!(eval("-2^2"), Ok(Value::Number(4.0)));
}

/// Variadic extrema fold left across all arguments
#[test]
fn test_variadic_min_max() {
    assert_eq!(eval("min(3,4)"), Ok(Value::Number(3.0)));
    assert_eq!(eval("max(3,4,10)"), Ok(Value::Number(10.0)));
}

/// The conditional takes a boolean condition and two numeric branches
#[test]
fn test_conditional() {
    assert_eq!(eval("if(5==8 | 6>5, 3, 4)"), Ok(Value::Number(3.0)));
    assert_eq!(eval("if(5==8 & 6>5, 3, 4)"), Ok(Value::Number(4.0)));
}

/// Comparisons and logical operators produce booleans
#[test]
fn test_boolean_results() {
    assert_eq!(eval("7+3>5"), Ok(Value::Boolean(true)));
    assert_eq!(eval("1<=0 | 2<1"), Ok(Value::Boolean(false)));
    assert_eq!(eval("true ~ false"), Ok(Value::Boolean(true)));
}

/// Built-in functions and the pi constant
#[test]
fn test_builtin_functions() {
    assert_eq!(eval("cos(pi)"), Ok(Value::Number(-1.0)));
    assert_eq!(eval("abs(-3.5)"), Ok(Value::Number(3.5)));
    assert_eq!(eval("sign(-12)"), Ok(Value::Number(-1.0)));
    assert_eq!(eval("log(100)"), Ok(Value::Number(2.0)));
    assert_eq!(eval("pow(2, 10)"), Ok(Value::Number(1024.0)));
    assert_eq!(eval("int(2.9)"), Ok(Value::Number(2.0)));
    assert_eq!(eval("floor(2.9) + ceil(0.1)"), Ok(Value::Number(3.0)));
    assert_eq!(eval("atan2(0, 1)"), Ok(Value::Number(0.0)));
}

/// Function names match case-insensitively
#[test]
fn test_function_case_insensitivity() {
    assert_eq!(eval("MIN(3,4)"), Ok(Value::Number(3.0)));
    assert_eq!(eval("Sin(0)"), Ok(Value::Number(0.0)));
}

/// Variables are bound at evaluation time
#[test]
fn test_variable_bindings() {
    let mut bindings = Bindings::new();
    bindings.insert(String::from("rate"), Value::Number(0.25));
    bindings.insert(String::from("base"), Value::Number(200.0));
    assert_eq!(
        eval_with("base * (1 + rate)", &bindings),
        Ok(Value::Number(250.0))
    );
}

/// A fixed-arity function invoked with the wrong comma count
#[test]
fn test_arity_mismatch() {
    assert_eq!(eval("sin(1,2)"), Err(ExprError::WrongArgsCount));
    assert_eq!(eval("min(3)"), Err(ExprError::WrongArgsCount));
}

/// Structurally broken input fails with the matching kind
#[test]
fn test_parse_failures() {
    assert_eq!(eval("(2+3"), Err(ExprError::BracesNotMatched));
    assert_eq!(eval("2+"), Err(ExprError::BadTokenSequence));
    assert_eq!(eval("2..5"), Err(ExprError::BadNumber));
    assert_eq!(eval("bogus"), Err(ExprError::UnknownToken));
    assert_eq!(eval(""), Err(ExprError::EmptyInput));
}

/// Type mismatches are reported, never coerced
#[test]
fn test_type_mismatches() {
    assert_eq!(eval("1 | 2"), Err(ExprError::WrongType));
    assert_eq!(eval("true * 2"), Err(ExprError::WrongType));
    assert_eq!(eval("if(1, 2, 3)"), Err(ExprError::WrongType));
}
