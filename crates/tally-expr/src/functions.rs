//! Built-in operations
//!
//! The closed set of call signatures every operator, function and constant
//! resolves to, plus the registry of built-in function names. The registry
//! is built once on first use and only ever read afterwards, so sharing it
//! across threads is safe.

use ahash::AHashMap;
use once_cell::sync::Lazy;

use crate::token::TokenKind;

/// One concrete call signature.
///
/// Arity and operand types are intrinsic to the variant; the evaluator
/// dispatches with an exhaustive match, so adding or removing a signature
/// is a compile-time-checked change.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Produces a number from nothing (constants)
    Constant(fn() -> f64),
    /// number → number
    Unary(fn(f64) -> f64),
    /// number, number → number
    Binary(fn(f64, f64) -> f64),
    /// condition, then-value, else-value → number
    Conditional(fn(bool, f64, f64) -> f64),
    /// number, number → boolean
    Comparison(fn(f64, f64) -> bool),
    /// boolean, boolean → boolean
    Logical(fn(bool, bool) -> bool),
}

impl Operation {
    /// Number of operands the operation consumes.
    pub fn arity(&self) -> usize {
        match self {
            Operation::Constant(_) => 0,
            Operation::Unary(_) => 1,
            Operation::Binary(_) | Operation::Comparison(_) | Operation::Logical(_) => 2,
            Operation::Conditional(_) => 3,
        }
    }
}

/// A named built-in function.
pub struct FunctionDef {
    /// Canonical (lowercase) name
    pub name: &'static str,
    /// Accepts two or more arguments, folded left across the operation
    pub variadic: bool,
    pub op: Operation,
}

/// Registry of built-in functions, keyed by canonical name.
/// Lookup is case-insensitive.
pub struct FunctionRegistry {
    functions: AHashMap<&'static str, FunctionDef>,
}

impl FunctionRegistry {
    fn new() -> Self {
        let mut registry = Self {
            functions: AHashMap::new(),
        };

        // trigonometric
        registry.register("sin", false, Operation::Unary(f64::sin));
        registry.register("cos", false, Operation::Unary(f64::cos));
        registry.register("tan", false, Operation::Unary(f64::tan));
        registry.register("ctn", false, Operation::Unary(cotangent));
        registry.register("atan", false, Operation::Unary(f64::atan));
        registry.register("atan2", false, Operation::Binary(f64::atan2));

        // sign and absolute value
        registry.register("abs", false, Operation::Unary(f64::abs));
        registry.register("sign", false, Operation::Unary(sign));

        // exponential and logarithmic; `log` is base-10
        registry.register("exp", false, Operation::Unary(f64::exp));
        registry.register("ln", false, Operation::Unary(f64::ln));
        registry.register("log", false, Operation::Unary(f64::log10));
        registry.register("log10", false, Operation::Unary(f64::log10));
        registry.register("pow", false, Operation::Binary(f64::powf));

        // rounding
        registry.register("int", false, Operation::Unary(f64::trunc));
        registry.register("floor", false, Operation::Unary(f64::floor));
        registry.register("ceil", false, Operation::Unary(f64::ceil));
        registry.register("round", false, Operation::Unary(f64::round));

        // conditional and variadic extrema
        registry.register("if", false, Operation::Conditional(choose));
        registry.register("min", true, Operation::Binary(f64::min));
        registry.register("max", true, Operation::Binary(f64::max));

        registry
    }

    fn register(&mut self, name: &'static str, variadic: bool, op: Operation) {
        self.functions.insert(name, FunctionDef { name, variadic, op });
    }

    /// Look up a function by name, case-insensitively.
    pub fn get(&self, name: &str) -> Option<&FunctionDef> {
        self.functions.get(name.to_ascii_lowercase().as_str())
    }
}

static REGISTRY: Lazy<FunctionRegistry> = Lazy::new(FunctionRegistry::new);

/// The shared read-only registry of built-in functions.
pub fn registry() -> &'static FunctionRegistry {
    &REGISTRY
}

/// Operation bound to an operator token kind, `None` for non-operators.
pub fn operator_op(kind: TokenKind) -> Option<Operation> {
    match kind {
        TokenKind::Plus => Some(Operation::Binary(|a, b| a + b)),
        TokenKind::Minus => Some(Operation::Binary(|a, b| a - b)),
        TokenKind::UnaryMinus => Some(Operation::Unary(|a| -a)),
        TokenKind::Multiply => Some(Operation::Binary(|a, b| a * b)),
        TokenKind::Divide => Some(Operation::Binary(|a, b| a / b)),
        TokenKind::Power => Some(Operation::Binary(f64::powf)),
        TokenKind::Less => Some(Operation::Comparison(|a, b| a < b)),
        TokenKind::LessEqual => Some(Operation::Comparison(|a, b| a <= b)),
        TokenKind::Greater => Some(Operation::Comparison(|a, b| a > b)),
        TokenKind::GreaterEqual => Some(Operation::Comparison(|a, b| a >= b)),
        TokenKind::Equal => Some(Operation::Comparison(|a, b| a == b)),
        TokenKind::Or => Some(Operation::Logical(|a, b| a || b)),
        TokenKind::And => Some(Operation::Logical(|a, b| a && b)),
        TokenKind::Xor => Some(Operation::Logical(|a, b| a != b)),
        _ => None,
    }
}

/// Operation bound to a built-in constant name (case-sensitive).
pub fn constant_op(name: &str) -> Option<Operation> {
    match name {
        "pi" => Some(Operation::Constant(|| std::f64::consts::PI)),
        _ => None,
    }
}

fn cotangent(a: f64) -> f64 {
    1.0 / a.tan()
}

fn sign(a: f64) -> f64 {
    if a > 0.0 {
        1.0
    } else if a < 0.0 {
        -1.0
    } else {
        0.0
    }
}

fn choose(condition: bool, then_value: f64, else_value: f64) -> f64 {
    if condition {
        then_value
    } else {
        else_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_lookup_is_case_insensitive() {
        assert!(registry().get("sin").is_some());
        assert!(registry().get("SiN").is_some());
        assert!(registry().get("MAX").is_some());
        assert!(registry().get("nope").is_none());
    }

    #[test]
    fn test_variadic_flags() {
        assert!(registry().get("min").map_or(false, |def| def.variadic));
        assert!(registry().get("max").map_or(false, |def| def.variadic));
        assert!(!registry().get("pow").map_or(true, |def| def.variadic));
        assert!(!registry().get("if").map_or(true, |def| def.variadic));
    }

    #[test]
    fn test_arities() {
        let arity = |name: &str| registry().get(name).map(|def| def.op.arity());
        assert_eq!(arity("sin"), Some(1));
        assert_eq!(arity("atan2"), Some(2));
        assert_eq!(arity("if"), Some(3));
        assert_eq!(arity("pow"), Some(2));
    }

    #[test]
    fn test_numeric_helpers() {
        assert_eq!(sign(-3.5), -1.0);
        assert_eq!(sign(0.0), 0.0);
        assert_eq!(sign(12.0), 1.0);
        assert_eq!(choose(true, 3.0, 4.0), 3.0);
        assert_eq!(choose(false, 3.0, 4.0), 4.0);
    }

    #[test]
    fn test_int_truncates_toward_zero() {
        match registry().get("int").map(|def| def.op) {
            Some(Operation::Unary(f)) => {
                assert_eq!(f(2.7), 2.0);
                assert_eq!(f(-2.7), -2.0);
            }
            _ => panic!("int is not unary"),
        }
    }

    #[test]
    fn test_log_is_base_ten() {
        match registry().get("log").map(|def| def.op) {
            Some(Operation::Unary(f)) => assert_eq!(f(100.0), 2.0),
            _ => panic!("log is not unary"),
        }
    }

    #[test]
    fn test_operator_bindings() {
        assert!(matches!(
            operator_op(TokenKind::Xor),
            Some(Operation::Logical(_))
        ));
        assert!(matches!(
            operator_op(TokenKind::Equal),
            Some(Operation::Comparison(_))
        ));
        assert!(operator_op(TokenKind::LeftParen).is_none());
        assert!(constant_op("pi").is_some());
        assert!(constant_op("PI").is_none());
    }
}
