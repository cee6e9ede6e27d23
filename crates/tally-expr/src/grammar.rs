//! The grammar table
//!
//! Static, read-only configuration shared by the whole pipeline: for each
//! token kind, the set of kinds that may legally precede it; for each
//! operator, its arity, precedence and associativity; and the operator
//! spelling table. The predecessor sets are the grammar's whole state
//! machine — they disambiguate unary vs. binary `+`/`-` and reject
//! sequences like two operators in a row without any lookahead.
//!
//! A missing entry here is a configuration bug, not a runtime error; the
//! tables are total over the kinds the tokenizer can produce.

use crate::token::TokenKind::{self, *};

/// Operator grouping direction on equal precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

/// Arity, precedence and associativity of one operator kind.
/// Higher precedence binds tighter.
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub arity: usize,
    pub precedence: u8,
    pub associativity: Associativity,
}

/// Kinds allowed before an operand (number, constant, boolean, variable)
/// or a function name.
const OPERAND: &[TokenKind] = &[
    Begin, LeftParen, Comma, Plus, UnaryPlus, Minus, UnaryMinus, Multiply, Divide, Power, Less,
    LessEqual, Greater, GreaterEqual, Equal, Or, And, Xor,
];

/// Kinds allowed before anything that needs a finished value to its left:
/// binary operators, commas, closing parentheses and the end marker.
const AFTER_VALUE: &[TokenKind] = &[RightParen, Number, Variable, Constant, Boolean];

/// Kinds allowed before a unary sign.
const UNARY_SIGN: &[TokenKind] = &[
    Begin, LeftParen, Comma, Less, LessEqual, Greater, GreaterEqual, Equal, Or, And, Xor,
];

/// Kinds allowed before an opening parenthesis.
const GROUP_OPEN: &[TokenKind] = &[
    Begin, LeftParen, Comma, Plus, UnaryPlus, Minus, UnaryMinus, Multiply, Divide, Power, Function,
    Less, LessEqual, Greater, GreaterEqual, Equal, Or, And, Xor,
];

const NOTHING: &[TokenKind] = &[];

/// The set of token kinds legally allowed immediately before `kind`.
pub fn predecessors(kind: TokenKind) -> &'static [TokenKind] {
    match kind {
        Begin => NOTHING,
        LeftParen => GROUP_OPEN,
        RightParen | Comma | End => AFTER_VALUE,
        Plus | Minus | Multiply | Divide | Power | Less | LessEqual | Greater | GreaterEqual
        | Equal | Or | And | Xor => AFTER_VALUE,
        UnaryPlus | UnaryMinus => UNARY_SIGN,
        Number | Constant | Boolean | Variable | Function => OPERAND,
    }
}

/// Whether `kind` may appear immediately after `preceding`.
pub fn can_follow(kind: TokenKind, preceding: TokenKind) -> bool {
    predecessors(kind).contains(&preceding)
}

/// Operator descriptor, `None` for non-operator kinds.
///
/// Precedence ladder (lowest to highest):
/// 1. Logical: `|`, `&`, `~`
/// 2. Comparison: `<`, `<=`, `>`, `>=`, `==`
/// 3. Addition/Subtraction: `+`, `-`
/// 4. Multiplication/Division: `*`, `/`
/// 5. Exponentiation: `^` (right-associative)
/// 6. Unary sign (binds tighter than any binary operator)
pub fn operator_info(kind: TokenKind) -> Option<OperatorInfo> {
    let info = |arity, precedence, associativity| OperatorInfo {
        arity,
        precedence,
        associativity,
    };
    match kind {
        Or | And | Xor => Some(info(2, 1, Associativity::Left)),
        Less | LessEqual | Greater | GreaterEqual | Equal => Some(info(2, 2, Associativity::Left)),
        Plus | Minus => Some(info(2, 3, Associativity::Left)),
        Multiply | Divide => Some(info(2, 4, Associativity::Left)),
        Power => Some(info(2, 5, Associativity::Right)),
        UnaryPlus | UnaryMinus => Some(info(1, 6, Associativity::Right)),
        _ => None,
    }
}

/// Operator spellings with their candidate kinds, longest spelling first
/// so that `<=` wins over `<`. A spelling with several candidates (the
/// signs) is resolved by predecessor context: the first candidate the
/// grammar permits after the previous token is chosen.
pub(crate) const SPELLINGS: &[(&str, &[TokenKind])] = &[
    ("<=", &[LessEqual]),
    (">=", &[GreaterEqual]),
    ("==", &[Equal]),
    ("(", &[LeftParen]),
    (")", &[RightParen]),
    (",", &[Comma]),
    ("+", &[Plus, UnaryPlus]),
    ("-", &[Minus, UnaryMinus]),
    ("*", &[Multiply]),
    ("/", &[Divide]),
    ("^", &[Power]),
    ("<", &[Less]),
    (">", &[Greater]),
    ("|", &[Or]),
    ("&", &[And]),
    ("~", &[Xor]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_follow() {
        assert!(can_follow(Number, Begin));
        assert!(can_follow(Number, Multiply));
        assert!(can_follow(Minus, Number));
        assert!(can_follow(UnaryMinus, LeftParen));
        assert!(can_follow(End, RightParen));

        // two binary operators in a row
        assert!(!can_follow(Multiply, Plus));
        // a value directly after a value
        assert!(!can_follow(Number, Number));
        // the end marker after a dangling operator
        assert!(!can_follow(End, Plus));
    }

    #[test]
    fn test_sign_disambiguation_by_context() {
        // after a value the binary reading is permitted, the unary is not
        assert!(can_follow(Minus, Number));
        assert!(!can_follow(UnaryMinus, Number));
        // after an opening parenthesis only the unary reading survives
        assert!(!can_follow(Minus, LeftParen));
        assert!(can_follow(UnaryMinus, LeftParen));
    }

    #[test]
    fn test_precedence_ladder() {
        let prec = |kind| operator_info(kind).map(|info| info.precedence);
        assert!(prec(Power) > prec(Multiply));
        assert!(prec(Multiply) > prec(Plus));
        assert!(prec(Plus) > prec(Less));
        assert!(prec(Less) > prec(Or));
        assert!(prec(UnaryMinus) > prec(Power));
    }

    #[test]
    fn test_associativity() {
        let assoc = |kind| operator_info(kind).map(|info| info.associativity);
        assert_eq!(assoc(Power), Some(Associativity::Right));
        assert_eq!(assoc(Plus), Some(Associativity::Left));
        assert_eq!(assoc(LeftParen), None);
        assert_eq!(assoc(Function), None);
    }

    #[test]
    fn test_spellings_are_longest_first() {
        let position = |needle: &str| SPELLINGS.iter().position(|(s, _)| *s == needle);
        assert!(position("<=") < position("<"));
        assert!(position(">=") < position(">"));
    }
}
