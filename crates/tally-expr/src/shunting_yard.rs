//! Infix → postfix conversion
//!
//! Classic shunting-yard over a validated token sequence. Malformed input
//! is rejected by the tokenizer, so conversion itself cannot fail.

use crate::grammar::{self, Associativity};
use crate::token::{Token, TokenKind};

/// Reorder a validated infix sequence into postfix (RPN) order.
pub fn to_postfix(tokens: Vec<Token>) -> Vec<Token> {
    let mut output: Vec<Token> = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Token> = Vec::new();

    for token in tokens {
        match token.kind {
            TokenKind::Number | TokenKind::Constant | TokenKind::Boolean | TokenKind::Variable => {
                output.push(token);
            }
            // emitted when its closing parenthesis is reached
            TokenKind::Function => stack.push(token),
            TokenKind::LeftParen => stack.push(token),
            TokenKind::Comma => {
                // argument boundary: flush operators back to the opening
                // parenthesis, which stays put
                while stack.last().map_or(false, |t| t.kind != TokenKind::LeftParen) {
                    if let Some(top) = stack.pop() {
                        output.push(top);
                    }
                }
            }
            TokenKind::RightParen => {
                while stack.last().map_or(false, |t| t.kind != TokenKind::LeftParen) {
                    if let Some(top) = stack.pop() {
                        output.push(top);
                    }
                }
                stack.pop();
                if stack.last().map_or(false, |t| t.kind == TokenKind::Function) {
                    if let Some(function) = stack.pop() {
                        output.push(function);
                    }
                }
            }
            kind if kind.is_operator() => {
                if let Some(incoming) = grammar::operator_info(kind) {
                    while let Some(top) = stack.last().and_then(|t| grammar::operator_info(t.kind))
                    {
                        // a right-associative incoming operator stays put
                        // on equal precedence (exponentiation)
                        let pops = top.precedence > incoming.precedence
                            || (top.precedence == incoming.precedence
                                && incoming.associativity == Associativity::Left);
                        if !pops {
                            break;
                        }
                        if let Some(top) = stack.pop() {
                            output.push(top);
                        }
                    }
                }
                stack.push(token);
            }
            // begin/end markers carry no structure here
            _ => {}
        }
    }

    while let Some(top) = stack.pop() {
        output.push(top);
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Payload;
    use crate::tokenizer::tokenize;
    use pretty_assertions::assert_eq;

    // compact readable form: numbers as text, everything else by kind
    fn describe(tokens: &[Token]) -> Vec<String> {
        tokens
            .iter()
            .map(|token| match &token.payload {
                Payload::Number(n) => n.to_string(),
                Payload::Name(name) => name.clone(),
                Payload::Boolean(b) => b.to_string(),
                Payload::None => format!("{:?}", token.kind),
            })
            .collect()
    }

    fn postfix_of(text: &str) -> Vec<String> {
        let tokens = tokenize(text, &[]).unwrap();
        describe(&to_postfix(tokens))
    }

    #[test]
    fn test_precedence_ordering() {
        assert_eq!(postfix_of("2+3*4"), vec!["2", "3", "4", "Multiply", "Plus"]);
    }

    #[test]
    fn test_left_associativity() {
        assert_eq!(postfix_of("2+3-4"), vec!["2", "3", "Plus", "4", "Minus"]);
    }

    #[test]
    fn test_power_is_right_associative() {
        assert_eq!(postfix_of("2^3^2"), vec!["2", "3", "2", "Power", "Power"]);
    }

    #[test]
    fn test_parentheses_regroup() {
        assert_eq!(postfix_of("(2+3)*4"), vec!["2", "3", "Plus", "4", "Multiply"]);
    }

    #[test]
    fn test_function_call() {
        assert_eq!(postfix_of("min(3,4)"), vec!["3", "4", "min"]);
    }

    #[test]
    fn test_unary_minus_binds_tighter() {
        assert_eq!(
            postfix_of("-2*3"),
            vec!["2", "UnaryMinus", "3", "Multiply"]
        );
    }

    #[test]
    fn test_conditional_layout() {
        // the condition sits deepest, the function last with all its
        // arguments below it
        assert_eq!(
            postfix_of("if(5==8 | 6>5, 3, 4)"),
            vec!["5", "8", "Equal", "6", "5", "Greater", "Or", "3", "4", "if"]
        );
    }
}
