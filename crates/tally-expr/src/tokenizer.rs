//! Formula tokenizer
//!
//! Scans formula text left to right and validates every token against the
//! grammar table's can-follow relation as it is produced, with the
//! synthetic `Begin` kind standing in as the first token's predecessor.
//! Unary and binary signs share a spelling and are told apart purely by
//! that relation. After scanning, unary-plus tokens (no-ops) are removed,
//! every function's argument count is resolved and validated, and the
//! sequence is terminated with an `End` token.

use crate::error::{ExprError, ExprResult};
use crate::functions;
use crate::grammar;
use crate::token::{Token, TokenKind};

/// Tokenize `text` into a validated token sequence.
///
/// `variables` lists the variable names the formula may reference (in
/// multi-formula mode the caller folds formula names into this list).
/// Function names match case-insensitively, variable and constant names
/// exactly. On success the sequence carries no `Begin`/`UnaryPlus`
/// markers, ends with a single `End` token, and every function token
/// knows its resolved argument count.
pub fn tokenize(text: &str, variables: &[String]) -> ExprResult<Vec<Token>> {
    if !braces_balanced(text) {
        return Err(ExprError::BracesNotMatched);
    }

    let mut scanner = Scanner::new(text, variables);
    let mut tokens: Vec<Token> = Vec::new();
    let mut prev = TokenKind::Begin;
    loop {
        scanner.skip_whitespace();
        if scanner.is_at_end() {
            break;
        }
        let token = scanner.classify(prev)?;
        prev = token.kind;
        tokens.push(token);
    }

    // unary plus participates in sequence validation only
    tokens.retain(|token| token.kind != TokenKind::UnaryPlus);
    if tokens.is_empty() {
        return Err(ExprError::EmptyInput);
    }

    resolve_arg_counts(&mut tokens)?;

    let last = match tokens.last() {
        Some(token) => token.kind,
        None => return Err(ExprError::EmptyInput),
    };
    if !grammar::can_follow(TokenKind::End, last) {
        return Err(ExprError::BadTokenSequence);
    }
    tokens.push(Token::new(TokenKind::End));

    Ok(tokens)
}

/// Parenthesis nesting must balance before any tokenization proceeds.
fn braces_balanced(text: &str) -> bool {
    let mut depth = 0usize;
    for c in text.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                if depth == 0 {
                    return false;
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    depth == 0
}

struct Scanner<'a> {
    text: &'a str,
    pos: usize,
    variables: &'a [String],
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str, variables: &'a [String]) -> Self {
        Self {
            text,
            pos: 0,
            variables,
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek_char().map_or(false, |c| c.is_whitespace()) {
            self.advance();
        }
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// Classify the token at the cursor given the previous token's kind.
    fn classify(&mut self, prev: TokenKind) -> ExprResult<Token> {
        let c = match self.peek_char() {
            Some(c) => c,
            // only reachable if a caller keeps scanning past the end
            None => return Err(ExprError::OutOfRange),
        };

        let token = if c.is_ascii_digit() {
            Token::number(self.scan_number()?)
        } else if c.is_ascii_alphabetic() || c == '_' {
            self.scan_word()?
        } else {
            self.scan_operator(prev)?
        };

        if !grammar::can_follow(token.kind, prev) {
            return Err(ExprError::BadTokenSequence);
        }
        Ok(token)
    }

    /// An integer part, optionally followed by `.` and at least one
    /// fractional digit. No scientific notation.
    fn scan_number(&mut self) -> ExprResult<f64> {
        let start = self.pos;
        while self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
            self.advance();
        }
        if self.peek_char() == Some('.') {
            self.advance();
            if !self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
                return Err(ExprError::BadNumber);
            }
            while self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
                self.advance();
            }
        }
        self.text[start..self.pos]
            .parse()
            .map_err(|_| ExprError::BadNumber)
    }

    /// A maximal word: functions first, then variables, then constants,
    /// then boolean literals.
    fn scan_word(&mut self) -> ExprResult<Token> {
        let start = self.pos;
        while self
            .peek_char()
            .map_or(false, |c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.advance();
        }
        let word = &self.text[start..self.pos];

        if let Some(def) = functions::registry().get(word) {
            return Ok(Token::with_name(TokenKind::Function, def.name.to_string()));
        }
        if self.variables.iter().any(|name| name.as_str() == word) {
            return Ok(Token::with_name(TokenKind::Variable, word.to_string()));
        }
        if functions::constant_op(word).is_some() {
            return Ok(Token::with_name(TokenKind::Constant, word.to_string()));
        }
        match word {
            "true" => Ok(Token::boolean(true)),
            "false" => Ok(Token::boolean(false)),
            _ => Err(ExprError::UnknownToken),
        }
    }

    /// Longest-matching operator spelling; a spelling shared by several
    /// kinds (the signs) resolves to the first kind the grammar permits
    /// after `prev`.
    fn scan_operator(&mut self, prev: TokenKind) -> ExprResult<Token> {
        let rest = &self.text[self.pos..];
        for (spelling, candidates) in grammar::SPELLINGS {
            if !rest.starts_with(spelling) {
                continue;
            }
            let kind = candidates
                .iter()
                .copied()
                .find(|&kind| grammar::can_follow(kind, prev))
                .ok_or(ExprError::BadTokenSequence)?;
            self.pos += spelling.len();
            return Ok(Token::new(kind));
        }
        Err(ExprError::UnknownToken)
    }
}

/// One function call whose argument list is still open.
struct Frame {
    /// Index of the function token in the sequence
    index: usize,
    /// Parenthesis depth of the function's own argument list
    body_depth: usize,
    commas: usize,
}

/// Resolve every function token's argument count and every other token's
/// fixed operand count.
///
/// A function's count is the number of commas at its own argument depth
/// plus one; nested calls keep their own frames on an explicit stack, so
/// arbitrarily deep nesting cannot exhaust the call stack. Non-variadic
/// functions must match their operation's arity exactly; the variadic
/// extrema accept any count of two or more.
fn resolve_arg_counts(tokens: &mut [Token]) -> ExprResult<()> {
    let mut counts: Vec<(usize, usize)> = Vec::new();
    let mut frames: Vec<Frame> = Vec::new();
    let mut depth = 0usize;

    for index in 0..tokens.len() {
        match tokens[index].kind {
            TokenKind::Function => frames.push(Frame {
                index,
                body_depth: depth + 1,
                commas: 0,
            }),
            TokenKind::LeftParen => depth += 1,
            TokenKind::RightParen => {
                depth = depth.saturating_sub(1);
                if frames.last().map_or(false, |f| depth + 1 == f.body_depth) {
                    if let Some(frame) = frames.pop() {
                        counts.push((frame.index, frame.commas + 1));
                    }
                }
            }
            TokenKind::Comma => {
                if let Some(frame) = frames.last_mut() {
                    if depth == frame.body_depth {
                        frame.commas += 1;
                    }
                }
            }
            _ => {}
        }
    }

    for &(index, n_args) in &counts {
        let def = functions::registry()
            .get(tokens[index].as_name()?)
            .ok_or(ExprError::Unknown)?;
        if def.variadic {
            if n_args < 2 {
                return Err(ExprError::WrongArgsCount);
            }
        } else if n_args != def.op.arity() {
            return Err(ExprError::WrongArgsCount);
        }
        tokens[index].n_args = n_args;
    }

    for token in tokens.iter_mut() {
        if token.kind != TokenKind::Function {
            token.n_args = grammar::operator_info(token.kind).map_or(0, |info| info.arity);
        }
    }

    Ok(())
}
