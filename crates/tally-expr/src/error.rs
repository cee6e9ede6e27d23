//! Typed errors for the formula pipeline

use thiserror::Error;

/// Result type for formula operations
pub type ExprResult<T> = std::result::Result<T, ExprError>;

/// Every way the pipeline can fail.
///
/// Each stage returns either a success value or exactly one of these
/// kinds; there are no panics on malformed input and no numeric sentinels
/// standing in for errors.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ExprError {
    /// Parentheses do not balance
    #[error("parentheses are not matched")]
    BracesNotMatched,

    /// A token is not permitted to follow its predecessor
    #[error("bad token sequence")]
    BadTokenSequence,

    /// Input at the cursor is no known operator, function, variable or constant
    #[error("unknown token")]
    UnknownToken,

    /// Malformed numeric literal
    #[error("malformed number")]
    BadNumber,

    /// A function received a different argument count than its arity
    #[error("wrong number of arguments passed to function")]
    WrongArgsCount,

    /// An operand's type does not match the operation's signature
    #[error("operand has the wrong type")]
    WrongType,

    /// The scan cursor moved past the end of the input
    #[error("index is out of range")]
    OutOfRange,

    /// The formula contains no tokens
    #[error("formula is empty")]
    EmptyInput,

    /// The formula references form a cycle, so no evaluation order exists
    #[error("cyclic formula reference")]
    GraphCycle,

    /// Internal inconsistency that a validated pipeline should never produce
    #[error("unknown error")]
    Unknown,
}
