use thiserror::Error;

/// Everything that can go wrong while turning text into a number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// A character that is not a digit, dot, whitespace, operator or paren.
    #[error("invalid character '{ch}' at position {pos}")]
    InvalidCharacter { ch: char, pos: usize },

    /// A literal with more than one decimal point or otherwise unparsable.
    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    #[error("number out of range: {0}")]
    NumberOutOfRange(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("zero raised to negative power")]
    ZeroToNegativePower,

    #[error("negative number raised to non-integer power")]
    NegativeBaseFractionalExponent,

    #[error("unknown operator '{0}'")]
    UnknownOperator(String),

    /// The operand stack did not balance out to a single value.
    #[error("malformed expression: {0}")]
    MalformedExpression(String),
}

impl EvalError {
    /// Character position in the input, for errors that point at one.
    pub fn position(&self) -> Option<usize> {
        match self {
            EvalError::InvalidCharacter { pos, .. } => Some(*pos),
            _ => None,
        }
    }
}
