//! Typed error enum for tokenizing, parsing and evaluating expressions.

use thiserror::Error;

/// Everything that turns the display into `Error`.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum CalcError {
    #[error("nothing to evaluate")]
    Empty,

    #[error("unexpected character `{ch}` at {at}")]
    UnexpectedChar { ch: char, at: usize },

    #[error("malformed number `{text}` at {at}")]
    InvalidNumber { text: String, at: usize },

    #[error("unexpected `{found}` at {at}")]
    UnexpectedToken { found: String, at: usize },

    #[error("expression ends unexpectedly")]
    UnexpectedEnd,

    #[error("unknown name `{name}` at {at}")]
    UnknownIdentifier { name: String, at: usize },

    #[error("expression is nested too deeply at {at}")]
    TooDeep { at: usize },

    #[error("division by zero")]
    DivisionByZero,

    #[error("{func} is undefined for {arg}")]
    Domain { func: &'static str, arg: f64 },

    #[error("result is too large")]
    Overflow,
}

impl CalcError {
    /// Whether the input text itself is malformed (as opposed to a math error).
    #[must_use]
    pub const fn is_syntax(&self) -> bool {
        matches!(
            *self,
            Self::Empty
                | Self::UnexpectedChar { .. }
                | Self::InvalidNumber { .. }
                | Self::UnexpectedToken { .. }
                | Self::UnexpectedEnd
                | Self::UnknownIdentifier { .. }
                | Self::TooDeep { .. }
        )
    }
}
