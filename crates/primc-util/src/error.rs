//! Error types shared by the utility modules.

use thiserror::Error;

/// Errors from the hand-rolled numeric literal parsers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NumberError {
    /// The input was empty.
    #[error("invalid number: empty string")]
    Empty,

    /// The input was just a minus sign, or a digit was missing where one
    /// is required.
    #[error("invalid number: no digits")]
    NoDigits,

    /// A character outside `[0-9.]` appeared.
    #[error("invalid number: unexpected character '{0}'")]
    InvalidChar(char),

    /// A decimal started with its dot (`.5` is not in the grammar).
    #[error("invalid number: leading decimal point")]
    LeadingDot,

    /// The value does not fit a signed 64-bit integer.
    #[error("integer literal overflow")]
    Overflow,
}

/// Result alias for the numeric parsers.
pub type NumberResult<T> = std::result::Result<T, NumberError>;
