//! Lexical error values.
//!
//! Every lexer error is fatal for the token being scanned but recoverable
//! for the pipeline: the cursor has already been advanced past the
//! offending character when one of these is returned, so the caller can
//! resynchronise by simply scanning again.

use primc_util::error::NumberError;
use primc_util::position::PositionPair;
use thiserror::Error;

/// An error produced while scanning a single token.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LexError {
    /// A character no token can start with.
    #[error("unexpected character '{ch}' {pos}")]
    UnexpectedChar { ch: char, pos: PositionPair },

    /// A string literal with no closing quote before end of input.
    #[error("unterminated string literal {pos}")]
    UnterminatedString { pos: PositionPair },

    /// A char literal with no closing quote, or one broken by a newline.
    #[error("unterminated char literal {pos}")]
    UnterminatedChar { pos: PositionPair },

    /// A block comment with no closing `*/`.
    #[error("unterminated block comment {pos}")]
    UnterminatedComment { pos: PositionPair },

    /// A numeric literal with more than one decimal point.
    #[error("malformed number: more than one decimal point {pos}")]
    MultipleDots { pos: PositionPair },

    /// A numeric literal whose digits do not parse (overflow).
    #[error("malformed number ({source}) {pos}")]
    BadNumber {
        #[source]
        source: NumberError,
        pos: PositionPair,
    },
}

impl LexError {
    /// The source region the error points at.
    pub fn pos(&self) -> PositionPair {
        match self {
            LexError::UnexpectedChar { pos, .. }
            | LexError::UnterminatedString { pos }
            | LexError::UnterminatedChar { pos }
            | LexError::UnterminatedComment { pos }
            | LexError::MultipleDots { pos }
            | LexError::BadNumber { pos, .. } => *pos,
        }
    }
}
