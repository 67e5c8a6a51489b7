//! primc-lex - Lexical analysis for Prim.
//!
//! The lexer turns a source buffer into a [`TokenPool`]: an append-only
//! sequence of [`Token`]s, each carrying a category, a fine-grained kind,
//! a literal payload and its begin/end source positions. Whitespace and
//! comments are real tokens in the pool; the parser-facing stream skips
//! them.
//!
//! Scanning is direct-coded: [`Lexer::scan_one`] dispatches on the first
//! character of the next token to one specialised routine per token
//! family. Errors are per-token and recoverable - the cursor is always
//! advanced past the offending character, so a driver may abort or skip a
//! rune and retry ([`ErrorPolicy`]).
//!
//! ```
//! use primc_lex::{Lexer, TokenKind};
//!
//! let mut lexer = Lexer::new("while (i < 10)");
//! let token = lexer.scan_one().unwrap();
//! assert_eq!(token.kind, TokenKind::While);
//! ```

pub mod cursor;
pub mod error;
pub mod lexer;
pub mod token;

#[cfg(test)]
mod edge_cases;

pub use cursor::Cursor;
pub use error::LexError;
pub use lexer::{ErrorPolicy, Lexer};
pub use token::{Lit, Token, TokenCategory, TokenKind, TokenPool};

use std::io;
use std::path::Path;

/// Read a source file into memory.
///
/// The single blocking read of the pipeline; every later stage works on
/// the returned buffer.
pub fn read_source(path: &Path) -> io::Result<String> {
    std::fs::read_to_string(path)
}
