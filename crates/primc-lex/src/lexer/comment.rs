//! Comment scanning.
//!
//! `//` runs to end of line (the newline itself is left for the following
//! space token); `/*` runs to the matching `*/` and is an error if the
//! input ends first. Comment tokens stay in the pool - the parser-facing
//! stream skips them.

use primc_util::symbol::Symbol;

use crate::error::LexError;
use crate::token::{Lit, Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// `/` starts a line comment, a block comment, or the divide operator.
    pub(crate) fn scan_slash(&mut self) -> Result<Token, LexError> {
        self.cursor.advance();
        match self.cursor.current_char() {
            '/' => {
                self.cursor.advance();
                let content_start = self.cursor.offset();
                while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
                    self.cursor.advance();
                }
                let text = Symbol::intern(self.cursor.slice_from(content_start));
                Ok(self.token(TokenKind::LineComment, Lit::Str(text)))
            }
            '*' => {
                self.cursor.advance();
                let content_start = self.cursor.offset();
                loop {
                    if self.cursor.is_at_end() {
                        return Err(LexError::UnterminatedComment { pos: self.span() });
                    }
                    if self.cursor.current_char() == '*' && self.cursor.peek_char(1) == '/' {
                        let text = Symbol::intern(self.cursor.slice_from(content_start));
                        self.cursor.advance();
                        self.cursor.advance();
                        return Ok(self.token(TokenKind::BlockComment, Lit::Str(text)));
                    }
                    self.cursor.advance();
                }
            }
            _ => Ok(self.token(TokenKind::Divide, Lit::None)),
        }
    }
}
