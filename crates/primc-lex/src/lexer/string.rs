//! String and char literal scanning.
//!
//! String payloads store the escape-applied text (a raw tab in the source
//! becomes `\t` in the payload); char payloads store the raw codepoint.
//! The empty char literal `''` is legal and carries no codepoint.

use primc_util::escape::escape_string;
use primc_util::symbol::Symbol;

use crate::error::LexError;
use crate::token::{Lit, Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    pub(crate) fn scan_string(&mut self) -> Result<Token, LexError> {
        self.cursor.advance(); // opening quote
        let content_start = self.cursor.offset();

        loop {
            if self.cursor.is_at_end() {
                return Err(LexError::UnterminatedString { pos: self.span() });
            }
            if self.cursor.current_char() == '"' {
                let raw = self.cursor.slice_from(content_start);
                let payload = Symbol::intern(&escape_string(raw));
                self.cursor.advance(); // closing quote
                return Ok(self.token(TokenKind::StringLiteral, Lit::Str(payload)));
            }
            self.cursor.advance();
        }
    }

    pub(crate) fn scan_char(&mut self) -> Result<Token, LexError> {
        self.cursor.advance(); // opening quote

        if self.cursor.is_at_end() {
            return Err(LexError::UnterminatedChar { pos: self.span() });
        }
        if self.cursor.current_char() == '\'' {
            self.cursor.advance();
            return Ok(self.token(TokenKind::CharLiteral, Lit::Char(None)));
        }

        let c = self.cursor.current_char();
        self.cursor.advance();
        if c == '\n' {
            return Err(LexError::UnterminatedChar { pos: self.span() });
        }

        if self.cursor.current_char() == '\'' {
            self.cursor.advance();
            Ok(self.token(TokenKind::CharLiteral, Lit::Char(Some(c))))
        } else {
            if !self.cursor.is_at_end() {
                self.cursor.advance();
            }
            Err(LexError::UnterminatedChar { pos: self.span() })
        }
    }
}
