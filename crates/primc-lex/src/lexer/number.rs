//! Numeric literal scanning.
//!
//! Integers are `-?[0-9]+`, decimals `-?[0-9]+\.[0-9]*`. A second `.` in
//! one literal is an error. The sign is consumed by the caller
//! (`scan_minus`) before this routine runs, so `start` here is the token
//! start recorded in the lexer, which covers the sign when present.

use primc_util::number::{parse_float, parse_int};

use crate::error::LexError;
use crate::token::{Lit, Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Scan digits (and at most one dot) starting at the current cursor
    /// position. A sign consumed by the caller is already inside the
    /// token span, so the slice handed to the parser carries it.
    pub(crate) fn scan_number(&mut self) -> Result<Token, LexError> {
        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }

        let mut is_float = false;
        if self.cursor.current_char() == '.' {
            is_float = true;
            self.cursor.advance();
            while self.cursor.current_char().is_ascii_digit() {
                self.cursor.advance();
            }
            if self.cursor.current_char() == '.' {
                self.cursor.advance();
                return Err(LexError::MultipleDots { pos: self.span() });
            }
        }

        let text = self.cursor.slice_from(self.token_start.offset);
        if is_float {
            match parse_float(text) {
                Ok(value) => Ok(self.token(TokenKind::DecimalLiteral, Lit::Float(value))),
                Err(source) => Err(LexError::BadNumber {
                    source,
                    pos: self.span(),
                }),
            }
        } else {
            match parse_int(text) {
                Ok(value) => Ok(self.token(TokenKind::IntegerLiteral, Lit::Int(value))),
                Err(source) => Err(LexError::BadNumber {
                    source,
                    pos: self.span(),
                }),
            }
        }
    }
}
