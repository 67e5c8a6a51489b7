//! Operator scanning.
//!
//! Two-character operators (`==`, `<=`, `>=`, `<>`) win over their
//! one-character prefixes on lookahead. The `-` routine decides between
//! the subtraction operator and a numeric sign from the preceding-token
//! context (see `Lexer::minus_is_sign`).

use crate::error::LexError;
use crate::token::{Lit, Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    pub(crate) fn scan_equals(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.current_char() == '=' {
            self.cursor.advance();
            self.token(TokenKind::Equal, Lit::None)
        } else {
            self.token(TokenKind::Assign, Lit::None)
        }
    }

    pub(crate) fn scan_less(&mut self) -> Token {
        self.cursor.advance();
        match self.cursor.current_char() {
            '=' => {
                self.cursor.advance();
                self.token(TokenKind::LessEqual, Lit::None)
            }
            '>' => {
                self.cursor.advance();
                self.token(TokenKind::Diamond, Lit::None)
            }
            _ => self.token(TokenKind::Less, Lit::None),
        }
    }

    pub(crate) fn scan_greater(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.current_char() == '=' {
            self.cursor.advance();
            self.token(TokenKind::GreaterEqual, Lit::None)
        } else {
            self.token(TokenKind::Greater, Lit::None)
        }
    }

    pub(crate) fn scan_minus(&mut self) -> Result<Token, LexError> {
        self.cursor.advance();
        if self.minus_is_sign() && self.cursor.current_char().is_ascii_digit() {
            return self.scan_number();
        }
        Ok(self.token(TokenKind::Minus, Lit::None))
    }
}
