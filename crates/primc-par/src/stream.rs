//! The parser-facing token stream.
//!
//! Wraps the lexer's pool with a cursor and a one-token read width, so a
//! single pushback is always valid. Space and comment tokens are skipped
//! transparently on every read; past the end of the pool the stream hands
//! out freshly-built EOF tokens (at position zero) forever.

use primc_lex::{Token, TokenKind, TokenPool};
use primc_util::position::PositionPair;

use crate::error::{ParseError, ParseResult};

/// Random-access view over a [`TokenPool`] with single-token pushback.
pub struct TokenStream<'a> {
    pool: &'a TokenPool,
    pos: usize,
    width: usize,
}

impl<'a> TokenStream<'a> {
    /// Create a stream at the start of the pool.
    pub fn new(pool: &'a TokenPool) -> Self {
        Self {
            pool,
            pos: 0,
            width: 0,
        }
    }

    /// Return the next non-skipped token and advance.
    ///
    /// Beyond the end of the pool this returns an EOF token at position
    /// zero, indefinitely.
    pub fn read(&mut self) -> Token {
        loop {
            match self.pool.get(self.pos) {
                None => {
                    self.width = 0;
                    return Token::eof(PositionPair::DUMMY);
                }
                Some(token) if token.kind.is_skipped() => {
                    self.pos += 1;
                }
                Some(token) => {
                    self.pos += 1;
                    self.width = 1;
                    return *token;
                }
            }
        }
    }

    /// Roll back exactly one [`read`](Self::read).
    ///
    /// A second unread with no read in between is a no-op.
    pub fn unread(&mut self) {
        self.pos -= self.width;
        self.width = 0;
    }

    /// Look at the next token without consuming it.
    pub fn peek(&mut self) -> Token {
        let token = self.read();
        self.unread();
        token
    }

    /// Read a token if its kind is in `kinds`; otherwise unread and hand
    /// back the non-matching token as the error value.
    pub fn accept_kinds(&mut self, kinds: &[TokenKind]) -> Result<Token, Token> {
        let token = self.read();
        if kinds.contains(&token.kind) {
            Ok(token)
        } else {
            self.unread();
            Err(token)
        }
    }

    /// Read a token if `pred` accepts it; otherwise unread and hand back
    /// the non-matching token.
    pub fn accept_if(&mut self, pred: impl Fn(&Token) -> bool) -> Result<Token, Token> {
        let token = self.read();
        if pred(&token) {
            Ok(token)
        } else {
            self.unread();
            Err(token)
        }
    }

    /// Like [`accept_kinds`](Self::accept_kinds), but a mismatch is a
    /// fatal syntax error described by `expected`.
    pub fn expect_kinds(&mut self, kinds: &[TokenKind], expected: &str) -> ParseResult<Token> {
        self.accept_kinds(kinds)
            .map_err(|found| ParseError::UnexpectedToken {
                expected: expected.to_owned(),
                found: found.to_string(),
                pos: found.pos,
            })
    }

    /// Like [`accept_if`](Self::accept_if), but fatal on mismatch.
    pub fn expect_if(
        &mut self,
        pred: impl Fn(&Token) -> bool,
        expected: &str,
    ) -> ParseResult<Token> {
        self.accept_if(pred)
            .map_err(|found| ParseError::UnexpectedToken {
                expected: expected.to_owned(),
                found: found.to_string(),
                pos: found.pos,
            })
    }

    /// Consume a token of one of the given kinds if present.
    pub fn eat_kinds(&mut self, kinds: &[TokenKind]) -> Option<Token> {
        self.accept_kinds(kinds).ok()
    }
}
