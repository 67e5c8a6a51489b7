//! Core lexer: state, dispatch and the whole-input driver.

use primc_util::position::{Position, PositionPair};

use crate::cursor::Cursor;
use crate::error::LexError;
use crate::token::{Lit, Token, TokenKind, TokenPool};

/// What [`Lexer::tokenize`] does when a token fails to scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Record the error and stop scanning.
    Abort,
    /// Record the error and keep scanning from the next rune. The cursor
    /// is already past the offending character when an error comes back,
    /// so retrying is always safe.
    SkipRune,
}

/// Lexer for Prim source text.
///
/// Scans one token per [`Lexer::scan_one`] call. Whitespace runs and
/// comments are emitted as tokens; the parser-facing stream filters them
/// later.
pub struct Lexer<'a> {
    /// Character cursor over the source.
    pub(crate) cursor: Cursor<'a>,

    /// Position where the token currently being scanned began.
    pub(crate) token_start: Position,

    /// Kind of the last significant (non-space, non-comment) token.
    /// Drives the minus-folding decision: after an identifier, a numeric
    /// literal or `)`, a `-` is the subtraction operator, not a sign.
    prev_significant: Option<TokenKind>,
}

impl<'a> Lexer<'a> {
    /// Create a lexer over the given source buffer.
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            token_start: Position::new(1, 1, 0),
            prev_significant: None,
        }
    }

    /// Scan the next token.
    ///
    /// Returns the token, or a diagnosable error with the cursor advanced
    /// past the offending character. At end of input this returns the EOF
    /// token, idempotently.
    pub fn scan_one(&mut self) -> Result<Token, LexError> {
        self.token_start = self.cursor.pos();

        if self.cursor.is_at_end() {
            return Ok(Token::eof(PositionPair::point(self.cursor.pos())));
        }

        let result = match self.cursor.current_char() {
            ' ' | '\t' | '\r' | '\n' => Ok(self.scan_space()),
            '{' => Ok(self.single(TokenKind::LBrace)),
            '}' => Ok(self.single(TokenKind::RBrace)),
            '(' => Ok(self.single(TokenKind::LParen)),
            ')' => Ok(self.single(TokenKind::RParen)),
            ';' => Ok(self.single(TokenKind::Semicolon)),
            ',' => Ok(self.single(TokenKind::Comma)),
            '=' => Ok(self.scan_equals()),
            '<' => Ok(self.scan_less()),
            '>' => Ok(self.scan_greater()),
            '+' => Ok(self.single(TokenKind::Plus)),
            '*' => Ok(self.single(TokenKind::Times)),
            '-' => self.scan_minus(),
            '/' => self.scan_slash(),
            '"' => self.scan_string(),
            '\'' => self.scan_char(),
            c if c.is_ascii_alphabetic() || c == '$' => Ok(self.scan_identifier()),
            c if c.is_ascii_digit() => self.scan_number(),
            c => {
                self.cursor.advance();
                Err(LexError::UnexpectedChar {
                    ch: c,
                    pos: self.span(),
                })
            }
        };

        if let Ok(token) = &result {
            if !token.kind.is_skipped() && token.kind != TokenKind::EofLiteral {
                self.prev_significant = Some(token.kind);
            }
        }
        result
    }

    /// Scan the whole input into a pool, applying `policy` to errors.
    ///
    /// Under [`ErrorPolicy::SkipRune`] the pool always ends with exactly
    /// one EOF token; under [`ErrorPolicy::Abort`] scanning stops at the
    /// first error.
    pub fn tokenize(mut self, policy: ErrorPolicy) -> (TokenPool, Vec<LexError>) {
        let mut pool = TokenPool::new();
        let mut errors = Vec::new();

        loop {
            match self.scan_one() {
                Ok(token) => {
                    let is_eof = token.kind == TokenKind::EofLiteral;
                    pool.add(token);
                    if is_eof {
                        break;
                    }
                }
                Err(error) => {
                    errors.push(error);
                    if policy == ErrorPolicy::Abort {
                        break;
                    }
                }
            }
        }

        (pool, errors)
    }

    /// True when a `-` here would be a numeric sign rather than the
    /// subtraction operator.
    pub(crate) fn minus_is_sign(&self) -> bool {
        !matches!(
            self.prev_significant,
            Some(
                TokenKind::Identifier
                    | TokenKind::IntegerLiteral
                    | TokenKind::DecimalLiteral
                    | TokenKind::RParen
            )
        )
    }

    /// The region from the token start to the last consumed character.
    pub(crate) fn span(&self) -> PositionPair {
        PositionPair::new(self.token_start, self.cursor.last_pos())
    }

    /// Build a token covering the current span.
    pub(crate) fn token(&self, kind: TokenKind, lit: Lit) -> Token {
        Token::new(kind, lit, self.span())
    }

    /// Consume one character and emit a payload-less token.
    pub(crate) fn single(&mut self, kind: TokenKind) -> Token {
        self.cursor.advance();
        self.token(kind, Lit::None)
    }

    /// Consume a maximal run of whitespace as one SPACE token.
    fn scan_space(&mut self) -> Token {
        while matches!(self.cursor.current_char(), ' ' | '\t' | '\r' | '\n') {
            self.cursor.advance();
        }
        self.token(TokenKind::Space, Lit::None)
    }
}
