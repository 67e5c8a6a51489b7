//! Identifier and keyword scanning.
//!
//! Identifiers match `[A-Za-z$][A-Za-z0-9$]*`. Text equal to a reserved
//! word is retagged as that keyword, unless it starts with `$` - the `$`
//! prefix is the escape hatch that makes `$while` an ordinary identifier.

use primc_util::symbol::Symbol;

use crate::token::{Lit, Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    pub(crate) fn scan_identifier(&mut self) -> Token {
        let start = self.cursor.offset();
        loop {
            let c = self.cursor.current_char();
            if !c.is_ascii_alphanumeric() && c != '$' {
                break;
            }
            self.cursor.advance();
        }

        let text = self.cursor.slice_from(start);
        if !text.starts_with('$') {
            if let Some(kind) = TokenKind::keyword(text) {
                return self.token(kind, Lit::None);
            }
        }
        self.token(TokenKind::Identifier, Lit::Str(Symbol::intern(text)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    fn scan(source: &str) -> Token {
        Lexer::new(source).scan_one().unwrap()
    }

    #[test]
    fn test_plain_identifier() {
        let token = scan("counter");
        assert_eq!(token.kind, TokenKind::Identifier);
        assert_eq!(token.ident().unwrap().as_str(), "counter");
    }

    #[test]
    fn test_keyword_retagging() {
        assert_eq!(scan("while").kind, TokenKind::While);
        assert_eq!(scan("void").kind, TokenKind::Void);
        assert_eq!(scan("continue").kind, TokenKind::Continue);
    }

    #[test]
    fn test_dollar_suppresses_keywords() {
        let token = scan("$while");
        assert_eq!(token.kind, TokenKind::Identifier);
        assert_eq!(token.ident().unwrap().as_str(), "$while");
    }

    #[test]
    fn test_dollar_in_middle() {
        let token = scan("a$b1");
        assert_eq!(token.kind, TokenKind::Identifier);
        assert_eq!(token.ident().unwrap().as_str(), "a$b1");
    }

    #[test]
    fn test_identifier_stops_at_delimiter() {
        let token = scan("abc;");
        assert_eq!(token.ident().unwrap().as_str(), "abc");
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        let token = scan("whilex");
        assert_eq!(token.kind, TokenKind::Identifier);
    }
}
