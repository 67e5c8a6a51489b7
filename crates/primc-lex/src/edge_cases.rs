//! Whole-lexer edge cases and lexer-level properties.

use proptest::prelude::*;

use crate::{ErrorPolicy, Lexer, TokenKind};

#[test]
fn eof_is_idempotent() {
    let mut lexer = Lexer::new("");
    for _ in 0..3 {
        let token = lexer.scan_one().unwrap();
        assert_eq!(token.kind, TokenKind::EofLiteral);
    }
}

#[test]
fn whitespace_only_input() {
    let (pool, errors) = Lexer::new("  \t\r\n  ").tokenize(ErrorPolicy::Abort);
    assert!(errors.is_empty());
    assert_eq!(pool.len(), 2);
    assert_eq!(pool.get(0).unwrap().kind, TokenKind::Space);
    assert_eq!(pool.get(1).unwrap().kind, TokenKind::EofLiteral);
}

#[test]
fn whitespace_and_comments_stay_in_pool() {
    let (pool, errors) = Lexer::new("a /* c */ b // d").tokenize(ErrorPolicy::Abort);
    assert!(errors.is_empty());
    let kinds: Vec<_> = pool.iter().map(|t| t.kind).collect();
    assert!(kinds.contains(&TokenKind::Space));
    assert!(kinds.contains(&TokenKind::BlockComment));
    assert!(kinds.contains(&TokenKind::LineComment));
}

#[test]
fn statement_shaped_input() {
    let (pool, errors) = Lexer::new("int a;\na = 1 + 2;").tokenize(ErrorPolicy::Abort);
    assert!(errors.is_empty());
    let kinds: Vec<_> = pool
        .iter()
        .filter(|t| !t.kind.is_skipped())
        .map(|t| t.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Int,
            TokenKind::Identifier,
            TokenKind::Semicolon,
            TokenKind::Identifier,
            TokenKind::Assign,
            TokenKind::IntegerLiteral,
            TokenKind::Plus,
            TokenKind::IntegerLiteral,
            TokenKind::Semicolon,
            TokenKind::EofLiteral,
        ]
    );
}

#[test]
fn unknown_char_skip_policy_recovers() {
    let (pool, errors) = Lexer::new("a @ b").tokenize(ErrorPolicy::SkipRune);
    assert_eq!(errors.len(), 1);
    let idents: usize = pool
        .iter()
        .filter(|t| t.kind == TokenKind::Identifier)
        .count();
    assert_eq!(idents, 2);
    assert_eq!(pool.last().unwrap().kind, TokenKind::EofLiteral);
}

#[test]
fn unknown_char_abort_policy_stops() {
    let (pool, errors) = Lexer::new("a @ b").tokenize(ErrorPolicy::Abort);
    assert_eq!(errors.len(), 1);
    assert!(pool.iter().all(|t| t.kind != TokenKind::EofLiteral));
    let idents = pool
        .iter()
        .filter(|t| t.kind == TokenKind::Identifier)
        .count();
    assert_eq!(idents, 1);
}

#[test]
fn error_advances_cursor() {
    // Two bad characters in a row: each scan consumes exactly one.
    let mut lexer = Lexer::new("@#x");
    assert!(lexer.scan_one().is_err());
    assert!(lexer.scan_one().is_err());
    let token = lexer.scan_one().unwrap();
    assert_eq!(token.kind, TokenKind::Identifier);
}

proptest! {
    /// Lexer totality: any input yields a finite token sequence ending in
    /// exactly one EOF token under the skip policy.
    #[test]
    fn prop_totality(source in ".{0,200}") {
        let (pool, _errors) = Lexer::new(&source).tokenize(ErrorPolicy::SkipRune);
        let eof_count = pool
            .iter()
            .filter(|t| t.kind == TokenKind::EofLiteral)
            .count();
        prop_assert_eq!(eof_count, 1);
        prop_assert_eq!(pool.last().unwrap().kind, TokenKind::EofLiteral);
    }

    /// Begin positions are non-decreasing across the pool.
    #[test]
    fn prop_position_monotonicity(source in "[a-z0-9 ;(){}=<>+*/,.\"'\\-\n\t]{0,200}") {
        let (pool, _errors) = Lexer::new(&source).tokenize(ErrorPolicy::SkipRune);
        let begins: Vec<_> = pool.iter().map(|t| t.pos.begin).collect();
        prop_assert!(begins.windows(2).all(|w| w[0] <= w[1]));
    }
}
