//! Whole-parser edge cases, including the render/re-lex round trip.

use primc_lex::{ErrorPolicy, Lexer, TokenKind};

use crate::ast::Program;
use crate::Parser;

fn parse(source: &str) -> Program {
    let (pool, errors) = Lexer::new(source).tokenize(ErrorPolicy::Abort);
    assert!(errors.is_empty(), "lex errors: {:?}", errors);
    Parser::new(&pool).parse_program().unwrap()
}

fn significant_kinds(source: &str) -> Vec<TokenKind> {
    let (pool, errors) = Lexer::new(source).tokenize(ErrorPolicy::Abort);
    assert!(errors.is_empty());
    pool.iter()
        .filter(|t| !t.kind.is_skipped())
        .map(|t| t.kind)
        .collect()
}

/// Grammar acceptance: the rendered AST lexes back to the same
/// significant token sequence as the original source.
fn assert_round_trip(source: &str) {
    let program = parse(source);
    let rendered = program.to_string();
    assert_eq!(
        significant_kinds(source),
        significant_kinds(&rendered),
        "render diverged:\n{}",
        rendered
    );
    // And the rendering parses again.
    parse(&rendered);
}

#[test]
fn round_trip_minimal_main() {
    assert_round_trip("void main() { int a; a = 1 + 2; return a; }");
}

#[test]
fn round_trip_two_methods_and_call() {
    assert_round_trip(
        "int add(int x, int y) { return x + y; }\
         void main() { call add(3, 4); }",
    );
}

#[test]
fn round_trip_control_flow() {
    assert_round_trip(
        "void main() { int i; i = 0; \
         while (i < 10) { if (i == 5) break; else i = i + 1; } \
         return; }",
    );
}

#[test]
fn round_trip_condition_levels() {
    assert_round_trip("void main() { if (a < 1 and b > 2 or c == 3) ; }");
}

#[test]
fn round_trip_parenthesised() {
    assert_round_trip("void main() { x = (a + b) * (c - d); }");
}

#[test]
fn round_trip_decimals() {
    assert_round_trip("void main() { x = 2.5 / 1.0; y = -3.25; }");
}

#[test]
fn comments_are_transparent_to_parsing() {
    let with = parse("void main() { /* decl */ int a; // tail\n a = 1; }");
    let without = parse("void main() { int a; a = 1; }");
    assert_eq!(with.to_string(), without.to_string());
}

#[test]
fn deeply_nested_parens() {
    parse("void main() { x = ((((1)))); }");
}

#[test]
fn nested_blocks() {
    parse("void main() { { { int a; } } }");
}

#[test]
fn dollar_identifiers_parse() {
    let program = parse("void main() { int $while; $while = 1; }");
    assert!(program.to_string().contains("$while"));
}

#[test]
fn else_binds_to_inner_if() {
    // `else` attaches to the nearest `if`.
    let program = parse("void main() { if (a) if (b) x = 1; else x = 2; }");
    let rendered = program.to_string();
    // Outer if has no else, inner does.
    assert_eq!(rendered.matches("else").count(), 1);
    assert!(rendered.contains("if (b) x = 1; else x = 2;"));
}
