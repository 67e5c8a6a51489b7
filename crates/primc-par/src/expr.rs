//! Expression productions.
//!
//! Six levels, loosest binding first: `or`, `and`, comparison, additive,
//! multiplicative, factor. Each level parses a left operand, optionally
//! consumes exactly one operator from its set, and parses a right
//! operand. A third operand at the same level is left in the stream for
//! the caller to trip over.

use primc_lex::{Lit, TokenKind};

use crate::ast::{CompExp, CondExp, Exp, Factor, Ident, RelationExp, Term};
use crate::error::{ParseError, ParseResult};
use crate::Parser;

/// Comparison operator kinds.
const CMP_KINDS: &[TokenKind] = &[
    TokenKind::Less,
    TokenKind::LessEqual,
    TokenKind::Greater,
    TokenKind::GreaterEqual,
    TokenKind::Equal,
    TokenKind::Diamond,
];

impl<'a> Parser<'a> {
    /// CondExp := RelationExp [ 'or' RelationExp ]
    pub(crate) fn parse_cond_exp(&mut self) -> ParseResult<CondExp> {
        let left = self.parse_relation_exp()?;
        if self.stream.eat_kinds(&[TokenKind::Or]).is_some() {
            let right = self.parse_relation_exp()?;
            Ok(CondExp::Or { left, right })
        } else {
            Ok(CondExp::Relation(left))
        }
    }

    /// RelationExp := CompExp [ 'and' CompExp ]
    fn parse_relation_exp(&mut self) -> ParseResult<RelationExp> {
        let left = self.parse_comp_exp()?;
        if self.stream.eat_kinds(&[TokenKind::And]).is_some() {
            let right = self.parse_comp_exp()?;
            Ok(RelationExp::And { left, right })
        } else {
            Ok(RelationExp::Comp(left))
        }
    }

    /// CompExp := Exp [ CmpOp Exp ]
    fn parse_comp_exp(&mut self) -> ParseResult<CompExp> {
        let left = self.parse_exp()?;
        if let Some(op) = self.stream.eat_kinds(CMP_KINDS) {
            let right = self.parse_exp()?;
            Ok(CompExp::Cmp { left, op, right })
        } else {
            Ok(CompExp::Exp(left))
        }
    }

    /// Exp := Term [ ('+' | '-') Term ]
    pub(crate) fn parse_exp(&mut self) -> ParseResult<Exp> {
        let left = self.parse_term()?;
        if let Some(op) = self.stream.eat_kinds(&[TokenKind::Plus, TokenKind::Minus]) {
            let right = self.parse_term()?;
            Ok(Exp::Binary { left, op, right })
        } else {
            Ok(Exp::Term(left))
        }
    }

    /// Term := Factor [ ('*' | '/') Factor ]
    fn parse_term(&mut self) -> ParseResult<Term> {
        let left = self.parse_factor()?;
        if let Some(op) = self.stream.eat_kinds(&[TokenKind::Times, TokenKind::Divide]) {
            let right = self.parse_factor()?;
            Ok(Term::Binary { left, op, right })
        } else {
            Ok(Term::Factor(left))
        }
    }

    /// Factor := ID | IntegerLiteral | DecimalLiteral | '(' Exp ')'
    fn parse_factor(&mut self) -> ParseResult<Factor> {
        let token = self.stream.read();
        match (token.kind, token.lit) {
            (TokenKind::Identifier, Lit::Str(name)) => Ok(Factor::Id(Ident::new(name, token.pos))),
            (TokenKind::IntegerLiteral, Lit::Int(value)) => Ok(Factor::Int {
                value,
                pos: token.pos,
            }),
            (TokenKind::DecimalLiteral, Lit::Float(value)) => Ok(Factor::Float {
                value,
                pos: token.pos,
            }),
            (TokenKind::LParen, _) => {
                let exp = self.parse_exp()?;
                self.stream.expect_kinds(&[TokenKind::RParen], "')'")?;
                Ok(Factor::Paren(Box::new(exp)))
            }
            _ => Err(ParseError::UnexpectedToken {
                expected: "a factor".to_owned(),
                found: token.to_string(),
                pos: token.pos,
            }),
        }
    }
}
