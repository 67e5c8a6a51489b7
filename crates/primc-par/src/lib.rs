//! primc-par - Recursive-descent parser for Prim.
//!
//! The parser consumes the lexer's [`TokenPool`] through a
//! [`TokenStream`] (which skips whitespace and comment tokens and hands
//! out EOF tokens past the end) and builds the [`ast`] parse tree. One
//! subroutine per production; dispatch is LL(1) on the first token of
//! each construct.
//!
//! Every expression level accepts at most one binary operator - a
//! deliberate grammar restriction, so `a + b + c` is a syntax error.
//! Syntax errors are fatal: parsing stops and the error propagates to the
//! driver.
//!
//! ```
//! use primc_lex::{ErrorPolicy, Lexer};
//! use primc_par::Parser;
//!
//! let (pool, _) = Lexer::new("void main() { return; }").tokenize(ErrorPolicy::Abort);
//! let program = Parser::new(&pool).parse_program().unwrap();
//! assert_eq!(program.methods.len(), 1);
//! ```

pub mod ast;
pub mod error;
pub mod expr;
pub mod stmt;
pub mod stream;

#[cfg(test)]
mod edge_cases;

pub use error::{ParseError, ParseResult};
pub use stream::TokenStream;

use primc_lex::{TokenKind, TokenPool};

use ast::{Ident, Method, Param, Program, ResultType, TypeName};

/// The token kinds that can open a method definition.
const RESULT_TYPE_KINDS: &[TokenKind] = &[
    TokenKind::Void,
    TokenKind::Int,
    TokenKind::Float,
    TokenKind::CharKw,
    TokenKind::StringKw,
];

/// The token kinds that name a variable type.
pub(crate) const TYPE_KINDS: &[TokenKind] = &[
    TokenKind::Int,
    TokenKind::Float,
    TokenKind::CharKw,
    TokenKind::StringKw,
];

/// Recursive-descent parser over a token stream.
pub struct Parser<'a> {
    pub(crate) stream: TokenStream<'a>,
}

impl<'a> Parser<'a> {
    /// Create a parser over a token pool.
    pub fn new(pool: &'a TokenPool) -> Self {
        Self {
            stream: TokenStream::new(pool),
        }
    }

    /// Program := { Method } EOF
    pub fn parse_program(&mut self) -> ParseResult<Program> {
        let mut methods = Vec::new();
        while self.stream.peek().kind != TokenKind::EofLiteral {
            methods.push(self.parse_method()?);
        }
        Ok(Program { methods })
    }

    /// Method := ResultType ID '(' ParamList ')' Block
    fn parse_method(&mut self) -> ParseResult<Method> {
        let rt = self
            .stream
            .expect_if(|t| RESULT_TYPE_KINDS.contains(&t.kind), "a result type")?;
        let result_type = ResultType::from_kind(rt.kind).unwrap();
        let name = self.expect_ident("a method name")?;
        self.stream.expect_kinds(&[TokenKind::LParen], "'('")?;
        let params = self.parse_param_list()?;
        self.stream.expect_kinds(&[TokenKind::RParen], "')'")?;
        let body = self.parse_block()?;
        Ok(Method {
            result_type,
            name,
            params,
            body,
        })
    }

    /// ParamList := [ Type ID { ',' Type ID } ]
    fn parse_param_list(&mut self) -> ParseResult<Vec<Param>> {
        let mut params = Vec::new();
        if self.stream.peek().kind == TokenKind::RParen {
            return Ok(params);
        }
        loop {
            let ty_tok = self.stream.expect_kinds(TYPE_KINDS, "a parameter type")?;
            let ty = TypeName::from_kind(ty_tok.kind).unwrap();
            let name = self.expect_ident("a parameter name")?;
            params.push(Param { ty, name });
            if self.stream.eat_kinds(&[TokenKind::Comma]).is_none() {
                break;
            }
        }
        Ok(params)
    }

    /// Consume an identifier token into an [`Ident`].
    pub(crate) fn expect_ident(&mut self, expected: &str) -> ParseResult<Ident> {
        let token = self
            .stream
            .expect_kinds(&[TokenKind::Identifier], expected)?;
        match token.ident() {
            Some(name) => Ok(Ident::new(name, token.pos)),
            None => Err(error::ParseError::UnexpectedToken {
                expected: expected.to_owned(),
                found: token.to_string(),
                pos: token.pos,
            }),
        }
    }
}
