//! Statement and block productions.
//!
//! Statement dispatch reads one token and branches on its kind, exactly
//! as the grammar table prescribes: `call`, `if`, `while`, `return`,
//! `break`/`continue`, nested block, empty statement, assignment (from an
//! identifier) or local declaration (from a type keyword). Anything else
//! is a fatal syntax error.

use primc_lex::TokenKind;

use crate::ast::{
    AssignStmt, Block, CallStmt, ConditionalStmt, Exp, LocalDecl, LoopStmt, ReturnStmt, Stmt,
};
use crate::ast::TypeName;
use crate::error::{ParseError, ParseResult};
use crate::{Parser, TYPE_KINDS};

impl<'a> Parser<'a> {
    /// Block := '{' { Statement } '}'
    pub(crate) fn parse_block(&mut self) -> ParseResult<Block> {
        self.stream.expect_kinds(&[TokenKind::LBrace], "'{'")?;
        let mut statements = Vec::new();
        loop {
            if self.stream.eat_kinds(&[TokenKind::RBrace]).is_some() {
                break;
            }
            statements.push(self.parse_statement()?);
        }
        Ok(Block { statements })
    }

    /// Statement dispatch.
    pub(crate) fn parse_statement(&mut self) -> ParseResult<Stmt> {
        let token = self.stream.read();
        match token.kind {
            TokenKind::Call => self.parse_call_statement(),
            TokenKind::If => self.parse_conditional_statement(),
            TokenKind::While => self.parse_loop_statement(),
            TokenKind::Return => self.parse_return_statement(token.pos),
            TokenKind::Break => {
                self.stream.expect_kinds(&[TokenKind::Semicolon], "';'")?;
                Ok(Stmt::Break { pos: token.pos })
            }
            TokenKind::Continue => {
                self.stream.expect_kinds(&[TokenKind::Semicolon], "';'")?;
                Ok(Stmt::Continue { pos: token.pos })
            }
            TokenKind::LBrace => {
                self.stream.unread();
                Ok(Stmt::Block(self.parse_block()?))
            }
            TokenKind::Semicolon => Ok(Stmt::Empty),
            TokenKind::Identifier => {
                self.stream.unread();
                self.parse_assignment()
            }
            kind if TYPE_KINDS.contains(&kind) => {
                self.stream.unread();
                self.parse_local_declaration()
            }
            _ => Err(ParseError::UnexpectedToken {
                expected: "a statement".to_owned(),
                found: token.to_string(),
                pos: token.pos,
            }),
        }
    }

    /// CallStatement := 'call' ID '(' ActParamList ')' ';'
    fn parse_call_statement(&mut self) -> ParseResult<Stmt> {
        let callee = self.expect_ident("a method name")?;
        self.stream.expect_kinds(&[TokenKind::LParen], "'('")?;
        let args = self.parse_act_param_list()?;
        self.stream.expect_kinds(&[TokenKind::RParen], "')'")?;
        self.stream.expect_kinds(&[TokenKind::Semicolon], "';'")?;
        Ok(Stmt::Call(CallStmt { callee, args }))
    }

    /// ActParamList := [ Exp { ',' Exp } ]
    fn parse_act_param_list(&mut self) -> ParseResult<Vec<Exp>> {
        let mut args = Vec::new();
        if self.stream.peek().kind == TokenKind::RParen {
            return Ok(args);
        }
        loop {
            args.push(self.parse_exp()?);
            if self.stream.eat_kinds(&[TokenKind::Comma]).is_none() {
                break;
            }
        }
        Ok(args)
    }

    /// ConditionalStatement := 'if' '(' CondExp ')' Statement [ 'else' Statement ]
    fn parse_conditional_statement(&mut self) -> ParseResult<Stmt> {
        self.stream.expect_kinds(&[TokenKind::LParen], "'('")?;
        let cond = self.parse_cond_exp()?;
        self.stream.expect_kinds(&[TokenKind::RParen], "')'")?;
        let then_body = Box::new(self.parse_statement()?);
        let else_body = if self.stream.eat_kinds(&[TokenKind::Else]).is_some() {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };
        Ok(Stmt::Conditional(ConditionalStmt {
            cond,
            then_body,
            else_body,
        }))
    }

    /// LoopStatement := 'while' '(' CondExp ')' Statement
    fn parse_loop_statement(&mut self) -> ParseResult<Stmt> {
        self.stream.expect_kinds(&[TokenKind::LParen], "'('")?;
        let cond = self.parse_cond_exp()?;
        self.stream.expect_kinds(&[TokenKind::RParen], "')'")?;
        let body = Box::new(self.parse_statement()?);
        Ok(Stmt::Loop(LoopStmt { cond, body }))
    }

    /// ReturnStatement := 'return' [ Exp ] ';'
    fn parse_return_statement(
        &mut self,
        pos: primc_util::position::PositionPair,
    ) -> ParseResult<Stmt> {
        let value = if self.stream.peek().kind == TokenKind::Semicolon {
            None
        } else {
            Some(self.parse_exp()?)
        };
        self.stream.expect_kinds(&[TokenKind::Semicolon], "';'")?;
        Ok(Stmt::Return(ReturnStmt { value, pos }))
    }

    /// AssignmentStatement := ID '=' Exp ';'
    fn parse_assignment(&mut self) -> ParseResult<Stmt> {
        let target = self.expect_ident("an identifier")?;
        self.stream.expect_kinds(&[TokenKind::Assign], "'='")?;
        let value = self.parse_exp()?;
        self.stream.expect_kinds(&[TokenKind::Semicolon], "';'")?;
        Ok(Stmt::Assign(AssignStmt { target, value }))
    }

    /// LocalVariableDeclaration := Type ID { ',' ID } ';'
    fn parse_local_declaration(&mut self) -> ParseResult<Stmt> {
        let ty_tok = self.stream.expect_kinds(TYPE_KINDS, "a type")?;
        let ty = TypeName::from_kind(ty_tok.kind).unwrap();
        let mut names = vec![self.expect_ident("a variable name")?];
        while self.stream.eat_kinds(&[TokenKind::Comma]).is_some() {
            names.push(self.expect_ident("a variable name")?);
        }
        self.stream.expect_kinds(&[TokenKind::Semicolon], "';'")?;
        Ok(Stmt::LocalDecl(LocalDecl { ty, names }))
    }
}
