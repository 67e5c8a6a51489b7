//! AST node definitions.
//!
//! The tree mirrors the grammar: a [`Program`] is a sequence of
//! [`Method`]s, a method body is a [`Block`] of [`Stmt`]s, and expressions
//! form the six-level layered grammar with at most one binary operator
//! per level. Each level has an explicit leaf arm and a binary arm -
//! there is no "empty operator" sentinel.
//!
//! Nodes derive `Serialize` for the driver's JSON dump; source positions
//! are skipped there. The `Display` impls render canonical source text,
//! which re-lexes to a token stream equivalent to the original (modulo
//! whitespace and comments).

use std::fmt;

use primc_lex::{Token, TokenKind};
use primc_util::position::PositionPair;
use primc_util::symbol::Symbol;
use serde::Serialize;

/// An identifier occurrence with its source position.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Ident {
    pub name: Symbol,
    #[serde(skip)]
    pub pos: PositionPair,
}

impl Ident {
    pub fn new(name: Symbol, pos: PositionPair) -> Self {
        Self { name, pos }
    }
}

/// A method's declared return type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ResultType {
    Void,
    Int,
    Float,
    Char,
    Str,
}

impl ResultType {
    /// Map a result-type keyword token kind, if it is one.
    pub fn from_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Void => Some(ResultType::Void),
            TokenKind::Int => Some(ResultType::Int),
            TokenKind::Float => Some(ResultType::Float),
            TokenKind::CharKw => Some(ResultType::Char),
            TokenKind::StringKw => Some(ResultType::Str),
            _ => None,
        }
    }

    fn text(self) -> &'static str {
        match self {
            ResultType::Void => "void",
            ResultType::Int => "int",
            ResultType::Float => "float",
            ResultType::Char => "char",
            ResultType::Str => "string",
        }
    }
}

/// A variable's declared type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum TypeName {
    Int,
    Float,
    Char,
    Str,
}

impl TypeName {
    /// Map a type keyword token kind, if it is one.
    pub fn from_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Int => Some(TypeName::Int),
            TokenKind::Float => Some(TypeName::Float),
            TokenKind::CharKw => Some(TypeName::Char),
            TokenKind::StringKw => Some(TypeName::Str),
            _ => None,
        }
    }

    fn text(self) -> &'static str {
        match self {
            TypeName::Int => "int",
            TypeName::Float => "float",
            TypeName::Char => "char",
            TypeName::Str => "string",
        }
    }
}

/// The parse tree root: an ordered sequence of methods.
#[derive(Clone, Debug, Serialize)]
pub struct Program {
    pub methods: Vec<Method>,
}

/// One method definition.
#[derive(Clone, Debug, Serialize)]
pub struct Method {
    pub result_type: ResultType,
    pub name: Ident,
    pub params: Vec<Param>,
    pub body: Block,
}

/// A formal parameter.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Param {
    pub ty: TypeName,
    pub name: Ident,
}

/// A brace-delimited statement sequence.
#[derive(Clone, Debug, Serialize)]
pub struct Block {
    pub statements: Vec<Stmt>,
}

/// One statement.
#[derive(Clone, Debug, Serialize)]
pub enum Stmt {
    Conditional(ConditionalStmt),
    Loop(LoopStmt),
    Call(CallStmt),
    Assign(AssignStmt),
    Return(ReturnStmt),
    Break {
        #[serde(skip)]
        pos: PositionPair,
    },
    Continue {
        #[serde(skip)]
        pos: PositionPair,
    },
    LocalDecl(LocalDecl),
    Block(Block),
    Empty,
}

/// `if ( cond ) stmt [else stmt]`
#[derive(Clone, Debug, Serialize)]
pub struct ConditionalStmt {
    pub cond: CondExp,
    pub then_body: Box<Stmt>,
    /// Present iff the `else` keyword was consumed.
    pub else_body: Option<Box<Stmt>>,
}

/// `while ( cond ) stmt`
#[derive(Clone, Debug, Serialize)]
pub struct LoopStmt {
    pub cond: CondExp,
    pub body: Box<Stmt>,
}

/// `call id ( args ) ;`
#[derive(Clone, Debug, Serialize)]
pub struct CallStmt {
    pub callee: Ident,
    pub args: Vec<Exp>,
}

/// `id = exp ;`
#[derive(Clone, Debug, Serialize)]
pub struct AssignStmt {
    pub target: Ident,
    pub value: Exp,
}

/// `return [exp] ;`
#[derive(Clone, Debug, Serialize)]
pub struct ReturnStmt {
    pub value: Option<Exp>,
    #[serde(skip)]
    pub pos: PositionPair,
}

/// `type id {, id} ;`
#[derive(Clone, Debug, Serialize)]
pub struct LocalDecl {
    pub ty: TypeName,
    pub names: Vec<Ident>,
}

/// `or` level.
#[derive(Clone, Debug, Serialize)]
pub enum CondExp {
    Relation(RelationExp),
    Or {
        left: RelationExp,
        right: RelationExp,
    },
}

/// `and` level.
#[derive(Clone, Debug, Serialize)]
pub enum RelationExp {
    Comp(CompExp),
    And { left: CompExp, right: CompExp },
}

/// Comparison level: `< <= > >= == <>`.
#[derive(Clone, Debug, Serialize)]
pub enum CompExp {
    Exp(Exp),
    Cmp { left: Exp, op: Token, right: Exp },
}

/// Additive level: `+ -`.
#[derive(Clone, Debug, Serialize)]
pub enum Exp {
    Term(Term),
    Binary { left: Term, op: Token, right: Term },
}

/// Multiplicative level: `* /`.
#[derive(Clone, Debug, Serialize)]
pub enum Term {
    Factor(Factor),
    Binary {
        left: Factor,
        op: Token,
        right: Factor,
    },
}

/// The atoms: identifier, integer literal, decimal literal, or a
/// parenthesised expression. Exactly one of these, always.
#[derive(Clone, Debug, Serialize)]
pub enum Factor {
    Id(Ident),
    Int {
        value: i64,
        #[serde(skip)]
        pos: PositionPair,
    },
    Float {
        value: f64,
        #[serde(skip)]
        pos: PositionPair,
    },
    Paren(Box<Exp>),
}

// ---------------------------------------------------------------------------
// Canonical source rendering
// ---------------------------------------------------------------------------

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, method) in self.methods.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", method)?;
        }
        Ok(())
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}(", self.result_type.text(), self.name.name)?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} {}", param.ty.text(), param.name.name)?;
        }
        write!(f, ") {}", self.body)
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for stmt in &self.statements {
            write!(f, " {}", stmt)?;
        }
        write!(f, " }}")
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Conditional(s) => {
                write!(f, "if ({}) {}", s.cond, s.then_body)?;
                if let Some(else_body) = &s.else_body {
                    write!(f, " else {}", else_body)?;
                }
                Ok(())
            }
            Stmt::Loop(s) => write!(f, "while ({}) {}", s.cond, s.body),
            Stmt::Call(s) => {
                write!(f, "call {}(", s.callee.name)?;
                for (i, arg) in s.args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ");")
            }
            Stmt::Assign(s) => write!(f, "{} = {};", s.target.name, s.value),
            Stmt::Return(s) => match &s.value {
                Some(value) => write!(f, "return {};", value),
                None => write!(f, "return;"),
            },
            Stmt::Break { .. } => write!(f, "break;"),
            Stmt::Continue { .. } => write!(f, "continue;"),
            Stmt::LocalDecl(s) => {
                write!(f, "{} ", s.ty.text())?;
                for (i, name) in s.names.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", name.name)?;
                }
                write!(f, ";")
            }
            Stmt::Block(block) => write!(f, "{}", block),
            Stmt::Empty => write!(f, ";"),
        }
    }
}

impl fmt::Display for CondExp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CondExp::Relation(e) => write!(f, "{}", e),
            CondExp::Or { left, right } => write!(f, "{} or {}", left, right),
        }
    }
}

impl fmt::Display for RelationExp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationExp::Comp(e) => write!(f, "{}", e),
            RelationExp::And { left, right } => write!(f, "{} and {}", left, right),
        }
    }
}

impl fmt::Display for CompExp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompExp::Exp(e) => write!(f, "{}", e),
            CompExp::Cmp { left, op, right } => {
                write!(f, "{} {} {}", left, op.kind.text(), right)
            }
        }
    }
}

impl fmt::Display for Exp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exp::Term(t) => write!(f, "{}", t),
            Exp::Binary { left, op, right } => {
                write!(f, "{} {} {}", left, op.kind.text(), right)
            }
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Factor(factor) => write!(f, "{}", factor),
            Term::Binary { left, op, right } => {
                write!(f, "{} {} {}", left, op.kind.text(), right)
            }
        }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Factor::Id(id) => write!(f, "{}", id.name),
            Factor::Int { value, .. } => write!(f, "{}", value),
            Factor::Float { value, .. } => {
                // Keep the dot so the rendering lexes back as a decimal.
                if value.fract() == 0.0 {
                    write!(f, "{:.1}", value)
                } else {
                    write!(f, "{}", value)
                }
            }
            Factor::Paren(exp) => write!(f, "({})", exp),
        }
    }
}
