//! The high-level IR.
//!
//! Structurally parallel to the AST, but normalised: operator tokens
//! become [`OpTag`] values from a closed enumeration, declared types
//! collapse to the closed [`Type`] set, and factors are a tagged variant
//! over identifier / integer / float / nested expression. The HIR is the
//! MIR generator's input and assumes semantic validation has passed.

use std::fmt;

use primc_lex::TokenKind;
use primc_par::ast;
use primc_util::symbol::Symbol;

/// The closed type set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Type {
    Err,
    Integer,
    Float,
    Char,
    Str,
    Void,
}

impl From<ast::TypeName> for Type {
    fn from(ty: ast::TypeName) -> Self {
        match ty {
            ast::TypeName::Int => Type::Integer,
            ast::TypeName::Float => Type::Float,
            ast::TypeName::Char => Type::Char,
            ast::TypeName::Str => Type::Str,
        }
    }
}

impl From<ast::ResultType> for Type {
    fn from(ty: ast::ResultType) -> Self {
        match ty {
            ast::ResultType::Void => Type::Void,
            ast::ResultType::Int => Type::Integer,
            ast::ResultType::Float => Type::Float,
            ast::ResultType::Char => Type::Char,
            ast::ResultType::Str => Type::Str,
        }
    }
}

/// Operator tags. The full closed set; expression nodes carry the tag
/// that matches their grammar level, and the leaf/binary split means no
/// node ever stores [`OpTag::Empty`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpTag {
    Empty,
    Plus,
    Minus,
    Times,
    Divide,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Equal,
    Diamond,
    And,
    Or,
}

impl OpTag {
    /// Re-tag an operator token kind. Non-operator kinds map to `Empty`.
    pub fn from_kind(kind: TokenKind) -> OpTag {
        match kind {
            TokenKind::Plus => OpTag::Plus,
            TokenKind::Minus => OpTag::Minus,
            TokenKind::Times => OpTag::Times,
            TokenKind::Divide => OpTag::Divide,
            TokenKind::Less => OpTag::Less,
            TokenKind::LessEqual => OpTag::LessEqual,
            TokenKind::Greater => OpTag::Greater,
            TokenKind::GreaterEqual => OpTag::GreaterEqual,
            TokenKind::Equal => OpTag::Equal,
            TokenKind::Diamond => OpTag::Diamond,
            TokenKind::And => OpTag::And,
            TokenKind::Or => OpTag::Or,
            _ => OpTag::Empty,
        }
    }

    /// The operator's source spelling (for generated comments).
    pub fn text(self) -> &'static str {
        match self {
            OpTag::Empty => "",
            OpTag::Plus => "+",
            OpTag::Minus => "-",
            OpTag::Times => "*",
            OpTag::Divide => "/",
            OpTag::Less => "<",
            OpTag::LessEqual => "<=",
            OpTag::Greater => ">",
            OpTag::GreaterEqual => ">=",
            OpTag::Equal => "==",
            OpTag::Diamond => "<>",
            OpTag::And => "and",
            OpTag::Or => "or",
        }
    }
}

impl fmt::Display for OpTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// A validated program.
#[derive(Clone, Debug, Default)]
pub struct Program {
    pub methods: Vec<Method>,
}

impl Program {
    /// Look a method up by name.
    pub fn method(&self, name: Symbol) -> Option<&Method> {
        self.methods.iter().find(|m| m.name == name)
    }
}

/// A validated method.
#[derive(Clone, Debug)]
pub struct Method {
    pub return_type: Type,
    pub name: Symbol,
    pub params: Vec<TypeIdPair>,
    pub body: Stmt,
}

/// A declared (type, name) pair: a parameter or one local of a
/// declaration statement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypeIdPair {
    pub ty: Type,
    pub id: Symbol,
}

/// Statements.
#[derive(Clone, Debug)]
pub enum Stmt {
    Conditional {
        cond: CondExp,
        then_body: Box<Stmt>,
        else_body: Option<Box<Stmt>>,
    },
    Loop {
        cond: CondExp,
        body: Box<Stmt>,
    },
    Call {
        method: Symbol,
        args: Vec<Exp>,
    },
    Assign {
        target: Symbol,
        value: Exp,
    },
    Return {
        value: Option<Exp>,
    },
    Break,
    Continue,
    LocalDecl {
        decls: Vec<TypeIdPair>,
    },
    Block {
        statements: Vec<Stmt>,
    },
    Empty,
}

/// `or` level.
#[derive(Clone, Debug)]
pub enum CondExp {
    Relation(RelationExp),
    Binary {
        left: RelationExp,
        op: OpTag,
        right: RelationExp,
    },
}

/// `and` level.
#[derive(Clone, Debug)]
pub enum RelationExp {
    Comp(CompExp),
    Binary {
        left: CompExp,
        op: OpTag,
        right: CompExp,
    },
}

/// Comparison level.
#[derive(Clone, Debug)]
pub enum CompExp {
    Exp(Exp),
    Binary { left: Exp, op: OpTag, right: Exp },
}

/// Additive level.
#[derive(Clone, Debug)]
pub enum Exp {
    Term(Term),
    Binary { left: Term, op: OpTag, right: Term },
}

/// Multiplicative level.
#[derive(Clone, Debug)]
pub enum Term {
    Factor(Factor),
    Binary {
        left: Factor,
        op: OpTag,
        right: Factor,
    },
}

/// Factors: identifier, integer, float, or a nested expression.
#[derive(Clone, Debug)]
pub enum Factor {
    Id(Symbol),
    Int(i64),
    Float(f64),
    Exp(Box<Exp>),
}
