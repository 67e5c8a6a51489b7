//! The quadruple model: operations, parameters, labels, and the program.
//!
//! The textual rendering `( OP , arg1 , arg2 , res )  # comment` is the
//! stable output format and round-trips through [`Quad::from_str`] once
//! a program has been patched (labels resolved to absolute indices).

use std::fmt;
use std::str::FromStr;

use primc_util::symbol::Symbol;

/// Variable id behind a `_T<n>` name. Assigned from a single monotonic
/// counter, never reused.
pub type VarId = usize;

/// The MIR op alphabet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Error,
    Assign,
    Plus,
    Minus,
    Times,
    Divide,
    Jmp,
    JEqual,
    JNEqual,
    JGreat,
    JGreatEqual,
    JLess,
    JLessEqual,
    JZero,
    JNZero,
    Stop,
}

impl Op {
    /// The op's token in the textual format.
    pub fn name(self) -> &'static str {
        match self {
            Op::Error => "ERROR",
            Op::Assign => "ASSIGN",
            Op::Plus => "PLUS",
            Op::Minus => "MINUS",
            Op::Times => "TIMES",
            Op::Divide => "DIVIDE",
            Op::Jmp => "JMP",
            Op::JEqual => "JEQUAL",
            Op::JNEqual => "JNEQUAL",
            Op::JGreat => "JGREAT",
            Op::JGreatEqual => "JGREATEQUAL",
            Op::JLess => "JLESS",
            Op::JLessEqual => "JLESSEQUAL",
            Op::JZero => "JZERO",
            Op::JNZero => "JNZERO",
            Op::Stop => "STOP",
        }
    }

    /// Inverse of [`name`](Self::name).
    pub fn from_name(name: &str) -> Option<Op> {
        let op = match name {
            "ERROR" => Op::Error,
            "ASSIGN" => Op::Assign,
            "PLUS" => Op::Plus,
            "MINUS" => Op::Minus,
            "TIMES" => Op::Times,
            "DIVIDE" => Op::Divide,
            "JMP" => Op::Jmp,
            "JEQUAL" => Op::JEqual,
            "JNEQUAL" => Op::JNEqual,
            "JGREAT" => Op::JGreat,
            "JGREATEQUAL" => Op::JGreatEqual,
            "JLESS" => Op::JLess,
            "JLESSEQUAL" => Op::JLessEqual,
            "JZERO" => Op::JZero,
            "JNZERO" => Op::JNZero,
            "STOP" => Op::Stop,
            _ => return None,
        };
        Some(op)
    }

    /// True for every jumping op (JMP and the conditional jumps).
    pub fn is_jump(self) -> bool {
        matches!(
            self,
            Op::Jmp
                | Op::JEqual
                | Op::JNEqual
                | Op::JGreat
                | Op::JGreatEqual
                | Op::JLess
                | Op::JLessEqual
                | Op::JZero
                | Op::JNZero
        )
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A symbolic jump target, resolved to an absolute index by the patch
/// pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Label {
    /// Resolves to `own_index + delta`.
    Rel(i64),
    /// Resolves to the named method's entry index plus the method-buffer
    /// offset.
    MethodEntry(Symbol),
    /// The call-site return-address placeholder: resolves to
    /// `own_index + 2`, the quadruple just after the call's JMP.
    ReturnHere,
    /// A break not yet bound to its loop exit. The enclosing `while`
    /// rewrites this to a relative target at assembly time.
    PendingBreak,
    /// A continue not yet bound to its loop back-edge.
    PendingContinue,
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Rel(delta) if *delta >= 0 => write!(f, "@here+{}", delta),
            Label::Rel(delta) => write!(f, "@here{}", delta),
            Label::MethodEntry(name) => write!(f, "@method:{}", name),
            Label::ReturnHere => write!(f, "@after-call"),
            Label::PendingBreak => write!(f, "@break"),
            Label::PendingContinue => write!(f, "@continue"),
        }
    }
}

/// One argument/result slot of a quadruple.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Param {
    /// The unused slot, printed `_`.
    Unused,
    /// A compiler variable, printed `_T<n>`.
    Var(VarId),
    /// A raw source name (the declaration operand).
    Name(Symbol),
    /// A signed integer: literal operand or resolved jump target.
    Int(i64),
    /// A float literal operand.
    Float(f64),
    /// A symbolic jump target awaiting the patch pass.
    Label(Label),
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Param::Unused => write!(f, "_"),
            Param::Var(id) => write!(f, "_T{}", id),
            Param::Name(name) => write!(f, "{}", name),
            Param::Int(value) => write!(f, "{}", value),
            Param::Float(value) => {
                // Keep the dot so the slot reads back as a float.
                if value.fract() == 0.0 && value.is_finite() {
                    write!(f, "{:.1}", value)
                } else {
                    write!(f, "{}", value)
                }
            }
            Param::Label(label) => write!(f, "{}", label),
        }
    }
}

impl FromStr for Param {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("empty parameter".to_owned());
        }
        if s == "_" {
            return Ok(Param::Unused);
        }
        if let Some(digits) = s.strip_prefix("_T") {
            if let Ok(id) = digits.parse::<VarId>() {
                return Ok(Param::Var(id));
            }
        }
        if let Ok(value) = s.parse::<i64>() {
            return Ok(Param::Int(value));
        }
        if s.contains('.') {
            if let Ok(value) = s.parse::<f64>() {
                return Ok(Param::Float(value));
            }
        }
        Ok(Param::Name(Symbol::intern(s)))
    }
}

/// One three-address instruction plus an optional comment.
#[derive(Clone, Debug, PartialEq)]
pub struct Quad {
    pub op: Op,
    pub arg1: Param,
    pub arg2: Param,
    pub res: Param,
    pub comment: String,
}

impl Quad {
    pub fn new(op: Op, arg1: Param, arg2: Param, res: Param, comment: impl Into<String>) -> Self {
        Self {
            op,
            arg1,
            arg2,
            res,
            comment: comment.into(),
        }
    }
}

impl fmt::Display for Quad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tuple = format!(
            "({}, {}, {}, {})",
            self.op, self.arg1, self.arg2, self.res
        );
        if self.comment.is_empty() {
            write!(f, "{}", tuple)
        } else {
            write!(f, "{:<30}   # {}", tuple, self.comment)
        }
    }
}

impl FromStr for Quad {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (tuple, comment) = match s.split_once('#') {
            Some((tuple, comment)) => (tuple.trim(), comment.trim().to_owned()),
            None => (s.trim(), String::new()),
        };
        let inner = tuple
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| format!("not a quadruple: {:?}", s))?;
        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(format!("expected 4 fields, got {}", parts.len()));
        }
        let op = Op::from_name(parts[0]).ok_or_else(|| format!("unknown op {:?}", parts[0]))?;
        Ok(Quad {
            op,
            arg1: parts[1].parse()?,
            arg2: parts[2].parse()?,
            res: parts[3].parse()?,
            comment,
        })
    }
}

/// The linear quadruple program.
#[derive(Clone, Debug, Default)]
pub struct Program {
    pub quads: Vec<Quad>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.quads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Quad> {
        self.quads.iter()
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for quad in &self.quads {
            writeln!(f, "{}", quad)?;
        }
        Ok(())
    }
}

impl FromStr for Program {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut quads = Vec::new();
        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            quads.push(line.parse()?);
        }
        Ok(Program { quads })
    }
}
