//! Expression lowering.
//!
//! Every routine returns `(sequence, result_var)`. Operand sub-sequences
//! concatenate in evaluation order (left first); a binary op appends one
//! quadruple writing a fresh temporary. Leaf identifiers emit nothing
//! and return their own id; leaf literals emit one ASSIGN.
//!
//! Comparisons lower through their negation: jump to the "set zero" arm
//! when the comparison fails, otherwise fall into "set one". `and`/`or`
//! short-circuit: the right operand is only evaluated when the left one
//! did not decide the result.

use primc_sem::hir;
use primc_sem::hir::OpTag;

use crate::mir::{Label, Op, Param, Quad, VarId};
use crate::Generator;

impl<'h> Generator<'h> {
    pub(crate) fn lower_exp(&mut self, exp: &hir::Exp) -> (Vec<Quad>, VarId) {
        match exp {
            hir::Exp::Term(term) => self.lower_term(term),
            hir::Exp::Binary { left, op, right } => {
                let (mut seq, l) = self.lower_term(left);
                let (rseq, r) = self.lower_term(right);
                seq.extend(rseq);
                let result = self.new_temp();
                let mir_op = match op {
                    OpTag::Minus => Op::Minus,
                    _ => Op::Plus,
                };
                seq.push(Quad::new(
                    mir_op,
                    Param::Var(l),
                    Param::Var(r),
                    Param::Var(result),
                    format!("_T{} = _T{} {} _T{}", result, l, op, r),
                ));
                (seq, result)
            }
        }
    }

    pub(crate) fn lower_term(&mut self, term: &hir::Term) -> (Vec<Quad>, VarId) {
        match term {
            hir::Term::Factor(factor) => self.lower_factor(factor),
            hir::Term::Binary { left, op, right } => {
                let (mut seq, l) = self.lower_factor(left);
                let (rseq, r) = self.lower_factor(right);
                seq.extend(rseq);
                let result = self.new_temp();
                let mir_op = match op {
                    OpTag::Divide => Op::Divide,
                    _ => Op::Times,
                };
                seq.push(Quad::new(
                    mir_op,
                    Param::Var(l),
                    Param::Var(r),
                    Param::Var(result),
                    format!("_T{} = _T{} {} _T{}", result, l, op, r),
                ));
                (seq, result)
            }
        }
    }

    pub(crate) fn lower_factor(&mut self, factor: &hir::Factor) -> (Vec<Quad>, VarId) {
        match factor {
            hir::Factor::Id(name) => (Vec::new(), self.get_var(*name)),
            hir::Factor::Int(value) => {
                let var = self.new_temp();
                let quad = Quad::new(
                    Op::Assign,
                    Param::Var(var),
                    Param::Int(*value),
                    Param::Var(var),
                    format!("_T{} = {}", var, value),
                );
                (vec![quad], var)
            }
            hir::Factor::Float(value) => {
                let var = self.new_temp();
                let quad = Quad::new(
                    Op::Assign,
                    Param::Var(var),
                    Param::Float(*value),
                    Param::Var(var),
                    format!("_T{} = {}", var, value),
                );
                (vec![quad], var)
            }
            hir::Factor::Exp(exp) => self.lower_exp(exp),
        }
    }

    /// Comparison lowering: four quadruples through the negated jump.
    pub(crate) fn lower_comp_exp(&mut self, exp: &hir::CompExp) -> (Vec<Quad>, VarId) {
        let (left, op, right) = match exp {
            hir::CompExp::Exp(e) => return self.lower_exp(e),
            hir::CompExp::Binary { left, op, right } => (left, op, right),
        };

        let (mut seq, l) = self.lower_exp(left);
        let (rseq, r) = self.lower_exp(right);
        seq.extend(rseq);
        let result = self.new_temp();

        // The negation of each comparison.
        let (neg_op, sym) = match op {
            OpTag::Equal => (Op::JNEqual, "=="),
            OpTag::Diamond => (Op::JEqual, "<>"),
            OpTag::Greater => (Op::JLessEqual, ">"),
            OpTag::GreaterEqual => (Op::JLess, ">="),
            OpTag::LessEqual => (Op::JGreat, "<="),
            _ => (Op::JGreatEqual, "<"),
        };

        seq.push(Quad::new(
            neg_op,
            Param::Var(l),
            Param::Var(r),
            Param::Label(Label::Rel(3)),
            format!("if _T{} {} _T{} false: goto here+3", l, sym, r),
        ));
        seq.push(Quad::new(
            Op::Assign,
            Param::Var(result),
            Param::Int(1),
            Param::Var(result),
            format!("if _T{} {} _T{} true: _T{} = 1", l, sym, r, result),
        ));
        seq.push(Quad::new(
            Op::Jmp,
            Param::Unused,
            Param::Unused,
            Param::Label(Label::Rel(2)),
            "goto here+2".to_owned(),
        ));
        seq.push(Quad::new(
            Op::Assign,
            Param::Var(result),
            Param::Int(0),
            Param::Var(result),
            format!("if _T{} {} _T{} false: _T{} = 0", l, sym, r, result),
        ));
        (seq, result)
    }

    /// Short-circuit `and`.
    pub(crate) fn lower_relation_exp(&mut self, exp: &hir::RelationExp) -> (Vec<Quad>, VarId) {
        let (left, right) = match exp {
            hir::RelationExp::Comp(comp) => return self.lower_comp_exp(comp),
            hir::RelationExp::Binary { left, right, .. } => (left, right),
        };

        let (mut seq, l) = self.lower_comp_exp(left);
        let jump_over_at = seq.len() + 2;
        let result = self.new_temp();

        seq.push(Quad::new(
            Op::JNZero,
            Param::Var(l),
            Param::Unused,
            Param::Label(Label::Rel(3)),
            format!("if _T{} true: goto here+3", l),
        ));
        seq.push(Quad::new(
            Op::Assign,
            Param::Var(result),
            Param::Int(0),
            Param::Var(result),
            format!("if _T{} false: _T{} = 0", l, result),
        ));
        seq.push(Quad::new(
            Op::Jmp,
            Param::Unused,
            Param::Unused,
            Param::Label(Label::Rel(5)),
            String::new(),
        ));

        let (rseq, r) = self.lower_comp_exp(right);
        let rlen = rseq.len() as i64;
        seq.extend(rseq);

        // Back-patch the jump over the right operand now its length is
        // known. The one post-emission mutation in the generator.
        seq[jump_over_at].res = Param::Label(Label::Rel(rlen + 5));
        seq[jump_over_at].comment = format!("goto here+{}", rlen + 5);

        seq.push(Quad::new(
            Op::JZero,
            Param::Var(r),
            Param::Unused,
            Param::Label(Label::Rel(3)),
            format!("if _T{} false: goto here+3", r),
        ));
        seq.push(Quad::new(
            Op::Assign,
            Param::Var(result),
            Param::Int(1),
            Param::Var(result),
            format!("if _T{} true: _T{} = 1", r, result),
        ));
        seq.push(Quad::new(
            Op::Jmp,
            Param::Unused,
            Param::Unused,
            Param::Label(Label::Rel(2)),
            "goto here+2".to_owned(),
        ));
        seq.push(Quad::new(
            Op::Assign,
            Param::Var(result),
            Param::Int(0),
            Param::Var(result),
            format!("if _T{} false: _T{} = 0", r, result),
        ));
        (seq, result)
    }

    /// Short-circuit `or`: the `and` shape with the left test inverted
    /// and the short-circuit value flipped.
    pub(crate) fn lower_cond_exp(&mut self, exp: &hir::CondExp) -> (Vec<Quad>, VarId) {
        let (left, right) = match exp {
            hir::CondExp::Relation(rel) => return self.lower_relation_exp(rel),
            hir::CondExp::Binary { left, right, .. } => (left, right),
        };

        let (mut seq, l) = self.lower_relation_exp(left);
        let jump_over_at = seq.len() + 2;
        let result = self.new_temp();

        seq.push(Quad::new(
            Op::JZero,
            Param::Var(l),
            Param::Unused,
            Param::Label(Label::Rel(3)),
            format!("if _T{} false: goto here+3", l),
        ));
        seq.push(Quad::new(
            Op::Assign,
            Param::Var(result),
            Param::Int(1),
            Param::Var(result),
            format!("if _T{} true: _T{} = 1", l, result),
        ));
        seq.push(Quad::new(
            Op::Jmp,
            Param::Unused,
            Param::Unused,
            Param::Label(Label::Rel(5)),
            String::new(),
        ));

        let (rseq, r) = self.lower_relation_exp(right);
        let rlen = rseq.len() as i64;
        seq.extend(rseq);
        seq[jump_over_at].res = Param::Label(Label::Rel(rlen + 5));
        seq[jump_over_at].comment = format!("goto here+{}", rlen + 5);

        seq.push(Quad::new(
            Op::JZero,
            Param::Var(r),
            Param::Unused,
            Param::Label(Label::Rel(3)),
            format!("if _T{} false: goto here+3", r),
        ));
        seq.push(Quad::new(
            Op::Assign,
            Param::Var(result),
            Param::Int(1),
            Param::Var(result),
            format!("if _T{} true: _T{} = 1", r, result),
        ));
        seq.push(Quad::new(
            Op::Jmp,
            Param::Unused,
            Param::Unused,
            Param::Label(Label::Rel(2)),
            "goto here+2".to_owned(),
        ));
        seq.push(Quad::new(
            Op::Assign,
            Param::Var(result),
            Param::Int(0),
            Param::Var(result),
            format!("if _T{} false: _T{} = 0", r, result),
        ));
        (seq, result)
    }
}
