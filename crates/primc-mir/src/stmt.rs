//! Statement and method lowering: control flow, the call trampoline, and
//! loop bookkeeping.

use primc_sem::hir;
use primc_util::symbol::{kw, Symbol};

use crate::error::GenError;
use crate::generator::{Context, MethodInfo};
use crate::mir::{Label, Op, Param, Quad};
use crate::Generator;

impl<'h> Generator<'h> {
    pub(crate) fn lower_stmt(&mut self, stmt: &hir::Stmt) -> Result<Vec<Quad>, GenError> {
        match stmt {
            hir::Stmt::Conditional {
                cond,
                then_body,
                else_body,
            } => self.lower_conditional(cond, then_body, else_body.as_deref()),
            hir::Stmt::Loop { cond, body } => self.lower_loop(cond, body),
            hir::Stmt::Call { method, args } => self.lower_call(*method, args),
            hir::Stmt::Assign { target, value } => Ok(self.lower_assign(*target, value)),
            hir::Stmt::Return { value } => self.lower_return(value.as_ref()),
            hir::Stmt::Break => self.lower_break(),
            hir::Stmt::Continue => self.lower_continue(),
            hir::Stmt::LocalDecl { decls } => Ok(decls
                .iter()
                .map(|pair| self.declare_var(pair.id))
                .collect()),
            hir::Stmt::Block { statements } => {
                let mut seq = Vec::new();
                for statement in statements {
                    seq.extend(self.lower_stmt(statement)?);
                }
                Ok(seq)
            }
            hir::Stmt::Empty => Ok(Vec::new()),
        }
    }

    /// Bind a declared name to a fresh `_T` variable. Declarations emit
    /// one ASSIGN carrying the source name as a reminder of the binding.
    pub(crate) fn declare_var(&mut self, id: Symbol) -> Quad {
        let var = self.new_var(id);
        Quad::new(
            Op::Assign,
            Param::Var(var),
            Param::Name(id),
            Param::Var(var),
            format!("_T{} = {}", var, id),
        )
    }

    fn lower_assign(&mut self, target: Symbol, value: &hir::Exp) -> Vec<Quad> {
        let var = self.get_var(target);
        let (mut seq, result) = self.lower_exp(value);
        seq.push(Quad::new(
            Op::Assign,
            Param::Var(var),
            Param::Var(result),
            Param::Var(var),
            format!("_T{} = _T{}", var, result),
        ));
        seq
    }

    fn lower_conditional(
        &mut self,
        cond: &hir::CondExp,
        then_body: &hir::Stmt,
        else_body: Option<&hir::Stmt>,
    ) -> Result<Vec<Quad>, GenError> {
        let (mut seq, cond_var) = self.lower_cond_exp(cond);

        let mut then_seq = self.lower_stmt(then_body)?;
        let skip = then_seq.len() as i64 + 2;
        seq.push(Quad::new(
            Op::JZero,
            Param::Var(cond_var),
            Param::Unused,
            Param::Label(Label::Rel(skip)),
            format!("if false: goto here+{}", skip),
        ));
        if let Some(first) = then_seq.first_mut() {
            first.comment = format!("true block: {}", first.comment);
        }
        seq.extend(then_seq);

        if let Some(else_body) = else_body {
            let mut else_seq = self.lower_stmt(else_body)?;
            if let Some(first) = else_seq.first_mut() {
                first.comment = format!("false block: {}", first.comment);
            }
            let skip_else = else_seq.len() as i64 + 1;
            seq.push(Quad::new(
                Op::Jmp,
                Param::Unused,
                Param::Unused,
                Param::Label(Label::Rel(skip_else)),
                format!("goto here+{}", skip_else),
            ));
            seq.extend(else_seq);
        }
        Ok(seq)
    }

    fn lower_loop(&mut self, cond: &hir::CondExp, body: &hir::Stmt) -> Result<Vec<Quad>, GenError> {
        let (cond_seq, cond_var) = self.lower_cond_exp(cond);
        let cond_len = cond_seq.len() as i64;

        if let Some(ctx) = self.context_mut() {
            ctx.loop_depth += 1;
        }
        let body_result = self.lower_stmt(body);
        if let Some(ctx) = self.context_mut() {
            ctx.loop_depth -= 1;
        }
        let body_seq = body_result?;
        let body_len = body_seq.len() as i64;

        let mut seq = cond_seq;
        seq.push(Quad::new(
            Op::JZero,
            Param::Var(cond_var),
            Param::Unused,
            Param::Label(Label::Rel(body_len + 2)),
            format!("while condition false: goto here+{}", body_len + 2),
        ));
        seq.extend(body_seq);
        let back = body_len + cond_len + 1;
        seq.push(Quad::new(
            Op::Jmp,
            Param::Unused,
            Param::Unused,
            Param::Label(Label::Rel(-back)),
            format!("next loop: goto here-{}", back),
        ));

        // Bind this loop's pending breaks and continues. Inner loops
        // already resolved theirs, so whatever is still pending is ours:
        // break goes just past the back-edge, continue to the back-edge
        // itself.
        let back_edge = seq.len() as i64 - 1;
        let exit = seq.len() as i64;
        for (idx, quad) in seq.iter_mut().enumerate() {
            match quad.res {
                Param::Label(Label::PendingBreak) => {
                    quad.res = Param::Label(Label::Rel(exit - idx as i64));
                }
                Param::Label(Label::PendingContinue) => {
                    quad.res = Param::Label(Label::Rel(back_edge - idx as i64));
                }
                _ => {}
            }
        }
        Ok(seq)
    }

    fn lower_break(&mut self) -> Result<Vec<Quad>, GenError> {
        let ctx = self.context();
        if ctx.loop_depth == 0 {
            return Err(GenError::BreakOutsideLoop {
                method: ctx.method.as_str().to_owned(),
            });
        }
        Ok(vec![Quad::new(
            Op::Jmp,
            Param::Unused,
            Param::Unused,
            Param::Label(Label::PendingBreak),
            "_T_BREAK".to_owned(),
        )])
    }

    fn lower_continue(&mut self) -> Result<Vec<Quad>, GenError> {
        let ctx = self.context();
        if ctx.loop_depth == 0 {
            return Err(GenError::ContinueOutsideLoop {
                method: ctx.method.as_str().to_owned(),
            });
        }
        Ok(vec![Quad::new(
            Op::Jmp,
            Param::Unused,
            Param::Unused,
            Param::Label(Label::PendingContinue),
            "_T_CONTINUE".to_owned(),
        )])
    }

    /// The call trampoline. Evaluates actuals, lowers the callee on its
    /// first call, copies actuals into the callee's formals, stores the
    /// resume address in the callee's return variable, and jumps to the
    /// callee's entry.
    fn lower_call(&mut self, callee: Symbol, args: &[hir::Exp]) -> Result<Vec<Quad>, GenError> {
        let saved_depth = self.ctx_stack.len();
        self.ctx_stack.push(Context {
            method: callee,
            loop_depth: 0,
        });

        let mut seq = Vec::new();
        let mut actuals = Vec::new();
        for arg in args {
            let (arg_seq, result) = self.lower_exp(arg);
            seq.extend(arg_seq);
            actuals.push(result);
        }

        if !self.methods.contains_key(&callee) {
            let method = match self.hir.method(callee) {
                Some(method) => method.clone(),
                None => {
                    return Err(GenError::UndeclaredMethod {
                        method: callee.as_str().to_owned(),
                    })
                }
            };
            self.lower_method(&method)?;
        }

        let (formals, return_var) = match self.methods.get(&callee) {
            Some(info) => (info.params.clone(), info.return_var),
            None => {
                return Err(GenError::UndeclaredMethod {
                    method: callee.as_str().to_owned(),
                })
            }
        };

        for (formal, actual) in formals.iter().zip(&actuals) {
            seq.push(Quad::new(
                Op::Assign,
                Param::Var(*formal),
                Param::Var(*actual),
                Param::Var(*formal),
                format!("call param: _T{} = _T{}", formal, actual),
            ));
        }

        seq.push(Quad::new(
            Op::Assign,
            Param::Var(return_var),
            Param::Label(Label::ReturnHere),
            Param::Var(return_var),
            format!("call returnTo: _T{}", return_var),
        ));
        seq.push(Quad::new(
            Op::Jmp,
            Param::Unused,
            Param::Unused,
            Param::Label(Label::MethodEntry(callee)),
            format!("call method: {}", callee),
        ));

        // The callee's return popped the context it was lowered under;
        // restore balance for callees that were already lowered or never
        // return.
        self.ctx_stack.truncate(saved_depth);
        Ok(seq)
    }

    /// Lower a callee into the method buffer and register its entry
    /// position, formal variables and return variable.
    pub(crate) fn lower_method(&mut self, method: &hir::Method) -> Result<(), GenError> {
        let return_var = self.new_temp();

        let mut seq = Vec::new();
        let mut params = Vec::new();
        for pair in &method.params {
            let quad = self.declare_var(pair.id);
            if let Param::Var(id) = quad.res {
                params.push(id);
            }
            seq.push(quad);
        }

        // Register before lowering the body so returns (and recursive
        // calls) inside it can see the return variable.
        self.methods.insert(
            method.name,
            MethodInfo {
                pos: 0,
                params,
                return_var,
            },
        );

        seq.extend(self.lower_stmt(&method.body)?);

        if let Some(first) = seq.first_mut() {
            first.comment = format!("{} # method: {}", first.comment, method.name);
        }

        let pos = self.method_seq.len();
        if let Some(info) = self.methods.get_mut(&method.name) {
            info.pos = pos;
        }
        self.method_seq.extend(seq);
        Ok(())
    }

    /// `return` in `main` stops the program; elsewhere it jumps through
    /// the method's return variable back to the call site. Either way
    /// the context entry the call pushed is popped here.
    fn lower_return(&mut self, value: Option<&hir::Exp>) -> Result<Vec<Quad>, GenError> {
        let (mut seq, result) = match value {
            Some(exp) => {
                let (seq, var) = self.lower_exp(exp);
                (seq, Some(var))
            }
            None => (Vec::new(), None),
        };

        let ctx = self.ctx_stack.pop().ok_or(GenError::ContextUnderflow)?;

        if ctx.method == kw::MAIN {
            let res = match result {
                Some(var) => Param::Var(var),
                None => Param::Unused,
            };
            let comment = match result {
                Some(var) => format!("main return value: _T{} : STOP", var),
                None => "main return: STOP".to_owned(),
            };
            seq.push(Quad::new(Op::Stop, Param::Unused, Param::Unused, res, comment));
        } else {
            let return_var = match self.methods.get(&ctx.method) {
                Some(info) => info.return_var,
                None => {
                    return Err(GenError::UndeclaredMethod {
                        method: ctx.method.as_str().to_owned(),
                    })
                }
            };
            let comment = match result {
                Some(var) => format!(
                    "method {} return value _T{} : goto _T{}",
                    ctx.method, var, return_var
                ),
                None => format!("method {} return : goto _T{}", ctx.method, return_var),
            };
            seq.push(Quad::new(
                Op::Jmp,
                Param::Unused,
                Param::Unused,
                Param::Var(return_var),
                comment,
            ));
        }
        Ok(seq)
    }
}
