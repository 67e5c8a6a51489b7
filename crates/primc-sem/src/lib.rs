//! primc-sem - Semantic analysis for Prim.
//!
//! A single pre-order walk of the AST that validates names and arities
//! and produces the [`hir`] tree plus an error count. The analyser keeps
//! four symbol tables:
//!
//! - `methods` (program-wide): name → validated method
//! - `scope` (per method): every visible variable, parameters included
//! - `unused_vars` (per method): declared locals with no use yet
//! - `unused_methods` (program-wide): methods with no call yet
//!
//! Errors are per-method recoverable: a method that fails validation is
//! dropped (its table entry rolled back) and analysis continues with the
//! next one. Unused-symbol findings are warnings and never affect the
//! error count.

pub mod hir;
pub mod table;

#[cfg(test)]
mod edge_cases;

pub use table::SymbolTable;

use primc_par::ast;
use primc_util::diagnostic::{DiagnosticBuilder, Handler};
use primc_util::position::PositionPair;
use primc_util::symbol::{kw, Symbol};

use hir::{OpTag, Type, TypeIdPair};

/// The semantic analyser. One walk per program; create a fresh analyser
/// for each compilation.
pub struct Analyser<'h> {
    handler: &'h Handler,
    /// Program-wide method table. Holds a signature-only sentinel while a
    /// method's own body is analysed, so recursive calls resolve.
    methods: SymbolTable<hir::Method>,
    /// The current method's visible variables (parameters included).
    scope: SymbolTable<Type>,
    /// Declared locals of the current method with no use seen yet.
    unused_vars: SymbolTable<PositionPair>,
    /// Methods with no call seen yet.
    unused_methods: SymbolTable<PositionPair>,
    /// Every method name that appeared in the program, valid or not.
    /// The missing-`main` check looks here so an invalid `main` is not
    /// double-reported.
    declared: SymbolTable<()>,
    errors: usize,
    current_method: Option<Symbol>,
}

impl<'h> Analyser<'h> {
    /// Create an analyser reporting through `handler`.
    pub fn new(handler: &'h Handler) -> Self {
        Self {
            handler,
            methods: SymbolTable::new(),
            scope: SymbolTable::new(),
            unused_vars: SymbolTable::new(),
            unused_methods: SymbolTable::new(),
            declared: SymbolTable::new(),
            errors: 0,
            current_method: None,
        }
    }

    /// Analyse a program. Returns the HIR and the error count; the HIR
    /// only contains the methods that validated.
    pub fn analyse(mut self, program: &ast::Program) -> (hir::Program, usize) {
        let mut methods = Vec::new();
        for method in &program.methods {
            if let Some(valid) = self.analyse_method(method) {
                methods.push(valid);
            }
        }

        if !self.declared.has(kw::MAIN) {
            self.errors += 1;
            DiagnosticBuilder::error("main method is missing").emit(self.handler);
        }

        for (name, pos) in self.unused_methods.iter() {
            if name == kw::MAIN {
                continue;
            }
            DiagnosticBuilder::warning(format!("method {} is never called", name))
                .pos(*pos)
                .emit(self.handler);
        }

        (hir::Program { methods }, self.errors)
    }

    fn analyse_method(&mut self, method: &ast::Method) -> Option<hir::Method> {
        let name = method.name.name;
        self.current_method = Some(name);
        self.declared.add(name, ());

        if self.methods.has(name) {
            self.error(
                method.name.pos,
                format!("method name {} is duplicated with another method", name),
            );
            return None;
        }

        self.scope.clear();
        self.unused_vars.clear();

        let mut params = Vec::new();
        for param in &method.params {
            if self.scope.has(param.name.name) {
                self.error(
                    param.name.pos,
                    format!("param name {} is duplicated", param.name.name),
                );
                return None;
            }
            let ty = Type::from(param.ty);
            self.scope.add(param.name.name, ty);
            params.push(TypeIdPair {
                ty,
                id: param.name.name,
            });
        }

        // Reserve the name with its real signature so recursive calls in
        // the body resolve and arity-check.
        self.methods.add(
            name,
            hir::Method {
                return_type: Type::from(method.result_type),
                name,
                params: params.clone(),
                body: hir::Stmt::Empty,
            },
        );

        let body = match self.analyse_block(&method.body) {
            Some(body) => body,
            None => {
                self.methods.remove(name);
                return None;
            }
        };

        for (var, pos) in self.unused_vars.iter() {
            DiagnosticBuilder::warning(format!("variable {} is never used", var))
                .pos(*pos)
                .method(name.as_str())
                .emit(self.handler);
        }

        let valid = hir::Method {
            return_type: Type::from(method.result_type),
            name,
            params,
            body,
        };
        self.methods.add(name, valid.clone());
        self.unused_methods.add(name, method.name.pos);
        Some(valid)
    }

    fn analyse_block(&mut self, block: &ast::Block) -> Option<hir::Stmt> {
        let mut statements = Vec::new();
        for stmt in &block.statements {
            statements.push(self.analyse_stmt(stmt)?);
        }
        Some(hir::Stmt::Block { statements })
    }

    fn analyse_stmt(&mut self, stmt: &ast::Stmt) -> Option<hir::Stmt> {
        match stmt {
            ast::Stmt::Conditional(cond) => {
                let condition = self.analyse_cond_exp(&cond.cond)?;
                let then_body = Box::new(self.analyse_stmt(&cond.then_body)?);
                let else_body = match &cond.else_body {
                    Some(else_stmt) => Some(Box::new(self.analyse_stmt(else_stmt)?)),
                    None => None,
                };
                Some(hir::Stmt::Conditional {
                    cond: condition,
                    then_body,
                    else_body,
                })
            }
            ast::Stmt::Loop(looped) => {
                let cond = self.analyse_cond_exp(&looped.cond)?;
                let body = Box::new(self.analyse_stmt(&looped.body)?);
                Some(hir::Stmt::Loop { cond, body })
            }
            ast::Stmt::Call(call) => self.analyse_call(call),
            ast::Stmt::Assign(assign) => {
                if !self.scope.has(assign.target.name) {
                    self.error(
                        assign.target.pos,
                        format!("variable {} is not defined", assign.target.name),
                    );
                    return None;
                }
                self.unused_vars.remove(assign.target.name);
                let value = self.analyse_exp(&assign.value)?;
                Some(hir::Stmt::Assign {
                    target: assign.target.name,
                    value,
                })
            }
            ast::Stmt::Return(ret) => {
                let value = match &ret.value {
                    Some(exp) => Some(self.analyse_exp(exp)?),
                    None => None,
                };
                Some(hir::Stmt::Return { value })
            }
            // Loop placement is not validated here; the MIR generator
            // rejects orphans.
            ast::Stmt::Break { .. } => Some(hir::Stmt::Break),
            ast::Stmt::Continue { .. } => Some(hir::Stmt::Continue),
            ast::Stmt::LocalDecl(decl) => {
                let ty = Type::from(decl.ty);
                let mut decls = Vec::new();
                for name in &decl.names {
                    if self.scope.has(name.name) {
                        self.error(name.pos, format!("variable {} is duplicated", name.name));
                        return None;
                    }
                    self.scope.add(name.name, ty);
                    self.unused_vars.add(name.name, name.pos);
                    decls.push(TypeIdPair { ty, id: name.name });
                }
                Some(hir::Stmt::LocalDecl { decls })
            }
            ast::Stmt::Block(block) => self.analyse_block(block),
            ast::Stmt::Empty => Some(hir::Stmt::Empty),
        }
    }

    fn analyse_call(&mut self, call: &ast::CallStmt) -> Option<hir::Stmt> {
        let callee = call.callee.name;
        if callee == kw::MAIN {
            self.error(call.callee.pos, "main method is not callable".to_owned());
            return None;
        }
        let declared_arity = match self.methods.get(callee) {
            Some(method) => method.params.len(),
            None => {
                self.error(
                    call.callee.pos,
                    format!("method {} is not defined", callee),
                );
                return None;
            }
        };

        let mut args = Vec::new();
        for arg in &call.args {
            args.push(self.analyse_exp(arg)?);
        }

        if args.len() != declared_arity {
            self.error(
                call.callee.pos,
                format!("method {} is called with wrong number of parameters", callee),
            );
            return None;
        }

        self.unused_methods.remove(callee);
        Some(hir::Stmt::Call {
            method: callee,
            args,
        })
    }

    fn analyse_cond_exp(&mut self, exp: &ast::CondExp) -> Option<hir::CondExp> {
        match exp {
            ast::CondExp::Relation(rel) => {
                Some(hir::CondExp::Relation(self.analyse_relation_exp(rel)?))
            }
            ast::CondExp::Or { left, right } => Some(hir::CondExp::Binary {
                left: self.analyse_relation_exp(left)?,
                op: OpTag::Or,
                right: self.analyse_relation_exp(right)?,
            }),
        }
    }

    fn analyse_relation_exp(&mut self, exp: &ast::RelationExp) -> Option<hir::RelationExp> {
        match exp {
            ast::RelationExp::Comp(comp) => {
                Some(hir::RelationExp::Comp(self.analyse_comp_exp(comp)?))
            }
            ast::RelationExp::And { left, right } => Some(hir::RelationExp::Binary {
                left: self.analyse_comp_exp(left)?,
                op: OpTag::And,
                right: self.analyse_comp_exp(right)?,
            }),
        }
    }

    fn analyse_comp_exp(&mut self, exp: &ast::CompExp) -> Option<hir::CompExp> {
        match exp {
            ast::CompExp::Exp(e) => Some(hir::CompExp::Exp(self.analyse_exp(e)?)),
            ast::CompExp::Cmp { left, op, right } => Some(hir::CompExp::Binary {
                left: self.analyse_exp(left)?,
                op: OpTag::from_kind(op.kind),
                right: self.analyse_exp(right)?,
            }),
        }
    }

    fn analyse_exp(&mut self, exp: &ast::Exp) -> Option<hir::Exp> {
        match exp {
            ast::Exp::Term(term) => Some(hir::Exp::Term(self.analyse_term(term)?)),
            ast::Exp::Binary { left, op, right } => Some(hir::Exp::Binary {
                left: self.analyse_term(left)?,
                op: OpTag::from_kind(op.kind),
                right: self.analyse_term(right)?,
            }),
        }
    }

    fn analyse_term(&mut self, term: &ast::Term) -> Option<hir::Term> {
        match term {
            ast::Term::Factor(factor) => Some(hir::Term::Factor(self.analyse_factor(factor)?)),
            ast::Term::Binary { left, op, right } => Some(hir::Term::Binary {
                left: self.analyse_factor(left)?,
                op: OpTag::from_kind(op.kind),
                right: self.analyse_factor(right)?,
            }),
        }
    }

    fn analyse_factor(&mut self, factor: &ast::Factor) -> Option<hir::Factor> {
        match factor {
            ast::Factor::Id(id) => {
                // Methods are not first-class values.
                if self.methods.has(id.name) {
                    self.error(
                        id.pos,
                        format!("{} is a method, but used as a variable", id.name),
                    );
                    return None;
                }
                if !self.scope.has(id.name) {
                    self.error(id.pos, format!("variable {} is not defined", id.name));
                    return None;
                }
                self.unused_vars.remove(id.name);
                Some(hir::Factor::Id(id.name))
            }
            ast::Factor::Int { value, .. } => Some(hir::Factor::Int(*value)),
            ast::Factor::Float { value, .. } => Some(hir::Factor::Float(*value)),
            ast::Factor::Paren(exp) => {
                Some(hir::Factor::Exp(Box::new(self.analyse_exp(exp)?)))
            }
        }
    }

    fn error(&mut self, pos: PositionPair, message: String) {
        self.errors += 1;
        let mut builder = DiagnosticBuilder::error(message).pos(pos);
        if let Some(method) = self.current_method {
            builder = builder.method(method.as_str());
        }
        builder.emit(self.handler);
    }
}
