//! The MIR generator: variable numbering, lowering context, two-phase
//! emission and the patch pass.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;

use primc_sem::hir;
use primc_util::symbol::{kw, Symbol};

use crate::error::GenError;
use crate::mir::{Label, Param, Program, Quad, VarId};

/// Per-method lowering state. A call statement pushes an entry for its
/// callee; the callee's return pops it.
#[derive(Clone, Debug)]
pub struct Context {
    /// The method being lowered.
    pub method: Symbol,
    /// How many loops currently enclose the lowering point inside this
    /// method. Zero means break/continue are orphans.
    pub loop_depth: u32,
}

/// Registry entry for a lowered (or currently-lowering) method.
#[derive(Clone, Debug)]
pub(crate) struct MethodInfo {
    /// Entry index within the method buffer. Valid once the method's
    /// quadruples have been appended.
    pub pos: usize,
    /// The formal parameters' variable ids, in declaration order.
    pub params: Vec<VarId>,
    /// The variable holding the caller's resume address.
    pub return_var: VarId,
}

/// Lowers a validated HIR program to a patched quadruple sequence.
pub struct Generator<'h> {
    pub(crate) hir: &'h hir::Program,
    /// Current binding of each source name to its variable id. A fresh
    /// declaration of a name rebinds it; ids themselves are never
    /// reused.
    pub(crate) vars: FxHashMap<Symbol, VarId>,
    /// The monotonic id counter backing `_T<n>` names.
    var_count: usize,
    /// Lowered methods, in the order their first call appeared.
    pub(crate) methods: IndexMap<Symbol, MethodInfo>,
    /// The context stack. Seeded with `main`.
    pub(crate) ctx_stack: Vec<Context>,
    /// Quadruples of lazily-lowered callees, appended after `main`.
    pub(crate) method_seq: Vec<Quad>,
}

impl<'h> Generator<'h> {
    /// Create a generator for the given HIR program.
    pub fn new(hir: &'h hir::Program) -> Self {
        Self {
            hir,
            vars: FxHashMap::default(),
            var_count: 0,
            methods: IndexMap::new(),
            ctx_stack: vec![Context {
                method: kw::MAIN,
                loop_depth: 0,
            }],
            method_seq: Vec::new(),
        }
    }

    /// Run the full lowering: `main`'s body, then the accumulated method
    /// buffer, then the patch pass.
    pub fn generate(mut self) -> Result<Program, GenError> {
        let main = self.hir.method(kw::MAIN).ok_or(GenError::MissingMain)?;

        let mut quads = self.lower_stmt(&main.body)?;
        let offset = quads.len();
        let method_seq = std::mem::take(&mut self.method_seq);
        quads.extend(method_seq);

        for idx in 0..quads.len() {
            let quad = &mut quads[idx];
            quad.arg1 = Self::patch_param(idx, quad.arg1, &self.methods, offset)?;
            quad.arg2 = Self::patch_param(idx, quad.arg2, &self.methods, offset)?;
            quad.res = Self::patch_param(idx, quad.res, &self.methods, offset)?;
        }

        Ok(Program { quads })
    }

    /// Resolve one slot. Non-label slots pass through untouched.
    fn patch_param(
        idx: usize,
        param: Param,
        methods: &IndexMap<Symbol, MethodInfo>,
        offset: usize,
    ) -> Result<Param, GenError> {
        let label = match param {
            Param::Label(label) => label,
            other => return Ok(other),
        };
        match label {
            Label::Rel(delta) => Ok(Param::Int(idx as i64 + delta)),
            Label::ReturnHere => Ok(Param::Int(idx as i64 + 2)),
            Label::MethodEntry(name) => match methods.get(&name) {
                Some(info) => Ok(Param::Int((info.pos + offset) as i64)),
                None => Err(GenError::UndeclaredMethod {
                    method: name.as_str().to_owned(),
                }),
            },
            // Loop assembly rewrites these; one surviving to the patch
            // pass escaped every loop.
            Label::PendingBreak => Err(GenError::BreakOutsideLoop {
                method: "?".to_owned(),
            }),
            Label::PendingContinue => Err(GenError::ContinueOutsideLoop {
                method: "?".to_owned(),
            }),
        }
    }

    /// Bind `name` to a fresh variable id.
    pub(crate) fn new_var(&mut self, name: Symbol) -> VarId {
        self.var_count += 1;
        self.vars.insert(name, self.var_count);
        self.var_count
    }

    /// Allocate an anonymous temporary from the same counter.
    pub(crate) fn new_temp(&mut self) -> VarId {
        self.var_count += 1;
        self.var_count
    }

    /// The current binding of `name`. Validation guarantees a binding
    /// exists; id 0 is the never-assigned fallback.
    pub(crate) fn get_var(&self, name: Symbol) -> VarId {
        self.vars.get(&name).copied().unwrap_or(0)
    }

    /// The innermost context.
    pub(crate) fn context(&self) -> &Context {
        // The stack is seeded with main and call sites restore balance,
        // so a context always exists while statements lower.
        self.ctx_stack.last().unwrap_or(&MAIN_CONTEXT)
    }

    /// The innermost context, mutably. Returns `None` only after an
    /// unbalanced pop, which `lower_return` reports as an error.
    pub(crate) fn context_mut(&mut self) -> Option<&mut Context> {
        self.ctx_stack.last_mut()
    }
}

/// Fallback context after an unbalanced pop in `main`.
static MAIN_CONTEXT: Context = Context {
    method: kw::MAIN,
    loop_depth: 0,
};
