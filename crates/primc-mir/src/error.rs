//! Fatal lowering errors.
//!
//! The MIR generator does not recover: any of these aborts compilation.
//! All of them indicate either a program the analyser should have
//! rejected or a broken invariant in the generator itself.

use thiserror::Error;

/// A fatal error during MIR generation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenError {
    /// The HIR has no `main` method to start lowering from.
    #[error("no main method found")]
    MissingMain,

    /// A `break` with no enclosing loop.
    #[error("break outside of any loop in method {method}")]
    BreakOutsideLoop { method: String },

    /// A `continue` with no enclosing loop.
    #[error("continue outside of any loop in method {method}")]
    ContinueOutsideLoop { method: String },

    /// A call to a method the HIR does not contain.
    #[error("call to undeclared method {method}")]
    UndeclaredMethod { method: String },

    /// A `return` popped an empty context stack.
    #[error("context stack underflow at a return")]
    ContextUnderflow,
}
