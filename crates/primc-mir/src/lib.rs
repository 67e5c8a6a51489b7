//! primc-mir - The quadruple IR and its generator.
//!
//! The MIR is a flat sequence of four-tuples `(op, arg1, arg2, res)` with
//! an optional comment, addressed by absolute instruction index. The
//! [`Generator`] lowers a validated [`primc_sem::hir`] program:
//!
//! 1. `main`'s body is lowered first; callees are lowered lazily the
//!    first time a call to them is generated, into a separate buffer
//!    appended after `main` (a method never called is never lowered).
//! 2. A patch pass rewrites every symbolic [`Label`] to an absolute
//!    index: relative references, method entries, and the call-site
//!    return-address placeholders.
//!
//! Comparisons lower to the negated-jump four-quad pattern; `and`/`or`
//! lower to short-circuit eight-quad patterns; `while` loops carry the
//! `while condition` / `next loop:` comment markers, with break and
//! continue bound to the loop exit and the back-edge jump respectively.

pub mod error;
pub mod exp;
pub mod generator;
pub mod mir;
pub mod stmt;

#[cfg(test)]
mod edge_cases;

pub use error::GenError;
pub use generator::{Context, Generator};
pub use mir::{Label, Op, Param, Program, Quad, VarId};
