//! primc-util - Shared infrastructure for the Prim compiler.
//!
//! This crate collects the pieces every pipeline stage leans on:
//!
//! - [`position`] - source locations (row, column, byte offset) and the
//!   begin/end pairs carried by tokens and diagnostics
//! - [`symbol`] - string interning; identifiers, keywords and string
//!   literal payloads are compact [`Symbol`] handles
//! - [`diagnostic`] - the [`Handler`] that collects errors and warnings
//!   across the analyser and the driver
//! - [`escape`] - the fixed, symmetric escape table applied to string and
//!   char literal payloads
//! - [`number`] - hand-rolled integer/decimal parsing for the restricted
//!   literal grammar
//!
//! Nothing in here knows about tokens, trees or quadruples; the stage
//! crates compose these primitives.

pub mod diagnostic;
pub mod error;
pub mod escape;
pub mod number;
pub mod position;
pub mod symbol;

pub use diagnostic::{Diagnostic, DiagnosticBuilder, Handler, Level};
pub use error::NumberError;
pub use number::{parse_float, parse_int};
pub use position::{Position, PositionPair};
pub use symbol::{kw, Symbol};
