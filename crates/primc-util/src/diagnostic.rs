//! Error and warning collection.
//!
//! The analyser (and anything else with non-fatal findings) reports
//! through a [`Handler`], which collects [`Diagnostic`]s and answers count
//! queries. Warnings never affect the exit status; errors do.
//!
//! # Examples
//!
//! ```
//! use primc_util::diagnostic::{DiagnosticBuilder, Handler};
//! use primc_util::position::PositionPair;
//!
//! let handler = Handler::new();
//! DiagnosticBuilder::error("variable x is not defined")
//!     .pos(PositionPair::DUMMY)
//!     .emit(&handler);
//!
//! assert!(handler.has_errors());
//! assert_eq!(handler.error_count(), 1);
//! ```

use std::cell::RefCell;
use std::fmt;

use crate::position::PositionPair;

/// Diagnostic severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    /// Prevents compilation; counted by [`Handler::error_count`].
    Error,
    /// Informational; never affects the exit status.
    Warning,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => write!(f, "error"),
            Level::Warning => write!(f, "warning"),
        }
    }
}

/// A single reported finding.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    /// Severity level.
    pub level: Level,
    /// Main message.
    pub message: String,
    /// Source region the finding points at, if known.
    pub pos: Option<PositionPair>,
    /// Enclosing method name, quoted for context where available.
    pub method: Option<String>,
}

impl Diagnostic {
    /// Create a diagnostic with the given level and message.
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            pos: None,
            method: None,
        }
    }

    /// Shorthand for an error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Level::Error, message)
    }

    /// Shorthand for a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Level::Warning, message)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.level, self.message)?;
        if let Some(method) = &self.method {
            write!(f, " (in method {})", method)?;
        }
        if let Some(pos) = &self.pos {
            write!(f, " {}", pos)?;
        }
        Ok(())
    }
}

/// Fluent construction of diagnostics.
///
/// # Examples
///
/// ```
/// use primc_util::diagnostic::{DiagnosticBuilder, Handler};
///
/// let handler = Handler::new();
/// DiagnosticBuilder::warning("variable t is unused")
///     .method("main")
///     .emit(&handler);
/// assert_eq!(handler.warning_count(), 1);
/// ```
pub struct DiagnosticBuilder {
    diagnostic: Diagnostic,
}

impl DiagnosticBuilder {
    /// Start building an error.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            diagnostic: Diagnostic::error(message),
        }
    }

    /// Start building a warning.
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            diagnostic: Diagnostic::warning(message),
        }
    }

    /// Attach a source region.
    pub fn pos(mut self, pos: PositionPair) -> Self {
        self.diagnostic.pos = Some(pos);
        self
    }

    /// Attach the enclosing method name.
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.diagnostic.method = Some(method.into());
        self
    }

    /// Finish and hand the diagnostic to a handler.
    pub fn emit(self, handler: &Handler) {
        handler.emit(self.diagnostic);
    }

    /// Finish without emitting.
    pub fn build(self) -> Diagnostic {
        self.diagnostic
    }
}

/// Collects diagnostics and answers count queries.
///
/// Interior mutability keeps the reporting call sites `&self`; the whole
/// pipeline is single-threaded.
#[derive(Default)]
pub struct Handler {
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl Handler {
    /// Create an empty handler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic.
    pub fn emit(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }

    /// Whether any error has been reported.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .borrow()
            .iter()
            .any(|d| d.level == Level::Error)
    }

    /// Number of errors reported so far.
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.level == Level::Error)
            .count()
    }

    /// Number of warnings reported so far.
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.level == Level::Warning)
            .count()
    }

    /// Snapshot of everything reported so far.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    /// Drop all collected diagnostics.
    pub fn clear(&self) {
        self.diagnostics.borrow_mut().clear();
    }
}
