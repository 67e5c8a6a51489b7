//! String interning for identifiers and literal payloads.
//!
//! A [`Symbol`] is a 4-byte handle to an interned string. Interning the
//! same text twice yields the same handle, so symbol comparison is an
//! integer compare and the symbol tables downstream never hash full
//! strings.
//!
//! Interned strings are leaked to obtain `'static` references. The
//! compiler runs for a bounded time and the table is bounded by the source
//! size, so nothing is ever reclaimed.
//!
//! # Examples
//!
//! ```
//! use primc_util::symbol::Symbol;
//!
//! let a = Symbol::intern("counter");
//! let b = Symbol::intern("counter");
//! let c = Symbol::intern("total");
//!
//! assert_eq!(a, b);
//! assert_ne!(a, c);
//! assert_eq!(a.as_str(), "counter");
//! ```

use ahash::RandomState;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::fmt;
use std::sync::LazyLock;

/// The source language keywords, in interning order.
///
/// Pre-interned at table construction so the constants in [`kw`] line up
/// with their indices.
const KNOWN_SYMBOLS: &[&str] = &[
    "void", "var", "int", "float", "string", "char", "begin", "end", "if", "then", "else", "while",
    "do", "call", "read", "write", "and", "or", "return", "continue", "break", "main", "_",
];

/// Pre-interned symbols for the language keywords and a few names the
/// compiler itself tests against (`main`, the unused-slot marker `_`).
pub mod kw {
    use super::Symbol;

    pub const VOID: Symbol = Symbol::from_index(0);
    pub const VAR: Symbol = Symbol::from_index(1);
    pub const INT: Symbol = Symbol::from_index(2);
    pub const FLOAT: Symbol = Symbol::from_index(3);
    pub const STRING: Symbol = Symbol::from_index(4);
    pub const CHAR: Symbol = Symbol::from_index(5);
    pub const BEGIN: Symbol = Symbol::from_index(6);
    pub const END: Symbol = Symbol::from_index(7);
    pub const IF: Symbol = Symbol::from_index(8);
    pub const THEN: Symbol = Symbol::from_index(9);
    pub const ELSE: Symbol = Symbol::from_index(10);
    pub const WHILE: Symbol = Symbol::from_index(11);
    pub const DO: Symbol = Symbol::from_index(12);
    pub const CALL: Symbol = Symbol::from_index(13);
    pub const READ: Symbol = Symbol::from_index(14);
    pub const WRITE: Symbol = Symbol::from_index(15);
    pub const AND: Symbol = Symbol::from_index(16);
    pub const OR: Symbol = Symbol::from_index(17);
    pub const RETURN: Symbol = Symbol::from_index(18);
    pub const CONTINUE: Symbol = Symbol::from_index(19);
    pub const BREAK: Symbol = Symbol::from_index(20);
    pub const MAIN: Symbol = Symbol::from_index(21);
    pub const UNDERSCORE: Symbol = Symbol::from_index(22);
}

/// Global string table, initialised on first use with the known symbols.
static STRING_TABLE: LazyLock<StringTable> = LazyLock::new(|| {
    let table = StringTable::new();
    for s in KNOWN_SYMBOLS {
        table.intern(s);
    }
    table
});

/// A compact handle to an interned string.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(u32);

impl Symbol {
    /// Construct a symbol from a raw table index.
    ///
    /// Only meaningful for indices produced by this module; the [`kw`]
    /// constants are built this way.
    #[inline]
    pub(crate) const fn from_index(index: u32) -> Self {
        Symbol(index)
    }

    /// Intern a string, returning its symbol.
    ///
    /// # Examples
    ///
    /// ```
    /// use primc_util::symbol::{kw, Symbol};
    ///
    /// assert_eq!(Symbol::intern("while"), kw::WHILE);
    /// ```
    pub fn intern(s: &str) -> Symbol {
        STRING_TABLE.intern(s)
    }

    /// The interned text for this symbol.
    pub fn as_str(self) -> &'static str {
        STRING_TABLE.resolve(self.0)
    }

    /// The raw table index.
    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({:?})", self.as_str())
    }
}

impl serde::Serialize for Symbol {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// The two-sided intern table: text -> index for interning, index -> text
/// for resolution.
struct StringTable {
    /// Lookup side. DashMap so interning never takes the resolve lock.
    map: DashMap<&'static str, u32, RandomState>,
    /// Resolve side, indexed by symbol value.
    strings: Mutex<Vec<&'static str>>,
}

impl StringTable {
    fn new() -> Self {
        Self {
            map: DashMap::with_capacity_and_hasher(256, RandomState::new()),
            strings: Mutex::new(Vec::with_capacity(256)),
        }
    }

    fn intern(&self, s: &str) -> Symbol {
        if let Some(entry) = self.map.get(s) {
            return Symbol(*entry);
        }
        let mut strings = self.strings.lock();
        // Re-check under the lock: another caller may have won the race.
        if let Some(entry) = self.map.get(s) {
            return Symbol(*entry);
        }
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        let index = strings.len() as u32;
        strings.push(leaked);
        self.map.insert(leaked, index);
        Symbol(index)
    }

    fn resolve(&self, index: u32) -> &'static str {
        self.strings.lock()[index as usize]
    }
}
