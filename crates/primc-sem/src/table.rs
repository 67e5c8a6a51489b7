//! Generic symbol table.
//!
//! A thin name→value map used for all four of the analyser's tables
//! (methods, scope, unused variables, unused methods). Backed by an
//! `IndexMap` so enumeration follows insertion order - warning output is
//! deterministic.

use indexmap::IndexMap;
use primc_util::symbol::Symbol;

/// Name → value mapping with has/add/get/remove/len/enumerate.
#[derive(Clone, Debug)]
pub struct SymbolTable<T> {
    symbols: IndexMap<Symbol, T>,
}

impl<T> Default for SymbolTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SymbolTable<T> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            symbols: IndexMap::new(),
        }
    }

    /// Whether `name` is present.
    pub fn has(&self, name: Symbol) -> bool {
        self.symbols.contains_key(&name)
    }

    /// Insert or overwrite `name`.
    pub fn add(&mut self, name: Symbol, value: T) {
        self.symbols.insert(name, value);
    }

    /// The value for `name`, if present.
    pub fn get(&self, name: Symbol) -> Option<&T> {
        self.symbols.get(&name)
    }

    /// Remove `name` if present; absent names are ignored.
    pub fn remove(&mut self, name: Symbol) {
        self.symbols.shift_remove(&name);
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// True when no entries exist.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.symbols.clear();
    }

    /// Enumerate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &T)> {
        self.symbols.iter().map(|(name, value)| (*name, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_has_get() {
        let mut table = SymbolTable::new();
        let a = Symbol::intern("a");
        assert!(!table.has(a));
        table.add(a, 1);
        assert!(table.has(a));
        assert_eq!(table.get(a), Some(&1));
    }

    #[test]
    fn test_overwrite() {
        let mut table = SymbolTable::new();
        let a = Symbol::intern("a");
        table.add(a, 1);
        table.add(a, 2);
        assert_eq!(table.get(a), Some(&2));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut table: SymbolTable<u32> = SymbolTable::new();
        table.remove(Symbol::intern("ghost"));
        assert!(table.is_empty());
    }

    #[test]
    fn test_iteration_order_is_insertion_order() {
        let mut table = SymbolTable::new();
        let names = ["z", "a", "m"];
        for (i, name) in names.iter().enumerate() {
            table.add(Symbol::intern(name), i);
        }
        let seen: Vec<_> = table.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(seen, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_clear() {
        let mut table = SymbolTable::new();
        table.add(Symbol::intern("x"), ());
        table.clear();
        assert!(table.is_empty());
    }
}
