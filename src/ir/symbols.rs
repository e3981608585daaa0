//! Flat symbol table
//!
//! Every declared identifier and every synthesized temporary lives in one
//! global namespace. Names are their own addresses in the emitted code, so
//! the table only records what each name currently holds.

use crate::compiler::constants::TEMP_PREFIX;
use rustc_hash::FxHashMap;
use std::fmt;

/// What a symbol-table entry holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolValue {
    /// `CONST` entry with its literal value
    Const(i64),
    /// `VAR` entry with its placeholder value
    Var(i64),
    /// Synthesized temporary, only an addressable location
    Temp,
}

impl fmt::Display for SymbolValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolValue::Const(n) | SymbolValue::Var(n) => write!(f, "{}", n),
            SymbolValue::Temp => write!(f, "_"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    pub value: SymbolValue,
}

/// Insertion-ordered symbol table.
///
/// Redeclaring a name overwrites its value and keeps its original position.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    entries: Vec<Symbol>,
    index: FxHashMap<String, usize>,
    temp_count: usize,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite an entry.
    pub fn declare(&mut self, name: &str, value: SymbolValue) {
        match self.index.get(name) {
            Some(&slot) => self.entries[slot].value = value,
            None => {
                self.index.insert(name.to_string(), self.entries.len());
                self.entries.push(Symbol {
                    name: name.to_string(),
                    value,
                });
            }
        }
    }

    /// Synthesize the next `#TEMPn` name and register it.
    pub fn new_temporary(&mut self) -> String {
        self.temp_count += 1;
        let name = format!("{}{}", TEMP_PREFIX, self.temp_count);
        self.declare(&name, SymbolValue::Temp);
        name
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.index.get(name).map(|&slot| &self.entries[slot])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Entries in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of temporaries synthesized so far
    pub fn temporary_count(&self) -> usize {
        self.temp_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redeclaration_overwrites_in_place() {
        let mut table = SymbolTable::new();
        table.declare("a", SymbolValue::Const(1));
        table.declare("b", SymbolValue::Var(0));
        table.declare("a", SymbolValue::Var(0));

        assert_eq!(table.len(), 2);
        assert_eq!(table.get("a").map(|s| s.value), Some(SymbolValue::Var(0)));
        let names: Vec<&str> = table.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_temporaries_are_unique() {
        let mut table = SymbolTable::new();
        assert_eq!(table.new_temporary(), "#TEMP1");
        assert_eq!(table.new_temporary(), "#TEMP2");
        assert_eq!(table.get("#TEMP2").map(|s| s.value), Some(SymbolValue::Temp));
        assert_eq!(table.temporary_count(), 2);
    }
}
