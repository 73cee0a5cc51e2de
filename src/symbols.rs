use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::error::{AsmError, ErrorKind, Result};
use crate::parser::ParsedLine;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Symbol {
    pub name: String,
    pub addr: u16,
}

/// Label name to address. Filled by the first pass, read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    map: HashMap<String, u16>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, addr: u16) -> std::result::Result<(), ErrorKind> {
        if self.map.contains_key(name) {
            return Err(ErrorKind::DuplicateLabel(name.to_string()));
        }
        self.map.insert(name.to_string(), addr);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<u16> {
        self.map.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// All symbols ordered by address, then name.
    pub fn symbols(&self) -> Vec<Symbol> {
        let mut out: Vec<Symbol> = self
            .map
            .iter()
            .map(|(name, &addr)| Symbol { name: name.clone(), addr })
            .collect();
        out.sort_by(|a, b| a.addr.cmp(&b.addr).then_with(|| a.name.cmp(&b.name)));
        out
    }

    /// First-pass step: binds the line's label, if any, to `pc`.
    pub fn record(&mut self, parsed: &ParsedLine, pc: u16, line: usize) -> Result<()> {
        let Some(label) = &parsed.label else { return Ok(()) };
        self.insert(label, pc).map_err(|kind| AsmError::new(line, kind))?;
        debug!(line, label = %label, addr = pc, "label defined");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_line;

    #[test]
    fn duplicate_insert_fails() {
        let mut t = SymbolTable::new();
        t.insert("A1", 4).unwrap();
        assert_eq!(t.insert("A1", 9), Err(ErrorKind::DuplicateLabel("A1".into())));
        assert_eq!(t.get("A1"), Some(4));
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn labels_are_case_sensitive() {
        let mut t = SymbolTable::new();
        t.insert("loop", 1).unwrap();
        t.insert("LOOP", 2).unwrap();
        assert_eq!(t.get("loop"), Some(1));
        assert_eq!(t.get("LOOP"), Some(2));
    }

    #[test]
    fn record_ignores_unlabelled_lines() {
        let mut t = SymbolTable::new();
        t.record(&parse_line("  NOP", 1).unwrap(), 0, 1).unwrap();
        assert!(t.is_empty());
        t.record(&parse_line("here: NOP", 2).unwrap(), 1, 2).unwrap();
        let err = t.record(&parse_line("here:", 3).unwrap(), 2, 3).unwrap_err();
        assert_eq!(err.line, 3);
        assert!(matches!(err.kind, ErrorKind::DuplicateLabel(ref l) if l == "here"));
    }

    #[test]
    fn symbols_sorted_by_address() {
        let mut t = SymbolTable::new();
        t.insert("end", 9).unwrap();
        t.insert("b", 0).unwrap();
        t.insert("a", 0).unwrap();
        let names: Vec<_> = t.symbols().into_iter().map(|s| s.name).collect();
        assert_eq!(names, ["a", "b", "end"]);
    }
}
