//! Symbol Table
//!
//! A stack of scopes. Scope `n` of the stack is nesting level `n`, and each
//! scope hands out storage indices from zero in declaration order.

use rustc_hash::FxHashMap as HashMap;

use crate::ast::{Span, Type};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Variable,
    Parameter,
}

/// A resolved storage slot: `index` within the frame opened at `level`
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolEntry {
    pub name: String,
    pub kind: SymbolKind,
    pub ty: Type,
    pub index: usize,
    pub level: usize,
    /// Where the name was declared
    pub span: Span,
}

/// One lexical scope
#[derive(Debug, Clone, Default)]
pub struct Scope {
    symbols: HashMap<String, SymbolEntry>,
    next_index: usize,
}

impl Scope {
    /// Number of storage slots this scope has handed out
    pub fn len(&self) -> usize {
        self.next_index
    }

    pub fn is_empty(&self) -> bool {
        self.next_index == 0
    }
}

#[derive(Debug, Clone)]
pub struct SymbolTable {
    scopes: Vec<Scope>,
    /// Every entry ever declared, in declaration order
    declared: Vec<SymbolEntry>,
}

impl SymbolTable {
    /// A table with its level-0 scope already open
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::default()],
            declared: Vec::new(),
        }
    }

    pub fn enter_scope(&mut self) {
        self.scopes.push(Scope::default());
    }

    /// Close the innermost scope, returning it. The level-0 scope stays open.
    pub fn exit_scope(&mut self) -> Option<Scope> {
        if self.scopes.len() > 1 {
            self.scopes.pop()
        } else {
            None
        }
    }

    /// Nesting level of the innermost scope
    pub fn level(&self) -> usize {
        self.scopes.len() - 1
    }

    /// Declare a name in the innermost scope. On a clash the earlier entry is
    /// returned as the error.
    pub fn declare(
        &mut self,
        name: &str,
        kind: SymbolKind,
        ty: Type,
        span: Span,
    ) -> Result<SymbolEntry, SymbolEntry> {
        let level = self.level();
        let scope = &mut self.scopes[level];

        if let Some(existing) = scope.symbols.get(name) {
            return Err(existing.clone());
        }

        let entry = SymbolEntry {
            name: name.to_string(),
            kind,
            ty,
            index: scope.next_index,
            level,
            span,
        };
        scope.next_index += 1;
        scope.symbols.insert(name.to_string(), entry.clone());
        self.declared.push(entry.clone());
        Ok(entry)
    }

    /// Resolve a name through the scope chain, innermost first
    pub fn lookup(&self, name: &str) -> Option<&SymbolEntry> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.symbols.get(name))
    }

    /// Slots handed out by the level-0 scope
    pub fn root_len(&self) -> usize {
        self.scopes.first().map(Scope::len).unwrap_or(0)
    }

    /// All entries declared through this table, in declaration order
    pub fn entries(&self) -> &[SymbolEntry] {
        &self.declared
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
