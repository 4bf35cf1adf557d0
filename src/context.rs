//! Per-parse mutable state handed to every rule.

use std::collections::HashMap;

use crate::ast::Ast;

/// Temporary store for rules that need memory across calls, e.g. the name of
/// the section a multi-line block belongs to.
#[derive(Debug, Clone, Default)]
pub struct Scratch {
    values: HashMap<String, String>,
}

impl Scratch {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.insert(key.into(), value.into())
    }

    /// Removes and returns `key`.
    pub fn take(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Created fresh for each parse and dropped when it ends.
#[derive(Debug, Default)]
pub struct ParseContext {
    pub scratch: Scratch,
    pub ast: Ast,
}

impl ParseContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_ast(self) -> Ast {
        self.ast
    }
}
