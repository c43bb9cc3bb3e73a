use std::collections::{HashMap, HashSet};

use crate::types::Expr;

/// A mutable mapping from symbol names to values.
///
/// There is no parent chain: the scope for a function call is a full clone
/// of the caller's environment, made once at call time. Definitions inside
/// a call body land in the clone and are invisible to the caller after the
/// call returns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    bindings: HashMap<String, Expr>,
}

impl Environment {
    pub fn new() -> Self {
        Environment::default()
    }

    /// Binds a name, silently overwriting any existing binding.
    pub fn define(&mut self, name: impl Into<String>, value: Expr) {
        self.bindings.insert(name.into(), value);
    }

    /// Looks a name up. Absence is not an error here; callers decide
    /// whether a missing binding is a null result or a failure.
    pub fn get(&self, name: &str) -> Option<&Expr> {
        self.bindings.get(name)
    }

    /// All currently bound names, for completion in the REPL.
    pub fn identifiers(&self) -> HashSet<String> {
        self.bindings.keys().cloned().collect()
    }
}
