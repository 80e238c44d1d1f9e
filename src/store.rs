// src/store.rs
//! Session-scoped, per-module result accumulation.
//!
//! An explicit context object owned by the host and passed by reference
//! through the build pipeline; lifetime equals one build invocation, no
//! ambient or global state. Module execution is sequential, so a plain map
//! with last-write-wins per key is sufficient.

use std::collections::HashMap;

use crate::types::{BuildResults, ModuleResults};

pub struct ResultStore {
    module_order: Vec<String>,
    results: HashMap<String, ModuleResults>,
}

impl ResultStore {
    /// Creates a store for a build whose modules run in the given order.
    #[must_use]
    pub fn new(module_order: Vec<String>) -> Self {
        Self {
            module_order,
            results: HashMap::new(),
        }
    }

    /// Stores the results for one module. Storing the same module again
    /// overwrites the previous entry (idempotent re-runs).
    pub fn store(&mut self, results: ModuleResults) {
        self.results.insert(results.module.clone(), results);
    }

    /// Returns every stored module result in build order, skipping modules
    /// for which nothing was stored (analyzers disabled or skipped).
    #[must_use]
    pub fn get_all(&self) -> BuildResults {
        let modules = self
            .module_order
            .iter()
            .filter_map(|name| self.results.get(name))
            .cloned()
            .collect();

        BuildResults::new(modules)
    }
}
