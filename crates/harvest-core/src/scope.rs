use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How facts of a trait are deduplicated across the pool
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TraitScope {
    /// One copy per (trait, value) in the whole pool.
    Global,

    /// One copy per (trait, value, collecting agent). Host-local
    /// observations made by two agents are both kept.
    PerCollector,
}

/// Resolves the scope of a trait: exact overrides first, then prefixes.
#[derive(Debug, Clone, PartialEq)]
pub struct ScopePolicy {
    prefixes: Vec<String>,
    overrides: HashMap<String, TraitScope>,
}

impl Default for ScopePolicy {
    fn default() -> Self {
        Self {
            prefixes: vec!["host.".to_string()],
            overrides: HashMap::new(),
        }
    }
}

impl ScopePolicy {
    pub fn new(prefixes: Vec<String>, overrides: HashMap<String, TraitScope>) -> Self {
        Self {
            prefixes,
            overrides,
        }
    }

    pub fn with_override(mut self, trait_name: impl Into<String>, scope: TraitScope) -> Self {
        self.overrides.insert(trait_name.into(), scope);
        self
    }

    pub fn scope_of(&self, trait_name: &str) -> TraitScope {
        if let Some(scope) = self.overrides.get(trait_name) {
            return *scope;
        }
        if self.prefixes.iter().any(|p| trait_name.starts_with(p.as_str())) {
            TraitScope::PerCollector
        } else {
            TraitScope::Global
        }
    }

    pub fn is_per_collector(&self, trait_name: &str) -> bool {
        self.scope_of(trait_name) == TraitScope::PerCollector
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }
}
