use crate::error::{HarvestError, Result};
use crate::scope::{ScopePolicy, TraitScope};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration for link extraction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Traits starting with any of these are deduplicated per collecting
    /// agent. Default: ["host."].
    pub host_scope_prefixes: Vec<String>,

    /// Exact trait names with an explicit scope. Wins over prefixes.
    pub trait_scopes: HashMap<String, TraitScope>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            host_scope_prefixes: vec!["host.".to_string()],
            trait_scopes: HashMap::new(),
        }
    }
}

impl ExtractionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_host_scope_prefixes(mut self, prefixes: Vec<String>) -> Self {
        self.host_scope_prefixes = prefixes;
        self
    }

    pub fn with_trait_scope(mut self, trait_name: impl Into<String>, scope: TraitScope) -> Self {
        self.trait_scopes.insert(trait_name.into(), scope);
        self
    }

    pub fn scope_policy(&self) -> ScopePolicy {
        ScopePolicy::new(self.host_scope_prefixes.clone(), self.trait_scopes.clone())
    }

    pub fn validate(&self) -> Result<()> {
        for prefix in &self.host_scope_prefixes {
            if prefix.is_empty() {
                return Err(HarvestError::Validation(
                    "host_scope_prefixes must not contain empty prefixes".into(),
                ));
            }
        }

        if self.trait_scopes.keys().any(|t| t.is_empty()) {
            return Err(HarvestError::Validation(
                "trait_scopes keys must be non-empty trait names".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = ExtractionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.scope_policy(), ScopePolicy::default());
    }

    #[test]
    fn test_empty_prefix_rejected() {
        let config = ExtractionConfig::new().with_host_scope_prefixes(vec!["".into()]);
        assert!(matches!(
            config.validate(),
            Err(HarvestError::Validation(_))
        ));
    }

    #[test]
    fn test_trait_scope_flows_into_policy() {
        let policy = ExtractionConfig::new()
            .with_trait_scope("domain.user.name", TraitScope::PerCollector)
            .scope_policy();
        assert!(policy.is_per_collector("domain.user.name"));
        assert!(policy.is_per_collector("host.file.path"));
    }

    #[test]
    fn test_partial_config_deserializes() {
        let config: ExtractionConfig =
            serde_json::from_str(r#"{"trait_scopes": {"host.domain": "global"}}"#).unwrap();
        assert_eq!(config.host_scope_prefixes, vec!["host.".to_string()]);
        assert_eq!(config.trait_scopes["host.domain"], TraitScope::Global);
    }
}
