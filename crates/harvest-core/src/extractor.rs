use crate::config::ExtractionConfig;
use crate::error::Result;
use crate::parser::ParserRegistry;
use crate::scope::ScopePolicy;
use std::sync::Arc;

/// Everything a link needs to extract its result: the parser registry and
/// the trait scope policy. Built once at startup and shared.
#[derive(Debug, Clone)]
pub struct Extractor {
    registry: Arc<ParserRegistry>,
    policy: ScopePolicy,
}

impl Extractor {
    pub fn new(registry: ParserRegistry, config: &ExtractionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            registry: Arc::new(registry),
            policy: config.scope_policy(),
        })
    }

    /// Built-in parsers, default scope policy.
    pub fn with_builtins() -> Self {
        Self {
            registry: Arc::new(ParserRegistry::with_builtins()),
            policy: ScopePolicy::default(),
        }
    }

    pub fn registry(&self) -> &ParserRegistry {
        &self.registry
    }

    pub fn policy(&self) -> &ScopePolicy {
        &self.policy
    }
}
