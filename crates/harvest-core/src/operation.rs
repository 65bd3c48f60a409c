use crate::error::Result;
use crate::facts::FactPool;
use crate::types::Fact;
use serde::{Deserialize, Serialize};

/// Seed facts an operation starts from
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FactSource {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub facts: Vec<Fact>,
}

/// A multi-link campaign owning the shared fact pool.
#[derive(Debug, Default)]
pub struct Operation {
    pub id: String,
    pub name: String,
    pub source: Option<FactSource>,
    pool: FactPool,
}

impl Operation {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            source: None,
            pool: FactPool::new(),
        }
    }

    /// Attach a fact source. Its facts also seed the pool.
    pub fn with_source(mut self, source: FactSource) -> Self {
        self.pool = FactPool::from_facts(source.facts.clone());
        self.source = Some(source);
        self
    }

    pub fn pool(&self) -> &FactPool {
        &self.pool
    }

    /// Every fact currently known to the operation.
    pub fn all_facts(&self) -> Result<Vec<Fact>> {
        self.pool.snapshot()
    }

    /// Facts known when the operation's commands were generated.
    pub fn source_facts(&self) -> Vec<Fact> {
        self.source
            .as_ref()
            .map(|s| s.facts.clone())
            .unwrap_or_default()
    }
}
