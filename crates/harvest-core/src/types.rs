use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Content-derived identifier (SHA-256, hex encoded)
pub type UniqueId = String;

/// Hash `parts` into a stable hex identifier. Parts are unit-separated so
/// ("ab", "c") and ("a", "bc") differ.
pub fn content_hash(parts: &[&str]) -> UniqueId {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part.as_bytes());
        hasher.update([0x1fu8]);
    }
    hex::encode(hasher.finalize())
}

/// A bare (trait, value) pair as emitted by a parser.
/// Either side may be empty; only complete pairs become facts.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct FactPair {
    #[serde(rename = "trait")]
    pub trait_name: String,
    pub value: String,
}

impl FactPair {
    pub fn new(trait_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            trait_name: trait_name.into(),
            value: value.into(),
        }
    }

    /// Both trait and value are non-empty.
    pub fn is_complete(&self) -> bool {
        !self.trait_name.is_empty() && !self.value.is_empty()
    }

    /// Same trait and same value as `fact`.
    pub fn matches(&self, fact: &Fact) -> bool {
        self.trait_name == fact.trait_name && self.value == fact.value
    }
}

/// A discovered datum in an operation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Fact {
    /// Namespaced key, e.g. "host.user.name".
    #[serde(rename = "trait")]
    pub trait_name: String,

    pub value: String,

    /// Discovery score. Grows when the fact feeds a productive link.
    pub score: i64,

    /// Paw of the agent that collected this fact. Empty for seeded facts.
    #[serde(default)]
    pub collected_by: String,

    /// Technique that produced the fact.
    #[serde(default)]
    pub technique_id: String,
}

impl Fact {
    pub fn new(trait_name: impl Into<String>, value: impl Into<String>, score: i64) -> Self {
        Fact {
            trait_name: trait_name.into(),
            value: value.into(),
            score,
            collected_by: String::new(),
            technique_id: String::new(),
        }
    }

    pub fn with_collector(mut self, paw: impl Into<String>) -> Self {
        self.collected_by = paw.into();
        self
    }

    pub fn with_technique(mut self, technique_id: impl Into<String>) -> Self {
        self.technique_id = technique_id.into();
        self
    }

    /// Identity derived from trait and value only. Host-scoped duplicates
    /// collected by different agents share it.
    pub fn unique(&self) -> UniqueId {
        content_hash(&[&self.trait_name, &self.value])
    }

    pub fn pair(&self) -> FactPair {
        FactPair::new(self.trait_name.clone(), self.value.clone())
    }
}

/// A discovered association between two fact pairs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Relationship {
    pub source: FactPair,

    /// Optional label, e.g. "has_password".
    #[serde(default)]
    pub edge: Option<String>,

    #[serde(default)]
    pub target: FactPair,

    pub score: i64,
}

impl Relationship {
    pub fn new(source: FactPair, edge: Option<String>, target: FactPair, score: i64) -> Self {
        Relationship {
            source,
            edge,
            target,
            score,
        }
    }

    pub fn unique(&self) -> UniqueId {
        content_hash(&[
            &self.source.trait_name,
            &self.source.value,
            self.edge.as_deref().unwrap_or(""),
            &self.target.trait_name,
            &self.target.value,
        ])
    }
}

/// Visibility carried by a link. The policy that adjusts it lives elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Visibility {
    pub score: i64,
}

impl Default for Visibility {
    fn default() -> Self {
        Self { score: 50 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_completeness() {
        assert!(FactPair::new("host.user", "root").is_complete());
        assert!(!FactPair::new("host.user", "").is_complete());
        assert!(!FactPair::new("", "root").is_complete());
        assert!(!FactPair::default().is_complete());
    }

    #[test]
    fn test_fact_unique_ignores_collector_and_score() {
        let a = Fact::new("host.user", "root", 1).with_collector("A1");
        let b = Fact::new("host.user", "root", 9).with_collector("A2");
        let c = Fact::new("host.user", "admin", 1).with_collector("A1");

        assert_eq!(a.unique(), b.unique());
        assert_ne!(a.unique(), c.unique());
        assert_eq!(a.unique().len(), 64);
    }

    #[test]
    fn test_fact_serializes_trait_key() {
        let fact = Fact::new("software.name", "bash", 1);
        let json = serde_json::to_value(&fact).unwrap();
        assert_eq!(json["trait"], "software.name");
        assert_eq!(json["collected_by"], "");
    }
}
