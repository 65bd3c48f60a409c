use crate::error::{HarvestError, Result};
use crate::facts::{is_new_fact, reward_first_match};
use crate::scope::ScopePolicy;
use crate::types::Fact;
use std::sync::RwLock;

/// Shared, deduplicated fact pool owned by an operation.
///
/// Links of the same operation may extract concurrently. Every mutation
/// (check-then-insert, read-increment-write) happens inside one write-lock
/// critical section, so two links can neither insert the same fact twice
/// nor lose a score update.
#[derive(Debug, Default)]
pub struct FactPool {
    facts: RwLock<Vec<Fact>>,
}

impl FactPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_facts(facts: Vec<Fact>) -> Self {
        Self {
            facts: RwLock::new(facts),
        }
    }

    /// Insert `fact` unless the pool already holds it under `policy`.
    /// Returns whether it was inserted.
    pub fn insert_if_new(&self, fact: Fact, policy: &ScopePolicy) -> Result<bool> {
        let mut facts = self.facts.write().map_err(|_| HarvestError::PoolPoisoned)?;
        if !is_new_fact(&fact.pair(), &fact.collected_by, &facts, policy) {
            return Ok(false);
        }
        facts.push(fact);
        Ok(true)
    }

    /// Add `increment` to the first fact with identity `unique`.
    pub fn reward(&self, unique: &str, increment: i64) -> Result<bool> {
        let mut facts = self.facts.write().map_err(|_| HarvestError::PoolPoisoned)?;
        Ok(reward_first_match(&mut facts, unique, increment))
    }

    /// Copy of every fact currently in the pool.
    pub fn snapshot(&self) -> Result<Vec<Fact>> {
        let facts = self.facts.read().map_err(|_| HarvestError::PoolPoisoned)?;
        Ok(facts.clone())
    }

    /// First fact with identity `unique`.
    pub fn get(&self, unique: &str) -> Result<Option<Fact>> {
        let facts = self.facts.read().map_err(|_| HarvestError::PoolPoisoned)?;
        Ok(facts.iter().find(|f| f.unique() == unique).cloned())
    }

    pub fn len(&self) -> Result<usize> {
        let facts = self.facts.read().map_err(|_| HarvestError::PoolPoisoned)?;
        Ok(facts.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Poison the lock by panicking while holding it.
    #[cfg(test)]
    pub(crate) fn poison(&self) {
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _facts = self.facts.write();
            panic!("writer died holding the fact pool");
        }));
    }
}
