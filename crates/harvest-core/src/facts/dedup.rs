use crate::scope::ScopePolicy;
use crate::types::{Fact, FactPair};

/// Is `candidate`, collected by `collector`, new with respect to `pool`?
///
/// Global traits match on (trait, value) anywhere in the pool. Per-collector
/// traits only match a fact collected by the same agent.
pub fn is_new_fact(
    candidate: &FactPair,
    collector: &str,
    pool: &[Fact],
    policy: &ScopePolicy,
) -> bool {
    let per_collector = policy.is_per_collector(&candidate.trait_name);
    pool.iter()
        .all(|f| !candidate.matches(f) || (per_collector && f.collected_by != collector))
}
