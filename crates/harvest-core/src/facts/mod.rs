//! Fact pool: scoped deduplication and score propagation
//!
//! A link materializes facts into whichever pool applies:
//! - the operation's shared `FactPool` when it runs inside an operation
//! - its own fact list otherwise
//!
//! Both paths share the same dedup and reward rules.

mod dedup;
mod pool;
mod scoring;

pub use dedup::is_new_fact;
pub use pool::FactPool;
pub use scoring::reward_first_match;
