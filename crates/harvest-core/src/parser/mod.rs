//! Pluggable output parsers
//!
//! Abilities name their parsers by module id. A `ParserRegistry` built at
//! startup maps those ids to factories; each factory builds a `Parser`
//! for one link with the link's context.

mod basic;
mod decode;
mod registry;

pub use basic::BasicParser;
pub use decode::{decode_result, encode_result};
pub use registry::{ParserFactory, ParserRegistry};

use crate::ability::ParserConfig;
use crate::error::Result;
use crate::types::{Fact, Relationship};
use async_trait::async_trait;

/// What a parser is built with
#[derive(Debug, Clone, Default)]
pub struct ParserContext {
    /// Module id the parser was resolved under.
    pub module: String,

    /// Facts the link consumed as inputs.
    pub used_facts: Vec<Fact>,

    /// Mapper configurations declared on the ability.
    pub mappers: Vec<ParserConfig>,

    /// Facts known to the operation's source.
    pub source_facts: Vec<Fact>,
}

/// Turns decoded command output into relationships.
#[async_trait]
pub trait Parser: Send + Sync {
    async fn parse(&self, blob: &str) -> Result<Vec<Relationship>>;
}
