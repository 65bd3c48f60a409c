pub mod ability;
pub mod config;
pub mod error;
pub mod extractor;
pub mod facts;
pub mod link;
pub mod operation;
pub mod parser;
pub mod scope;
pub mod status;
pub mod types;

pub use ability::{Ability, ParserConfig, ParserDescriptor};
pub use config::ExtractionConfig;
pub use error::{HarvestError, Result};
pub use extractor::Extractor;
pub use facts::{is_new_fact, FactPool};
pub use link::{DescriptorFailure, FactDisplay, Link, LinkDisplay, ParseSummary};
pub use operation::{FactSource, Operation};
pub use parser::{
    decode_result, encode_result, BasicParser, Parser, ParserContext, ParserFactory,
    ParserRegistry,
};
pub use scope::{ScopePolicy, TraitScope};
pub use status::LinkStatus;
pub use types::*;
