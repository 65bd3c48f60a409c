//! Link: one scheduled command and the knowledge extracted from its output
//!
//! After a successful execution `parse` runs each parser the ability
//! declares, in order:
//! 1. decode the base64 result
//! 2. build the parser from the registry
//! 3. extract relationships
//! 4. reward the facts the link consumed
//! 5. materialize relationship endpoints as deduplicated facts
//!
//! A failure or panic in 1-3 costs only that parser's output. Anything else is logged
//! and swallowed; `parse` never fails.

mod display;


pub use display::{FactDisplay, LinkDisplay};

use crate::ability::{Ability, ParserDescriptor};
use crate::error::{HarvestError, Result};
use crate::extractor::Extractor;
use crate::facts::{is_new_fact, reward_first_match};
use crate::operation::Operation;
use crate::parser::{decode_result, ParserContext};
use crate::status::LinkStatus;
use crate::types::{content_hash, Fact, FactPair, Relationship, UniqueId, Visibility};
use chrono::{DateTime, Utc};
use futures::FutureExt;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::panic::AssertUnwindSafe;
use uuid::Uuid;

/// Outcome of one `parse` call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseSummary {
    /// True when the call was gated (not successful yet, or already parsed).
    pub skipped: bool,
    pub descriptors_run: usize,
    pub relationships_found: usize,
    pub facts_added: usize,
    /// Parsers whose output was dropped.
    pub failures: Vec<DescriptorFailure>,
    /// Set when an unexpected failure cut the call short.
    pub aborted: Option<String>,
}

impl ParseSummary {
    fn skipped() -> Self {
        Self {
            skipped: true,
            ..Default::default()
        }
    }
}

/// A parser whose output was dropped, and why
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptorFailure {
    pub module: String,
    pub error: String,
}

/// One scheduled/executed command instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    /// Assigned at dispatch by `apply_id`.
    #[serde(default)]
    pub id: Option<String>,

    /// Encoded command.
    pub command: String,

    /// Agent that runs the command.
    pub paw: String,

    #[serde(default)]
    pub host: Option<String>,

    #[serde(default)]
    pub cleanup: i32,

    pub ability: Ability,

    #[serde(default)]
    pub status: LinkStatus,

    #[serde(default)]
    pub score: i64,

    #[serde(default)]
    pub jitter: u32,

    /// When the planner decided on this link.
    #[serde(default = "Utc::now")]
    pub decide: DateTime<Utc>,

    /// When the agent collected the command.
    #[serde(default)]
    pub collect: Option<DateTime<Utc>>,

    /// When the agent reported the result.
    #[serde(default)]
    pub finish: Option<DateTime<Utc>>,

    #[serde(default)]
    pub pid: Option<u32>,

    /// Facts consumed as inputs when the command was generated.
    #[serde(default)]
    pub used: Vec<Fact>,

    #[serde(default)]
    pub visibility: Visibility,

    #[serde(default)]
    pub output: bool,

    #[serde(default)]
    pin: i64,

    #[serde(default)]
    facts: Vec<Fact>,

    #[serde(default)]
    relationships: Vec<Relationship>,

    #[serde(default)]
    parsed: bool,
}

impl Link {
    /// A link awaiting dispatch: no id, status EXECUTE.
    pub fn new(command: impl Into<String>, paw: impl Into<String>, ability: Ability) -> Self {
        Link {
            id: None,
            command: command.into(),
            paw: paw.into(),
            host: None,
            cleanup: 0,
            ability,
            status: LinkStatus::Execute,
            score: 0,
            jitter: 0,
            decide: Utc::now(),
            collect: None,
            finish: None,
            pid: None,
            used: Vec::new(),
            visibility: Visibility::default(),
            output: false,
            pin: 0,
            facts: Vec::new(),
            relationships: Vec::new(),
            parsed: false,
        }
    }

    /// Restore a link from its JSON form. Missing optional fields default.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_used(mut self, used: Vec<Fact>) -> Self {
        self.used = used;
        self
    }

    pub fn with_status(mut self, status: LinkStatus) -> Self {
        self.status = status;
        self
    }

    /// Assign a fresh identifier and the host at dispatch time.
    pub fn apply_id(&mut self, host: impl Into<String>) {
        self.id = Some(Uuid::now_v7().to_string());
        self.host = Some(host.into());
    }

    /// Identity derived from the id (empty before dispatch).
    pub fn unique(&self) -> UniqueId {
        content_hash(&[self.id.as_deref().unwrap_or("")])
    }

    pub fn pin(&self) -> i64 {
        self.pin
    }

    pub fn set_pin(&mut self, pin: i64) {
        self.pin = pin;
    }

    pub fn can_ignore(&self) -> bool {
        self.status.can_ignore()
    }

    /// Facts this link materialized, in discovery order.
    pub fn facts(&self) -> &[Fact] {
        &self.facts
    }

    /// Relationships this link materialized, in discovery order.
    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    pub fn is_parsed(&self) -> bool {
        self.parsed
    }

    /// Extract knowledge from an encoded `result`.
    ///
    /// No-op unless the status is success and the link has not been parsed
    /// before. Never fails: parser-level failures drop that parser's output,
    /// anything else is logged at debug level.
    pub async fn parse(
        &mut self,
        extractor: &Extractor,
        operation: Option<&Operation>,
        result: &str,
    ) -> ParseSummary {
        if !self.status.is_success() || self.parsed {
            return ParseSummary::skipped();
        }
        self.parsed = true;

        let mut summary = ParseSummary::default();
        if let Err(e) = self.run_parsers(extractor, operation, result, &mut summary).await {
            debug!("parse exception: {}", e);
            summary.aborted = Some(e.to_string());
        }
        summary
    }

    async fn run_parsers(
        &mut self,
        extractor: &Extractor,
        operation: Option<&Operation>,
        result: &str,
        summary: &mut ParseSummary,
    ) -> Result<()> {
        let source_facts = operation.map(Operation::source_facts).unwrap_or_default();
        let descriptors = self.ability.parsers.clone();

        for descriptor in &descriptors {
            summary.descriptors_run += 1;
            let relationships = match self
                .extract(extractor, descriptor, result, source_facts.clone())
                .await
            {
                Ok(relationships) => relationships,
                Err(e) => {
                    debug!("parser {} produced nothing: {}", descriptor.module, e);
                    summary.failures.push(DescriptorFailure {
                        module: descriptor.module.clone(),
                        error: e.to_string(),
                    });
                    Vec::new()
                }
            };

            summary.relationships_found += relationships.len();
            self.update_scores(operation, relationships.len() as i64)?;
            summary.facts_added += self.create_relationships(relationships, extractor, operation)?;
        }
        Ok(())
    }

    /// Decode, build and run one parser.
    async fn extract(
        &self,
        extractor: &Extractor,
        descriptor: &ParserDescriptor,
        result: &str,
        source_facts: Vec<Fact>,
    ) -> Result<Vec<Relationship>> {
        let blob = decode_result(result)?;
        let context = ParserContext {
            module: descriptor.module.clone(),
            used_facts: self.used.clone(),
            mappers: descriptor.parserconfigs.clone(),
            source_facts,
        };
        let run = async {
            let parser = extractor.registry().load(context).await?;
            parser.parse(&blob).await
        };
        match AssertUnwindSafe(run).catch_unwind().await {
            Ok(relationships) => relationships,
            Err(_) => Err(HarvestError::ParserPanic {
                module: descriptor.module.clone(),
            }),
        }
    }

    /// Reward each used fact in the applicable pool by `increment`.
    fn update_scores(&mut self, operation: Option<&Operation>, increment: i64) -> Result<()> {
        if increment == 0 {
            return Ok(());
        }
        for used in &self.used {
            let unique = used.unique();
            let found = match operation {
                Some(op) => op.pool().reward(&unique, increment)?,
                None => reward_first_match(&mut self.facts, &unique, increment),
            };
            trace!("reward {} by {}: found={}", used.trait_name, increment, found);
        }
        Ok(())
    }

    /// Persist both endpoints of each relationship, then keep the relationship.
    /// Returns how many facts were added.
    fn create_relationships(
        &mut self,
        relationships: Vec<Relationship>,
        extractor: &Extractor,
        operation: Option<&Operation>,
    ) -> Result<usize> {
        let mut added = 0;
        for relationship in relationships {
            if self.save_fact(&relationship.source, relationship.score, extractor, operation)? {
                added += 1;
            }
            if self.save_fact(&relationship.target, relationship.score, extractor, operation)? {
                added += 1;
            }
            self.relationships.push(relationship);
        }
        Ok(added)
    }

    fn save_fact(
        &mut self,
        pair: &FactPair,
        score: i64,
        extractor: &Extractor,
        operation: Option<&Operation>,
    ) -> Result<bool> {
        if !pair.is_complete() {
            return Ok(false);
        }
        let fact = Fact::new(pair.trait_name.clone(), pair.value.clone(), score)
            .with_collector(self.paw.clone())
            .with_technique(self.ability.technique_id.clone());

        let inserted = match operation {
            Some(op) => op.pool().insert_if_new(fact.clone(), extractor.policy())?,
            None => is_new_fact(pair, &self.paw, &self.facts, extractor.policy()),
        };
        trace!("fact {}={} new={}", pair.trait_name, pair.value, inserted);
        if inserted {
            self.facts.push(fact);
        }
        Ok(inserted)
    }

    /// Flattened, serializable view for presentation.
    pub fn display(&self) -> LinkDisplay {
        LinkDisplay::from(self)
    }
}
