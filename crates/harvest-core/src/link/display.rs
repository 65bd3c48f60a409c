use crate::ability::Ability;
use crate::link::Link;
use crate::types::{Fact, UniqueId, Visibility};
use chrono::{DateTime, Utc};
use serde::Serialize;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn format_timestamp(ts: Option<&DateTime<Utc>>) -> String {
    ts.map(|t| t.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_default()
}

/// Presentation form of a fact
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FactDisplay {
    pub unique: UniqueId,
    #[serde(rename = "trait")]
    pub trait_name: String,
    pub value: String,
    pub score: i64,
    pub collected_by: String,
    pub technique_id: String,
}

impl From<&Fact> for FactDisplay {
    fn from(fact: &Fact) -> Self {
        FactDisplay {
            unique: fact.unique(),
            trait_name: fact.trait_name.clone(),
            value: fact.value.clone(),
            score: fact.score,
            collected_by: fact.collected_by.clone(),
            technique_id: fact.technique_id.clone(),
        }
    }
}

/// Presentation form of a link.
///
/// Timestamps render as `YYYY-MM-DD HH:MM:SS`; unset values (timestamps,
/// id, host, pid) render as the empty string.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LinkDisplay {
    pub id: String,
    pub paw: String,
    pub command: String,
    pub executor: String,
    pub status: i32,
    pub score: i64,
    pub decide: String,
    pub pin: i64,
    pub pid: String,
    pub facts: Vec<FactDisplay>,
    pub unique: UniqueId,
    pub collect: String,
    pub finish: String,
    pub ability: Ability,
    pub cleanup: i32,
    pub visibility: Visibility,
    pub host: String,
    pub output: bool,
}

impl From<&Link> for LinkDisplay {
    fn from(link: &Link) -> Self {
        LinkDisplay {
            id: link.id.clone().unwrap_or_default(),
            paw: link.paw.clone(),
            command: link.command.clone(),
            executor: link.ability.executor.clone(),
            status: link.status.code(),
            score: link.score,
            decide: format_timestamp(Some(&link.decide)),
            pin: link.pin(),
            pid: link.pid.map(|p| p.to_string()).unwrap_or_default(),
            facts: link.facts().iter().map(FactDisplay::from).collect(),
            unique: link.unique(),
            collect: format_timestamp(link.collect.as_ref()),
            finish: format_timestamp(link.finish.as_ref()),
            ability: link.ability.clone(),
            cleanup: link.cleanup,
            visibility: link.visibility.clone(),
            host: link.host.clone().unwrap_or_default(),
            output: link.output,
        }
    }
}
