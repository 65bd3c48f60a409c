use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How one parser should map its matches onto traits
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ParserConfig {
    /// Trait assigned to each match.
    pub source: String,

    /// Relationship label between source and target.
    #[serde(default)]
    pub edge: Option<String>,

    /// Trait of the relationship's target, if any.
    #[serde(default)]
    pub target: Option<String>,

    /// Free-form settings understood by a specific parser.
    #[serde(default)]
    pub custom_parser_vals: HashMap<String, String>,
}

impl ParserConfig {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Default::default()
        }
    }

    pub fn with_edge(mut self, edge: impl Into<String>) -> Self {
        self.edge = Some(edge.into());
        self
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }
}

/// A parser declared on an ability: registry module id plus its mappers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParserDescriptor {
    pub module: String,

    #[serde(default)]
    pub parserconfigs: Vec<ParserConfig>,
}

impl ParserDescriptor {
    pub fn new(module: impl Into<String>, parserconfigs: Vec<ParserConfig>) -> Self {
        Self {
            module: module.into(),
            parserconfigs,
        }
    }
}

/// The technique definition a link was generated from
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Ability {
    pub ability_id: String,
    pub tactic: String,
    pub technique_id: String,
    pub technique_name: String,
    pub name: String,
    pub description: String,
    pub executor: String,
    pub platform: String,

    /// Run in declared order after a successful execution.
    pub parsers: Vec<ParserDescriptor>,
}

impl Ability {
    pub fn new(
        ability_id: impl Into<String>,
        technique_id: impl Into<String>,
        executor: impl Into<String>,
    ) -> Self {
        Ability {
            ability_id: ability_id.into(),
            technique_id: technique_id.into(),
            executor: executor.into(),
            ..Default::default()
        }
    }

    pub fn with_parser(mut self, parser: ParserDescriptor) -> Self {
        self.parsers.push(parser);
        self
    }
}
