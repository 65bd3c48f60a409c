use crate::error::Result;
use crate::parser::{Parser, ParserContext};
use crate::types::{Fact, FactPair, Relationship};
use async_trait::async_trait;

/// Line parser: every non-empty output line is a match for every mapper.
///
/// A mapper's target trait is filled from a used fact with that trait when
/// one exists, otherwise from the matched line.
pub struct BasicParser {
    context: ParserContext,
}

impl BasicParser {
    pub const MODULE: &'static str = "basic";

    pub fn new(context: ParserContext) -> Self {
        Self { context }
    }

    fn resolve(&self, trait_name: &str, matched: &str) -> String {
        self.context
            .used_facts
            .iter()
            .find(|f: &&Fact| f.trait_name == trait_name)
            .map(|f| f.value.clone())
            .unwrap_or_else(|| matched.to_string())
    }
}

#[async_trait]
impl Parser for BasicParser {
    async fn parse(&self, blob: &str) -> Result<Vec<Relationship>> {
        let mut relationships = Vec::new();
        for line in blob.lines().map(str::trim).filter(|l| !l.is_empty()) {
            for mapper in &self.context.mappers {
                let source = FactPair::new(mapper.source.clone(), line);
                let target = match &mapper.target {
                    Some(t) => FactPair::new(t.clone(), self.resolve(t, line)),
                    None => FactPair::default(),
                };
                relationships.push(Relationship::new(source, mapper.edge.clone(), target, 1));
            }
        }
        Ok(relationships)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::ParserConfig;

    #[tokio::test]
    async fn test_one_relationship_per_line_and_mapper() {
        let parser = BasicParser::new(ParserContext {
            module: BasicParser::MODULE.into(),
            mappers: vec![
                ParserConfig::new("host.user.name"),
                ParserConfig::new("host.process.owner"),
            ],
            ..Default::default()
        });

        let relationships = parser.parse("root\n\n  admin  \n").await.unwrap();
        assert_eq!(relationships.len(), 4);
        assert_eq!(relationships[0].source, FactPair::new("host.user.name", "root"));
        assert_eq!(relationships[3].source, FactPair::new("host.process.owner", "admin"));
        assert!(!relationships[0].target.is_complete());
    }

    #[tokio::test]
    async fn test_target_prefers_used_fact() {
        let parser = BasicParser::new(ParserContext {
            module: BasicParser::MODULE.into(),
            used_facts: vec![Fact::new("host.user.name", "root", 1)],
            mappers: vec![ParserConfig::new("host.user.password")
                .with_edge("has_user")
                .with_target("host.user.name")],
            ..Default::default()
        });

        let relationships = parser.parse("hunter2").await.unwrap();
        assert_eq!(relationships.len(), 1);
        assert_eq!(relationships[0].edge.as_deref(), Some("has_user"));
        assert_eq!(relationships[0].target, FactPair::new("host.user.name", "root"));
    }
}
