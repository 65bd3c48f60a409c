use crate::error::{HarvestError, Result};
use crate::parser::{BasicParser, Parser, ParserContext};
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Builds a parser for one link.
#[async_trait]
pub trait ParserFactory: Send + Sync {
    async fn build(&self, context: ParserContext) -> Result<Box<dyn Parser>>;
}

/// Adapter so plain functions and closures can be registered.
struct FnFactory<F>(F);

#[async_trait]
impl<F> ParserFactory for FnFactory<F>
where
    F: Fn(ParserContext) -> Result<Box<dyn Parser>> + Send + Sync,
{
    async fn build(&self, context: ParserContext) -> Result<Box<dyn Parser>> {
        (self.0)(context)
    }
}

/// Module id → parser factory. Populated at startup, read-only afterwards.
#[derive(Clone, Default)]
pub struct ParserRegistry {
    factories: HashMap<String, Arc<dyn ParserFactory>>,
}

impl ParserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the parsers shipped in this crate.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register_fn(BasicParser::MODULE, |context| {
            Ok(Box::new(BasicParser::new(context)) as Box<dyn Parser>)
        });
        registry
    }

    /// Register `factory` under `module`, replacing any previous entry.
    pub fn register(&mut self, module: impl Into<String>, factory: impl ParserFactory + 'static) {
        self.factories.insert(module.into(), Arc::new(factory));
    }

    pub fn register_fn<F>(&mut self, module: impl Into<String>, f: F)
    where
        F: Fn(ParserContext) -> Result<Box<dyn Parser>> + Send + Sync + 'static,
    {
        self.register(module, FnFactory(f));
    }

    pub fn contains(&self, module: &str) -> bool {
        self.factories.contains_key(module)
    }

    pub fn modules(&self) -> Vec<String> {
        let mut modules: Vec<String> = self.factories.keys().cloned().collect();
        modules.sort();
        modules
    }

    /// Resolve `context.module` and build its parser.
    pub async fn load(&self, context: ParserContext) -> Result<Box<dyn Parser>> {
        let factory = self
            .factories
            .get(&context.module)
            .cloned()
            .ok_or_else(|| HarvestError::UnknownParser(context.module.clone()))?;
        factory.build(context).await
    }
}

impl fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserRegistry")
            .field("modules", &self.modules())
            .finish()
    }
}
