use harvest_core::{ExtractionConfig, TraitScope};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Contents of harvest.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HarvestConfig {
    pub extraction: ExtractionConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// Default filter when RUST_LOG is unset.
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl HarvestConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        Ok(toml::from_str(&raw)?)
    }

    /// Missing or unreadable files fall back to defaults.
    pub fn load_or_default(path: &Path) -> Self {
        let (config, problem) = Self::load_lenient(path);
        if let Some(problem) = problem {
            tracing::warn!("{}", problem);
        }
        config
    }

    /// Like `load_or_default`, but hands back the reason a present file was
    /// ignored so it can be logged once tracing is up.
    pub fn load_lenient(path: &Path) -> (Self, Option<String>) {
        if !path.exists() {
            return (Self::default(), None);
        }
        match Self::load(path) {
            Ok(config) => (config, None),
            Err(e) => (
                Self::default(),
                Some(format!("Ignoring {}: {}", path.display(), e)),
            ),
        }
    }

    /// Apply `--host-scope-prefix` / `--global-trait` overrides from the command line.
    pub fn with_overrides(mut self, prefixes: &[String], global_traits: &[String]) -> Self {
        if !prefixes.is_empty() {
            self.extraction.host_scope_prefixes = prefixes.to_vec();
        }
        for trait_name in global_traits {
            self.extraction
                .trait_scopes
                .insert(trait_name.clone(), TraitScope::Global);
        }
        self
    }

    /// Every problem found, empty when valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if let Err(e) = self.extraction.validate() {
            errors.push(e.to_string());
        }
        if self.log.filter.trim().is_empty() {
            errors.push("log.filter must not be empty".to_string());
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[extraction]
host_scope_prefixes = ["host.", "local."]

[extraction.trait_scopes]
"host.domain" = "global"

[log]
filter = "debug"
"#
        )
        .unwrap();

        let config = HarvestConfig::load(file.path()).unwrap();
        assert_eq!(config.extraction.host_scope_prefixes.len(), 2);
        assert_eq!(
            config.extraction.trait_scopes["host.domain"],
            TraitScope::Global
        );
        assert_eq!(config.log.filter, "debug");
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_missing_file_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = HarvestConfig::load_or_default(&dir.path().join("harvest.toml"));
        assert_eq!(config, HarvestConfig::default());
    }

    #[test]
    fn test_malformed_file_reports_problem() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[extraction\nhost_scope_prefixes = 3").unwrap();

        let (config, problem) = HarvestConfig::load_lenient(file.path());
        assert_eq!(config, HarvestConfig::default());
        assert!(problem.unwrap().starts_with("Ignoring "));

        let dir = tempfile::tempdir().unwrap();
        let (_, problem) = HarvestConfig::load_lenient(&dir.path().join("harvest.toml"));
        assert!(problem.is_none());
    }

    #[test]
    fn test_overrides_and_validation() {
        let config = HarvestConfig::default()
            .with_overrides(&["".to_string()], &["host.domain".to_string()]);
        assert_eq!(
            config.extraction.trait_scopes["host.domain"],
            TraitScope::Global
        );
        assert_eq!(config.validate().len(), 1);
    }

    #[test]
    fn test_round_trips_through_toml() {
        let config = HarvestConfig::default();
        let rendered = toml::to_string_pretty(&config).unwrap();
        let parsed: HarvestConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }
}
