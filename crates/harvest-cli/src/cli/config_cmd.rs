use crate::cli::ConfigCommands;
use crate::config::HarvestConfig;
use anyhow::Result;
use std::path::Path;

pub fn run(cmd: ConfigCommands, config_path: &Path) -> Result<()> {
    match cmd {
        ConfigCommands::Validate => validate(config_path),
        ConfigCommands::Show => show(config_path),
    }
}

fn validate(config_path: &Path) -> Result<()> {
    let config = HarvestConfig::load(config_path)?;
    let errors = config.validate();
    if errors.is_empty() {
        println!("{} is valid.", config_path.display());
        return Ok(());
    }
    for e in &errors {
        println!("  - {}", e);
    }
    anyhow::bail!(
        "{} validation error(s) in {}",
        errors.len(),
        config_path.display()
    )
}

fn show(config_path: &Path) -> Result<()> {
    let config = HarvestConfig::load_or_default(config_path);
    match toml::to_string_pretty(&config) {
        Ok(s) => println!("{}", s),
        Err(e) => anyhow::bail!("Failed to serialize config: {}", e),
    }
    Ok(())
}
