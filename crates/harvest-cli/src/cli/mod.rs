pub mod config_cmd;
pub mod parse;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "harvest")]
#[command(version, about = "Extract facts and relationships from agent results")]
pub struct Cli {
    /// Path to harvest.toml
    #[arg(
        long,
        global = true,
        env = "HARVEST_CONFIG",
        default_value = "harvest.toml"
    )]
    pub config: PathBuf,

    /// Trait prefix deduplicated per agent (repeatable, replaces the config list)
    #[arg(
        long = "host-scope-prefix",
        global = true,
        env = "HARVEST_HOST_SCOPE_PREFIXES",
        value_delimiter = ','
    )]
    pub host_scope_prefixes: Vec<String>,

    /// Trait always deduplicated globally (repeatable)
    #[arg(long = "global-trait", global = true)]
    pub global_traits: Vec<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a link's parsers over a result and print what was extracted
    Parse(ParseArgs),
    /// List registered parser modules
    Modules,
    /// Configuration commands
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Link JSON (command, paw, ability with parsers, status, used facts)
    #[arg(long)]
    pub link: PathBuf,

    /// Base64 result as reported by the agent
    #[arg(long, conflicts_with = "raw")]
    pub result: Option<String>,

    /// Plain-text command output; encoded before parsing
    #[arg(long)]
    pub raw: Option<PathBuf>,

    /// Operation JSON providing the shared fact pool
    #[arg(long)]
    pub operation: Option<PathBuf>,

    /// Treat the link as successfully executed regardless of its status
    #[arg(long)]
    pub force_success: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    Validate,
    Show,
}
