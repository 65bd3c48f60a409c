mod cli;
mod config;

use clap::Parser;
use cli::{Cli, Commands};
use config::HarvestConfig;
use harvest_core::{Extractor, ParserRegistry};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let (config, config_problem) = HarvestConfig::load_lenient(&cli.config);
    let config = config.with_overrides(&cli.host_scope_prefixes, &cli.global_traits);

    // Initialize tracing; also receives `log` records from harvest-core
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log.filter)),
        )
        .init();

    if let Some(problem) = config_problem {
        warn!("{}", problem);
    }

    match cli.command {
        Commands::Config(cmd) => cli::config_cmd::run(cmd, &cli.config),
        Commands::Modules => {
            for module in ParserRegistry::with_builtins().modules() {
                println!("{}", module);
            }
            Ok(())
        }
        Commands::Parse(args) => {
            let extractor = Extractor::new(ParserRegistry::with_builtins(), &config.extraction)?;
            info!("Harvest v{}", env!("CARGO_PKG_VERSION"));
            cli::parse::run(args, &extractor).await
        }
    }
}
