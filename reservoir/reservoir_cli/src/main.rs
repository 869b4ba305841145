use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use reservoir_core::{LogLevel, PoolConfig};

mod commands;
mod logging;

use commands::config::CheckConfigArgs;
use commands::demo::DemoArgs;

/// Reservoir command line interface
///
/// Drives the model pool demo and validates pool configuration files.
#[derive(Parser)]
#[clap(name = "reservoir", author, version, about)]
struct Cli {
    /// Log verbosity (trace, debug, info, warn, error); overrides the config file
    #[clap(long, global = true)]
    log_level: Option<LogLevel>,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill a pool with sample models, lock them all, run a prediction on
    /// each and release them
    Demo(DemoArgs),

    /// Load and validate a pool configuration file
    #[clap(name = "check-config")]
    CheckConfig(CheckConfigArgs),
}

impl Commands {
    fn config_path(&self) -> Option<&Path> {
        match self {
            Commands::Demo(args) => args.config.as_deref(),
            Commands::CheckConfig(args) => Some(args.path.as_path()),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let path = cli.command.config_path();
    let loaded = PoolConfig::load(path);

    // A file that fails to load is reported at the default verbosity.
    let file_level = loaded
        .as_ref()
        .map(|config| config.log_level)
        .unwrap_or_default();
    logging::init(cli.log_level.unwrap_or(file_level));

    let config = match path {
        Some(path) => {
            let config = loaded
                .with_context(|| format!("Invalid pool configuration {}", path.display()))?;
            info!("Loaded pool configuration from {}", path.display());
            config
        }
        None => {
            info!("No configuration file specified, using defaults");
            loaded?
        }
    };

    let mut stdout = io::stdout().lock();
    match &cli.command {
        Commands::Demo(args) => commands::demo::execute(args, config, &mut stdout),
        Commands::CheckConfig(_) => commands::config::execute(&config, &mut stdout),
    }
}
