//! Restash - CI cache restore/save helper
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use restash::cli::{Cli, Commands};
use restash::config::ConfigManager;
use restash::error::RestashResult;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> RestashResult<()> {
    let cli = Cli::parse();

    // Initialize logging: 0 = warn, 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("restash=warn"),
        1 => EnvFilter::new("restash=info"),
        _ => EnvFilter::new("restash=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    // Load configuration
    let config_manager = if let Some(ref path) = cli.config {
        ConfigManager::with_path(path.clone())
    } else {
        ConfigManager::new()
    };

    // Find local config unless --no-local is set
    let local_config_path = if cli.no_local {
        debug!("Local config discovery disabled (--no-local)");
        None
    } else {
        let cwd = std::env::current_dir()
            .map_err(|e| restash::error::RestashError::io("getting current directory", e))?;
        let found = ConfigManager::find_local_config(&cwd);
        if let Some(ref path) = found {
            debug!("Found local config: {}", path.display());
        }
        found
    };

    let config = config_manager
        .load_merged(local_config_path.as_deref())
        .await?;

    // Dispatch to command
    match cli.command {
        Commands::Restore(args) => restash::cli::commands::restore(args, &config).await,
        Commands::Save(args) => restash::cli::commands::save(args, &config).await,
        Commands::Key(args) => restash::cli::commands::key(args, &config).await,
        Commands::Deploy(args) => restash::cli::commands::deploy(args, &config).await,
        Commands::Notify(args) => restash::cli::commands::notify(args, &config).await,
        Commands::Config(args) => restash::cli::commands::config(args, &config).await,
    }
}
