//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// restash - CI cache restore/save helper
///
/// Computes deterministic cache keys, restores saved artifacts before a
/// build, and saves updated artifacts afterward unless the restore
/// already matched the exact key.
#[derive(Parser, Debug)]
#[command(name = "restash")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "RESTASH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Skip local .restash.toml discovery
    #[arg(long, global = true)]
    pub no_local: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Restore cached artifacts before the build
    Restore(RestoreArgs),

    /// Save artifacts after the build, unless the restore matched exactly
    Save(SaveArgs),

    /// Print the primary cache key for the current project
    Key(KeyArgs),

    /// Run the configured deploy CLI
    Deploy(DeployArgs),

    /// Send a build-failure webhook notification
    Notify(NotifyArgs),

    /// Show or edit configuration
    Config(ConfigArgs),
}

/// Arguments for the restore command
#[derive(Parser, Debug)]
pub struct RestoreArgs {
    /// Override the computed primary key
    #[arg(short, long)]
    pub key: Option<String>,

    /// Override configured cache paths
    #[arg(short, long)]
    pub path: Vec<String>,
}

/// Arguments for the save command
#[derive(Parser, Debug)]
pub struct SaveArgs {
    /// Override the primary key (default: restore-phase state, then recompute)
    #[arg(short, long)]
    pub key: Option<String>,

    /// Override configured cache paths
    #[arg(short, long)]
    pub path: Vec<String>,

    /// Bytes per upload segment
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub chunk_size: Option<u64>,
}

/// Arguments for the key command
#[derive(Parser, Debug)]
pub struct KeyArgs {
    /// Override the scope component (default: branch from run context)
    #[arg(short, long)]
    pub scope: Option<String>,
}

/// Arguments for the deploy command
#[derive(Parser, Debug)]
pub struct DeployArgs {
    /// Deploy this branch to an alias instead of production
    #[arg(short, long)]
    pub branch: Option<String>,
}

/// Arguments for the notify command
#[derive(Parser, Debug)]
pub struct NotifyArgs {
    /// Webhook URL (default: notify.webhook_url, then RESTASH_WEBHOOK_URL)
    #[arg(long, env = "RESTASH_WEBHOOK_URL")]
    pub webhook: Option<String>,

    /// Repository shown in the notification
    #[arg(long)]
    pub repo: Option<String>,

    /// Link to the pipeline logs
    #[arg(long)]
    pub logs_url: Option<String>,

    /// Summary line shown in the notification
    #[arg(long)]
    pub summary: Option<String>,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., cache.prefix)
        key: String,
        /// Value to set
        value: String,
        /// Write to project-local .restash.toml instead of global config
        #[arg(long)]
        local: bool,
    },
}
