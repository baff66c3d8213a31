//! Deploy command - run the configured deploy CLI

use crate::cli::args::DeployArgs;
use crate::cli::commands::{logs_url_from_env, repo_from_env};
use crate::config::Config;
use crate::context::RunContext;
use crate::error::{RestashError, RestashResult};
use crate::{deploy, notify};
use console::style;
use tracing::{info, warn};

/// Execute the deploy command
///
/// A failed deploy is fatal, but first fires the failure webhook when one
/// is configured. Notification problems never mask the deploy error.
pub async fn execute(args: DeployArgs, config: &Config) -> RestashResult<()> {
    let ctx = RunContext::from_env();

    let message = deploy::build_message(&ctx, args.branch.as_deref());
    let cli_args = deploy::deploy_args(&config.deploy, args.branch.as_deref(), &message);

    info!("Deploying: {}", message);

    match deploy::run_deploy(&config.deploy, &cli_args).await {
        Ok(()) => {
            println!("{} Deploy finished", style("✓").green());
            Ok(())
        }
        Err(e @ RestashError::DeployFailed { .. }) => {
            notify_failure(config, &message).await;
            Err(e)
        }
        Err(e) => Err(e),
    }
}

async fn notify_failure(config: &Config, summary: &str) {
    let Some(webhook) = config.notify.webhook_url.clone() else {
        return;
    };

    let payload = notify::failed_build_payload(&repo_from_env(), &logs_url_from_env(), summary);

    let result =
        tokio::task::spawn_blocking(move || notify::send_blocking(&webhook, &payload)).await;

    match result {
        Ok(Ok(())) => info!("Failure notification sent"),
        Ok(Err(e)) => warn!("Failure notification not sent: {}", e),
        Err(e) => warn!("Failure notification task panicked: {}", e),
    }
}
