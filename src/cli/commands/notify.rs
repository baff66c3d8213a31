//! Notify command - send a build-failure webhook notification

use crate::cli::args::NotifyArgs;
use crate::cli::commands::{logs_url_from_env, repo_from_env};
use crate::config::Config;
use crate::error::{RestashError, RestashResult};
use crate::notify;
use crate::state::StepOutputs;
use chrono::Utc;
use console::style;

/// Execute the notify command
pub async fn execute(args: NotifyArgs, config: &Config) -> RestashResult<()> {
    let webhook = args
        .webhook
        .or_else(|| config.notify.webhook_url.clone())
        .ok_or(RestashError::WebhookMissing)?;

    let repo = args.repo.unwrap_or_else(repo_from_env);
    let logs_url = args.logs_url.unwrap_or_else(logs_url_from_env);
    let summary = args.summary.unwrap_or_else(|| "Build failed".to_string());

    let payload = notify::failed_build_payload(&repo, &logs_url, &summary);

    tokio::task::spawn_blocking(move || notify::send_blocking(&webhook, &payload))
        .await
        .map_err(|e| RestashError::Webhook(format!("notification task panicked: {}", e)))??;

    StepOutputs::from_env().set("time", &Utc::now().to_rfc3339())?;
    println!("{} Notification sent", style("✓").green());

    Ok(())
}
