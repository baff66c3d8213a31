//! Deploy CLI runner
//!
//! Thin adapter around the configured deploy program. Exactly one deploy
//! mode flag is emitted per invocation: a branch alias deploy, an
//! unlocked-only production deploy, or a plain production deploy.

use crate::config::schema::DeployConfig;
use crate::context::RunContext;
use crate::error::{RestashError, RestashResult};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Assemble the human-readable deploy message
///
/// Joins run id, branch, and head-commit message with `" | "`; falls back
/// to a plain production marker when neither branch nor commit message is
/// known.
pub fn build_message(ctx: &RunContext, branch: Option<&str>) -> String {
    let mut parts = Vec::new();

    if let Some(run_id) = &ctx.run_id {
        parts.push(format!("Run id: {}", run_id));
    }

    if let Some(branch) = branch {
        parts.push(format!("Branch: {}", branch));
    }

    if let Some(message) = &ctx.commit_message {
        parts.push(message.clone());
    }

    if branch.is_none() && ctx.commit_message.is_none() {
        parts.push("Deploy to production".to_string());
    }

    parts.join(" | ")
}

/// Assemble the full deploy CLI argument list
pub fn deploy_args(config: &DeployConfig, branch: Option<&str>, message: &str) -> Vec<String> {
    let mut args = vec!["deploy".to_string()];

    if config.build {
        args.push("--build".to_string());
    }

    match branch {
        Some(branch) => {
            args.push("--alias".to_string());
            args.push(branch.to_string());
        }
        None if !config.auto_deploy => args.push("--prod-if-unlocked".to_string()),
        None => args.push("--prod".to_string()),
    }

    args.push("--message".to_string());
    args.push(message.to_string());

    args
}

/// Run the deploy CLI with inherited stdio
///
/// The deploy owns the terminal for its duration; restash only maps the
/// exit status.
pub async fn run_deploy(config: &DeployConfig, args: &[String]) -> RestashResult<()> {
    debug!("Executing: {} {:?}", config.program, args);

    let status = Command::new(&config.program)
        .args(args)
        .envs(&config.env)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                RestashError::DeployCliNotFound {
                    name: config.program.clone(),
                    hint: "Install it or set deploy.program in restash.toml".to_string(),
                }
            } else {
                RestashError::command_failed(format!("{} {:?}", config.program, args), e)
            }
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(RestashError::DeployFailed {
            code: status.code().unwrap_or(-1),
        })
    }
}
