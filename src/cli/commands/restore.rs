//! Restore command - restore cached artifacts before the build

use crate::cache::{self, CacheKey};
use crate::cli::args::RestoreArgs;
use crate::cli::commands::{compute_primary_key, create_backend, resolve_paths, state_store};
use crate::config::Config;
use crate::context::RunContext;
use crate::error::RestashResult;
use crate::state::StepOutputs;
use crate::ui::{TaskSpinner, UiContext};
use tracing::warn;

/// Execute the restore command
pub async fn execute(args: RestoreArgs, config: &Config) -> RestashResult<()> {
    let ctx = RunContext::from_env();
    let outputs = StepOutputs::from_env();

    let paths = resolve_paths(&args.path, config)?;
    let primary_key = match args.key {
        Some(raw) => CacheKey::from(raw),
        None => compute_primary_key(config, &ctx, None)?,
    };

    let Some(backend) = create_backend(config) else {
        warn!("Cache backend not configured, skipping restore");
        publish(&outputs, &primary_key, None, false)?;
        return Ok(());
    };

    let state = state_store();

    let ui = UiContext::detect();
    let mut spinner = TaskSpinner::new(&ui);
    spinner.start(&format!("Restoring cache for key {}...", primary_key));

    let result = match cache::restore(&backend, state.as_ref(), &ctx, &paths, &primary_key).await {
        Ok(result) => result,
        Err(e) => {
            spinner.stop_error("Cache restore failed");
            return Err(e);
        }
    };

    match &result.matched_key {
        Some(matched) => spinner.stop(&format!("Cache restored from key: {}", matched)),
        None => spinner.stop_warn(&format!("Cache not found for key: {}", primary_key)),
    }

    publish(&outputs, &primary_key, result.matched_key.as_deref(), result.exact)
}

/// Publish the restore outcome for later pipeline steps
///
/// `cache-hit` is true only on an exact key match; an inexact restore
/// still materializes files but downstream steps must not treat it as
/// up to date.
fn publish(
    outputs: &StepOutputs,
    primary_key: &CacheKey,
    matched_key: Option<&str>,
    exact: bool,
) -> RestashResult<()> {
    outputs.set_bool("cache-hit", exact)?;
    outputs.set("primary-key", primary_key.as_str())?;
    if let Some(matched) = matched_key {
        outputs.set("matched-key", matched)?;
    }
    Ok(())
}
