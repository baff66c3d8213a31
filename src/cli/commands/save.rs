//! Save command - save artifacts after the build

use crate::cache::{self, CacheKey, SaveOptions, SaveOutcome};
use crate::cli::args::SaveArgs;
use crate::cli::commands::{compute_primary_key, create_backend, resolve_paths, state_store};
use crate::config::Config;
use crate::context::RunContext;
use crate::error::RestashResult;
use crate::state::Slot;
use crate::ui::{TaskSpinner, UiContext};
use console::style;
use tracing::{debug, warn};

/// Execute the save command
///
/// Never fails the pipeline: a backend failure is printed as a warning
/// and the command still exits cleanly. Only configuration errors (no
/// paths, unreadable key inputs) are fatal.
pub async fn execute(args: SaveArgs, config: &Config) -> RestashResult<()> {
    let ctx = RunContext::from_env();

    let paths = resolve_paths(&args.path, config)?;
    let state = state_store();

    // Prefer the key the restore phase recorded; recompute only when this
    // is a fresh process with no handoff.
    let primary_key = match args.key {
        Some(raw) => CacheKey::from(raw),
        None => match state.get(Slot::PrimaryKey) {
            Some(recorded) => {
                debug!("Using primary key from restore phase: {}", recorded);
                CacheKey::from(recorded)
            }
            None => compute_primary_key(config, &ctx, None)?,
        },
    };

    let Some(backend) = create_backend(config) else {
        warn!("Cache backend not configured, skipping save");
        println!(
            "{} Cache save skipped: backend not configured",
            style("!").yellow()
        );
        return Ok(());
    };

    let opts = SaveOptions {
        upload_chunk_size: args.chunk_size.or(config.cache.upload_chunk_size),
    };

    let ui = UiContext::detect();
    let mut spinner = TaskSpinner::new(&ui);
    spinner.start(&format!("Saving cache with key {}...", primary_key));

    let outcome = cache::save(&backend, state.as_ref(), &ctx, &paths, &primary_key, opts).await;

    match outcome {
        SaveOutcome::Saved(id) => {
            spinner.stop(&format!("Cache saved with key: {} (entry {})", primary_key, id));
        }
        SaveOutcome::Skipped(reason) => {
            spinner.stop_warn(&format!("Cache save skipped: {}", reason));
        }
        SaveOutcome::Failed(message) => {
            // Reported, not propagated: the build already succeeded
            spinner.stop_warn(&message);
        }
    }

    Ok(())
}
