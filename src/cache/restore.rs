//! Restore phase orchestration
//!
//! Runs before the build: checks preconditions, records the primary key,
//! asks the backend for a matching entry, and records what it found for
//! the save phase. A miss and an unusable context are normal outcomes;
//! only a backend failure aborts the step.

use crate::cache::backend::CacheBackend;
use crate::cache::key::CacheKey;
use crate::context::RunContext;
use crate::error::RestashResult;
use crate::state::{Slot, StateStore};
use tracing::{info, warn};

/// What the restore phase found
#[derive(Debug, Clone)]
pub struct RestoreResult {
    /// Key computed for the current run
    pub primary_key: CacheKey,
    /// Key actually found in the backend, `None` on a miss
    pub matched_key: Option<String>,
    /// Whether the matched key equals the primary key byte-for-byte
    pub exact: bool,
}

impl RestoreResult {
    fn miss(primary_key: &CacheKey) -> Self {
        Self {
            primary_key: primary_key.clone(),
            matched_key: None,
            exact: false,
        }
    }

    /// Whether any entry was restored
    pub fn is_hit(&self) -> bool {
        self.matched_key.is_some()
    }
}

/// Restore cached artifacts into `paths` from the entry under `primary_key`
///
/// The primary key is persisted into the state store before the backend
/// call so a crash mid-restore still records intent for the save phase.
pub async fn restore(
    backend: &dyn CacheBackend,
    state: &dyn StateStore,
    ctx: &RunContext,
    paths: &[String],
    primary_key: &CacheKey,
) -> RestashResult<RestoreResult> {
    if !backend.is_available().await {
        warn!("Cache backend unavailable in this context, skipping restore");
        return Ok(RestoreResult::miss(primary_key));
    }

    if !ctx.has_ref() {
        warn!(
            "Event {} is not tied to a branch or tag ref, skipping restore",
            ctx.event_name()
        );
        return Ok(RestoreResult::miss(primary_key));
    }

    state.set(Slot::PrimaryKey, primary_key.as_str())?;

    let matched = backend.restore(paths, primary_key).await?;

    let Some(matched) = matched else {
        info!("Cache not found for key: {}", primary_key);
        return Ok(RestoreResult::miss(primary_key));
    };

    state.set(Slot::MatchedKey, &matched)?;

    let exact = primary_key.matches(&matched);
    info!("Cache restored from key: {}", matched);

    Ok(RestoreResult {
        primary_key: primary_key.clone(),
        matched_key: Some(matched),
        exact,
    })
}
