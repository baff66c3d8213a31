//! Save phase orchestration
//!
//! Runs after the build: skips when the restore phase already found the
//! identical key, otherwise saves the configured paths under the primary
//! key. Backend failures here are warnings, never fatal: a save failure
//! must not block a build that already succeeded. This is a deliberate
//! asymmetry with the restore phase.

use crate::cache::backend::{CacheBackend, SaveOptions};
use crate::cache::key::CacheKey;
use crate::context::RunContext;
use crate::state::{Slot, StateStore};
use std::fmt;
use tracing::{info, warn};

/// Why a save was skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The cache backend is unusable in this execution context
    FeatureUnavailable,
    /// The trigger event is not tied to a branch or tag ref
    UnsupportedEvent(String),
    /// Restore already found the identical key; nothing new to cache
    ExactMatch(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FeatureUnavailable => write!(f, "cache backend unavailable"),
            Self::UnsupportedEvent(event) => {
                write!(f, "event {} is not tied to a branch or tag ref", event)
            }
            Self::ExactMatch(key) => {
                write!(f, "exact key match on {} — nothing new to cache", key)
            }
        }
    }
}

/// Result of the save phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// A new entry was stored under the primary key
    Saved(i64),
    /// Nothing was saved, and that is fine
    Skipped(SkipReason),
    /// The backend failed; logged, never propagated
    Failed(String),
}

/// Save `paths` under `primary_key` unless the restore phase proved it
/// redundant
///
/// Infallible by design: every failure mode is an outcome. Callers decide
/// what to print, nothing here touches the process exit status.
pub async fn save(
    backend: &dyn CacheBackend,
    state: &dyn StateStore,
    ctx: &RunContext,
    paths: &[String],
    primary_key: &CacheKey,
    opts: SaveOptions,
) -> SaveOutcome {
    if !backend.is_available().await {
        warn!("Cache backend unavailable in this context, skipping save");
        return SaveOutcome::Skipped(SkipReason::FeatureUnavailable);
    }

    if !ctx.has_ref() {
        warn!(
            "Event {} is not tied to a branch or tag ref, skipping save",
            ctx.event_name()
        );
        return SaveOutcome::Skipped(SkipReason::UnsupportedEvent(
            ctx.event_name().to_string(),
        ));
    }

    if let Some(matched) = state.get(Slot::MatchedKey) {
        if primary_key.matches(&matched) {
            info!(
                "Cache hit occurred on the primary key {}, not saving cache",
                primary_key
            );
            return SaveOutcome::Skipped(SkipReason::ExactMatch(matched));
        }
    }

    match backend.save(paths, primary_key, opts).await {
        Ok(id) => {
            info!("Cache saved with key: {}", primary_key);
            SaveOutcome::Saved(id)
        }
        Err(e) => {
            let message = e.to_string();
            warn!("{}", message);
            SaveOutcome::Failed(message)
        }
    }
}
