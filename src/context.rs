//! Pipeline run context
//!
//! The trigger event and ref for the current run, passed explicitly into
//! the orchestrators. Environment variables are read only here, at the
//! process boundary; the core never touches ambient state.

/// Preferred env var for the trigger event name (`GITHUB_EVENT_NAME` is
/// honored as a fallback, matching the most common host pipeline)
pub const EVENT_ENV: &str = "RESTASH_EVENT";
const EVENT_ENV_FALLBACK: &str = "GITHUB_EVENT_NAME";

/// Preferred env var for the triggering ref
pub const REF_ENV: &str = "RESTASH_REF";
const REF_ENV_FALLBACK: &str = "GITHUB_REF";

const RUN_ID_ENV: &str = "RESTASH_RUN_ID";
const RUN_ID_ENV_FALLBACK: &str = "GITHUB_RUN_ID";

const COMMIT_MESSAGE_ENV: &str = "RESTASH_COMMIT_MESSAGE";

/// Context of the current pipeline run
#[derive(Debug, Clone, Default)]
pub struct RunContext {
    /// Trigger event kind (push, pull_request, workflow_dispatch, ...)
    pub event: Option<String>,

    /// The ref the run is tied to, if any
    pub ref_name: Option<String>,

    /// Host pipeline run identifier
    pub run_id: Option<String>,

    /// Head commit message, when the host pipeline exposes it
    pub commit_message: Option<String>,
}

impl RunContext {
    /// Build the context from host pipeline environment variables
    pub fn from_env() -> Self {
        Self {
            event: env_first(EVENT_ENV, EVENT_ENV_FALLBACK),
            ref_name: env_first(REF_ENV, REF_ENV_FALLBACK),
            run_id: env_first(RUN_ID_ENV, RUN_ID_ENV_FALLBACK),
            commit_message: non_empty(std::env::var(COMMIT_MESSAGE_ENV).ok()),
        }
    }

    /// Whether the trigger event is tied to a reproducible ref
    ///
    /// Cache keys are only meaningful for ref-tied events; anything else
    /// soft-skips both restore and save.
    pub fn has_ref(&self) -> bool {
        self.ref_name.as_deref().is_some_and(|r| !r.is_empty())
    }

    /// Event name for log lines, `"unknown"` when the pipeline set none
    pub fn event_name(&self) -> &str {
        self.event.as_deref().unwrap_or("unknown")
    }

    /// Short branch name derived from the ref, if it is a branch ref
    pub fn branch(&self) -> Option<&str> {
        let ref_name = self.ref_name.as_deref()?;
        Some(ref_name.strip_prefix("refs/heads/").unwrap_or(ref_name))
    }
}

fn env_first(primary: &str, fallback: &str) -> Option<String> {
    non_empty(std::env::var(primary).ok()).or_else(|| non_empty(std::env::var(fallback).ok()))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for var in [
            EVENT_ENV,
            EVENT_ENV_FALLBACK,
            REF_ENV,
            REF_ENV_FALLBACK,
            RUN_ID_ENV,
            RUN_ID_ENV_FALLBACK,
            COMMIT_MESSAGE_ENV,
        ] {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn has_ref_requires_non_empty() {
        let mut ctx = RunContext::default();
        assert!(!ctx.has_ref());

        ctx.ref_name = Some(String::new());
        assert!(!ctx.has_ref());

        ctx.ref_name = Some("refs/heads/main".into());
        assert!(ctx.has_ref());
    }

    #[test]
    fn branch_strips_heads_prefix() {
        let ctx = RunContext {
            ref_name: Some("refs/heads/feature/cache".into()),
            ..Default::default()
        };
        assert_eq!(ctx.branch(), Some("feature/cache"));

        let tag = RunContext {
            ref_name: Some("refs/tags/v1.0".into()),
            ..Default::default()
        };
        assert_eq!(tag.branch(), Some("refs/tags/v1.0"));
    }

    #[test]
    #[serial]
    fn from_env_prefers_restash_vars() {
        clear_env();
        std::env::set_var(EVENT_ENV, "push");
        std::env::set_var(EVENT_ENV_FALLBACK, "pull_request");
        std::env::set_var(REF_ENV_FALLBACK, "refs/heads/main");

        let ctx = RunContext::from_env();
        assert_eq!(ctx.event.as_deref(), Some("push"));
        assert_eq!(ctx.ref_name.as_deref(), Some("refs/heads/main"));

        clear_env();
    }

    #[test]
    #[serial]
    fn from_env_empty_is_unset() {
        clear_env();
        std::env::set_var(EVENT_ENV, "");

        let ctx = RunContext::from_env();
        assert_eq!(ctx.event, None);
        assert_eq!(ctx.event_name(), "unknown");

        clear_env();
    }
}
