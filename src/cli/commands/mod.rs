//! CLI command implementations

pub mod config;
pub mod deploy;
pub mod key;
pub mod notify;
pub mod restore;
pub mod save;

pub use config::execute as config;
pub use deploy::execute as deploy;
pub use key::execute as key;
pub use notify::execute as notify;
pub use restore::execute as restore;
pub use save::execute as save;

use crate::cache::{self, CacheKey, ProcessBackend};
use crate::config::Config;
use crate::context::RunContext;
use crate::error::{RestashError, RestashResult};
use crate::state::{FileStateStore, MemoryStateStore, StateStore};
use tracing::{debug, warn};

/// Build the store CLI backend, `None` when no program is configured
pub(crate) fn create_backend(config: &Config) -> Option<ProcessBackend> {
    config
        .backend
        .program
        .as_ref()
        .map(|program| ProcessBackend::new(program.clone(), config.backend.args.clone()))
}

/// Build the cross-phase state store from the pipeline environment
///
/// Without a handoff file the store degrades to process-local memory:
/// the save step then behaves like a fresh run.
pub(crate) fn state_store() -> Box<dyn StateStore> {
    match FileStateStore::from_env() {
        Some(store) => Box::new(store),
        None => {
            warn!(
                "{} not set; cache state will not survive to the save step",
                crate::state::STATE_FILE_ENV
            );
            Box::new(MemoryStateStore::new())
        }
    }
}

/// Resolve the cache paths: CLI overrides first, then configuration
pub(crate) fn resolve_paths(overrides: &[String], config: &Config) -> RestashResult<Vec<String>> {
    let paths = if overrides.is_empty() {
        config.cache.paths.clone()
    } else {
        overrides.to_vec()
    };

    if paths.is_empty() {
        return Err(RestashError::NoCachePaths);
    }
    Ok(paths)
}

/// Compute the primary key from configuration and run context
///
/// Scope resolution order: explicit override, configured scope, branch
/// from the run context, then a fixed fallback so the key stays
/// deterministic either way.
pub(crate) fn compute_primary_key(
    config: &Config,
    ctx: &RunContext,
    scope_override: Option<&str>,
) -> RestashResult<CacheKey> {
    if config.cache.key_files.is_empty() {
        return Err(RestashError::NoKeyInputs);
    }

    let digest = cache::digest_files(&config.cache.key_files)?;

    let scope = scope_override
        .map(str::to_string)
        .or_else(|| config.cache.scope.clone())
        .or_else(|| ctx.branch().map(str::to_string))
        .unwrap_or_else(|| "default".to_string());

    debug!("Cache scope: {}", scope);
    Ok(cache::primary_key(&config.cache.prefix, &scope, &digest))
}

/// Repository slug for notifications, from the pipeline environment
pub(crate) fn repo_from_env() -> String {
    std::env::var("RESTASH_REPO")
        .or_else(|_| std::env::var("GITHUB_REPOSITORY"))
        .unwrap_or_else(|_| "unknown repository".to_string())
}

/// Pipeline log URL for notifications, from the pipeline environment
pub(crate) fn logs_url_from_env() -> String {
    if let Ok(url) = std::env::var("RESTASH_LOGS_URL") {
        return url;
    }

    match (
        std::env::var("GITHUB_SERVER_URL"),
        std::env::var("GITHUB_REPOSITORY"),
        std::env::var("GITHUB_RUN_ID"),
    ) {
        (Ok(server), Ok(repo), Ok(run_id)) => {
            format!("{}/{}/actions/runs/{}", server, repo, run_id)
        }
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_key_files(dir: &std::path::Path) -> Config {
        let lock = dir.join("lock");
        std::fs::write(&lock, b"abc").unwrap();

        let mut config = Config::default();
        config.cache.prefix = "build-x".to_string();
        config.cache.key_files = vec![lock];
        config
    }

    #[test]
    fn primary_key_uses_configured_scope_over_branch() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut config = config_with_key_files(dir.path());
        config.cache.scope = Some("site-1".to_string());

        let ctx = RunContext {
            ref_name: Some("refs/heads/main".into()),
            ..Default::default()
        };

        let key = compute_primary_key(&config, &ctx, None).unwrap();
        assert!(key.as_str().starts_with("build-x-site-1-"));
    }

    #[test]
    fn primary_key_falls_back_to_branch() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = config_with_key_files(dir.path());

        let ctx = RunContext {
            ref_name: Some("refs/heads/main".into()),
            ..Default::default()
        };

        let key = compute_primary_key(&config, &ctx, None).unwrap();
        assert_eq!(
            key.as_str(),
            "build-x-main-ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn primary_key_requires_inputs() {
        let config = Config::default();
        let err = compute_primary_key(&config, &RunContext::default(), None).unwrap_err();
        assert!(matches!(err, RestashError::NoKeyInputs));
    }

    #[test]
    fn paths_require_configuration() {
        let config = Config::default();
        assert!(matches!(
            resolve_paths(&[], &config),
            Err(RestashError::NoCachePaths)
        ));

        let overridden = resolve_paths(&["target".to_string()], &config).unwrap();
        assert_eq!(overridden, vec!["target"]);
    }

    #[test]
    fn backend_requires_program() {
        let mut config = Config::default();
        assert!(create_backend(&config).is_none());

        config.backend.program = Some("store-cli".to_string());
        assert!(create_backend(&config).is_some());
    }
}
