//! Cache backend abstraction
//!
//! The backend is an external opaque key→blob store; restash only
//! addresses it by key. The trait keeps orchestrators testable against a
//! mock while production shells out to the store CLI the pipeline image
//! provides.

use crate::cache::key::CacheKey;
use crate::error::{RestashError, RestashResult};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Options for a save operation
#[derive(Debug, Clone, Copy, Default)]
pub struct SaveOptions {
    /// Bytes per upload segment; `None` leaves it backend-defined
    pub upload_chunk_size: Option<u64>,
}

/// Abstract cache backend interface
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Whether the cache feature is usable in this execution context
    async fn is_available(&self) -> bool;

    /// Restore `paths` from the entry stored under `key`
    ///
    /// Returns the matched key on a hit (files are materialized as a side
    /// effect), `None` on a miss. No fallback-key list is consulted and no
    /// lookup-only mode exists: a match always restores.
    async fn restore(&self, paths: &[String], key: &CacheKey) -> RestashResult<Option<String>>;

    /// Save `paths` under `key`, returning the new entry id
    async fn save(&self, paths: &[String], key: &CacheKey, opts: SaveOptions)
        -> RestashResult<i64>;
}

/// Backend adapter that drives an external store CLI
///
/// Contract with the configured program:
/// - `<program> <args..> restore --key <K> <paths..>`: exit 0 with the
///   matched key on stdout, or exit 0 with empty stdout on a miss
/// - `<program> <args..> save --key <K> [--chunk-size <N>] <paths..>`:
///   exit 0 with the numeric entry id on stdout
/// - any nonzero exit is a backend failure, stderr carries the reason
pub struct ProcessBackend {
    program: String,
    base_args: Vec<String>,
}

impl ProcessBackend {
    pub fn new(program: impl Into<String>, base_args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            base_args,
        }
    }

    async fn run(&self, args: Vec<String>) -> RestashResult<std::process::Output> {
        debug!("Executing: {} {:?}", self.program, args);

        Command::new(&self.program)
            .args(&self.base_args)
            .args(&args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| RestashError::command_failed(format!("{} {:?}", self.program, args), e))
    }

    fn failure_reason(output: &std::process::Output) -> String {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let trimmed = stderr.trim();
        if trimmed.is_empty() {
            format!("exit code {}", output.status.code().unwrap_or(-1))
        } else {
            trimmed.to_string()
        }
    }
}

#[async_trait]
impl CacheBackend for ProcessBackend {
    async fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|s| s.success())
            .unwrap_or(false)
    }

    async fn restore(&self, paths: &[String], key: &CacheKey) -> RestashResult<Option<String>> {
        let mut args = vec![
            "restore".to_string(),
            "--key".to_string(),
            key.to_string(),
        ];
        args.extend(paths.iter().cloned());

        let output = self.run(args).await.map_err(|e| RestashError::RestoreBackend {
            reason: e.to_string(),
        })?;

        if !output.status.success() {
            return Err(RestashError::RestoreBackend {
                reason: Self::failure_reason(&output),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let matched = stdout.lines().map(str::trim).find(|l| !l.is_empty());
        Ok(matched.map(str::to_string))
    }

    async fn save(
        &self,
        paths: &[String],
        key: &CacheKey,
        opts: SaveOptions,
    ) -> RestashResult<i64> {
        let mut args = vec!["save".to_string(), "--key".to_string(), key.to_string()];
        if let Some(chunk) = opts.upload_chunk_size {
            args.push("--chunk-size".to_string());
            args.push(chunk.to_string());
        }
        args.extend(paths.iter().cloned());

        let output = self.run(args).await.map_err(|e| RestashError::SaveBackend {
            reason: e.to_string(),
        })?;

        if !output.status.success() {
            return Err(RestashError::SaveBackend {
                reason: Self::failure_reason(&output),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        stdout
            .trim()
            .parse()
            .map_err(|_| RestashError::SaveBackend {
                reason: format!("backend returned no entry id: {:?}", stdout.trim()),
            })
    }
}
