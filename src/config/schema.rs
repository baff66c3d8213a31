//! Configuration schema for restash
//!
//! Global configuration lives at `~/.config/restash/config.toml`;
//! project-level overrides in `.restash.toml` at the repository root.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Cache key derivation and paths
    pub cache: CacheConfig,

    /// Store CLI backing the cache
    pub backend: BackendConfig,

    /// Deploy CLI settings
    pub deploy: DeployConfig,

    /// Webhook notification settings
    pub notify: NotifyConfig,
}

/// Cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Namespace prefix for every key this project produces
    pub prefix: String,

    /// Scope identifier; defaults to the run's branch when unset
    pub scope: Option<String>,

    /// Files hashed into the key, in the order listed
    pub key_files: Vec<PathBuf>,

    /// Path patterns to restore and save, in order
    pub paths: Vec<String>,

    /// Bytes per upload segment; unset leaves it backend-defined
    pub upload_chunk_size: Option<u64>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            prefix: "restash".to_string(),
            scope: None,
            key_files: vec![],
            paths: vec![],
            upload_chunk_size: None,
        }
    }
}

/// Store CLI settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Store program to invoke; unset means the cache feature is off
    pub program: Option<String>,

    /// Arguments prepended to every store invocation
    pub args: Vec<String>,
}

/// Deploy CLI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeployConfig {
    /// Deploy program to invoke
    pub program: String,

    /// Run the deploy CLI's build step
    pub build: bool,

    /// Whether unlocked production deploys are allowed; when false the
    /// deploy uses the CLI's prod-if-unlocked mode instead of prod
    pub auto_deploy: bool,

    /// Environment passed through to the deploy CLI (site ids, tokens)
    pub env: HashMap<String, String>,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            program: "netlify".to_string(),
            build: true,
            auto_deploy: true,
            env: HashMap::new(),
        }
    }
}

/// Webhook notification settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    /// Slack-compatible webhook URL
    pub webhook_url: Option<String>,
}
