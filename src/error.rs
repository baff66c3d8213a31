//! Error types for restash
//!
//! All modules use `RestashResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for restash operations
pub type RestashResult<T> = Result<T, RestashError>;

/// All errors that can occur in restash
#[derive(Error, Debug)]
pub enum RestashError {
    // Key derivation errors
    #[error("Cache key input not found: {0}")]
    InputNotFound(PathBuf),

    #[error("Failed to read cache key input {path}: {source}")]
    InputRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Backend errors
    #[error("Cache restore failed: {reason}")]
    RestoreBackend { reason: String },

    #[error("Cache save failed: {reason}")]
    SaveBackend { reason: String },

    // State errors
    #[error("Failed to record pipeline state {slot}: {source}")]
    StateWrite {
        slot: String,
        #[source]
        source: std::io::Error,
    },

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No cache paths configured. Set cache.paths in restash.toml")]
    NoCachePaths,

    #[error("No cache key inputs configured. Set cache.key_files in restash.toml")]
    NoKeyInputs,

    // Deploy errors
    #[error("Deploy CLI not found: {name}. {hint}")]
    DeployCliNotFound { name: String, hint: String },

    #[error("Deploy failed with exit code {code}")]
    DeployFailed { code: i32 },

    // Notification errors
    #[error("Webhook URL missing. Set notify.webhook_url in restash.toml or RESTASH_WEBHOOK_URL")]
    WebhookMissing,

    #[error("Webhook request failed: {0}")]
    Webhook(String),

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Process errors
    #[error("Command failed: {command}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("{0}")]
    User(String),
}

impl RestashError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a command failed error
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandFailed {
            command: command.into(),
            source,
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::NoCachePaths => Some("Run: restash config set cache.paths <dir,...> --local"),
            Self::NoKeyInputs => Some("Run: restash config set cache.key_files <lockfile,...> --local"),
            Self::WebhookMissing => Some("Run: restash config set notify.webhook_url <url>"),
            Self::InputNotFound(_) => Some("Check cache.key_files against the project checkout"),
            _ => None,
        }
    }
}
