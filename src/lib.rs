//! Restash - CI cache restore/save helper
//!
//! Computes deterministic cache keys, restores saved build artifacts, and
//! skips redundant saves when the restore already matched the exact key.

pub mod cache;
pub mod cli;
pub mod config;
pub mod context;
pub mod deploy;
pub mod error;
pub mod notify;
pub mod state;
pub mod ui;

pub use error::{RestashError, RestashResult};
