//! Cross-phase pipeline state
//!
//! The restore and save phases of a run may execute as separate OS
//! processes that share nothing but host-pipeline plumbing. The restore
//! phase records the primary and matched cache keys here; the save phase
//! reads them back to decide whether a save is redundant.
//!
//! The store is injected into the orchestrators as a trait object so unit
//! tests substitute [`MemoryStateStore`] while production uses
//! [`FileStateStore`] over the handoff file the pipeline provides.

pub mod outputs;

pub use outputs::StepOutputs;

use crate::error::{RestashError, RestashResult};
use std::collections::HashMap;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::warn;

/// Environment variable naming the cross-phase state file
///
/// The host pipeline points this at a file that survives between steps
/// (on GitHub Actions, `$GITHUB_STATE` works directly).
pub const STATE_FILE_ENV: &str = "RESTASH_STATE_FILE";

/// Named state slots
///
/// A small fixed set; the slot name is the wire format in the state file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Key computed for the current run before restore
    PrimaryKey,
    /// Key actually found in the backend during restore
    MatchedKey,
}

impl Slot {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PrimaryKey => "cache-primary-key",
            Self::MatchedKey => "cache-matched-key",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Cross-phase key-value carrier
///
/// `set` may overwrite; callers follow the restore-then-save ordering, so
/// the save phase only ever reads. Values are single-line strings.
pub trait StateStore: Send + Sync {
    /// Record a slot value for later phases of this run
    fn set(&self, slot: Slot, value: &str) -> RestashResult<()>;

    /// Read a slot value, `None` if never set this run
    fn get(&self, slot: Slot) -> Option<String>;
}

/// In-memory state store for unit tests
#[derive(Default)]
pub struct MemoryStateStore {
    slots: Mutex<HashMap<&'static str, String>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStateStore {
    fn set(&self, slot: Slot, value: &str) -> RestashResult<()> {
        self.slots
            .lock()
            .expect("state lock poisoned")
            .insert(slot.as_str(), value.to_string());
        Ok(())
    }

    fn get(&self, slot: Slot) -> Option<String> {
        self.slots
            .lock()
            .expect("state lock poisoned")
            .get(slot.as_str())
            .cloned()
    }
}

/// File-backed state store for the pipeline handoff
///
/// Appends `name=value` lines; the last write for a slot wins on read.
/// An unreadable file degrades to "never set" with a warning so the save
/// phase behaves like a fresh run (a redundant save, never a lost one).
pub struct FileStateStore {
    path: PathBuf,
}

impl FileStateStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Build from `RESTASH_STATE_FILE`, `None` when the pipeline provides
    /// no handoff file
    pub fn from_env() -> Option<Self> {
        std::env::var(STATE_FILE_ENV)
            .ok()
            .filter(|v| !v.is_empty())
            .map(|v| Self::new(PathBuf::from(v)))
    }
}

impl StateStore for FileStateStore {
    fn set(&self, slot: Slot, value: &str) -> RestashResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| RestashError::StateWrite {
                slot: slot.to_string(),
                source: e,
            })?;

        writeln!(file, "{}={}", slot.as_str(), value).map_err(|e| RestashError::StateWrite {
            slot: slot.to_string(),
            source: e,
        })
    }

    fn get(&self, slot: Slot) -> Option<String> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!("State file {} unreadable: {}", self.path.display(), e);
                return None;
            }
        };

        content
            .lines()
            .filter_map(|line| line.split_once('='))
            .filter(|(name, _)| *name == slot.as_str())
            .last()
            .map(|(_, value)| value.to_string())
    }
}
