//! Cache key lifecycle and restore/save decision logic
//!
//! Keys are content-addressed: prefix + scope + SHA-256 over the
//! configured key inputs. Same inputs = same key, which is what makes the
//! save-skip decision sound.
//!
//! # Phase Lifecycle
//!
//! | Phase   | Reads            | Writes                  | Backend call |
//! |---------|------------------|-------------------------|--------------|
//! | restore | config, key files| PrimaryKey, MatchedKey  | restore      |
//! | save    | PrimaryKey, MatchedKey | none              | save (maybe) |
//!
//! An exact match recorded by restore makes save a no-op: the backend
//! already holds identical content under the identical key.

pub mod backend;
pub mod hash;
pub mod key;
pub mod restore;
pub mod save;

pub use backend::{CacheBackend, ProcessBackend, SaveOptions};
pub use hash::{digest_files, digest_parts};
pub use key::{primary_key, scope_key, CacheKey};
pub use restore::{restore, RestoreResult};
pub use save::{save, SaveOutcome, SkipReason};
