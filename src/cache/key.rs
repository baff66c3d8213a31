//! Cache key composition
//!
//! Pure string composition with no I/O. Keys are never truncated or
//! case-folded here: cache backends may be case-sensitive, and the
//! restore/save skip logic depends on byte-identical keys for identical
//! inputs.

use serde::Serialize;
use std::fmt;

/// An opaque cache key
///
/// Structurally `"<prefix>-<scopeDigest>"` or `"<prefix>-<scope>-<digest>"`,
/// but consumers treat it as opaque text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether a backend-reported key is an exact match for this key
    pub fn matches(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Caller-supplied key overrides come in as plain text
impl From<String> for CacheKey {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for CacheKey {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

/// Build the primary key for the current run: `"{prefix}-{scope}-{digest}"`
pub fn primary_key(prefix: &str, scope: &str, digest: &str) -> CacheKey {
    CacheKey(format!("{}-{}-{}", prefix, scope, digest))
}

/// Build a scope-level key with no content digest: `"{prefix}-{scope_digest}"`
pub fn scope_key(prefix: &str, scope_digest: &str) -> CacheKey {
    CacheKey(format!("{}-{}", prefix, scope_digest))
}
