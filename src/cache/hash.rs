//! Deterministic digests over cache key inputs
//!
//! Feeds every input into a single streaming SHA-256 in the order given,
//! so the same (ordered) inputs always produce the same digest. Reordering
//! inputs changes the result; callers supply them in a stable order.

use crate::error::{RestashError, RestashResult};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

/// Digest the contents of the given files, in order, as lowercase hex.
///
/// A missing file is a configuration bug, not a transient condition, and
/// fails with `InputNotFound`.
pub fn digest_files<P: AsRef<Path>>(paths: &[P]) -> RestashResult<String> {
    let mut hasher = Sha256::new();

    for path in paths {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(RestashError::InputNotFound(path.to_path_buf()));
        }

        let contents = fs::read(path).map_err(|e| RestashError::InputRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        hasher.update(&contents);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Digest in-memory byte parts, in order, as lowercase hex.
pub fn digest_parts<I, B>(parts: I) -> String
where
    I: IntoIterator<Item = B>,
    B: AsRef<[u8]>,
{
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part.as_ref());
    }
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    // SHA-256("abc")
    const ABC_DIGEST: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";

    #[test]
    fn digest_known_vector() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lock");
        fs::write(&path, b"abc").unwrap();

        assert_eq!(digest_files(&[&path]).unwrap(), ABC_DIGEST);
    }

    #[test]
    fn digest_parts_known_vector() {
        assert_eq!(digest_parts([b"abc"]), ABC_DIGEST);
        // Split across parts: same stream, same digest
        assert_eq!(digest_parts([&b"ab"[..], &b"c"[..]]), ABC_DIGEST);
    }

    #[test]
    fn digest_deterministic() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.lock");
        fs::write(&path, b"test content").unwrap();

        let first = digest_files(&[&path]).unwrap();
        let second = digest_files(&[&path]).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
    }

    #[test]
    fn digest_changes_with_content() {
        let dir = TempDir::new().unwrap();

        let path1 = dir.path().join("a.lock");
        fs::write(&path1, b"content 1").unwrap();

        let path2 = dir.path().join("b.lock");
        fs::write(&path2, b"content 2").unwrap();

        assert_ne!(
            digest_files(&[&path1]).unwrap(),
            digest_files(&[&path2]).unwrap()
        );
    }

    #[test]
    fn digest_order_sensitive() {
        let dir = TempDir::new().unwrap();

        let path1 = dir.path().join("a.lock");
        fs::write(&path1, b"first").unwrap();

        let path2 = dir.path().join("b.lock");
        fs::write(&path2, b"second").unwrap();

        let forward = digest_files(&[&path1, &path2]).unwrap();
        let reversed = digest_files(&[&path2, &path1]).unwrap();

        assert_ne!(forward, reversed);
    }

    #[test]
    fn digest_missing_input() {
        let err = digest_files(&[PathBuf::from("/nonexistent/lockfile")]).unwrap_err();
        assert!(matches!(err, RestashError::InputNotFound(_)));
    }
}
