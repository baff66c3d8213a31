//! Named output values for later pipeline steps
//!
//! The restore phase publishes `cache-hit`, `primary-key`, and
//! `matched-key` so downstream steps can branch on them. Outputs use the
//! same `name=value` file mechanism as the state handoff; without a
//! configured output file they are echoed to stdout instead.

use crate::error::{RestashError, RestashResult};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Environment variable naming the step output file
///
/// On GitHub Actions, `$GITHUB_OUTPUT` works directly.
pub const OUTPUT_FILE_ENV: &str = "RESTASH_OUTPUT_FILE";

/// Sink for step output values
pub struct StepOutputs {
    path: Option<PathBuf>,
}

impl StepOutputs {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// Build from `RESTASH_OUTPUT_FILE`, falling back to stdout echo
    pub fn from_env() -> Self {
        let path = std::env::var(OUTPUT_FILE_ENV)
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        Self::new(path)
    }

    /// Publish one named output value
    pub fn set(&self, name: &str, value: &str) -> RestashResult<()> {
        match &self.path {
            Some(path) => {
                let mut file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|e| {
                        RestashError::io(format!("writing output file {}", path.display()), e)
                    })?;
                writeln!(file, "{}={}", name, value)
                    .map_err(|e| RestashError::io(format!("writing output {}", name), e))
            }
            None => {
                println!("{}={}", name, value);
                Ok(())
            }
        }
    }

    /// Publish a boolean output value
    pub fn set_bool(&self, name: &str, value: bool) -> RestashResult<()> {
        self.set(name, if value { "true" } else { "false" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn outputs_append_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("output");

        let outputs = StepOutputs::new(Some(path.clone()));
        outputs.set("primary-key", "restash-main-abc").unwrap();
        outputs.set_bool("cache-hit", true).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "primary-key=restash-main-abc\ncache-hit=true\n");
    }

    #[test]
    fn outputs_without_file_do_not_fail() {
        let outputs = StepOutputs::new(None);
        outputs.set("cache-hit", "false").unwrap();
    }
}
