//! Integration tests for restash

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::path::{Path, PathBuf};

    fn restash() -> Command {
        let mut cmd = cargo_bin_cmd!("restash");
        // Hermetic: no pipeline env or machine config may leak in
        for var in [
            "RESTASH_CONFIG",
            "RESTASH_STATE_FILE",
            "RESTASH_OUTPUT_FILE",
            "RESTASH_EVENT",
            "RESTASH_REF",
            "RESTASH_RUN_ID",
            "RESTASH_COMMIT_MESSAGE",
            "RESTASH_WEBHOOK_URL",
            "GITHUB_EVENT_NAME",
            "GITHUB_REF",
            "GITHUB_RUN_ID",
        ] {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Project fixture: a lockfile containing "abc" and a local config
    /// pointing cache derivation at it.
    fn project(dir: &Path, backend_program: Option<&str>) {
        std::fs::write(dir.join("lock"), b"abc").unwrap();

        let backend = match backend_program {
            Some(program) => format!("[backend]\nprogram = \"{}\"\n", program),
            None => String::new(),
        };

        std::fs::write(
            dir.join(".restash.toml"),
            format!(
                "[cache]\nprefix = \"build-x\"\nkey_files = [\"lock\"]\npaths = [\"target\"]\n\n{}",
                backend
            ),
        )
        .unwrap();
    }

    /// Absent global config path so only the local file applies
    fn no_global(dir: &Path) -> PathBuf {
        dir.join("no-global-config.toml")
    }

    /// Store CLI stub honoring the restash backend contract
    fn write_store_script(dir: &Path, restore_line: &str, save_line: &str) -> PathBuf {
        let path = dir.join("fake-store");
        let script = format!(
            "#!/bin/sh\ncase \"$1\" in\n  --version) echo fake-store 1.0 ;;\n  restore) {} ;;\n  save) {} ;;\nesac\n",
            restore_line, save_line
        );
        std::fs::write(&path, script).unwrap();

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        }

        path
    }

    const ABC_KEY: &str =
        "build-x-main-ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";

    #[test]
    fn help_displays() {
        restash()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("CI cache restore/save helper"));
    }

    #[test]
    fn version_displays() {
        restash()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("restash"));
    }

    #[test]
    fn key_prints_expected_key() {
        let dir = tempfile::TempDir::new().unwrap();
        project(dir.path(), None);

        restash()
            .current_dir(dir.path())
            .args(["--config"])
            .arg(no_global(dir.path()))
            .args(["key", "--scope", "main"])
            .assert()
            .success()
            .stdout(predicate::str::contains(ABC_KEY));
    }

    #[test]
    fn key_scope_falls_back_to_branch_ref() {
        let dir = tempfile::TempDir::new().unwrap();
        project(dir.path(), None);

        restash()
            .current_dir(dir.path())
            .args(["--config"])
            .arg(no_global(dir.path()))
            .env("RESTASH_REF", "refs/heads/main")
            .arg("key")
            .assert()
            .success()
            .stdout(predicate::str::contains(ABC_KEY));
    }

    #[test]
    fn key_fails_without_inputs() {
        let dir = tempfile::TempDir::new().unwrap();

        restash()
            .current_dir(dir.path())
            .args(["--config"])
            .arg(no_global(dir.path()))
            .arg("key")
            .assert()
            .failure()
            .stderr(predicate::str::contains("No cache key inputs configured"));
    }

    #[test]
    fn restore_soft_skips_without_backend() {
        let dir = tempfile::TempDir::new().unwrap();
        project(dir.path(), None);

        restash()
            .current_dir(dir.path())
            .args(["--config"])
            .arg(no_global(dir.path()))
            .arg("restore")
            .assert()
            .success()
            .stdout(predicate::str::contains("cache-hit=false"));
    }

    #[test]
    fn restore_miss_records_primary_key_in_state() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = write_store_script(dir.path(), ":", "echo 7");
        project(dir.path(), Some(&store.display().to_string()));

        let state_file = dir.path().join("state");

        restash()
            .current_dir(dir.path())
            .args(["--config"])
            .arg(no_global(dir.path()))
            .env("RESTASH_STATE_FILE", &state_file)
            .env("RESTASH_REF", "refs/heads/main")
            .arg("restore")
            .assert()
            .success()
            .stdout(predicate::str::contains("cache-hit=false"));

        let state = std::fs::read_to_string(&state_file).unwrap();
        assert!(state.contains(&format!("cache-primary-key={}", ABC_KEY)));
        assert!(!state.contains("cache-matched-key"));
    }

    #[test]
    fn restore_exact_hit_reports_cache_hit() {
        let dir = tempfile::TempDir::new().unwrap();
        // Stub echoes the requested key back: an exact hit
        let store = write_store_script(dir.path(), "echo \"$3\"", "echo 7");
        project(dir.path(), Some(&store.display().to_string()));

        let state_file = dir.path().join("state");

        restash()
            .current_dir(dir.path())
            .args(["--config"])
            .arg(no_global(dir.path()))
            .env("RESTASH_STATE_FILE", &state_file)
            .env("RESTASH_REF", "refs/heads/main")
            .arg("restore")
            .assert()
            .success()
            .stdout(
                predicate::str::contains("cache-hit=true")
                    .and(predicate::str::contains(format!("matched-key={}", ABC_KEY))),
            );

        let state = std::fs::read_to_string(&state_file).unwrap();
        assert!(state.contains(&format!("cache-matched-key={}", ABC_KEY)));
    }

    #[test]
    fn restore_refless_event_soft_skips() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = write_store_script(dir.path(), "echo \"$3\"", "echo 7");
        project(dir.path(), Some(&store.display().to_string()));

        restash()
            .current_dir(dir.path())
            .args(["--config"])
            .arg(no_global(dir.path()))
            .env("RESTASH_EVENT", "workflow_dispatch")
            .arg("restore")
            .assert()
            .success()
            .stdout(predicate::str::contains("cache-hit=false"));
    }

    #[test]
    fn restore_requires_paths() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("lock"), b"abc").unwrap();
        std::fs::write(
            dir.path().join(".restash.toml"),
            "[cache]\nkey_files = [\"lock\"]\n",
        )
        .unwrap();

        restash()
            .current_dir(dir.path())
            .args(["--config"])
            .arg(no_global(dir.path()))
            .arg("restore")
            .assert()
            .failure()
            .stderr(predicate::str::contains("No cache paths configured"));
    }

    #[test]
    fn save_skips_after_exact_restore() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = write_store_script(dir.path(), "echo \"$3\"", "echo 7");
        project(dir.path(), Some(&store.display().to_string()));

        let state_file = dir.path().join("state");
        std::fs::write(
            &state_file,
            format!(
                "cache-primary-key={}\ncache-matched-key={}\n",
                ABC_KEY, ABC_KEY
            ),
        )
        .unwrap();

        restash()
            .current_dir(dir.path())
            .args(["--config"])
            .arg(no_global(dir.path()))
            .env("RESTASH_STATE_FILE", &state_file)
            .env("RESTASH_REF", "refs/heads/main")
            .arg("save")
            .assert()
            .success()
            .stdout(predicate::str::contains("nothing new to cache"));
    }

    #[test]
    fn save_saves_after_miss() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = write_store_script(dir.path(), ":", "echo 7");
        project(dir.path(), Some(&store.display().to_string()));

        let state_file = dir.path().join("state");
        std::fs::write(&state_file, format!("cache-primary-key={}\n", ABC_KEY)).unwrap();

        restash()
            .current_dir(dir.path())
            .args(["--config"])
            .arg(no_global(dir.path()))
            .env("RESTASH_STATE_FILE", &state_file)
            .env("RESTASH_REF", "refs/heads/main")
            .arg("save")
            .assert()
            .success()
            .stdout(predicate::str::contains("entry 7"));
    }

    #[test]
    fn save_backend_failure_does_not_fail_the_step() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = write_store_script(dir.path(), ":", "echo \"disk full\" >&2; exit 1");
        project(dir.path(), Some(&store.display().to_string()));

        restash()
            .current_dir(dir.path())
            .args(["--config"])
            .arg(no_global(dir.path()))
            .env("RESTASH_REF", "refs/heads/main")
            .arg("save")
            .assert()
            .success()
            .stdout(predicate::str::contains("disk full"));
    }

    #[test]
    fn save_soft_skips_without_backend() {
        let dir = tempfile::TempDir::new().unwrap();
        project(dir.path(), None);

        restash()
            .current_dir(dir.path())
            .args(["--config"])
            .arg(no_global(dir.path()))
            .arg("save")
            .assert()
            .success()
            .stdout(predicate::str::contains("backend not configured"));
    }

    #[test]
    fn config_show() {
        let dir = tempfile::TempDir::new().unwrap();

        restash()
            .current_dir(dir.path())
            .args(["--config"])
            .arg(no_global(dir.path()))
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[cache]"));
    }

    #[test]
    fn config_path() {
        let dir = tempfile::TempDir::new().unwrap();

        restash()
            .current_dir(dir.path())
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn notify_requires_webhook() {
        let dir = tempfile::TempDir::new().unwrap();

        restash()
            .current_dir(dir.path())
            .args(["--config"])
            .arg(no_global(dir.path()))
            .arg("notify")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Webhook URL missing"));
    }
}
