//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers for common patterns

use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// Environment variables that would leak the developer's setup into tests.
const DINOCAGE_ENV_VARS: &[&str] = &[
    "DINOCAGE_DATA_DIR",
    "DINOCAGE_BUSY_TIMEOUT",
    "DINOCAGE_DEFAULT_CAPACITY",
    "DINOCAGE_SPECIES_FILE",
    "DINOCAGE_MAXIMUM_LOCK_WAIT_SECONDS",
    "DINOCAGE_OUTPUT_FORMAT",
];

/// Test environment with isolated data directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the dinocage data directory
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    ///
    /// The data directory is not created; dinocage creates it on first use.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let data_dir = temp_path.join("dinocage-data");

        Self {
            temp_dir,
            temp_path,
            data_dir,
        }
    }

    /// Get a command builder with no flags and a clean environment.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("dinocage").expect("Failed to find dinocage binary");
        for var in DINOCAGE_ENV_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Get a command builder with the data directory pre-configured.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// Write `config.yaml` into the data directory.
    pub fn write_config(&self, yaml: &str) {
        std::fs::create_dir_all(&self.data_dir).expect("Failed to create data dir");
        std::fs::write(self.data_dir.join("config.yaml"), yaml).expect("Failed to write config");
    }

    /// Write `species.json` into the data directory.
    pub fn write_species(&self, json: &str) {
        std::fs::create_dir_all(&self.data_dir).expect("Failed to create data dir");
        std::fs::write(self.data_dir.join("species.json"), json).expect("Failed to write species");
    }

    /// Run a command expected to succeed and print a single id on stdout.
    ///
    /// # Panics
    /// Panics if the command fails or stdout is not an integer.
    pub fn run_for_id(&self, args: &[&str]) -> i64 {
        let output = self
            .command()
            .args(args)
            .output()
            .expect("Failed to run dinocage");

        assert!(
            output.status.success(),
            "{args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        let stdout = String::from_utf8(output.stdout).expect("Invalid UTF-8 in output");
        stdout.trim().parse().expect("Output is not an id")
    }

    /// Provision a cage, returning its id.
    pub fn add_cage(&self, diet: &str, capacity: u32) -> i64 {
        self.run_for_id(&["cage", "add", "--diet", diet, "--capacity", &capacity.to_string()])
    }

    /// Admit a dinosaur, optionally into a given cage, returning its id.
    pub fn add_dino(&self, species: &str, name: &str, cage: Option<i64>) -> i64 {
        let cage = cage.map(|c| c.to_string());
        let mut args = vec!["dino", "add", "--species", species, "--name", name];
        if let Some(cage) = cage.as_deref() {
            args.extend(["--cage", cage]);
        }
        self.run_for_id(&args)
    }

    /// Fetch `cage list` as JSON.
    pub fn cages_json(&self) -> serde_json::Value {
        let output = self
            .command()
            .args(["cage", "list", "--format", "json"])
            .output()
            .expect("Failed to run dinocage");
        assert!(output.status.success());
        serde_json::from_slice(&output.stdout).expect("Invalid JSON from cage list")
    }
}
