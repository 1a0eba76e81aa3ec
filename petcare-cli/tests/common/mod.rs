//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers for common patterns
//! - A small marketplace fixture (owner, vet, sitter, shop)

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test environment with isolated data directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the petcare data directory
    pub data_dir: PathBuf,
}

/// Ids of the fixture created by [`TestEnv::marketplace`].
#[allow(dead_code)]
#[derive(Debug, Clone, Copy)]
pub struct Marketplace {
    pub owner: i64,
    pub pet: i64,
    pub vet_user: i64,
    pub vet: i64,
    pub sitter_user: i64,
    pub sitter: i64,
    pub manager: i64,
    pub shop: i64,
    pub product: i64,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    ///
    /// The data directory is not created; petcare creates it on first use.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let data_dir = temp_path.join("petcare-data");

        Self {
            temp_dir,
            temp_path,
            data_dir,
        }
    }

    /// Get a bare command builder without pre-configured flags.
    ///
    /// Runs inside the temp directory with the petcare environment
    /// variables cleared, so no outside configuration leaks in.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("petcare").expect("Failed to find petcare binary");
        cmd.current_dir(&self.temp_path)
            .env_remove("PETCARE_USER")
            .env_remove("PETCARE_DATA_DIR")
            .env_remove("PETCARE_BUSY_TIMEOUT")
            .env_remove("PETCARE_DISABLE_AUTOINIT")
            .env_remove("PETCARE_DEFAULT_SLOTS")
            .env_remove("PETCARE_CONSULTATION_FEE")
            .env_remove("PETCARE_HOURLY_RATE")
            .env_remove("PETCARE_MAXIMUM_LOCK_WAIT_SECONDS")
            .env_remove("PETCARE_OUTPUT_FORMAT")
            .env_remove("PETCARE_LOG_MODE");
        cmd
    }

    /// Get a command builder with the data directory pre-configured.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// Get a command builder acting as `user`.
    pub fn as_user(&self, user: i64) -> Command {
        let mut cmd = self.command();
        cmd.arg("--user").arg(user.to_string());
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Path of the database file.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("petcare.db")
    }

    /// Run a command expected to print one id on stdout and return it.
    ///
    /// # Panics
    /// Panics if the command fails or doesn't print a number.
    pub fn run_for_id(&self, mut cmd: Command) -> i64 {
        let output = cmd.output().expect("Failed to run petcare");

        assert!(
            output.status.success(),
            "Command failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        let stdout = String::from_utf8(output.stdout).expect("Invalid UTF-8 in output");
        parse_id(&stdout)
    }

    /// Register a user and return the user id.
    pub fn register(&self, username: &str, role: &str, extra: &[&str]) -> i64 {
        let mut cmd = self.command();
        cmd.args(["register", username, "--role", role]).args(extra);
        self.run_for_id(cmd)
    }

    /// Print the remaining capacity of a vet (`--vet`) or product (`--product`).
    pub fn capacity(&self, flag: &str, id: i64) -> u32 {
        let output = self
            .command()
            .args(["capacity", flag, &id.to_string()])
            .output()
            .expect("Failed to run capacity command");

        assert!(
            output.status.success(),
            "Capacity failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        String::from_utf8(output.stdout)
            .expect("Invalid UTF-8 in output")
            .trim()
            .parse()
            .expect("Output is not a number")
    }

    /// Register one user of each role plus a pet and a product.
    ///
    /// The vet has `slots` open slots; the sitter charges 15000 an hour;
    /// the product costs 12000 with `stock` units.
    pub fn marketplace(&self, slots: u32, stock: u32) -> Marketplace {
        let owner = self.register("olivia", "owner", &[]);
        let vet_user = self.register(
            "dr-park",
            "vet",
            &["--clinic", "Happy Paws", "--fee", "50000", "--slots", &slots.to_string()],
        );
        let sitter_user = self.register("sam", "sitter", &["--rate", "15000"]);
        let manager = self.register("mina", "shop", &["--shop-name", "Pet Corner"]);

        let mut cmd = self.as_user(owner);
        cmd.args(["add-pet", "Bori", "--species", "Dog"]);
        let pet = self.run_for_id(cmd);

        let mut cmd = self.as_user(manager);
        cmd.args([
            "add-product",
            "Kibble",
            "--price",
            "12000",
            "--stock",
            &stock.to_string(),
        ]);
        let product = self.run_for_id(cmd);

        // Profiles are numbered independently of users; one of each exists.
        Marketplace {
            owner,
            pet,
            vet_user,
            vet: 1,
            sitter_user,
            sitter: 1,
            manager,
            shop: 1,
            product,
        }
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse an id printed on stdout.
#[allow(dead_code)]
pub fn parse_id(output: &str) -> i64 {
    output.trim().parse().expect("Output is not a valid id")
}
