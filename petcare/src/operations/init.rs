//! Data directory initialization.
//!
//! Creates the data directory, a fresh database and, on request, a commented
//! configuration file the user can edit.

use std::fs;
use std::path::PathBuf;

use crate::database::{Database, DatabaseConfig, DATABASE_FILE_NAME};
use crate::error::{Error, Result};

/// Options for database initialization.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Data directory to initialize.
    pub data_dir: PathBuf,
    /// Replace an existing database.
    pub overwrite: bool,
    /// Write a default `config.yaml`.
    pub create_config: bool,
}

impl InitOptions {
    /// Creates new initialization options.
    #[must_use]
    pub const fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            overwrite: false,
            create_config: false,
        }
    }

    /// Sets whether to overwrite an existing database.
    #[must_use]
    pub const fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Sets whether to create the default configuration file.
    #[must_use]
    pub const fn with_create_config(mut self, create_config: bool) -> Self {
        self.create_config = create_config;
        self
    }
}

/// Result of an initialization.
#[derive(Debug)]
pub struct InitResult {
    /// Whether the data directory was created.
    pub data_dir_created: bool,
    /// Whether the database was created or recreated.
    pub database_created: bool,
    /// Whether a configuration file was created.
    pub config_created: bool,
    /// Path to the data directory.
    pub data_dir: PathBuf,
}

const DEFAULT_CONFIG_TEMPLATE: &str = r"# petcare configuration

# Values used when registering providers without explicit amounts
# defaults:
#   available_slots: 10
#   consultation_fee: 30000
#   hourly_rate: 15000

# Seconds to wait for another writer before giving up (default: 5)
# maximum_lock_wait_seconds: 5

# Refuse to create the database implicitly
# disable_autoinit: false

# human or json
# output_format: human
";

/// Initializes the data directory and database.
///
/// # Errors
///
/// Returns an error if the directory or configuration file cannot be
/// written, the database cannot be created, or a database already exists
/// and `overwrite` is false.
///
/// # Examples
///
/// ```no_run
/// use petcare::operations::{init_database, InitOptions};
/// use std::path::PathBuf;
///
/// let options = InitOptions::new(PathBuf::from("/tmp/petcare-data")).with_create_config(true);
/// let result = init_database(&options).unwrap();
/// assert!(result.database_created);
/// ```
pub fn init_database(options: &InitOptions) -> Result<InitResult> {
    let mut result = InitResult {
        data_dir_created: false,
        database_created: false,
        config_created: false,
        data_dir: options.data_dir.clone(),
    };

    if !options.data_dir.exists() {
        fs::create_dir_all(&options.data_dir)?;
        result.data_dir_created = true;
    }

    let db_path = options.data_dir.join(DATABASE_FILE_NAME);
    if db_path.exists() {
        if !options.overwrite {
            return Err(Error::Validation {
                field: "database".into(),
                message: format!(
                    "Database already exists at {}. Use --overwrite to replace it.",
                    db_path.display()
                ),
            });
        }
        fs::remove_file(&db_path)?;
        for suffix in ["-wal", "-shm"] {
            let side = options.data_dir.join(format!("{DATABASE_FILE_NAME}{suffix}"));
            if side.exists() {
                fs::remove_file(side)?;
            }
        }
    }

    Database::open(DatabaseConfig::new(&db_path))?;
    result.database_created = true;

    if options.create_config {
        let config_path = options.data_dir.join("config.yaml");
        if !config_path.exists() {
            fs::write(&config_path, DEFAULT_CONFIG_TEMPLATE)?;
            result.config_created = true;
        }
    }

    Ok(result)
}
