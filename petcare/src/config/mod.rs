//! Configuration system for petcare.
//!
//! Configuration is merged from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`PETCARE_*`)
//! 3. Private project config (`petcare.local.yaml`)
//! 4. Project config (`petcare.yaml`)
//! 5. User config (`~/.petcare/config.yaml`)
//! 6. Built-in defaults
//!
//! # Examples
//!
//! ```no_run
//! use petcare::config::ConfigBuilder;
//! use std::path::Path;
//!
//! let config = ConfigBuilder::new()
//!     .with_working_dir(Path::new("/srv/clinic"))
//!     .build()
//!     .unwrap();
//! println!("new vets start with {} slots", config.available_slots());
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource, LOCAL_CONFIG_FILE, PROJECT_CONFIG_FILE};
pub use merger::ConfigMerger;
pub use schema::{
    Config, OutputFormat, ProviderDefaults, DEFAULT_AVAILABLE_SLOTS, DEFAULT_CONSULTATION_FEE,
    DEFAULT_HOURLY_RATE,
};
pub use validator::ConfigValidator;
