//! Layered configuration assembly.

use std::env;
use std::path::{Path, PathBuf};

use crate::config::environment::EnvironmentConfig;
use crate::config::loader::ConfigLoader;
use crate::config::merger::ConfigMerger;
use crate::config::schema::Config;
use crate::config::validator::ConfigValidator;
use crate::error::Result;

/// Builds the effective configuration from files, environment and code.
///
/// # Examples
///
/// ```
/// use petcare::config::{Config, ConfigBuilder};
///
/// let config = ConfigBuilder::new()
///     .skip_files()
///     .skip_env()
///     .with_config(Config {
///         maximum_lock_wait_seconds: Some(2),
///         ..Default::default()
///     })
///     .build()
///     .unwrap();
/// assert_eq!(config.lock_wait_seconds(), 2);
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    working_dir: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    skip_files: bool,
    skip_env: bool,
    overrides: Vec<Config>,
}

impl ConfigBuilder {
    /// Creates a builder that reads every layer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start project discovery from `dir` instead of the current directory.
    #[must_use]
    pub fn with_working_dir(mut self, dir: &Path) -> Self {
        self.working_dir = Some(dir.to_path_buf());
        self
    }

    /// Read the user config from `dir` instead of the default data directory.
    #[must_use]
    pub fn with_data_dir(mut self, dir: &Path) -> Self {
        self.data_dir = Some(dir.to_path_buf());
        self
    }

    /// Ignore configuration files.
    #[must_use]
    pub const fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Ignore `PETCARE_*` variables.
    #[must_use]
    pub const fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Add a programmatic layer above everything else.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides.push(config);
        self
    }

    /// Merges the layers and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read or parsed, an environment
    /// variable is malformed, or the merged configuration is invalid.
    pub fn build(self) -> Result<Config> {
        let mut config = if self.skip_files {
            Config::default()
        } else {
            let working_dir = match self.working_dir {
                Some(dir) => dir,
                None => env::current_dir()?,
            };
            ConfigMerger::merge(ConfigLoader::load_all(
                &working_dir,
                self.data_dir.as_deref(),
            )?)
        };

        if !self.skip_env {
            EnvironmentConfig::apply_overrides(&mut config)?;
        }

        for layer in &self.overrides {
            ConfigMerger::merge_into(&mut config, layer);
        }

        ConfigValidator::validate(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderDefaults;
    use crate::money::Money;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    #[serial]
    fn test_layers_apply_in_order() {
        let temp = TempDir::new().unwrap();
        let data_dir = temp.path().join("data");
        let project = temp.path().join("project");
        fs::create_dir_all(&data_dir).unwrap();
        fs::create_dir_all(&project).unwrap();
        fs::write(
            data_dir.join("config.yaml"),
            "defaults:\n  hourly_rate: 11000\n  available_slots: 2\n",
        )
        .unwrap();
        fs::write(
            project.join("petcare.yaml"),
            "defaults:\n  available_slots: 6\n",
        )
        .unwrap();

        let config = ConfigBuilder::new()
            .with_working_dir(&project)
            .with_data_dir(&data_dir)
            .skip_env()
            .with_config(Config {
                maximum_lock_wait_seconds: Some(12),
                ..Default::default()
            })
            .build()
            .unwrap();

        assert_eq!(config.available_slots(), 6);
        assert_eq!(config.hourly_rate(), Money::new(11_000));
        assert_eq!(config.lock_wait_seconds(), 12);
    }

    #[test]
    fn test_invalid_override_fails_validation() {
        let result = ConfigBuilder::new()
            .skip_files()
            .skip_env()
            .with_config(Config {
                defaults: Some(ProviderDefaults {
                    consultation_fee: Some(Money::new(-5)),
                    ..Default::default()
                }),
                ..Default::default()
            })
            .build();
        assert!(result.is_err());
    }
}
