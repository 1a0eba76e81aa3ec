//! `PETCARE_*` environment variable overrides.

use std::env;

use crate::config::schema::{Config, OutputFormat};
use crate::error::{Error, Result};
use crate::money::Money;

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use petcare::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns an error if any variable holds a value of the wrong shape.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(val) = env::var("PETCARE_DEFAULT_SLOTS") {
            let slots = Self::parse_number("PETCARE_DEFAULT_SLOTS", &val)?;
            config.defaults.get_or_insert_with(Default::default).available_slots = Some(slots);
        }

        if let Ok(val) = env::var("PETCARE_CONSULTATION_FEE") {
            let fee = Self::parse_number("PETCARE_CONSULTATION_FEE", &val)?;
            config
                .defaults
                .get_or_insert_with(Default::default)
                .consultation_fee = Some(Money::new(fee));
        }

        if let Ok(val) = env::var("PETCARE_HOURLY_RATE") {
            let rate = Self::parse_number("PETCARE_HOURLY_RATE", &val)?;
            config.defaults.get_or_insert_with(Default::default).hourly_rate =
                Some(Money::new(rate));
        }

        if let Ok(val) = env::var("PETCARE_MAXIMUM_LOCK_WAIT_SECONDS") {
            config.maximum_lock_wait_seconds =
                Some(Self::parse_number("PETCARE_MAXIMUM_LOCK_WAIT_SECONDS", &val)?);
        }

        if let Ok(val) = env::var("PETCARE_DISABLE_AUTOINIT") {
            config.disable_autoinit = Some(Self::parse_bool("PETCARE_DISABLE_AUTOINIT", &val)?);
        }

        if let Ok(val) = env::var("PETCARE_OUTPUT_FORMAT") {
            let format: OutputFormat = val.parse().map_err(|message| Error::Validation {
                field: "PETCARE_OUTPUT_FORMAT".into(),
                message,
            })?;
            config.output_format = Some(format);
        }

        Ok(())
    }

    fn parse_number<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
        value.trim().parse().map_err(|_| Error::Validation {
            field: name.into(),
            message: format!("'{value}' is not a valid number"),
        })
    }

    /// Parse a boolean from an environment variable value.
    ///
    /// Accepts: true/false, 1/0, yes/no, on/off (case-insensitive).
    fn parse_bool(name: &str, value: &str) -> Result<bool> {
        match value.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: name.into(),
                message: format!("'{value}' is not a boolean"),
            }),
        }
    }
}
