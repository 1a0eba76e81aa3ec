//! Configuration validation.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use crate::money::Money;

/// Validates a merged configuration.
///
/// # Examples
///
/// ```
/// use petcare::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::default()).unwrap();
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a zero lock wait or a negative amount.
    pub fn validate(config: &Config) -> Result<()> {
        if config.maximum_lock_wait_seconds == Some(0) {
            return Err(Error::Validation {
                field: "maximum_lock_wait_seconds".into(),
                message: "Timeout must be greater than 0".into(),
            });
        }

        if let Some(defaults) = config.defaults {
            Self::validate_amount("defaults.consultation_fee", defaults.consultation_fee)?;
            Self::validate_amount("defaults.hourly_rate", defaults.hourly_rate)?;
        }

        Ok(())
    }

    fn validate_amount(field: &str, amount: Option<Money>) -> Result<()> {
        match amount {
            Some(amount) if amount.is_negative() => Err(Error::Validation {
                field: field.into(),
                message: format!("{amount} must not be negative"),
            }),
            _ => Ok(()),
        }
    }
}
