//! Configuration merging and precedence handling.

use crate::config::loader::ConfigSource;
use crate::config::schema::{Config, ProviderDefaults};

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use petcare::config::{Config, ConfigMerger};
///
/// let low = Config { maximum_lock_wait_seconds: Some(2), ..Default::default() };
/// let high = Config { maximum_lock_wait_seconds: Some(9), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.maximum_lock_wait_seconds, Some(9));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge sources, given lowest precedence first.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();
        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }
        result
    }

    /// Merge source config into target (source overwrites target).
    ///
    /// Scalars are replaced when set in `source`; `defaults` is merged
    /// field by field.
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.maximum_lock_wait_seconds.is_some() {
            target.maximum_lock_wait_seconds = source.maximum_lock_wait_seconds;
        }

        if source.disable_autoinit.is_some() {
            target.disable_autoinit = source.disable_autoinit;
        }

        if source.output_format.is_some() {
            target.output_format = source.output_format;
        }

        if let Some(source_defaults) = source.defaults {
            target.defaults = Some(match target.defaults {
                Some(target_defaults) => Self::merge_defaults(target_defaults, source_defaults),
                None => source_defaults,
            });
        }
    }

    fn merge_defaults(target: ProviderDefaults, source: ProviderDefaults) -> ProviderDefaults {
        ProviderDefaults {
            available_slots: source.available_slots.or(target.available_slots),
            consultation_fee: source.consultation_fee.or(target.consultation_fee),
            hourly_rate: source.hourly_rate.or(target.hourly_rate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use crate::money::Money;
    use std::path::PathBuf;

    fn source(precedence: u8, config: Config) -> ConfigSource {
        ConfigSource {
            path: PathBuf::from(format!("/tmp/{precedence}.yaml")),
            precedence,
            config,
        }
    }

    #[test]
    fn test_defaults_merge_field_by_field() {
        let low = Config {
            defaults: Some(ProviderDefaults {
                available_slots: Some(4),
                hourly_rate: Some(Money::new(9_000)),
                consultation_fee: None,
            }),
            ..Default::default()
        };
        let high = Config {
            defaults: Some(ProviderDefaults {
                available_slots: Some(8),
                ..Default::default()
            }),
            output_format: Some(OutputFormat::Json),
            ..Default::default()
        };

        let merged = ConfigMerger::merge(vec![source(1, low), source(2, high)]);
        assert_eq!(merged.available_slots(), 8);
        assert_eq!(merged.hourly_rate(), Money::new(9_000));
        assert_eq!(merged.output_format, Some(OutputFormat::Json));
    }

    #[test]
    fn test_unset_fields_do_not_clear() {
        let mut target = Config {
            disable_autoinit: Some(true),
            ..Default::default()
        };
        ConfigMerger::merge_into(&mut target, &Config::default());
        assert_eq!(target.disable_autoinit, Some(true));
    }
}
