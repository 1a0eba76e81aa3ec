//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Slots given to a veterinarian registered without an explicit count.
pub const DEFAULT_AVAILABLE_SLOTS: u32 = 10;

/// Consultation fee used when none is given.
pub const DEFAULT_CONSULTATION_FEE: Money = Money::new(30_000);

/// Sitter hourly rate used when none is given.
pub const DEFAULT_HOURLY_RATE: Money = Money::new(15_000);

/// Complete configuration structure.
///
/// Every field is optional so that layers can be merged; use the accessor
/// methods for effective values.
///
/// # Examples
///
/// ```
/// use petcare::config::{Config, ProviderDefaults};
///
/// let config = Config {
///     defaults: Some(ProviderDefaults {
///         available_slots: Some(4),
///         ..Default::default()
///     }),
///     ..Default::default()
/// };
/// assert_eq!(config.available_slots(), 4);
/// assert_eq!(config.hourly_rate().amount(), 15_000);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Values used when registering providers.
    pub defaults: Option<ProviderDefaults>,

    /// Maximum time to wait for the database write lock (seconds).
    pub maximum_lock_wait_seconds: Option<u64>,

    /// Disable automatic database initialization.
    pub disable_autoinit: Option<bool>,

    /// Output format for `show`.
    pub output_format: Option<OutputFormat>,
}

impl Config {
    /// Effective slot count for new veterinarians.
    #[must_use]
    pub fn available_slots(&self) -> u32 {
        self.defaults
            .as_ref()
            .and_then(|d| d.available_slots)
            .unwrap_or(DEFAULT_AVAILABLE_SLOTS)
    }

    /// Effective consultation fee for new veterinarians.
    #[must_use]
    pub fn consultation_fee(&self) -> Money {
        self.defaults
            .as_ref()
            .and_then(|d| d.consultation_fee)
            .unwrap_or(DEFAULT_CONSULTATION_FEE)
    }

    /// Effective hourly rate for new sitters.
    #[must_use]
    pub fn hourly_rate(&self) -> Money {
        self.defaults
            .as_ref()
            .and_then(|d| d.hourly_rate)
            .unwrap_or(DEFAULT_HOURLY_RATE)
    }

    /// Effective lock wait, in seconds.
    #[must_use]
    pub fn lock_wait_seconds(&self) -> u64 {
        self.maximum_lock_wait_seconds.unwrap_or(5)
    }
}

/// Registration defaults for provider profiles.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ProviderDefaults {
    /// Initial appointment slots for a veterinarian.
    pub available_slots: Option<u32>,
    /// Consultation fee for a veterinarian.
    pub consultation_fee: Option<Money>,
    /// Hourly rate for a sitter.
    pub hourly_rate: Option<Money>,
}

/// Output format for records.
///
/// # Examples
///
/// ```
/// use petcare::config::OutputFormat;
///
/// assert_eq!(OutputFormat::Json.to_string(), "json");
/// ```
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned `key: value` lines.
    #[default]
    Human,
    /// Pretty-printed JSON.
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Human => write!(f, "human"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}
