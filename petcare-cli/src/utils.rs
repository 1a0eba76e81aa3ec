//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including configuration loading, opening the reservation service,
//! resolving the acting user and argument parsers.

use crate::error::CliError;
use chrono::{NaiveDate, NaiveTime};
use petcare::database::{default_data_dir, DATABASE_FILE_NAME};
use petcare::lifecycle::Lifecycle;
use petcare::{
    Actor, Config, ConfigBuilder, DatabaseConfig, ExecutionResult, Money, OrderLine, ProductId,
    ReservationService, UserId,
};
use std::path::PathBuf;
use std::time::Duration;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
#[allow(dead_code)] // verbose is consumed by the logger before commands run
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds).
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization.
    pub disable_autoinit: bool,

    /// Acting user id.
    pub user: Option<i64>,
}

/// Resolve the data directory: `--data-dir`, else `~/.petcare`.
pub fn resolve_data_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    match &global.data_dir {
        Some(dir) => Ok(dir.clone()),
        None => default_data_dir().map_err(|e| CliError::Config(e.to_string())),
    }
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Environment variables
/// 2. Project files found from the current directory
/// 3. `<data_dir>/config.yaml`
/// 4. Built-in defaults
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let data_dir = resolve_data_dir(global)?;

    ConfigBuilder::new()
        .with_data_dir(&data_dir)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Open the reservation service on the configured database.
///
/// # Errors
///
/// Returns `NoDataDirectory` if the database doesn't exist and auto-init is
/// disabled by flag or configuration.
pub fn open_service(global: &GlobalOptions, config: &Config) -> Result<ReservationService, CliError> {
    let db_path = resolve_data_dir(global)?.join(DATABASE_FILE_NAME);

    let autoinit_disabled = global.disable_autoinit || config.disable_autoinit == Some(true);
    if !db_path.exists() && autoinit_disabled {
        return Err(CliError::NoDataDirectory);
    }

    let timeout = match global.busy_timeout {
        Some(seconds) => Duration::from_secs(seconds.into()),
        None => Duration::from_secs(config.lock_wait_seconds()),
    };

    ReservationService::open(DatabaseConfig::new(db_path).with_busy_timeout(timeout))
        .map_err(CliError::from)
}

/// Resolve `--user` to an actor with its registered role.
pub fn acting_user(service: &ReservationService, global: &GlobalOptions) -> Result<Actor, CliError> {
    let id = global.user.ok_or_else(|| {
        CliError::InvalidArguments("--user (or PETCARE_USER) is required for this command".into())
    })?;
    service.actor_for(UserId::new(id)).map_err(CliError::from)
}

/// Print a plan's warnings, and its actions when it was a dry run.
pub fn report_plan(result: &ExecutionResult, global: &GlobalOptions) {
    if global.quiet {
        return;
    }

    if result.dry_run {
        eprintln!(
            "Dry run - would perform {} action(s):",
            result.actions_taken.len()
        );
        for action in &result.actions_taken {
            eprintln!("  - {action}");
        }
    }

    for warning in &result.warnings {
        eprintln!("Warning: {warning}");
    }
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| format!("'{s}' is not a YYYY-MM-DD date: {e}"))
}

/// Parse an `HH:MM` time.
pub fn parse_time(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M")
        .map_err(|e| format!("'{s}' is not an HH:MM time: {e}"))
}

/// Parse a whole-unit amount of money.
pub fn parse_money(s: &str) -> Result<Money, String> {
    let amount: i64 = s
        .trim()
        .parse()
        .map_err(|e| format!("'{s}' is not a whole amount: {e}"))?;
    if amount < 0 {
        return Err(format!("'{s}' must not be negative"));
    }
    Ok(Money::new(amount))
}

/// Parse an order line written as `PRODUCT:QUANTITY`.
pub fn parse_order_line(s: &str) -> Result<OrderLine, String> {
    let (product, quantity) = s
        .split_once(':')
        .ok_or_else(|| format!("'{s}' should look like PRODUCT:QUANTITY"))?;
    let product: i64 = product
        .trim()
        .parse()
        .map_err(|e| format!("bad product id in '{s}': {e}"))?;
    let quantity: u32 = quantity
        .trim()
        .parse()
        .map_err(|e| format!("bad quantity in '{s}': {e}"))?;
    Ok(OrderLine::new(ProductId::new(product), quantity))
}

/// Parse a status name for lifecycle `S`, ignoring case.
pub fn parse_status<S: Lifecycle>(s: &str) -> Result<S, String> {
    s.parse::<S>().map_err(|e| e.to_string())
}
