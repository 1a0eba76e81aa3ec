//! Output formatting for reservation records.
//!
//! The CLI `show` command renders one record at a time, either as aligned
//! `key: value` lines or as JSON.

mod formatters;

use serde::Serialize;

use crate::reservation::{Appointment, Booking, MedicalRecord, Order};
use crate::Result;

pub use crate::config::OutputFormat;
pub use formatters::{HumanFormatter, JsonFormatter};

/// Any record the CLI can show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecordView {
    /// An appointment.
    Appointment(Appointment),
    /// A sitter booking.
    Booking(Booking),
    /// An order with its lines.
    Order(Order),
    /// Clinical notes.
    MedicalRecord(MedicalRecord),
}

/// Trait for rendering a record.
pub trait OutputFormatter {
    /// Format the given record into a string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn format(&self, record: &RecordView) -> Result<String>;
}

/// Create a formatter for `format`.
///
/// # Examples
///
/// ```
/// use petcare::output::{create_formatter, OutputFormat};
///
/// let _formatter = create_formatter(OutputFormat::Json);
/// ```
#[must_use]
pub fn create_formatter(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Human => Box::new(HumanFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}
