//! Show command implementation.
//!
//! Reads one record and prints it with the configured formatter.

use crate::error::CliError;
use crate::utils::{load_configuration, open_service, GlobalOptions};
use clap::{Args, ValueEnum};
use petcare::database::Database;
use petcare::output::{create_formatter, OutputFormat, RecordView};
use petcare::{AppointmentId, BookingId, MedicalRecordId, OrderId};

/// Kind of record to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RecordKind {
    /// A veterinary appointment
    Appointment,
    /// A sitter booking
    Booking,
    /// A product order
    Order,
    /// Clinical notes
    MedicalRecord,
}

impl RecordKind {
    const fn label(self) -> &'static str {
        match self {
            Self::Appointment => "appointment",
            Self::Booking => "booking",
            Self::Order => "order",
            Self::MedicalRecord => "medical record",
        }
    }
}

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Aligned key/value lines
    Human,
    /// Pretty-printed JSON
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Human => OutputFormat::Human,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

/// Show a stored record.
#[derive(Args)]
pub struct ShowCommand {
    /// Kind of record
    #[arg(value_enum)]
    pub kind: RecordKind,

    /// Record id
    pub id: i64,

    /// Output format (default: configured `output_format`, else human)
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,
}

impl ShowCommand {
    /// Execute the show command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let service = open_service(global, &config)?;
        let conn = service.database().connection();

        let view = match self.kind {
            RecordKind::Appointment => {
                let id = AppointmentId::new(self.id);
                Database::get_appointment(conn, id)?.map(RecordView::Appointment)
            }
            RecordKind::Booking => {
                let id = BookingId::new(self.id);
                Database::get_booking(conn, id)?.map(RecordView::Booking)
            }
            RecordKind::Order => {
                let id = OrderId::new(self.id);
                Database::get_order(conn, id)?.map(RecordView::Order)
            }
            RecordKind::MedicalRecord => {
                let id = MedicalRecordId::new(self.id);
                Database::get_medical_record(conn, id)?.map(RecordView::MedicalRecord)
            }
        };

        let view = view.ok_or_else(|| {
            CliError::from(petcare::Error::NotFound {
                resource: format!("{} {}", self.kind.label(), self.id),
            })
        })?;

        let format = self
            .format
            .map(OutputFormat::from)
            .or(config.output_format)
            .unwrap_or_default();
        let output = create_formatter(format).format(&view)?;
        println!("{output}");

        Ok(())
    }
}
