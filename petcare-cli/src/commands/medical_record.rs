//! Add-medical-record command implementation.

use crate::error::CliError;
use crate::utils::{acting_user, load_configuration, open_service, GlobalOptions};
use clap::Args;
use petcare::{AppointmentId, MedicalRecordRequest};

/// Attach clinical notes to one of the acting vet's appointments.
#[derive(Args)]
pub struct AddMedicalRecordCommand {
    /// Appointment examined
    #[arg(long, value_name = "ID")]
    pub appointment: i64,

    /// Diagnosis
    #[arg(long)]
    pub diagnosis: String,

    /// Treatment given
    #[arg(long)]
    pub treatment: Option<String>,

    /// Prescription written
    #[arg(long)]
    pub prescription: Option<String>,

    /// Anything else
    #[arg(long)]
    pub notes: Option<String>,
}

impl AddMedicalRecordCommand {
    /// Execute the add-medical-record command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut service = open_service(global, &config)?;
        let actor = acting_user(&service, global)?;

        let request = MedicalRecordRequest::new(AppointmentId::new(self.appointment), self.diagnosis)
            .with_treatment(self.treatment)
            .with_prescription(self.prescription)
            .with_notes(self.notes);

        let id = service
            .add_medical_record(actor, request)
            .map_err(CliError::from)?;
        println!("{}", id.value());

        Ok(())
    }
}
