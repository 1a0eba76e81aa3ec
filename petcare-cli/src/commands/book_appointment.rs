//! Book-appointment command implementation.
//!
//! Takes one slot from the veterinarian's pool and records the appointment
//! in the same unit of work.

use crate::error::CliError;
use crate::utils::{
    acting_user, load_configuration, open_service, parse_date, parse_time, report_plan,
    GlobalOptions,
};
use chrono::{NaiveDate, NaiveTime};
use clap::Args;
use petcare::operations::AppointmentPlan;
use petcare::{AppointmentRequest, PetId, VetId};

/// Book a veterinary appointment.
#[derive(Args)]
pub struct BookAppointmentCommand {
    /// Pet to be seen
    #[arg(long, value_name = "ID")]
    pub pet: i64,

    /// Veterinarian to book
    #[arg(long, value_name = "ID")]
    pub vet: i64,

    /// Day of the visit (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub date: NaiveDate,

    /// Time of the visit (HH:MM)
    #[arg(long, value_parser = parse_time)]
    pub time: NaiveTime,

    /// Reason for the visit
    #[arg(long)]
    pub reason: Option<String>,

    /// Show the plan without booking
    #[arg(long)]
    pub dry_run: bool,
}

impl BookAppointmentCommand {
    /// Execute the book-appointment command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut service = open_service(global, &config)?;
        let actor = acting_user(&service, global)?;

        let request =
            AppointmentRequest::new(PetId::new(self.pet), VetId::new(self.vet), self.date, self.time)
                .with_reason(self.reason);

        if self.dry_run {
            let result = service
                .preview(&AppointmentPlan::new(actor, request))
                .map_err(CliError::from)?;
            report_plan(&result, global);
            return Ok(());
        }

        let id = service.create_appointment(actor, request)?;
        println!("{}", id.value());

        Ok(())
    }
}
