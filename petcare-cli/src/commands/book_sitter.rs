//! Book-sitter command implementation.

use crate::error::CliError;
use crate::utils::{
    acting_user, load_configuration, open_service, parse_date, report_plan, GlobalOptions,
};
use chrono::NaiveDate;
use clap::Args;
use petcare::operations::BookingPlan;
use petcare::{PetId, SitterBookingRequest, SitterId};

/// Book a pet sitter.
#[derive(Args)]
pub struct BookSitterCommand {
    /// Pet to be looked after
    #[arg(long, value_name = "ID")]
    pub pet: i64,

    /// Sitter to book
    #[arg(long, value_name = "ID")]
    pub sitter: i64,

    /// First day (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub start: NaiveDate,

    /// Last day, inclusive (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub end: NaiveDate,

    /// Billed hours
    #[arg(long)]
    pub hours: u32,

    /// Instructions for the sitter
    #[arg(long)]
    pub requests: Option<String>,

    /// Show the plan without booking
    #[arg(long)]
    pub dry_run: bool,
}

impl BookSitterCommand {
    /// Execute the book-sitter command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut service = open_service(global, &config)?;
        let actor = acting_user(&service, global)?;

        let request = SitterBookingRequest::new(
            PetId::new(self.pet),
            SitterId::new(self.sitter),
            self.start,
            self.end,
            self.hours,
        )
        .with_special_requests(self.requests);

        if self.dry_run {
            let result = service
                .preview(&BookingPlan::new(actor, request))
                .map_err(CliError::from)?;
            report_plan(&result, global);
            return Ok(());
        }

        let id = service.create_sitter_booking(actor, request)?;
        println!("{}", id.value());

        Ok(())
    }
}
