//! Status commands.
//!
//! One command per record kind. Each resolves the acting provider and asks
//! the service to apply the move; the lifecycle table decides whether it is
//! legal and which pool, if any, gets units back.

use crate::error::CliError;
use crate::utils::{
    acting_user, load_configuration, open_service, parse_status, report_plan, GlobalOptions,
};
use clap::Args;
use petcare::operations::TransitionPlan;
use petcare::{
    AppointmentId, AppointmentStatus, BookingId, BookingStatus, OrderId, OrderStatus,
    TransitionTarget,
};

/// Change an appointment's status.
#[derive(Args)]
pub struct AppointmentStatusCommand {
    /// Appointment id
    pub id: i64,

    /// New status: pending, confirmed, completed or cancelled
    #[arg(value_parser = parse_status::<AppointmentStatus>)]
    pub status: AppointmentStatus,

    /// Show the plan without applying it
    #[arg(long)]
    pub dry_run: bool,
}

impl AppointmentStatusCommand {
    /// Execute the appointment-status command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let target = TransitionTarget::Appointment(AppointmentId::new(self.id), self.status);
        apply(target, self.dry_run, global)
    }
}

/// Change a sitter booking's status.
#[derive(Args)]
pub struct BookingStatusCommand {
    /// Booking id
    pub id: i64,

    /// New status: pending, confirmed, completed or cancelled
    #[arg(value_parser = parse_status::<BookingStatus>)]
    pub status: BookingStatus,

    /// Show the plan without applying it
    #[arg(long)]
    pub dry_run: bool,
}

impl BookingStatusCommand {
    /// Execute the booking-status command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let target = TransitionTarget::Booking(BookingId::new(self.id), self.status);
        apply(target, self.dry_run, global)
    }
}

/// Change an order's status.
#[derive(Args)]
pub struct OrderStatusCommand {
    /// Order id
    pub id: i64,

    /// New status: processing, shipped, delivered or cancelled
    #[arg(value_parser = parse_status::<OrderStatus>)]
    pub status: OrderStatus,

    /// Show the plan without applying it
    #[arg(long)]
    pub dry_run: bool,
}

impl OrderStatusCommand {
    /// Execute the order-status command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let target = TransitionTarget::Order(OrderId::new(self.id), self.status);
        apply(target, self.dry_run, global)
    }
}

fn apply(target: TransitionTarget, dry_run: bool, global: &GlobalOptions) -> Result<(), CliError> {
    let config = load_configuration(global)?;
    let mut service = open_service(global, &config)?;
    let actor = acting_user(&service, global)?;

    if dry_run {
        let result = service
            .preview(&TransitionPlan::new(actor, target))
            .map_err(CliError::from)?;
        report_plan(&result, global);
        return Ok(());
    }

    service.transition(actor, target)?;
    if !global.quiet {
        eprintln!("Moved {target}");
    }

    Ok(())
}
