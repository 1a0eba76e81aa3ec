//! Sitter booking.
//!
//! Sitters have no pool; a booking only prices the requested hours.

use rusqlite::Connection;

use crate::database::Database;
use crate::error::{Error, Result};
use crate::reservation::SitterBookingRequest;
use crate::role::{Actor, Role};

use super::access::{not_found, owned_pet, require_role};
use super::plan::{OperationPlan, PlanAction, PlanBuilder};

/// Plans a sitter booking.
#[derive(Debug, Clone)]
pub struct BookingPlan {
    actor: Actor,
    request: SitterBookingRequest,
}

impl BookingPlan {
    /// Creates a planner for `request` made by `actor`.
    #[must_use]
    pub const fn new(actor: Actor, request: SitterBookingRequest) -> Self {
        Self { actor, request }
    }
}

impl PlanBuilder for BookingPlan {
    fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let request = &self.request;
        request.validate()?;

        require_role(self.actor, Role::PetOwner, "book a sitter")?;
        owned_pet(conn, self.actor, request.pet)?;

        let sitter = Database::get_sitter(conn, request.sitter)?
            .ok_or_else(|| not_found(request.sitter))?;

        let total_fee =
            sitter
                .hourly_rate
                .checked_mul(request.hours)
                .ok_or_else(|| Error::Validation {
                    field: "hours".into(),
                    message: format!(
                        "{} hours at {} overflows the fee",
                        request.hours, sitter.hourly_rate
                    ),
                })?;

        Ok(OperationPlan::new(format!(
            "Book {} for {}",
            request.sitter, request.pet
        ))
        .add_action(PlanAction::InsertBooking {
            request: request.clone(),
            total_fee,
        }))
    }
}
