//! Clinical notes attached to appointments.

use rusqlite::Connection;

use crate::database::Database;
use crate::error::{Error, Result};
use crate::lifecycle::AppointmentStatus;
use crate::reservation::{MedicalRecordRequest, RecordRef};
use crate::role::{Actor, Role};

use super::access::{not_found, require_role};
use super::plan::{OperationPlan, PlanAction, PlanBuilder};

/// Plans adding a medical record to an appointment.
///
/// Only the appointment's own veterinarian may write notes, and never on a
/// cancelled appointment.
#[derive(Debug, Clone)]
pub struct MedicalRecordPlan {
    actor: Actor,
    request: MedicalRecordRequest,
}

impl MedicalRecordPlan {
    /// Creates a planner for `request` made by `actor`.
    #[must_use]
    pub const fn new(actor: Actor, request: MedicalRecordRequest) -> Self {
        Self { actor, request }
    }
}

impl PlanBuilder for MedicalRecordPlan {
    fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let request = &self.request;
        request.validate()?;
        require_role(self.actor, Role::Veterinarian, "write medical records")?;

        let record = RecordRef::Appointment(request.appointment);
        let appointment = Database::get_appointment(conn, request.appointment)?
            .ok_or_else(|| not_found(record))?;
        let vet = Database::get_veterinarian(conn, appointment.vet)?
            .ok_or_else(|| not_found(appointment.vet))?;
        if vet.user != self.actor.user_id {
            return Err(Error::Forbidden {
                reason: format!("{record} is not assigned to {}", self.actor),
            });
        }
        if appointment.status == AppointmentStatus::Cancelled {
            return Err(Error::Validation {
                field: "appointment".into(),
                message: format!("{record} was cancelled"),
            });
        }

        let mut plan = OperationPlan::new(format!("Add medical record to {record}"));
        if appointment.status != AppointmentStatus::Completed {
            plan = plan.add_warning(format!(
                "{record} is {}, not yet Completed",
                appointment.status
            ));
        }

        Ok(plan.add_action(PlanAction::InsertMedicalRecord {
            request: request.clone(),
            pet: appointment.pet,
            vet: appointment.vet,
        }))
    }
}
