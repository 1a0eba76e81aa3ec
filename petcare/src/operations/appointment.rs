//! Appointment booking.
//!
//! A booking takes one slot from the veterinarian's pool and inserts a
//! Pending appointment. Both happen in the caller's unit of work, so a failed
//! insert hands the slot straight back.

use log::debug;
use rusqlite::Connection;

use crate::database::Database;
use crate::error::Result;
use crate::pool::PoolId;
use crate::reservation::AppointmentRequest;
use crate::role::{Actor, Role};

use super::access::{not_found, owned_pet, require_role};
use super::plan::{OperationPlan, PlanAction, PlanBuilder};

/// Plans an appointment booking.
#[derive(Debug, Clone)]
pub struct AppointmentPlan {
    actor: Actor,
    request: AppointmentRequest,
}

impl AppointmentPlan {
    /// Creates a planner for `request` made by `actor`.
    #[must_use]
    pub const fn new(actor: Actor, request: AppointmentRequest) -> Self {
        Self { actor, request }
    }
}

impl PlanBuilder for AppointmentPlan {
    fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let request = &self.request;
        let mut plan = OperationPlan::new(format!(
            "Book appointment for {} with {}",
            request.pet, request.vet
        ));

        // Step 1: Only the pet's owner books for it
        require_role(self.actor, Role::PetOwner, "book an appointment")?;
        owned_pet(conn, self.actor, request.pet)?;

        // Step 2: The veterinarian must exist
        let vet = Database::get_veterinarian(conn, request.vet)?
            .ok_or_else(|| not_found(request.vet))?;

        // Step 3: Warn early; the consume step decides for real
        if vet.available_slots == 0 {
            debug!("{} currently has no open slots", vet.id);
            plan = plan.add_warning(format!("{} has no open slots left", vet.id));
        }

        Ok(plan
            .add_action(PlanAction::ConsumePool {
                pool: PoolId::VetSlots(request.vet),
                amount: 1,
            })
            .add_action(PlanAction::InsertAppointment(request.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{create_test_database, seed_owner_with_pet, seed_vet};
    use crate::error::Error;
    use crate::ids::{PetId, VetId};
    use chrono::{NaiveDate, NaiveTime};

    fn request(pet: PetId, vet: VetId) -> AppointmentRequest {
        AppointmentRequest::new(
            pet,
            vet,
            NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_plan_consumes_then_inserts() {
        let mut db = create_test_database();
        let vet = seed_vet(&mut db, 1);
        let (owner, pet) = seed_owner_with_pet(&mut db, "mina");

        let plan = AppointmentPlan::new(Actor::new(owner, Role::PetOwner), request(pet, vet))
            .build_plan(db.connection())
            .unwrap();

        assert_eq!(plan.len(), 2);
        assert!(matches!(
            plan.actions[0],
            PlanAction::ConsumePool { pool: PoolId::VetSlots(v), amount: 1 } if v == vet
        ));
        assert!(matches!(plan.actions[1], PlanAction::InsertAppointment(_)));
        assert!(plan.warnings.is_empty());
    }

    #[test]
    fn test_empty_pool_only_warns() {
        let mut db = create_test_database();
        let vet = seed_vet(&mut db, 0);
        let (owner, pet) = seed_owner_with_pet(&mut db, "mina");

        let plan = AppointmentPlan::new(Actor::new(owner, Role::PetOwner), request(pet, vet))
            .build_plan(db.connection())
            .unwrap();

        assert_eq!(plan.warnings.len(), 1);
        assert_eq!(plan.len(), 2);
    }

    #[test]
    fn test_someone_elses_pet_is_forbidden() {
        let mut db = create_test_database();
        let vet = seed_vet(&mut db, 1);
        let (_, pet) = seed_owner_with_pet(&mut db, "mina");
        let (stranger, _) = seed_owner_with_pet(&mut db, "jun");

        let err = AppointmentPlan::new(Actor::new(stranger, Role::PetOwner), request(pet, vet))
            .build_plan(db.connection())
            .unwrap_err();
        assert!(matches!(err, Error::Forbidden { .. }));
    }

    #[test]
    fn test_provider_cannot_book() {
        let mut db = create_test_database();
        let vet = seed_vet(&mut db, 1);
        let (owner, pet) = seed_owner_with_pet(&mut db, "mina");

        let err = AppointmentPlan::new(Actor::new(owner, Role::Veterinarian), request(pet, vet))
            .build_plan(db.connection())
            .unwrap_err();
        assert!(matches!(err, Error::Forbidden { .. }));
    }

    #[test]
    fn test_unknown_vet_is_not_found() {
        let mut db = create_test_database();
        let (owner, pet) = seed_owner_with_pet(&mut db, "mina");

        let err = AppointmentPlan::new(
            Actor::new(owner, Role::PetOwner),
            request(pet, VetId::new(77)),
        )
        .build_plan(db.connection())
        .unwrap_err();
        assert!(err.is_not_found());
    }
}
