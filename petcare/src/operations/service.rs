//! The reservation service.
//!
//! Every create and transition is planned and executed inside one unit of
//! work. Planning reads under the same write lock the executor writes under,
//! so the status and capacity a plan was built from cannot change before it
//! is applied.

use log::{info, warn};

use crate::database::{Database, DatabaseConfig};
use crate::directory::{NewPet, NewProduct, NewUser};
use crate::error::{BookingError, Error, Result, TransitionError};
use crate::ids::{
    AppointmentId, BookingId, MedicalRecordId, OrderId, PetId, ProductId, UserId,
};
use crate::lifecycle::{AppointmentStatus, BookingStatus, OrderStatus};
use crate::pool::{self, PoolId};
use crate::reservation::{
    AppointmentRequest, MedicalRecordRequest, OrderRequest, SitterBookingRequest,
};
use crate::role::{Actor, Role};

use super::access::{not_found, require_role};
use super::appointment::AppointmentPlan;
use super::booking::BookingPlan;
use super::executor::{CreatedRecord, ExecutionResult, PlanExecutor};
use super::medical::MedicalRecordPlan;
use super::order::OrderPlan;
use super::plan::PlanBuilder;
use super::transition::{TransitionPlan, TransitionTarget};

/// Creates reservations and moves them through their lifecycles.
///
/// # Examples
///
/// ```no_run
/// use chrono::{NaiveDate, NaiveTime};
/// use petcare::database::DatabaseConfig;
/// use petcare::operations::ReservationService;
/// use petcare::{Actor, AppointmentRequest, PetId, Role, UserId, VetId};
///
/// let mut service = ReservationService::open(DatabaseConfig::new("/tmp/petcare.db")).unwrap();
/// let owner = Actor::new(UserId::new(1), Role::PetOwner);
/// let request = AppointmentRequest::new(
///     PetId::new(1),
///     VetId::new(1),
///     NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
///     NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
/// );
/// let id = service.create_appointment(owner, request).unwrap();
/// println!("booked {id}");
/// ```
pub struct ReservationService {
    db: Database,
}

impl ReservationService {
    /// Opens the database and wraps it.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn open(config: DatabaseConfig) -> Result<Self> {
        Ok(Self::new(Database::open(config)?))
    }

    /// Wraps an open database.
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    /// The underlying database, for reads.
    #[must_use]
    pub const fn database(&self) -> &Database {
        &self.db
    }

    /// Plans and applies `planner` in one unit of work.
    fn run(&mut self, planner: &dyn PlanBuilder) -> Result<ExecutionResult> {
        self.db.unit_of_work(|tx| {
            let plan = planner.build_plan(tx)?;
            PlanExecutor::new(tx).execute(&plan)
        })
    }

    /// Builds the plan and reports it without writing anything.
    ///
    /// # Errors
    ///
    /// Returns whatever planning returns: `Forbidden`, `NotFound`,
    /// `Validation`, `InvalidTransition` or a database error.
    pub fn preview(&mut self, planner: &dyn PlanBuilder) -> Result<ExecutionResult> {
        self.db.unit_of_work(|tx| {
            let plan = planner.build_plan(tx)?;
            PlanExecutor::new(tx).dry_run().execute(&plan)
        })
    }

    /// Resolves the acting identity for `user`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no such user is registered.
    pub fn actor_for(&self, user: UserId) -> Result<Actor> {
        let user = Database::get_user(self.db.connection(), user)?.ok_or_else(|| not_found(user))?;
        Ok(Actor::new(user.id, user.role))
    }

    /// Registers a user with their role profile.
    ///
    /// # Errors
    ///
    /// Returns a validation error for bad input or a taken username.
    pub fn register_user(&mut self, user: &NewUser) -> Result<UserId> {
        let id = self.db.create_user(user)?;
        info!("registered {id} as {}", user.profile.role());
        Ok(id)
    }

    /// Adds a pet owned by `actor`.
    ///
    /// # Errors
    ///
    /// Returns `Forbidden` unless `actor` is a Pet Owner, or a validation
    /// error.
    pub fn add_pet(&mut self, actor: Actor, pet: &NewPet) -> Result<PetId> {
        require_role(actor, Role::PetOwner, "register a pet")?;
        let id = self
            .db
            .unit_of_work(|tx| Database::create_pet(tx, actor.user_id, pet))?;
        info!("{actor} registered {id}");
        Ok(id)
    }

    /// Lists a product in the shop `actor` manages.
    ///
    /// # Errors
    ///
    /// Returns `Forbidden` unless `actor` is a Shop Manager, `NotFound` if
    /// they have no shop, or a validation error.
    pub fn add_product(&mut self, actor: Actor, product: &NewProduct) -> Result<ProductId> {
        require_role(actor, Role::ShopManager, "list a product")?;
        let id = self.db.unit_of_work(|tx| {
            let shop = Database::get_shop_by_manager(tx, actor.user_id)?
                .ok_or_else(|| not_found(format!("shop managed by {}", actor.user_id)))?;
            Database::create_product(tx, shop.id, product)
        })?;
        info!("{actor} listed {id}");
        Ok(id)
    }

    /// Reads a pool's current counter.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the pool's owner does not exist.
    pub fn capacity(&self, pool: PoolId) -> Result<u32> {
        pool::capacity(self.db.connection(), pool)
    }

    /// Books one of a veterinarian's slots.
    ///
    /// # Errors
    ///
    /// Returns `SlotUnavailable` when the vet has no slot left; nothing is
    /// written in that case.
    pub fn create_appointment(
        &mut self,
        actor: Actor,
        request: AppointmentRequest,
    ) -> std::result::Result<AppointmentId, BookingError> {
        let result = self
            .run(&AppointmentPlan::new(actor, request))
            .map_err(|e| booking_failed("appointment", e))?;
        match result.created {
            Some(CreatedRecord::Appointment(id)) => {
                info!("{actor} booked {id}");
                Ok(id)
            }
            other => Err(unexpected(other)),
        }
    }

    /// Books a pet sitter.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` for a bad range, zero hours or an overflowing
    /// fee.
    pub fn create_sitter_booking(
        &mut self,
        actor: Actor,
        request: SitterBookingRequest,
    ) -> std::result::Result<BookingId, BookingError> {
        let result = self
            .run(&BookingPlan::new(actor, request))
            .map_err(|e| booking_failed("sitter booking", e))?;
        match result.created {
            Some(CreatedRecord::Booking(id)) => {
                info!("{actor} booked {id}");
                Ok(id)
            }
            other => Err(unexpected(other)),
        }
    }

    /// Places an order, consuming stock line by line.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientStock` for the first short line; stock taken by
    /// earlier lines is returned.
    pub fn create_order(
        &mut self,
        actor: Actor,
        request: OrderRequest,
    ) -> std::result::Result<OrderId, BookingError> {
        let result = self
            .run(&OrderPlan::new(actor, request))
            .map_err(|e| booking_failed("order", e))?;
        match result.created {
            Some(CreatedRecord::Order(id)) => {
                info!("{actor} placed {id}");
                Ok(id)
            }
            other => Err(unexpected(other)),
        }
    }

    /// Moves any record to a new status.
    ///
    /// # Errors
    ///
    /// Returns `Forbidden`, `NotFound` or `InvalidTransition`; nothing is
    /// written in any of those cases.
    pub fn transition(
        &mut self,
        actor: Actor,
        target: TransitionTarget,
    ) -> std::result::Result<(), TransitionError> {
        match self.run(&TransitionPlan::new(actor, target)) {
            Ok(_) => {
                info!("{actor} moved {target}");
                Ok(())
            }
            Err(err) => {
                warn!("transition {target} by {actor} failed: {err}");
                Err(err.into())
            }
        }
    }

    /// Moves an appointment to `status`.
    ///
    /// # Errors
    ///
    /// See [`ReservationService::transition`].
    pub fn transition_appointment(
        &mut self,
        actor: Actor,
        id: AppointmentId,
        status: AppointmentStatus,
    ) -> std::result::Result<(), TransitionError> {
        self.transition(actor, TransitionTarget::Appointment(id, status))
    }

    /// Moves a sitter booking to `status`.
    ///
    /// # Errors
    ///
    /// See [`ReservationService::transition`].
    pub fn transition_booking(
        &mut self,
        actor: Actor,
        id: BookingId,
        status: BookingStatus,
    ) -> std::result::Result<(), TransitionError> {
        self.transition(actor, TransitionTarget::Booking(id, status))
    }

    /// Moves an order to `status`.
    ///
    /// # Errors
    ///
    /// See [`ReservationService::transition`].
    pub fn transition_order(
        &mut self,
        actor: Actor,
        id: OrderId,
        status: OrderStatus,
    ) -> std::result::Result<(), TransitionError> {
        self.transition(actor, TransitionTarget::Order(id, status))
    }

    /// Attaches clinical notes to one of the acting vet's appointments.
    ///
    /// # Errors
    ///
    /// Returns `Forbidden` for anyone but the appointment's vet, `NotFound`
    /// for an unknown appointment, or a validation error for a blank
    /// diagnosis or a cancelled appointment.
    pub fn add_medical_record(
        &mut self,
        actor: Actor,
        request: MedicalRecordRequest,
    ) -> Result<MedicalRecordId> {
        let appointment = request.appointment;
        let result = self.run(&MedicalRecordPlan::new(actor, request))?;
        match result.created {
            Some(CreatedRecord::MedicalRecord(id)) => {
                info!("{actor} added {id} to {appointment}");
                Ok(id)
            }
            other => Err(Error::ReservationConflict {
                details: format!("expected a medical record, plan created {other:?}"),
            }),
        }
    }
}

fn booking_failed(what: &str, err: Error) -> BookingError {
    warn!("{what} not created: {err}");
    err.into()
}

fn unexpected(created: Option<CreatedRecord>) -> BookingError {
    BookingError::Persistence(Error::ReservationConflict {
        details: format!("plan created {created:?}"),
    })
}
