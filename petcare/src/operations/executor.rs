//! Plan execution engine.
//!
//! The executor applies a plan's actions, in order, on a connection the
//! caller has already wrapped in a unit of work. It never commits: if any
//! action fails, the error propagates and the caller's transaction rolls
//! back every earlier action of the same plan.

use log::{debug, trace};
use rusqlite::Connection;
use serde::Serialize;

use crate::database::Database;
use crate::error::{Error, Result};
use crate::ids::{AppointmentId, BookingId, MedicalRecordId, OrderId};
use crate::pool;

use super::plan::{OperationPlan, PlanAction};

/// The record a plan created, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CreatedRecord {
    /// A new appointment.
    Appointment(AppointmentId),
    /// A new sitter booking.
    Booking(BookingId),
    /// A new order.
    Order(OrderId),
    /// New clinical notes.
    MedicalRecord(MedicalRecordId),
}

/// Result of executing a plan.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Whether this was a dry-run (no actual changes made).
    pub dry_run: bool,

    /// Descriptions of actions that were taken (or would be taken in dry-run).
    pub actions_taken: Vec<String>,

    /// Warnings from the plan.
    pub warnings: Vec<String>,

    /// The record the plan inserted. Always `None` in dry-run mode.
    pub created: Option<CreatedRecord>,
}

impl ExecutionResult {
    fn from_plan(plan: &OperationPlan, dry_run: bool, created: Option<CreatedRecord>) -> Self {
        Self {
            dry_run,
            actions_taken: plan.actions.iter().map(PlanAction::description).collect(),
            warnings: plan.warnings.clone(),
            created,
        }
    }
}

/// Executes operation plans against an open unit of work.
///
/// # Examples
///
/// ```no_run
/// use petcare::database::{Database, DatabaseConfig};
/// use petcare::operations::{OperationPlan, PlanExecutor};
///
/// let mut db = Database::open(DatabaseConfig::new("/tmp/petcare.db")).unwrap();
/// let plan = OperationPlan::new("Nothing to do");
/// let result = db
///     .unit_of_work(|tx| PlanExecutor::new(tx).dry_run().execute(&plan))
///     .unwrap();
/// assert!(result.dry_run);
/// ```
pub struct PlanExecutor<'c> {
    conn: &'c Connection,
    dry_run: bool,
}

impl<'c> PlanExecutor<'c> {
    /// Creates a new plan executor.
    #[must_use]
    pub const fn new(conn: &'c Connection) -> Self {
        Self {
            conn,
            dry_run: false,
        }
    }

    /// Sets the executor to dry-run mode: the plan is reported, not applied.
    #[must_use]
    pub const fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Executes the given plan.
    ///
    /// # Errors
    ///
    /// Returns the first action's error: `InsufficientCapacity` for a short
    /// pool, `ReservationConflict` if a guarded status write no longer
    /// matches, or a database error.
    pub fn execute(&self, plan: &OperationPlan) -> Result<ExecutionResult> {
        if self.dry_run {
            debug!("dry run: {}", plan.description);
            return Ok(ExecutionResult::from_plan(plan, true, None));
        }

        debug!("executing plan: {}", plan.description);
        let mut created = None;
        for action in &plan.actions {
            trace!("  {}", action.description());
            if let Some(record) = self.execute_action(action)? {
                created = Some(record);
            }
        }

        Ok(ExecutionResult::from_plan(plan, false, created))
    }

    fn execute_action(&self, action: &PlanAction) -> Result<Option<CreatedRecord>> {
        match action {
            PlanAction::ConsumePool { pool, amount } => {
                pool::try_consume(self.conn, *pool, *amount)?;
                Ok(None)
            }
            PlanAction::RestorePool { pool, amount } => {
                pool::restore(self.conn, *pool, *amount)?;
                Ok(None)
            }
            PlanAction::InsertAppointment(request) => {
                let id = Database::insert_appointment(self.conn, request)?;
                Ok(Some(CreatedRecord::Appointment(id)))
            }
            PlanAction::InsertBooking { request, total_fee } => {
                let id = Database::insert_booking(self.conn, request, *total_fee)?;
                Ok(Some(CreatedRecord::Booking(id)))
            }
            PlanAction::InsertOrder {
                buyer,
                shop,
                items,
                total_amount,
                shipping_address,
            } => {
                let id = Database::insert_order(
                    self.conn,
                    *buyer,
                    *shop,
                    *total_amount,
                    shipping_address,
                    items,
                )?;
                Ok(Some(CreatedRecord::Order(id)))
            }
            PlanAction::SetStatus { record, from, to } => {
                if !Database::update_status(self.conn, *record, from, to)? {
                    return Err(Error::ReservationConflict {
                        details: format!("{record} is no longer {from}"),
                    });
                }
                Ok(None)
            }
            PlanAction::InsertMedicalRecord { request, pet, vet } => {
                let id = Database::insert_medical_record(self.conn, request, *pet, *vet)?;
                Ok(Some(CreatedRecord::MedicalRecord(id)))
            }
        }
    }
}
