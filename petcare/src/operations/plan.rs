//! Plan types for reservation operations.
//!
//! A plan lists the writes an operation will make, in order, without making
//! them. Planners build plans from reads inside the same unit of work that
//! later executes them.

use rusqlite::Connection;

use crate::error::Result;
use crate::ids::{PetId, ShopId, UserId, VetId};
use crate::money::Money;
use crate::pool::PoolId;
use crate::reservation::{
    AppointmentRequest, MedicalRecordRequest, OrderItem, RecordRef, SitterBookingRequest,
};

/// A single write to perform during plan execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanAction {
    /// Take units from a pool; fails the whole plan if the pool is short.
    ConsumePool {
        /// The pool.
        pool: PoolId,
        /// Units to take.
        amount: u32,
    },

    /// Give units back to a pool.
    RestorePool {
        /// The pool.
        pool: PoolId,
        /// Units to give back.
        amount: u32,
    },

    /// Insert a Pending appointment.
    InsertAppointment(AppointmentRequest),

    /// Insert a Pending sitter booking.
    InsertBooking {
        /// The validated request.
        request: SitterBookingRequest,
        /// `hourly_rate * hours`.
        total_fee: Money,
    },

    /// Insert a Processing order and its lines.
    InsertOrder {
        /// The buyer.
        buyer: UserId,
        /// The selling shop.
        shop: ShopId,
        /// Lines with frozen prices.
        items: Vec<OrderItem>,
        /// Sum of the line totals.
        total_amount: Money,
        /// Delivery address.
        shipping_address: String,
    },

    /// Write a new status, only if the record still holds `from`.
    SetStatus {
        /// The record.
        record: RecordRef,
        /// Expected current status.
        from: &'static str,
        /// New status.
        to: &'static str,
    },

    /// Insert clinical notes for an appointment.
    InsertMedicalRecord {
        /// The validated request.
        request: MedicalRecordRequest,
        /// The appointment's pet.
        pet: PetId,
        /// The appointment's veterinarian.
        vet: VetId,
    },
}

impl PlanAction {
    /// Returns a human-readable description of this action.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::ConsumePool { pool, amount } => format!("Consume {amount} from {pool}"),
            Self::RestorePool { pool, amount } => format!("Restore {amount} to {pool}"),
            Self::InsertAppointment(request) => format!(
                "Book {} with {} on {} at {}",
                request.pet, request.vet, request.date, request.time
            ),
            Self::InsertBooking { request, total_fee } => format!(
                "Book {} for {} from {} to {} ({} hours, fee {total_fee})",
                request.sitter, request.pet, request.start_date, request.end_date, request.hours
            ),
            Self::InsertOrder {
                shop,
                items,
                total_amount,
                ..
            } => format!(
                "Place order at {shop} with {} line(s), total {total_amount}",
                items.len()
            ),
            Self::SetStatus { record, from, to } => {
                format!("Move {record} from {from} to {to}")
            }
            Self::InsertMedicalRecord { request, .. } => {
                format!("Add medical record to {}", request.appointment)
            }
        }
    }
}

/// A complete operation plan describing all actions to be taken.
#[derive(Debug, Clone)]
pub struct OperationPlan {
    /// A human-readable description of the operation.
    pub description: String,

    /// The sequence of actions to perform.
    pub actions: Vec<PlanAction>,

    /// Warnings to communicate to the user.
    pub warnings: Vec<String>,
}

impl OperationPlan {
    /// Creates a new operation plan with the given description.
    ///
    /// # Examples
    ///
    /// ```
    /// use petcare::operations::OperationPlan;
    ///
    /// let plan = OperationPlan::new("Book appointment");
    /// assert_eq!(plan.description, "Book appointment");
    /// assert!(plan.is_empty());
    /// ```
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            actions: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an action to the plan.
    #[must_use]
    pub fn add_action(mut self, action: PlanAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Adds a warning to the plan.
    #[must_use]
    pub fn add_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    /// Checks if the plan has no actions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Returns the number of actions in the plan.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }
}

/// Something that can turn a request into a plan.
///
/// Implementations only read; every write belongs in the returned plan.
pub trait PlanBuilder {
    /// Reads what the request needs and returns the plan.
    ///
    /// # Errors
    ///
    /// Returns `Forbidden`, `NotFound`, `Validation` or `InvalidTransition`
    /// when the request cannot be planned, or a database error.
    fn build_plan(&self, conn: &Connection) -> Result<OperationPlan>;
}
