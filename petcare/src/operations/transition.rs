//! Status transitions.
//!
//! Checks run in a fixed order: the actor's role, then that the record
//! exists, then that it belongs to the acting provider, and finally the
//! lifecycle table. The planned status write is guarded on the status read
//! here, and any pool restoration rides in the same plan.

use std::fmt;

use log::debug;
use rusqlite::Connection;

use crate::database::Database;
use crate::error::{Error, Result};
use crate::ids::{AppointmentId, BookingId, OrderId, UserId};
use crate::lifecycle::{AppointmentStatus, BookingStatus, Lifecycle, OrderStatus, SideEffect};
use crate::pool::PoolId;
use crate::reservation::RecordRef;
use crate::role::Actor;

use super::access::{not_found, require_role};
use super::plan::{OperationPlan, PlanAction, PlanBuilder};

/// A record together with the status it should move to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionTarget {
    /// Move an appointment.
    Appointment(AppointmentId, AppointmentStatus),
    /// Move a sitter booking.
    Booking(BookingId, BookingStatus),
    /// Move an order.
    Order(OrderId, OrderStatus),
}

impl TransitionTarget {
    /// The record being moved.
    #[must_use]
    pub const fn record(self) -> RecordRef {
        match self {
            Self::Appointment(id, _) => RecordRef::Appointment(id),
            Self::Booking(id, _) => RecordRef::Booking(id),
            Self::Order(id, _) => RecordRef::Order(id),
        }
    }
}

impl fmt::Display for TransitionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Appointment(id, status) => write!(f, "{id} -> {status}"),
            Self::Booking(id, status) => write!(f, "{id} -> {status}"),
            Self::Order(id, status) => write!(f, "{id} -> {status}"),
        }
    }
}

/// Plans a status transition.
#[derive(Debug, Clone)]
pub struct TransitionPlan {
    actor: Actor,
    target: TransitionTarget,
}

impl TransitionPlan {
    /// Creates a planner moving `target` on behalf of `actor`.
    #[must_use]
    pub const fn new(actor: Actor, target: TransitionTarget) -> Self {
        Self { actor, target }
    }

    fn require_provider(&self, record: RecordRef, provider: UserId) -> Result<()> {
        if provider == self.actor.user_id {
            return Ok(());
        }
        Err(Error::Forbidden {
            reason: format!("{record} is not assigned to {}", self.actor),
        })
    }
}

/// Looks `(current, target)` up in the table and plans the guarded write.
fn status_change<S: Lifecycle>(
    record: RecordRef,
    current: S,
    target: S,
) -> Result<(OperationPlan, SideEffect)> {
    let effect = current.transition_to(target).ok_or_else(|| {
        debug!("rejected {record}: {current} -> {target}");
        Error::InvalidTransition {
            record: record.to_string(),
            from: current.to_string(),
            to: target.to_string(),
        }
    })?;

    let plan = OperationPlan::new(format!("Move {record} to {target}")).add_action(
        PlanAction::SetStatus {
            record,
            from: current.as_str(),
            to: target.as_str(),
        },
    );
    Ok((plan, effect))
}

impl PlanBuilder for TransitionPlan {
    fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let record = self.target.record();
        let variant = record.variant();

        // Step 1: Role gate, before anything is read
        require_role(
            self.actor,
            variant.authorized_role(),
            &format!("change {variant} status"),
        )?;

        match self.target {
            TransitionTarget::Appointment(id, target) => {
                // Step 2: Load the record and its provider
                let appointment =
                    Database::get_appointment(conn, id)?.ok_or_else(|| not_found(record))?;
                let vet = Database::get_veterinarian(conn, appointment.vet)?
                    .ok_or_else(|| not_found(appointment.vet))?;

                // Step 3: Only the assigned provider moves it
                self.require_provider(record, vet.user)?;

                // Step 4: Consult the table
                let (plan, effect) = status_change(record, appointment.status, target)?;
                Ok(match effect {
                    SideEffect::RestoreVetSlot => plan.add_action(PlanAction::RestorePool {
                        pool: PoolId::VetSlots(appointment.vet),
                        amount: 1,
                    }),
                    SideEffect::None | SideEffect::RestoreOrderStock => plan,
                })
            }
            TransitionTarget::Booking(id, target) => {
                let booking = Database::get_booking(conn, id)?.ok_or_else(|| not_found(record))?;
                let sitter = Database::get_sitter(conn, booking.sitter)?
                    .ok_or_else(|| not_found(booking.sitter))?;
                self.require_provider(record, sitter.user)?;

                let (plan, _) = status_change(record, booking.status, target)?;
                Ok(plan)
            }
            TransitionTarget::Order(id, target) => {
                let order = Database::get_order(conn, id)?.ok_or_else(|| not_found(record))?;
                let shop = Database::get_shop(conn, order.shop)?
                    .ok_or_else(|| not_found(order.shop))?;
                self.require_provider(record, shop.manager)?;

                let (plan, effect) = status_change(record, order.status, target)?;
                if effect != SideEffect::RestoreOrderStock {
                    return Ok(plan);
                }
                Ok(order.items.iter().fold(plan, |plan, item| {
                    plan.add_action(PlanAction::RestorePool {
                        pool: PoolId::ProductStock(item.product),
                        amount: item.quantity,
                    })
                }))
            }
        }
    }
}
