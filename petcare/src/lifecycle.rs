//! Status lifecycles for reservation records.
//!
//! Each record variant has a closed status enum and a static transition
//! table. A status change is legal only if `(from, to)` appears in the
//! table, and the table entry carries the pool side effect the change
//! triggers. Nothing outside this module decides whether a move is legal.
//!
//! # Examples
//!
//! ```
//! use petcare::lifecycle::{AppointmentStatus, Lifecycle, SideEffect};
//!
//! let effect = AppointmentStatus::Confirmed.transition_to(AppointmentStatus::Cancelled);
//! assert_eq!(effect, Some(SideEffect::RestoreVetSlot));
//!
//! // Cancelled has no outgoing entries.
//! assert!(AppointmentStatus::Cancelled
//!     .transition_to(AppointmentStatus::Cancelled)
//!     .is_none());
//! ```

use std::fmt;
use std::str::FromStr;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

use crate::reservation::ValidationError;
use crate::role::Role;

#[cfg(test)]
mod proptests;

/// The kind of reservation record a status belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// A veterinary appointment, consuming one vet slot.
    Appointment,
    /// A sitter booking, with no pool.
    Booking,
    /// A product order, consuming stock per line.
    Order,
}

impl Variant {
    /// The only role allowed to drive this variant's transitions.
    #[must_use]
    pub const fn authorized_role(self) -> Role {
        match self {
            Self::Appointment => Role::Veterinarian,
            Self::Booking => Role::PetSitter,
            Self::Order => Role::ShopManager,
        }
    }

    /// Lowercase name used in messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Appointment => "appointment",
            Self::Booking => "booking",
            Self::Order => "order",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pool adjustment triggered by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SideEffect {
    /// The transition touches no pool.
    None,
    /// Give the appointment's slot back to its veterinarian.
    RestoreVetSlot,
    /// Give every line quantity of the order back to its product.
    RestoreOrderStock,
}

/// One legal row of a transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition<S> {
    /// Status the record must currently hold.
    pub from: S,
    /// Status the record moves to.
    pub to: S,
    /// Pool adjustment applied together with the status write.
    pub effect: SideEffect,
}

const fn edge<S>(from: S, to: S, effect: SideEffect) -> Transition<S> {
    Transition { from, to, effect }
}

/// A closed status set with its transition table.
pub trait Lifecycle:
    Copy + Eq + fmt::Debug + fmt::Display + FromStr<Err = ValidationError> + 'static
{
    /// Record variant this status set belongs to.
    const VARIANT: Variant;
    /// Status every new record starts in.
    const INITIAL: Self;
    /// Every status of the set.
    const ALL: &'static [Self];
    /// The legal moves.
    const TRANSITIONS: &'static [Transition<Self>];

    /// Stored name of the status.
    fn as_str(self) -> &'static str;

    /// Looks up `(self, target)` in the table.
    ///
    /// Returns the side effect to apply, or `None` if the move is illegal.
    fn transition_to(self, target: Self) -> Option<SideEffect> {
        Self::TRANSITIONS
            .iter()
            .find(|t| t.from == self && t.to == target)
            .map(|t| t.effect)
    }

    /// Whether no transition leaves this status.
    fn is_terminal(self) -> bool {
        !Self::TRANSITIONS.iter().any(|t| t.from == self)
    }
}

macro_rules! status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            fn name(self) -> &'static str {
                match self {
                    $( Self::$variant => $text ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                $(
                    if wanted.eq_ignore_ascii_case($text) {
                        return Ok(Self::$variant);
                    }
                )+
                Err(ValidationError::new(
                    "status",
                    format!("'{wanted}' is not a valid {} status", stringify!($name)),
                ))
            }
        }

        impl ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                Ok(ToSqlOutput::from(self.name()))
            }
        }

        impl FromSql for $name {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                let text = value.as_str()?;
                text.parse()
                    .map_err(|e: ValidationError| FromSqlError::Other(Box::new(e)))
            }
        }
    };
}

status_enum! {
    /// Status of a veterinary appointment.
    AppointmentStatus {
        /// Booked, awaiting the veterinarian.
        Pending => "Pending",
        /// Accepted by the veterinarian.
        Confirmed => "Confirmed",
        /// The visit took place.
        Completed => "Completed",
        /// Called off; the slot was returned.
        Cancelled => "Cancelled",
    }
}

status_enum! {
    /// Status of a sitter booking.
    BookingStatus {
        /// Requested, awaiting the sitter.
        Pending => "Pending",
        /// Accepted by the sitter.
        Confirmed => "Confirmed",
        /// The sitting took place.
        Completed => "Completed",
        /// Called off.
        Cancelled => "Cancelled",
    }
}

status_enum! {
    /// Status of a product order.
    OrderStatus {
        /// Placed, stock reserved.
        Processing => "Processing",
        /// Handed to the carrier.
        Shipped => "Shipped",
        /// Received by the buyer.
        Delivered => "Delivered",
        /// Called off; stock was returned.
        Cancelled => "Cancelled",
    }
}

impl Lifecycle for AppointmentStatus {
    const VARIANT: Variant = Variant::Appointment;
    const INITIAL: Self = Self::Pending;
    const ALL: &'static [Self] = &[
        Self::Pending,
        Self::Confirmed,
        Self::Completed,
        Self::Cancelled,
    ];
    const TRANSITIONS: &'static [Transition<Self>] = &[
        edge(Self::Pending, Self::Confirmed, SideEffect::None),
        edge(Self::Pending, Self::Cancelled, SideEffect::RestoreVetSlot),
        edge(Self::Confirmed, Self::Cancelled, SideEffect::RestoreVetSlot),
        edge(Self::Confirmed, Self::Completed, SideEffect::None),
    ];

    fn as_str(self) -> &'static str {
        self.name()
    }
}

impl Lifecycle for BookingStatus {
    const VARIANT: Variant = Variant::Booking;
    const INITIAL: Self = Self::Pending;
    const ALL: &'static [Self] = &[
        Self::Pending,
        Self::Confirmed,
        Self::Completed,
        Self::Cancelled,
    ];
    const TRANSITIONS: &'static [Transition<Self>] = &[
        edge(Self::Pending, Self::Confirmed, SideEffect::None),
        edge(Self::Pending, Self::Completed, SideEffect::None),
        edge(Self::Pending, Self::Cancelled, SideEffect::None),
        edge(Self::Confirmed, Self::Completed, SideEffect::None),
        edge(Self::Confirmed, Self::Cancelled, SideEffect::None),
    ];

    fn as_str(self) -> &'static str {
        self.name()
    }
}

impl Lifecycle for OrderStatus {
    const VARIANT: Variant = Variant::Order;
    const INITIAL: Self = Self::Processing;
    const ALL: &'static [Self] = &[
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];
    const TRANSITIONS: &'static [Transition<Self>] = &[
        edge(Self::Processing, Self::Shipped, SideEffect::None),
        edge(Self::Processing, Self::Delivered, SideEffect::None),
        edge(Self::Shipped, Self::Delivered, SideEffect::None),
        edge(Self::Processing, Self::Cancelled, SideEffect::RestoreOrderStock),
        edge(Self::Shipped, Self::Cancelled, SideEffect::RestoreOrderStock),
    ];

    fn as_str(self) -> &'static str {
        self.name()
    }
}
