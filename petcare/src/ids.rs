//! Typed row identifiers.
//!
//! Every table is keyed by an SQLite integer rowid. Wrapping each one in its
//! own type keeps a `PetId` from being handed to something expecting a
//! `VetId`.

use std::fmt;

use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw row id.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw row id.
            #[must_use]
            pub const fn value(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{} {}", $label, self.0)
            }
        }

        impl ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                Ok(ToSqlOutput::from(self.0))
            }
        }

        impl FromSql for $name {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                i64::column_result(value).map(Self)
            }
        }
    };
}

entity_id!(
    /// A registered user of any role.
    UserId,
    "user"
);
entity_id!(
    /// A pet owned by a Pet Owner.
    PetId,
    "pet"
);
entity_id!(
    /// A veterinarian profile, owner of an appointment-slot pool.
    VetId,
    "veterinarian"
);
entity_id!(
    /// A pet sitter profile.
    SitterId,
    "sitter"
);
entity_id!(
    /// A pet shop managed by a Shop Manager.
    ShopId,
    "shop"
);
entity_id!(
    /// A product, owner of a stock pool.
    ProductId,
    "product"
);
entity_id!(
    /// A veterinary appointment.
    AppointmentId,
    "appointment"
);
entity_id!(
    /// A sitter booking.
    BookingId,
    "booking"
);
entity_id!(
    /// A product order.
    OrderId,
    "order"
);
entity_id!(
    /// A medical record attached to an appointment.
    MedicalRecordId,
    "medical record"
);
