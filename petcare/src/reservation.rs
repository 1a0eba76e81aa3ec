//! Reservation records and the requests that create them.
//!
//! A reservation record is one consumption of a resource pool (or, for sitter
//! bookings, a priced time range with no pool). Records are created only by
//! the reservation service and are never deleted: cancelling one is a status
//! change.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

use crate::ids::{
    AppointmentId, BookingId, MedicalRecordId, OrderId, PetId, ProductId, ShopId, SitterId,
    UserId, VetId,
};
use crate::lifecycle::{AppointmentStatus, BookingStatus, OrderStatus, Variant};
use crate::money::Money;

mod request;

#[cfg(test)]
mod proptests;

pub use request::{
    AppointmentRequest, MedicalRecordRequest, OrderLine, OrderRequest, SitterBookingRequest,
};

/// Points at one reservation record of any variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RecordRef {
    /// An appointment.
    Appointment(AppointmentId),
    /// A sitter booking.
    Booking(BookingId),
    /// An order.
    Order(OrderId),
}

impl RecordRef {
    /// The record's variant.
    #[must_use]
    pub const fn variant(self) -> Variant {
        match self {
            Self::Appointment(_) => Variant::Appointment,
            Self::Booking(_) => Variant::Booking,
            Self::Order(_) => Variant::Order,
        }
    }

    /// The raw row id.
    #[must_use]
    pub const fn raw_id(self) -> i64 {
        match self {
            Self::Appointment(id) => id.value(),
            Self::Booking(id) => id.value(),
            Self::Order(id) => id.value(),
        }
    }
}

impl std::fmt::Display for RecordRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Appointment(id) => write!(f, "{id}"),
            Self::Booking(id) => write!(f, "{id}"),
            Self::Order(id) => write!(f, "{id}"),
        }
    }
}

/// A veterinary appointment holding one of the vet's slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Appointment {
    /// Row id.
    pub id: AppointmentId,
    /// The pet being seen.
    pub pet: PetId,
    /// The veterinarian whose slot was consumed.
    pub vet: VetId,
    /// Day of the visit.
    pub date: NaiveDate,
    /// Time of the visit.
    pub time: NaiveTime,
    /// Reason given by the owner.
    pub reason: Option<String>,
    /// Current status.
    pub status: AppointmentStatus,
    /// When the appointment was booked.
    pub created_at: DateTime<Utc>,
}

/// A sitter booking for a range of days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Booking {
    /// Row id.
    pub id: BookingId,
    /// The pet being looked after.
    pub pet: PetId,
    /// The sitter booked.
    pub sitter: SitterId,
    /// First day.
    pub start_date: NaiveDate,
    /// Last day, inclusive.
    pub end_date: NaiveDate,
    /// Billed hours.
    pub total_hours: u32,
    /// `hourly_rate * total_hours`, fixed at booking time.
    pub total_fee: Money,
    /// Free-form instructions from the owner.
    pub special_requests: Option<String>,
    /// Current status.
    pub status: BookingStatus,
    /// When the booking was made.
    pub created_at: DateTime<Utc>,
}

/// One line of an order with its price frozen at order time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderItem {
    /// The product consumed.
    pub product: ProductId,
    /// Units consumed from the product's stock.
    pub quantity: u32,
    /// Unit price copied from the product when the order was placed.
    pub unit_price: Money,
}

impl OrderItem {
    /// `unit_price * quantity`, `None` on overflow.
    #[must_use]
    pub fn line_total(&self) -> Option<Money> {
        self.unit_price.checked_mul(self.quantity)
    }
}

/// A product order with one or more lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    /// Row id.
    pub id: OrderId,
    /// The buyer.
    pub buyer: UserId,
    /// The shop selling every line.
    pub shop: ShopId,
    /// Sum of the line totals, fixed at order time.
    pub total_amount: Money,
    /// Delivery address.
    pub shipping_address: String,
    /// Current status.
    pub status: OrderStatus,
    /// The order lines.
    pub items: Vec<OrderItem>,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
}

/// Clinical notes a veterinarian attached to an appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MedicalRecord {
    /// Row id.
    pub id: MedicalRecordId,
    /// The appointment the notes belong to.
    pub appointment: AppointmentId,
    /// The pet examined.
    pub pet: PetId,
    /// The examining veterinarian.
    pub vet: VetId,
    /// Diagnosis.
    pub diagnosis: String,
    /// Treatment given.
    pub treatment: Option<String>,
    /// Prescription written.
    pub prescription: Option<String>,
    /// Anything else.
    pub notes: Option<String>,
    /// When the record was written.
    pub created_at: DateTime<Utc>,
}

/// Error type for validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// A description of the validation failure.
    pub message: String,
}

impl ValidationError {
    /// Creates a validation error for `field`.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "validation error for '{}': {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Trims an optional free-text field, mapping blank input to `None`.
pub(crate) fn normalize_text(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
