//! Create requests and their validation.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{normalize_text, ValidationError};
use crate::ids::{AppointmentId, PetId, ProductId, ShopId, SitterId, VetId};

/// Request to book one of a veterinarian's slots for a pet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentRequest {
    /// The pet to be seen.
    pub pet: PetId,
    /// The veterinarian to book.
    pub vet: VetId,
    /// Day of the visit.
    pub date: NaiveDate,
    /// Time of the visit.
    pub time: NaiveTime,
    /// Optional reason, trimmed; blank becomes `None`.
    pub reason: Option<String>,
}

impl AppointmentRequest {
    /// Creates a request with no reason.
    #[must_use]
    pub const fn new(pet: PetId, vet: VetId, date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            pet,
            vet,
            date,
            time,
            reason: None,
        }
    }

    /// Sets the reason for the visit.
    #[must_use]
    pub fn with_reason(mut self, reason: Option<String>) -> Self {
        self.reason = normalize_text(reason);
        self
    }
}

/// Request to book a pet sitter over a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SitterBookingRequest {
    /// The pet to be looked after.
    pub pet: PetId,
    /// The sitter to book.
    pub sitter: SitterId,
    /// First day.
    pub start_date: NaiveDate,
    /// Last day, inclusive.
    pub end_date: NaiveDate,
    /// Billed hours.
    pub hours: u32,
    /// Free-form instructions.
    pub special_requests: Option<String>,
}

impl SitterBookingRequest {
    /// Creates a request with no special instructions.
    #[must_use]
    pub const fn new(
        pet: PetId,
        sitter: SitterId,
        start_date: NaiveDate,
        end_date: NaiveDate,
        hours: u32,
    ) -> Self {
        Self {
            pet,
            sitter,
            start_date,
            end_date,
            hours,
            special_requests: None,
        }
    }

    /// Sets the special instructions.
    #[must_use]
    pub fn with_special_requests(mut self, requests: Option<String>) -> Self {
        self.special_requests = normalize_text(requests);
        self
    }

    /// Checks the hour count and the date range.
    ///
    /// # Errors
    ///
    /// Returns an error if `hours` is zero or the range ends before it starts.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.hours == 0 {
            return Err(ValidationError::new("hours", "must be at least 1"));
        }
        if self.end_date < self.start_date {
            return Err(ValidationError::new(
                "end_date",
                format!(
                    "{} is before start date {}",
                    self.end_date, self.start_date
                ),
            ));
        }
        Ok(())
    }
}

/// One requested order line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// The product to buy.
    pub product: ProductId,
    /// Units to take from its stock.
    pub quantity: u32,
}

impl OrderLine {
    /// Creates a line.
    #[must_use]
    pub const fn new(product: ProductId, quantity: u32) -> Self {
        Self { product, quantity }
    }
}

/// Request to buy products from one shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    /// The shop selling every line.
    pub shop: ShopId,
    /// Requested lines, consumed in this order.
    pub lines: Vec<OrderLine>,
    /// Delivery address.
    pub shipping_address: String,
}

impl OrderRequest {
    /// Creates a request with no lines.
    #[must_use]
    pub fn new(shop: ShopId, shipping_address: impl Into<String>) -> Self {
        Self {
            shop,
            lines: Vec::new(),
            shipping_address: shipping_address.into().trim().to_string(),
        }
    }

    /// Appends a line.
    #[must_use]
    pub fn with_line(mut self, product: ProductId, quantity: u32) -> Self {
        self.lines.push(OrderLine::new(product, quantity));
        self
    }

    /// Checks that the order has lines, positive quantities and an address.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first offending field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.lines.is_empty() {
            return Err(ValidationError::new(
                "lines",
                "an order needs at least one line",
            ));
        }
        if let Some(line) = self.lines.iter().find(|l| l.quantity == 0) {
            return Err(ValidationError::new(
                "quantity",
                format!("quantity for {} must be at least 1", line.product),
            ));
        }
        if self.shipping_address.trim().is_empty() {
            return Err(ValidationError::new(
                "shipping_address",
                "must be non-empty after trimming whitespace",
            ));
        }
        Ok(())
    }
}

/// Request to attach clinical notes to an appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalRecordRequest {
    /// The appointment examined.
    pub appointment: AppointmentId,
    /// Diagnosis, required.
    pub diagnosis: String,
    /// Treatment given.
    pub treatment: Option<String>,
    /// Prescription written.
    pub prescription: Option<String>,
    /// Anything else.
    pub notes: Option<String>,
}

impl MedicalRecordRequest {
    /// Creates a request with only a diagnosis.
    #[must_use]
    pub fn new(appointment: AppointmentId, diagnosis: impl Into<String>) -> Self {
        Self {
            appointment,
            diagnosis: diagnosis.into().trim().to_string(),
            treatment: None,
            prescription: None,
            notes: None,
        }
    }

    /// Sets the treatment.
    #[must_use]
    pub fn with_treatment(mut self, treatment: Option<String>) -> Self {
        self.treatment = normalize_text(treatment);
        self
    }

    /// Sets the prescription.
    #[must_use]
    pub fn with_prescription(mut self, prescription: Option<String>) -> Self {
        self.prescription = normalize_text(prescription);
        self
    }

    /// Sets free-form notes.
    #[must_use]
    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = normalize_text(notes);
        self
    }

    /// Checks that a diagnosis was given.
    ///
    /// # Errors
    ///
    /// Returns an error if the diagnosis is blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.diagnosis.trim().is_empty() {
            return Err(ValidationError::new("diagnosis", "a diagnosis is required"));
        }
        Ok(())
    }
}
