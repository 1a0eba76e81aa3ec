//! Error types for the petcare library.
//!
//! Internally every layer speaks [`Error`]. The reservation service narrows
//! it into the two public operation errors, [`BookingError`] for the create
//! path and [`TransitionError`] for status changes, so callers can match on
//! exactly the outcomes each operation can produce.

use std::path::PathBuf;

use thiserror::Error;

use crate::ids::{ProductId, VetId};
use crate::pool::PoolId;

/// Result type alias for operations that may fail with a petcare error.
///
/// # Examples
///
/// ```
/// use petcare::{Error, Result};
///
/// fn example_operation() -> Result<u32> {
///     Ok(3)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the petcare library.
#[derive(Debug, Error)]
pub enum Error {
    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// The requested resource was not found.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// A resource pool could not cover the requested amount.
    #[error(transparent)]
    InsufficientCapacity(#[from] InsufficientCapacity),

    /// The acting user may not perform the operation.
    #[error("forbidden: {reason}")]
    Forbidden {
        /// Why the actor was rejected.
        reason: String,
    },

    /// The requested status change is not in the lifecycle table.
    #[error("invalid transition for {record}: {from} -> {to}")]
    InvalidTransition {
        /// The record whose status was to change.
        record: String,
        /// The status the record is currently in.
        from: String,
        /// The requested status.
        to: String,
    },

    /// A record changed underneath a unit of work.
    #[error("reservation conflict: {details}")]
    ReservationConflict {
        /// Details about the conflict.
        details: String,
    },

    /// A database lock timeout occurred.
    #[error("database lock timeout after {seconds}s")]
    LockTimeout {
        /// The number of seconds waited before timing out.
        seconds: u64,
    },

    /// The data directory was not found and auto-initialization is disabled.
    #[error("data directory not found: {}", path.display())]
    DataDirectoryNotFound {
        /// The expected path to the data directory.
        path: PathBuf,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: i32,
        /// The schema version found in the database.
        found: i32,
    },
}

/// A pool refused a consumption because it holds fewer units than requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("insufficient capacity in {pool}: requested {requested}, available {available}")]
pub struct InsufficientCapacity {
    /// The pool that was short.
    pub pool: PoolId,
    /// Units requested by the caller.
    pub requested: u32,
    /// Units the pool held when the request was refused.
    pub available: u32,
}

impl From<crate::reservation::ValidationError> for Error {
    fn from(err: crate::reservation::ValidationError) -> Self {
        Self::Validation {
            field: err.field,
            message: err.message,
        }
    }
}

impl Error {
    /// Check if error means a referenced row does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Failure of a create operation (appointment, sitter booking or order).
#[derive(Debug, Error)]
pub enum BookingError {
    /// The veterinarian has no appointment slot left.
    #[error("no appointment slot available for {vet}")]
    SlotUnavailable {
        /// The veterinarian whose pool is empty.
        vet: VetId,
    },

    /// A product cannot cover one of the order lines.
    #[error("insufficient stock for {product}: requested {requested}, available {available}")]
    InsufficientStock {
        /// The product that was short.
        product: ProductId,
        /// Quantity requested on the failing line.
        requested: u32,
        /// Stock on hand when the line was refused.
        available: u32,
    },

    /// The actor may not create this reservation.
    #[error("forbidden: {reason}")]
    Forbidden {
        /// Why the actor was rejected.
        reason: String,
    },

    /// A referenced pet, provider or product does not exist.
    #[error("not found: {resource}")]
    NotFound {
        /// The missing resource.
        resource: String,
    },

    /// The request itself is malformed.
    #[error("invalid request for '{field}': {message}")]
    InvalidRequest {
        /// The offending field.
        field: String,
        /// What is wrong with it.
        message: String,
    },

    /// The datastore failed; nothing was committed.
    #[error("persistence failure: {0}")]
    Persistence(#[source] Error),
}

impl From<Error> for BookingError {
    fn from(err: Error) -> Self {
        match err {
            Error::InsufficientCapacity(InsufficientCapacity {
                pool: PoolId::VetSlots(vet),
                ..
            }) => Self::SlotUnavailable { vet },
            Error::InsufficientCapacity(InsufficientCapacity {
                pool: PoolId::ProductStock(product),
                requested,
                available,
            }) => Self::InsufficientStock {
                product,
                requested,
                available,
            },
            Error::Forbidden { reason } => Self::Forbidden { reason },
            Error::NotFound { resource } => Self::NotFound { resource },
            Error::Validation { field, message } => Self::InvalidRequest { field, message },
            other => Self::Persistence(other),
        }
    }
}

/// Failure of a status transition.
#[derive(Debug, Error)]
pub enum TransitionError {
    /// The actor's role or identity does not own this record.
    #[error("forbidden: {reason}")]
    Forbidden {
        /// Why the actor was rejected.
        reason: String,
    },

    /// The record does not exist.
    #[error("not found: {resource}")]
    NotFound {
        /// The missing record.
        resource: String,
    },

    /// The lifecycle table has no entry for the requested move.
    #[error("invalid transition for {record}: {from} -> {to}")]
    InvalidTransition {
        /// The record whose status was to change.
        record: String,
        /// Current status.
        from: String,
        /// Requested status.
        to: String,
    },

    /// The datastore failed; nothing was committed.
    #[error("persistence failure: {0}")]
    Persistence(#[source] Error),
}

impl From<Error> for TransitionError {
    fn from(err: Error) -> Self {
        match err {
            Error::Forbidden { reason } => Self::Forbidden { reason },
            Error::NotFound { resource } => Self::NotFound { resource },
            Error::InvalidTransition { record, from, to } => {
                Self::InvalidTransition { record, from, to }
            }
            other => Self::Persistence(other),
        }
    }
}
