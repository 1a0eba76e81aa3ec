//! CLI-specific error types with exit codes.
//!
//! This module defines error types specific to the CLI layer,
//! wrapping library errors and providing appropriate exit codes.

use petcare::{BookingError, Error as LibError, TransitionError};
use std::fmt;

/// CLI-specific error type with exit code mapping.
#[derive(Debug)]
pub enum CliError {
    /// Library error (wrapped).
    Library(LibError),

    /// A create operation was refused.
    Booking(BookingError),

    /// A status change was refused.
    Transition(TransitionError),

    /// Invalid command-line arguments.
    InvalidArguments(String),

    /// I/O error.
    Io(std::io::Error),

    /// Timeout waiting for database lock.
    Timeout,

    /// Data directory not found (and auto-init disabled).
    NoDataDirectory,

    /// Configuration error.
    Config(String),
}

impl CliError {
    /// Get the appropriate exit code for this error.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: Semantic failure (no capacity, illegal transition, unknown record)
    /// - 2: Timeout waiting for database lock
    /// - 3: No data directory found
    /// - 4: Invalid arguments or request
    /// - 5: I/O error
    /// - 6: Other library error
    /// - 7: Configuration error
    /// - 8: Acting user may not perform the operation
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Library(lib_err) => library_exit_code(lib_err),
            CliError::Booking(err) => match err {
                BookingError::SlotUnavailable { .. }
                | BookingError::InsufficientStock { .. }
                | BookingError::NotFound { .. } => 1,
                BookingError::Forbidden { .. } => 8,
                BookingError::InvalidRequest { .. } => 4,
                BookingError::Persistence(lib_err) => library_exit_code(lib_err),
            },
            CliError::Transition(err) => match err {
                TransitionError::InvalidTransition { .. } | TransitionError::NotFound { .. } => 1,
                TransitionError::Forbidden { .. } => 8,
                TransitionError::Persistence(lib_err) => library_exit_code(lib_err),
            },
            CliError::Timeout => 2,
            CliError::NoDataDirectory => 3,
            CliError::InvalidArguments(_) => 4,
            CliError::Io(_) => 5,
            CliError::Config(_) => 7,
        }
    }
}

fn library_exit_code(err: &LibError) -> i32 {
    match err {
        LibError::InsufficientCapacity(_)
        | LibError::InvalidTransition { .. }
        | LibError::ReservationConflict { .. }
        | LibError::NotFound { .. } => 1,
        LibError::LockTimeout { .. } => 2,
        LibError::DataDirectoryNotFound { .. } => 3,
        LibError::Validation { .. } => 4,
        LibError::Io(_) => 5,
        LibError::Configuration(_) => 7,
        LibError::Forbidden { .. } => 8,
        _ => 6,
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Library(e) => write!(f, "{e}"),
            CliError::Booking(e) => write!(f, "{e}"),
            CliError::Transition(e) => write!(f, "{e}"),
            CliError::InvalidArguments(msg) => write!(f, "Invalid arguments: {msg}"),
            CliError::Io(e) => write!(f, "I/O error: {e}"),
            CliError::Timeout => write!(f, "Timeout waiting for database lock"),
            CliError::NoDataDirectory => {
                write!(
                    f,
                    "Data directory not found (run `petcare init` or enable auto-init)"
                )
            }
            CliError::Config(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Library(e) => Some(e),
            CliError::Booking(e) => Some(e),
            CliError::Transition(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LibError> for CliError {
    fn from(e: LibError) -> Self {
        match e {
            LibError::LockTimeout { .. } => CliError::Timeout,
            LibError::DataDirectoryNotFound { .. } => CliError::NoDataDirectory,
            other => CliError::Library(other),
        }
    }
}

impl From<BookingError> for CliError {
    fn from(e: BookingError) -> Self {
        match e {
            BookingError::Persistence(inner) => CliError::from(inner),
            other => CliError::Booking(other),
        }
    }
}

impl From<TransitionError> for CliError {
    fn from(e: TransitionError) -> Self {
        match e {
            TransitionError::Persistence(inner) => CliError::from(inner),
            other => CliError::Transition(other),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}
