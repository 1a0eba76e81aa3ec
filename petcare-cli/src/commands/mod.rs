//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `init`: Initialize the data directory and database
//! - `register`: Register a user with a role profile
//! - `add_pet` / `add_product`: Directory entries the bookings refer to
//! - `book_appointment`, `book_sitter`, `order`: Create reservations
//! - `status`: Move appointments, sitter bookings and orders through their lifecycles
//! - `medical_record`: Attach clinical notes to an appointment
//! - `capacity`: Show a pool's remaining units
//! - `show`: Display a stored record
//! - `completions`: Generate shell completion scripts

pub mod add_pet;
pub mod add_product;
pub mod book_appointment;
pub mod book_sitter;
pub mod capacity;
pub mod completions;
pub mod init;
pub mod medical_record;
pub mod order;
pub mod register;
pub mod show;
pub mod status;

pub use add_pet::AddPetCommand;
pub use add_product::AddProductCommand;
pub use book_appointment::BookAppointmentCommand;
pub use book_sitter::BookSitterCommand;
pub use capacity::CapacityCommand;
pub use completions::CompletionsCommand;
pub use init::InitCommand;
pub use medical_record::AddMedicalRecordCommand;
pub use order::OrderCommand;
pub use register::RegisterCommand;
pub use show::ShowCommand;
pub use status::{AppointmentStatusCommand, BookingStatusCommand, OrderStatusCommand};
