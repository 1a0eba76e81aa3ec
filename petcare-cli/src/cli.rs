//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    AddMedicalRecordCommand, AddPetCommand, AddProductCommand, AppointmentStatusCommand,
    BookAppointmentCommand, BookSitterCommand, BookingStatusCommand, CapacityCommand,
    CompletionsCommand, InitCommand, OrderCommand, OrderStatusCommand, RegisterCommand,
    ShowCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Book veterinarians, pet sitters and shop orders.
#[derive(Parser)]
#[command(name = "petcare")]
#[command(version, about = "Book veterinarians, pet sitters and shop orders", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "PETCARE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "PETCARE_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization
    #[arg(long, global = true, env = "PETCARE_DISABLE_AUTOINIT")]
    pub disable_autoinit: bool,

    /// Acting user id
    #[arg(long, value_name = "ID", global = true, env = "PETCARE_USER")]
    pub user: Option<i64>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Initialize the data directory and database
    Init(InitCommand),

    /// Register a user with a role
    Register(RegisterCommand),

    /// Register a pet for the acting owner
    AddPet(AddPetCommand),

    /// List a product in the acting manager's shop
    AddProduct(AddProductCommand),

    /// Book a veterinary appointment
    BookAppointment(BookAppointmentCommand),

    /// Change an appointment's status
    AppointmentStatus(AppointmentStatusCommand),

    /// Book a pet sitter
    BookSitter(BookSitterCommand),

    /// Change a sitter booking's status
    BookingStatus(BookingStatusCommand),

    /// Place a product order
    Order(OrderCommand),

    /// Change an order's status
    OrderStatus(OrderStatusCommand),

    /// Attach clinical notes to an appointment
    AddMedicalRecord(AddMedicalRecordCommand),

    /// Show the remaining slots or stock of a pool
    Capacity(CapacityCommand),

    /// Show a stored record
    Show(ShowCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
