//! Main entry point for the petcare CLI.
//!
//! This is the command-line interface for the petcare reservation engine.
//! It provides commands for:
//! - registering users, pets and products
//! - booking vet appointments, pet sitters and shop orders
//! - moving those records through their lifecycles

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Route library log records to stderr at the chosen verbosity
    let logger = petcare::init_logger(cli.verbose, cli.quiet);
    if let Err(e) = logger.install() {
        eprintln!("Error: could not install logger: {e}");
    }

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        data_dir: cli.data_dir,
        busy_timeout: cli.busy_timeout,
        disable_autoinit: cli.disable_autoinit,
        user: cli.user,
    };

    // Execute the command
    let result = match cli.command {
        cli::Command::Init(cmd) => cmd.execute(&global),
        cli::Command::Register(cmd) => cmd.execute(&global),
        cli::Command::AddPet(cmd) => cmd.execute(&global),
        cli::Command::AddProduct(cmd) => cmd.execute(&global),
        cli::Command::BookAppointment(cmd) => cmd.execute(&global),
        cli::Command::AppointmentStatus(cmd) => cmd.execute(&global),
        cli::Command::BookSitter(cmd) => cmd.execute(&global),
        cli::Command::BookingStatus(cmd) => cmd.execute(&global),
        cli::Command::Order(cmd) => cmd.execute(&global),
        cli::Command::OrderStatus(cmd) => cmd.execute(&global),
        cli::Command::AddMedicalRecord(cmd) => cmd.execute(&global),
        cli::Command::Capacity(cmd) => cmd.execute(&global),
        cli::Command::Show(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
