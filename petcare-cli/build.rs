//! Build script for petcare-cli.
//!
//! This script generates the man page at build time using clap_mangen.
//! The generated page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: build scripts cannot depend on the crate being built, so the
//! command tree is declared again here.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// Keep in step with src/cli.rs.
fn build_cli() -> Command {
    Command::new("petcare")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Book veterinarians, pet sitters and shop orders")
        .long_about(
            "Command-line front end for the petcare reservation engine: vet slots, \
             sitter bookings and shop stock, each reserved atomically",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Override the data directory location")
                .value_name("PATH")
                .global(true)
                .env("PETCARE_DATA_DIR"),
        )
        .arg(
            Arg::new("busy-timeout")
                .long("busy-timeout")
                .help("Override the default busy timeout (in seconds)")
                .value_name("SECONDS")
                .global(true)
                .env("PETCARE_BUSY_TIMEOUT"),
        )
        .arg(
            Arg::new("disable-autoinit")
                .long("disable-autoinit")
                .help("Disable automatic database initialization")
                .global(true)
                .action(clap::ArgAction::SetTrue)
                .env("PETCARE_DISABLE_AUTOINIT"),
        )
        .arg(
            Arg::new("user")
                .long("user")
                .help("Acting user id")
                .value_name("ID")
                .global(true)
                .env("PETCARE_USER"),
        )
        .subcommands(vec![
            Command::new("init")
                .about("Initialize the data directory and database")
                .long_about("Set up the petcare database and, optionally, a configuration file"),
            Command::new("register")
                .about("Register a user with a role")
                .long_about(
                    "Register a pet owner, veterinarian, pet sitter or shop manager with their profile",
                ),
            Command::new("add-pet")
                .about("Register a pet for the acting owner")
                .long_about("Add a pet owned by the user given with --user"),
            Command::new("add-product")
                .about("List a product in the acting manager's shop")
                .long_about("Add a product with a price and initial stock to the manager's shop"),
            Command::new("book-appointment")
                .about("Book a veterinary appointment")
                .long_about("Take one of the veterinarian's open slots and record the appointment"),
            Command::new("appointment-status")
                .about("Change an appointment's status")
                .long_about("Move an appointment along its lifecycle; cancelling returns the slot"),
            Command::new("book-sitter")
                .about("Book a pet sitter")
                .long_about("Book a sitter for a date range; the fee is rate times hours"),
            Command::new("booking-status")
                .about("Change a sitter booking's status")
                .long_about("Move a sitter booking along its lifecycle"),
            Command::new("order")
                .about("Place a product order")
                .long_about("Consume stock for every line of the order, or for none of them"),
            Command::new("order-status")
                .about("Change an order's status")
                .long_about("Move an order along its lifecycle; cancelling restores stock"),
            Command::new("add-medical-record")
                .about("Attach clinical notes to an appointment")
                .long_about("Record a diagnosis and treatment against one of the vet's appointments"),
            Command::new("capacity")
                .about("Show the remaining slots or stock of a pool")
                .long_about("Print how many vet slots or product units are still available"),
            Command::new("show")
                .about("Show a stored record")
                .long_about("Print an appointment, booking, order or medical record as text or JSON"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    // Generate man pages at build time
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let app = build_cli();
    let man = Man::new(app);
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("petcare.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
