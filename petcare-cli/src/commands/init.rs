//! Init command implementation.
//!
//! Creates the data directory and an empty database ahead of first use,
//! optionally with a commented `config.yaml` to edit.

use crate::error::CliError;
use crate::utils::{resolve_data_dir, GlobalOptions};
use clap::Args;
use petcare::database::DATABASE_FILE_NAME;
use petcare::operations::{init_database, InitOptions};
use std::path::Path;

/// Initialize the data directory and database.
#[derive(Args)]
pub struct InitCommand {
    /// Replace an existing database, discarding every record in it
    #[arg(long)]
    overwrite: bool,

    /// Also write a default config.yaml
    #[arg(long)]
    with_config: bool,

    /// List the steps without touching the filesystem
    #[arg(long)]
    dry_run: bool,
}

impl InitCommand {
    /// Execute the init command.
    ///
    /// `--disable-autoinit` does not apply here.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let data_dir = resolve_data_dir(global)?;

        if self.dry_run {
            println!("Dry run, nothing will be written. Planned steps for {}:", data_dir.display());
            for step in self.planned_steps(&data_dir) {
                println!("  - {step}");
            }
            return Ok(());
        }

        let result = init_database(
            &InitOptions::new(data_dir)
                .with_overwrite(self.overwrite)
                .with_create_config(self.with_config),
        )?;

        if global.quiet {
            return Ok(());
        }

        println!("Initialized petcare in: {}", result.data_dir.display());
        if result.data_dir_created {
            println!("  - Created data directory");
        }
        match (result.database_created, self.overwrite) {
            (true, true) => println!("  - Recreated database"),
            (true, false) => println!("  - Created database"),
            _ => {}
        }
        match (result.config_created, self.with_config) {
            (true, _) => println!("  - Created default configuration file"),
            (false, true) => println!("  - Kept existing configuration file"),
            _ => {}
        }

        Ok(())
    }

    fn planned_steps(&self, data_dir: &Path) -> Vec<String> {
        let mut steps = Vec::new();

        if !data_dir.exists() {
            steps.push(format!("create directory {}", data_dir.display()));
        }

        let db_path = data_dir.join(DATABASE_FILE_NAME);
        match (db_path.exists(), self.overwrite) {
            (false, _) => steps.push(format!("create database {}", db_path.display())),
            (true, true) => steps.push(format!("replace database {}", db_path.display())),
            (true, false) => steps.push(format!(
                "stop: {} exists (pass --overwrite to replace it)",
                db_path.display()
            )),
        }

        if self.with_config {
            let config_path = data_dir.join("config.yaml");
            if config_path.exists() {
                steps.push(format!("keep existing {}", config_path.display()));
            } else {
                steps.push(format!("write {}", config_path.display()));
            }
        }

        steps
    }
}
