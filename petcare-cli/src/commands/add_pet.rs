//! Add-pet command implementation.

use crate::error::CliError;
use crate::utils::{acting_user, load_configuration, open_service, parse_date, GlobalOptions};
use chrono::NaiveDate;
use clap::Args;
use petcare::NewPet;

/// Register a pet for the acting owner.
#[derive(Args)]
pub struct AddPetCommand {
    /// Pet name
    pub name: String,

    /// Species, e.g. Dog
    #[arg(long)]
    pub species: String,

    /// Breed
    #[arg(long)]
    pub breed: Option<String>,

    /// Birth date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub birth_date: Option<NaiveDate>,

    /// Weight in kilograms
    #[arg(long)]
    pub weight: Option<f64>,

    /// Gender
    #[arg(long)]
    pub gender: Option<String>,
}

impl AddPetCommand {
    /// Execute the add-pet command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut service = open_service(global, &config)?;
        let actor = acting_user(&service, global)?;

        let mut pet = NewPet::new(self.name, self.species);
        pet.breed = self.breed;
        pet.birth_date = self.birth_date;
        pet.weight_kg = self.weight;
        pet.gender = self.gender;

        let id = service.add_pet(actor, &pet).map_err(CliError::from)?;
        println!("{}", id.value());

        Ok(())
    }
}
