//! Register command implementation.
//!
//! Registers a user together with the profile their role needs. Provider
//! fields left out fall back to the configured defaults.

use crate::error::CliError;
use crate::utils::{load_configuration, open_service, parse_money, GlobalOptions};
use clap::{Args, ValueEnum};
use petcare::database::Database;
use petcare::{Money, NewUser, RoleProfile, UserId};

/// Role selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RoleArg {
    /// Pet owner
    Owner,
    /// Veterinarian
    Vet,
    /// Pet sitter
    Sitter,
    /// Pet shop manager
    Shop,
}

/// Register a user with a role.
#[derive(Args)]
pub struct RegisterCommand {
    /// Unique login name
    pub username: String,

    /// Display name (defaults to the username)
    #[arg(long, value_name = "NAME")]
    pub full_name: Option<String>,

    /// Role of the new user
    #[arg(long, value_enum)]
    pub role: RoleArg,

    /// Contact email
    #[arg(long)]
    pub email: Option<String>,

    /// Contact phone
    #[arg(long)]
    pub phone: Option<String>,

    /// Postal address
    #[arg(long)]
    pub address: Option<String>,

    /// Clinic name (vet)
    #[arg(long, required_if_eq("role", "vet"))]
    pub clinic: Option<String>,

    /// Specialty (vet)
    #[arg(long)]
    pub specialty: Option<String>,

    /// License number (vet)
    #[arg(long)]
    pub license: Option<String>,

    /// Fee per consultation (vet)
    #[arg(long, value_parser = parse_money)]
    pub fee: Option<Money>,

    /// Bookable appointment slots (vet)
    #[arg(long)]
    pub slots: Option<u32>,

    /// Rate per hour (sitter)
    #[arg(long, value_parser = parse_money)]
    pub rate: Option<Money>,

    /// Years of experience (sitter)
    #[arg(long, default_value_t = 0)]
    pub experience: u32,

    /// Kinds of pets accepted (sitter)
    #[arg(long)]
    pub pets: Option<String>,

    /// Area served (sitter)
    #[arg(long)]
    pub area: Option<String>,

    /// Shop name (shop)
    #[arg(long, required_if_eq("role", "shop"))]
    pub shop_name: Option<String>,

    /// Shop location (shop)
    #[arg(long)]
    pub location: Option<String>,

    /// Business registration number (shop)
    #[arg(long)]
    pub business_number: Option<String>,

    /// Opening hours (shop)
    #[arg(long)]
    pub hours: Option<String>,
}

impl RegisterCommand {
    /// Execute the register command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;

        let profile = match self.role {
            RoleArg::Owner => RoleProfile::PetOwner,
            RoleArg::Vet => RoleProfile::Veterinarian {
                clinic_name: self.clinic.unwrap_or_default(),
                specialty: self.specialty,
                license_number: self.license,
                consultation_fee: self.fee.unwrap_or_else(|| config.consultation_fee()),
                available_slots: self.slots.unwrap_or_else(|| config.available_slots()),
            },
            RoleArg::Sitter => RoleProfile::PetSitter {
                hourly_rate: self.rate.unwrap_or_else(|| config.hourly_rate()),
                experience_years: self.experience,
                available_pets: self.pets,
                service_area: self.area,
            },
            RoleArg::Shop => RoleProfile::ShopManager {
                shop_name: self.shop_name.unwrap_or_default(),
                location: self.location,
                business_number: self.business_number,
                operating_hours: self.hours,
            },
        };

        let full_name = self.full_name.unwrap_or_else(|| self.username.clone());
        let user = NewUser::new(self.username, full_name, profile).with_contact(
            self.email,
            self.phone,
            self.address,
        );

        let mut service = open_service(global, &config)?;
        let id = service.register_user(&user).map_err(CliError::from)?;

        println!("{}", id.value());
        if !global.quiet {
            match provider_profile(service.database(), id)? {
                Some(profile) => {
                    eprintln!("Registered {id} as {}, bookable as {profile}", user.profile.role());
                }
                None => eprintln!("Registered {id} as {}", user.profile.role()),
            }
        }

        Ok(())
    }
}

/// The provider row behind `user`, rendered as e.g. "veterinarian 3".
fn provider_profile(db: &Database, user: UserId) -> Result<Option<String>, CliError> {
    let conn = db.connection();
    if let Some(vet) = Database::get_veterinarian_by_user(conn, user)? {
        return Ok(Some(vet.id.to_string()));
    }
    if let Some(sitter) = Database::get_sitter_by_user(conn, user)? {
        return Ok(Some(sitter.id.to_string()));
    }
    Ok(Database::get_shop_by_manager(conn, user)?.map(|shop| shop.id.to_string()))
}
