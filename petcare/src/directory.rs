//! Users, pets, providers and products.
//!
//! These are the collaborators reservations point at. They are plain
//! records; the only fields the reservation engine ever mutates are the
//! pool columns (`available_slots`, `stock_quantity`), and only through
//! [`crate::pool`].

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{PetId, ProductId, ShopId, SitterId, UserId, VetId};
use crate::money::Money;
use crate::reservation::{normalize_text, ValidationError};
use crate::role::Role;

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    /// Row id.
    pub id: UserId,
    /// Unique login name.
    pub username: String,
    /// Display name.
    pub full_name: String,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Postal address.
    pub address: Option<String>,
    /// Registered role.
    pub role: Role,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}

/// A pet owned by a Pet Owner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pet {
    /// Row id.
    pub id: PetId,
    /// Owning user.
    pub owner: UserId,
    /// Name.
    pub name: String,
    /// Species, e.g. "Dog".
    pub species: String,
    /// Breed.
    pub breed: Option<String>,
    /// Birth date.
    pub birth_date: Option<NaiveDate>,
    /// Weight in kilograms.
    pub weight_kg: Option<f64>,
    /// Gender.
    pub gender: Option<String>,
}

/// A veterinarian and their appointment-slot pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Veterinarian {
    /// Row id.
    pub id: VetId,
    /// The user behind the profile.
    pub user: UserId,
    /// Clinic name.
    pub clinic_name: String,
    /// Specialty.
    pub specialty: Option<String>,
    /// License number.
    pub license_number: Option<String>,
    /// Fee per consultation.
    pub consultation_fee: Money,
    /// Remaining bookable slots.
    pub available_slots: u32,
}

/// A pet sitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PetSitter {
    /// Row id.
    pub id: SitterId,
    /// The user behind the profile.
    pub user: UserId,
    /// Rate per billed hour.
    pub hourly_rate: Money,
    /// Years of experience.
    pub experience_years: u32,
    /// Kinds of pets accepted.
    pub available_pets: Option<String>,
    /// Area served.
    pub service_area: Option<String>,
}

/// A pet shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PetShop {
    /// Row id.
    pub id: ShopId,
    /// The managing user.
    pub manager: UserId,
    /// Shop name.
    pub shop_name: String,
    /// Location.
    pub location: Option<String>,
    /// Business registration number.
    pub business_number: Option<String>,
    /// Opening hours.
    pub operating_hours: Option<String>,
}

/// A product and its stock pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    /// Row id.
    pub id: ProductId,
    /// The shop selling it.
    pub shop: ShopId,
    /// Product name.
    pub name: String,
    /// Category.
    pub category: Option<String>,
    /// Current unit price.
    pub price: Money,
    /// Units on hand.
    pub stock_quantity: u32,
    /// Description.
    pub description: Option<String>,
}

/// Role-specific profile created together with a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoleProfile {
    /// Pet owners carry no profile.
    PetOwner,
    /// Veterinarian profile with the initial slot pool.
    Veterinarian {
        /// Clinic name.
        clinic_name: String,
        /// Specialty.
        specialty: Option<String>,
        /// License number.
        license_number: Option<String>,
        /// Fee per consultation.
        consultation_fee: Money,
        /// Initial number of bookable slots.
        available_slots: u32,
    },
    /// Pet sitter profile.
    PetSitter {
        /// Rate per billed hour.
        hourly_rate: Money,
        /// Years of experience.
        experience_years: u32,
        /// Kinds of pets accepted.
        available_pets: Option<String>,
        /// Area served.
        service_area: Option<String>,
    },
    /// Shop manager profile with the managed shop.
    ShopManager {
        /// Shop name.
        shop_name: String,
        /// Location.
        location: Option<String>,
        /// Business registration number.
        business_number: Option<String>,
        /// Opening hours.
        operating_hours: Option<String>,
    },
}

impl RoleProfile {
    /// The role this profile registers.
    #[must_use]
    pub const fn role(&self) -> Role {
        match self {
            Self::PetOwner => Role::PetOwner,
            Self::Veterinarian { .. } => Role::Veterinarian,
            Self::PetSitter { .. } => Role::PetSitter,
            Self::ShopManager { .. } => Role::ShopManager,
        }
    }
}

/// Input for registering a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    /// Unique login name.
    pub username: String,
    /// Display name.
    pub full_name: String,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Postal address.
    pub address: Option<String>,
    /// Role and its profile.
    pub profile: RoleProfile,
}

impl NewUser {
    /// Creates a registration with no contact details.
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        full_name: impl Into<String>,
        profile: RoleProfile,
    ) -> Self {
        Self {
            username: username.into().trim().to_string(),
            full_name: full_name.into().trim().to_string(),
            email: None,
            phone: None,
            address: None,
            profile,
        }
    }

    /// Sets the contact details.
    #[must_use]
    pub fn with_contact(
        mut self,
        email: Option<String>,
        phone: Option<String>,
        address: Option<String>,
    ) -> Self {
        self.email = normalize_text(email);
        self.phone = normalize_text(phone);
        self.address = normalize_text(address);
        self
    }

    /// Checks required names and profile amounts.
    ///
    /// # Errors
    ///
    /// Returns an error for a blank username, full name or provider name,
    /// or a negative fee.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.username.is_empty() {
            return Err(ValidationError::new("username", "must not be empty"));
        }
        if self.full_name.is_empty() {
            return Err(ValidationError::new("full_name", "must not be empty"));
        }
        match &self.profile {
            RoleProfile::PetOwner => {}
            RoleProfile::Veterinarian {
                clinic_name,
                consultation_fee,
                ..
            } => {
                if clinic_name.trim().is_empty() {
                    return Err(ValidationError::new("clinic_name", "must not be empty"));
                }
                if consultation_fee.is_negative() {
                    return Err(ValidationError::new(
                        "consultation_fee",
                        "must not be negative",
                    ));
                }
            }
            RoleProfile::PetSitter { hourly_rate, .. } => {
                if hourly_rate.is_negative() {
                    return Err(ValidationError::new("hourly_rate", "must not be negative"));
                }
            }
            RoleProfile::ShopManager { shop_name, .. } => {
                if shop_name.trim().is_empty() {
                    return Err(ValidationError::new("shop_name", "must not be empty"));
                }
            }
        }
        Ok(())
    }
}

/// Input for registering a pet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPet {
    /// Name.
    pub name: String,
    /// Species.
    pub species: String,
    /// Breed.
    pub breed: Option<String>,
    /// Birth date.
    pub birth_date: Option<NaiveDate>,
    /// Weight in kilograms.
    pub weight_kg: Option<f64>,
    /// Gender.
    pub gender: Option<String>,
}

impl NewPet {
    /// Creates a pet with only the required fields.
    #[must_use]
    pub fn new(name: impl Into<String>, species: impl Into<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            species: species.into().trim().to_string(),
            breed: None,
            birth_date: None,
            weight_kg: None,
            gender: None,
        }
    }

    /// Checks required fields and the weight.
    ///
    /// # Errors
    ///
    /// Returns an error for a blank name or species, or a non-positive weight.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::new("name", "must not be empty"));
        }
        if self.species.is_empty() {
            return Err(ValidationError::new("species", "must not be empty"));
        }
        if let Some(weight) = self.weight_kg {
            if !weight.is_finite() || weight <= 0.0 {
                return Err(ValidationError::new("weight", "must be a positive number"));
            }
        }
        Ok(())
    }
}

/// Input for listing a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    /// Product name.
    pub name: String,
    /// Category.
    pub category: Option<String>,
    /// Unit price.
    pub price: Money,
    /// Initial stock.
    pub stock_quantity: u32,
    /// Description.
    pub description: Option<String>,
}

impl NewProduct {
    /// Creates a product with no category or description.
    #[must_use]
    pub fn new(name: impl Into<String>, price: Money, stock_quantity: u32) -> Self {
        Self {
            name: name.into().trim().to_string(),
            category: None,
            price,
            stock_quantity,
            description: None,
        }
    }

    /// Checks the name and price.
    ///
    /// # Errors
    ///
    /// Returns an error for a blank name or a negative price.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::new("name", "must not be empty"));
        }
        if self.price.is_negative() {
            return Err(ValidationError::new("price", "must not be negative"));
        }
        Ok(())
    }
}
