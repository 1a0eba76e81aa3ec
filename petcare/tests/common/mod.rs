//! Common test utilities for integration tests.
//!
//! [`Marketplace`] opens a service on a throwaway database file and
//! registers providers with sensible defaults, so each test only spells out
//! the numbers it asserts on.

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveTime};
use petcare::database::{Database, DatabaseConfig};
use petcare::{
    Actor, AppointmentRequest, Money, NewPet, NewProduct, NewUser, PetId, ProductId,
    ReservationService, RoleProfile, ShopId, SitterId, VetId,
};
use tempfile::TempDir;

/// A service on a temporary database file.
pub struct Marketplace {
    _dir: TempDir,
    path: PathBuf,
    /// The service under test.
    pub service: ReservationService,
}

#[allow(dead_code)]
impl Marketplace {
    /// Creates an empty marketplace.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("petcare.db");
        let service = ReservationService::open(DatabaseConfig::new(&path)).unwrap();
        Self {
            _dir: dir,
            path,
            service,
        }
    }

    /// Path of the database file.
    pub fn db_path(&self) -> &Path {
        &self.path
    }

    /// Opens a second, independent service on the same file.
    pub fn reopen(&self) -> ReservationService {
        ReservationService::open(DatabaseConfig::new(&self.path)).unwrap()
    }

    fn register(&mut self, username: &str, profile: RoleProfile) -> Actor {
        let id = self
            .service
            .register_user(&NewUser::new(username, username, profile))
            .unwrap();
        self.service.actor_for(id).unwrap()
    }

    /// Registers a pet owner with one pet.
    pub fn owner(&mut self, username: &str) -> (Actor, PetId) {
        let actor = self.register(username, RoleProfile::PetOwner);
        let pet = self
            .service
            .add_pet(actor, &NewPet::new(format!("{username}'s dog"), "Dog"))
            .unwrap();
        (actor, pet)
    }

    /// Registers a veterinarian with `slots` open slots.
    pub fn vet(&mut self, username: &str, slots: u32) -> (Actor, VetId) {
        let actor = self.register(
            username,
            RoleProfile::Veterinarian {
                clinic_name: format!("{username} clinic"),
                specialty: None,
                license_number: None,
                consultation_fee: Money::new(30_000),
                available_slots: slots,
            },
        );
        let vet = Database::get_veterinarian_by_user(self.service.database().connection(), actor.user_id)
            .unwrap()
            .unwrap();
        (actor, vet.id)
    }

    /// Registers a sitter charging `hourly_rate`.
    pub fn sitter(&mut self, username: &str, hourly_rate: i64) -> (Actor, SitterId) {
        let actor = self.register(
            username,
            RoleProfile::PetSitter {
                hourly_rate: Money::new(hourly_rate),
                experience_years: 3,
                available_pets: Some("dogs, cats".into()),
                service_area: None,
            },
        );
        let sitter = Database::get_sitter_by_user(self.service.database().connection(), actor.user_id)
            .unwrap()
            .unwrap();
        (actor, sitter.id)
    }

    /// Registers a shop manager with an empty shop.
    pub fn shop(&mut self, username: &str) -> (Actor, ShopId) {
        let actor = self.register(
            username,
            RoleProfile::ShopManager {
                shop_name: format!("{username} supplies"),
                location: None,
                business_number: None,
                operating_hours: None,
            },
        );
        let shop = Database::get_shop_by_manager(self.service.database().connection(), actor.user_id)
            .unwrap()
            .unwrap();
        (actor, shop.id)
    }

    /// Lists a product priced at `price` with `stock` units.
    pub fn product(&mut self, manager: Actor, name: &str, price: i64, stock: u32) -> ProductId {
        self.service
            .add_product(manager, &NewProduct::new(name, Money::new(price), stock))
            .unwrap()
    }
}

/// A weekday morning appointment request.
#[allow(dead_code)]
pub fn appointment(pet: PetId, vet: VetId) -> AppointmentRequest {
    AppointmentRequest::new(
        pet,
        vet,
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
        NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
    )
}

/// Shorthand for a calendar date.
#[allow(dead_code)]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}
