//! Shared helpers for unit tests that need a seeded database.

use tempfile::tempdir;

use crate::database::{Database, DatabaseConfig};
use crate::directory::{NewPet, NewProduct, NewUser, RoleProfile};
use crate::ids::{PetId, ProductId, ShopId, SitterId, UserId, VetId};
use crate::money::Money;

/// Creates a temporary test database that outlives the test body.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let db = Database::open(DatabaseConfig::new(path)).unwrap();

    // Keep the directory alive for the connection's lifetime
    std::mem::forget(dir);

    db
}

fn register(db: &mut Database, username: &str, profile: RoleProfile) -> UserId {
    db.create_user(&NewUser::new(username, username, profile))
        .unwrap()
}

/// Registers a veterinarian with `slots` open appointment slots.
///
/// # Panics
///
/// Panics on any database error.
#[must_use]
pub fn seed_vet(db: &mut Database, slots: u32) -> VetId {
    let username = format!("vet-{}", unique_suffix(db));
    let user = register(
        db,
        &username,
        RoleProfile::Veterinarian {
            clinic_name: "Happy Paws Clinic".into(),
            specialty: None,
            license_number: None,
            consultation_fee: Money::new(30_000),
            available_slots: slots,
        },
    );
    Database::get_veterinarian_by_user(db.connection(), user)
        .unwrap()
        .unwrap()
        .id
}

/// Registers a sitter charging `hourly_rate`.
///
/// # Panics
///
/// Panics on any database error.
#[must_use]
pub fn seed_sitter(db: &mut Database, hourly_rate: i64) -> SitterId {
    let username = format!("sitter-{}", unique_suffix(db));
    let user = register(
        db,
        &username,
        RoleProfile::PetSitter {
            hourly_rate: Money::new(hourly_rate),
            experience_years: 2,
            available_pets: None,
            service_area: None,
        },
    );
    Database::get_sitter_by_user(db.connection(), user)
        .unwrap()
        .unwrap()
        .id
}

/// Registers a shop manager and one product with `stock` units at 10 000.
///
/// # Panics
///
/// Panics on any database error.
#[must_use]
pub fn seed_product(db: &mut Database, stock: u32) -> (ShopId, ProductId) {
    let username = format!("shop-{}", unique_suffix(db));
    let manager = register(
        db,
        &username,
        RoleProfile::ShopManager {
            shop_name: "Corner Pet Shop".into(),
            location: None,
            business_number: None,
            operating_hours: None,
        },
    );
    let shop = Database::get_shop_by_manager(db.connection(), manager)
        .unwrap()
        .unwrap()
        .id;
    let product = Database::create_product(
        db.connection(),
        shop,
        &NewProduct::new("Kibble", Money::new(10_000), stock),
    )
    .unwrap();
    (shop, product)
}

/// Registers a pet owner named `username` with one dog.
///
/// # Panics
///
/// Panics on any database error.
#[must_use]
pub fn seed_owner_with_pet(db: &mut Database, username: &str) -> (UserId, PetId) {
    let owner = register(db, username, RoleProfile::PetOwner);
    let pet = Database::create_pet(db.connection(), owner, &NewPet::new("Bori", "Dog")).unwrap();
    (owner, pet)
}

fn unique_suffix(db: &Database) -> i64 {
    db.connection()
        .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
        .unwrap()
}
