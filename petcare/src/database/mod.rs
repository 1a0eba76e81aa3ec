//! SQLite-backed datastore.
//!
//! Holds the directory entities (users, pets, providers, products), the
//! reservation records, and the two pool columns. Every mutation of a
//! reservation record or a pool runs inside a [`Database::unit_of_work`].
//!
//! # Examples
//!
//! ```no_run
//! use petcare::database::{Database, DatabaseConfig};
//! use petcare::{NewUser, RoleProfile};
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/petcare.db")).unwrap();
//! let owner = db
//!     .create_user(&NewUser::new("ana", "Ana Kim", RoleProfile::PetOwner))
//!     .unwrap();
//! let user = Database::get_user(db.connection(), owner).unwrap();
//! assert!(user.is_some());
//! ```

mod config;
mod connection;
pub mod migrations;
mod operations;
mod schema;
mod transaction;

#[cfg(test)]
pub(crate) mod test_util;

pub use config::{default_data_dir, resolve_database_path, DatabaseConfig, DATABASE_FILE_NAME};
pub use connection::Database;
pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
pub use schema::CURRENT_SCHEMA_VERSION;
