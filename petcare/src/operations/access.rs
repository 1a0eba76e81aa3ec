//! Actor checks shared by the planners.
//!
//! The acting identity is trusted as given; these helpers only compare it
//! against the rows a request touches.

use rusqlite::Connection;

use crate::database::Database;
use crate::directory::Pet;
use crate::error::{Error, Result};
use crate::ids::PetId;
use crate::role::{Actor, Role};

pub(super) fn require_role(actor: Actor, role: Role, action: &str) -> Result<()> {
    if actor.role == role {
        return Ok(());
    }
    Err(Error::Forbidden {
        reason: format!("{actor} may not {action}; requires {role}"),
    })
}

/// Loads `pet` and checks that `actor` owns it.
pub(super) fn owned_pet(conn: &Connection, actor: Actor, pet: PetId) -> Result<Pet> {
    let pet = Database::get_pet(conn, pet)?.ok_or_else(|| Error::NotFound {
        resource: pet.to_string(),
    })?;
    if pet.owner != actor.user_id {
        return Err(Error::Forbidden {
            reason: format!("{} does not belong to {actor}", pet.id),
        });
    }
    Ok(pet)
}

pub(super) fn not_found(resource: impl ToString) -> Error {
    Error::NotFound {
        resource: resource.to_string(),
    }
}
