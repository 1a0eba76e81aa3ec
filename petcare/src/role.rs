//! User roles and the acting identity passed to every operation.

use std::fmt;
use std::str::FromStr;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

use crate::ids::UserId;
use crate::reservation::ValidationError;

/// The role a user registered with. Fixed at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Owns pets and creates reservations.
    #[serde(rename = "Pet Owner")]
    PetOwner,
    /// Owns an appointment-slot pool and drives appointment status.
    #[serde(rename = "Veterinarian")]
    Veterinarian,
    /// Drives sitter booking status.
    #[serde(rename = "Pet Sitter")]
    PetSitter,
    /// Owns a shop, its products and drives order status.
    #[serde(rename = "Pet Shop Manager")]
    ShopManager,
}

impl Role {
    /// All roles in registration order.
    pub const ALL: [Self; 4] = [
        Self::PetOwner,
        Self::Veterinarian,
        Self::PetSitter,
        Self::ShopManager,
    ];

    /// The role's stored name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PetOwner => "Pet Owner",
            Self::Veterinarian => "Veterinarian",
            Self::PetSitter => "Pet Sitter",
            Self::ShopManager => "Pet Shop Manager",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    /// Accepts the stored name or a kebab-case alias (`pet-owner`, `vet`,
    /// `sitter`, `shop-manager`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pet owner" | "pet-owner" | "owner" => Ok(Self::PetOwner),
            "veterinarian" | "vet" => Ok(Self::Veterinarian),
            "pet sitter" | "pet-sitter" | "sitter" => Ok(Self::PetSitter),
            "pet shop manager" | "shop-manager" | "shop" => Ok(Self::ShopManager),
            other => Err(ValidationError::new(
                "role",
                format!("unknown role '{other}'"),
            )),
        }
    }
}

impl ToSql for Role {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Role {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: ValidationError| FromSqlError::Other(Box::new(e)))
    }
}

/// The authenticated identity performing an operation.
///
/// Authentication itself happens outside this crate; callers vouch for the
/// pair and the service checks it against stored ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The user's id.
    pub user_id: UserId,
    /// The user's registered role.
    pub role: Role,
}

impl Actor {
    /// Creates an actor.
    #[must_use]
    pub const fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.user_id, self.role)
    }
}
