//! Resource pools: finite counters with a floor of zero.
//!
//! A pool is a single integer column on its owner's row: a veterinarian's
//! `available_slots` or a product's `stock_quantity`. Consumption is one
//! conditional `UPDATE` that only matches while the counter covers the
//! amount, so the check and the decrement are a single statement. Two
//! writers racing for the last unit cannot both match.
//!
//! These functions take a plain [`Connection`]; callers run them inside a
//! unit of work so the pool write commits or rolls back together with the
//! record write.

use std::fmt;

use log::debug;
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;

use crate::error::{Error, InsufficientCapacity, Result};
use crate::ids::{ProductId, VetId};

#[cfg(test)]
mod proptests;

const CONSUME_VET_SLOTS: &str = r"
    UPDATE veterinarians
    SET available_slots = available_slots - ?1
    WHERE vet_id = ?2 AND available_slots >= ?1
";

const CONSUME_PRODUCT_STOCK: &str = r"
    UPDATE products
    SET stock_quantity = stock_quantity - ?1
    WHERE product_id = ?2 AND stock_quantity >= ?1
";

const RESTORE_VET_SLOTS: &str = r"
    UPDATE veterinarians
    SET available_slots = available_slots + ?1
    WHERE vet_id = ?2
";

const RESTORE_PRODUCT_STOCK: &str = r"
    UPDATE products
    SET stock_quantity = stock_quantity + ?1
    WHERE product_id = ?2
";

const SELECT_VET_SLOTS: &str = "SELECT available_slots FROM veterinarians WHERE vet_id = ?1";

const SELECT_PRODUCT_STOCK: &str = "SELECT stock_quantity FROM products WHERE product_id = ?1";

/// Identifies one pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PoolId {
    /// A veterinarian's appointment slots.
    VetSlots(VetId),
    /// A product's stock on hand.
    ProductStock(ProductId),
}

impl PoolId {
    fn key(self) -> i64 {
        match self {
            Self::VetSlots(vet) => vet.value(),
            Self::ProductStock(product) => product.value(),
        }
    }

    const fn statements(self) -> (&'static str, &'static str, &'static str) {
        match self {
            Self::VetSlots(_) => (CONSUME_VET_SLOTS, RESTORE_VET_SLOTS, SELECT_VET_SLOTS),
            Self::ProductStock(_) => (
                CONSUME_PRODUCT_STOCK,
                RESTORE_PRODUCT_STOCK,
                SELECT_PRODUCT_STOCK,
            ),
        }
    }

    fn owner(self) -> String {
        match self {
            Self::VetSlots(vet) => vet.to_string(),
            Self::ProductStock(product) => product.to_string(),
        }
    }
}

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VetSlots(vet) => write!(f, "slots of {vet}"),
            Self::ProductStock(product) => write!(f, "stock of {product}"),
        }
    }
}

/// Takes `amount` units from the pool if it holds at least that many.
///
/// # Errors
///
/// Returns `Error::InsufficientCapacity` if the pool is short (nothing is
/// written), `Error::NotFound` if the owner row does not exist, or a
/// database error.
pub fn try_consume(conn: &Connection, pool: PoolId, amount: u32) -> Result<()> {
    let (consume, _, _) = pool.statements();
    let changed = conn.execute(consume, params![amount, pool.key()])?;

    if changed == 1 {
        debug!("consumed {amount} from {pool}");
        return Ok(());
    }

    // The update matched nothing: either the row is gone or it is short.
    let available = capacity(conn, pool)?;
    debug!("refused {amount} from {pool}: {available} available");
    Err(InsufficientCapacity {
        pool,
        requested: amount,
        available,
    }
    .into())
}

/// Gives `amount` units back to the pool. There is no ceiling.
///
/// # Errors
///
/// Returns `Error::NotFound` if the owner row does not exist, or a
/// database error.
pub fn restore(conn: &Connection, pool: PoolId, amount: u32) -> Result<()> {
    let (_, restore, _) = pool.statements();
    let changed = conn.execute(restore, params![amount, pool.key()])?;
    if changed == 0 {
        return Err(Error::NotFound {
            resource: pool.owner(),
        });
    }
    debug!("restored {amount} to {pool}");
    Ok(())
}

/// Reads the pool's current counter.
///
/// # Errors
///
/// Returns `Error::NotFound` if the owner row does not exist, or a
/// database error.
pub fn capacity(conn: &Connection, pool: PoolId) -> Result<u32> {
    let (_, _, select) = pool.statements();
    conn.query_row(select, [pool.key()], |row| row.get(0))
        .optional()?
        .ok_or_else(|| Error::NotFound {
            resource: pool.owner(),
        })
}
