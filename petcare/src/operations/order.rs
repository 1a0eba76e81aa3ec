//! Product orders.
//!
//! Each line consumes its quantity from the product's stock, in request
//! order, before the order row is written. A short line fails the whole unit
//! of work, which also returns every earlier line's stock.

use std::collections::HashMap;

use rusqlite::Connection;

use crate::database::Database;
use crate::error::{Error, Result};
use crate::ids::ProductId;
use crate::money::Money;
use crate::pool::PoolId;
use crate::reservation::{OrderItem, OrderRequest};
use crate::role::{Actor, Role};

use super::access::{not_found, require_role};
use super::plan::{OperationPlan, PlanAction, PlanBuilder};

/// Plans an order.
#[derive(Debug, Clone)]
pub struct OrderPlan {
    actor: Actor,
    request: OrderRequest,
}

impl OrderPlan {
    /// Creates a planner for `request` made by `actor`.
    #[must_use]
    pub const fn new(actor: Actor, request: OrderRequest) -> Self {
        Self { actor, request }
    }
}

fn total_overflow() -> Error {
    Error::Validation {
        field: "lines".into(),
        message: "order total overflows".into(),
    }
}

impl PlanBuilder for OrderPlan {
    fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let request = &self.request;

        // Step 1: Validate the request shape and the buyer
        request.validate()?;
        require_role(self.actor, Role::PetOwner, "place an order")?;

        // Step 2: The shop must exist
        let shop = Database::get_shop(conn, request.shop)?
            .ok_or_else(|| not_found(request.shop))?;

        let mut plan = OperationPlan::new(format!("Place order at {}", shop.id));

        // Step 3: Price every line from the shop's catalogue
        let mut items = Vec::with_capacity(request.lines.len());
        let mut requested: HashMap<ProductId, (u32, u32)> = HashMap::new();
        let mut total_amount = Money::ZERO;
        for line in &request.lines {
            let product = Database::get_product(conn, line.product)?
                .ok_or_else(|| not_found(line.product))?;
            if product.shop != shop.id {
                return Err(Error::Validation {
                    field: "lines".into(),
                    message: format!("{} is not sold by {}", product.id, shop.id),
                });
            }

            let item = OrderItem {
                product: product.id,
                quantity: line.quantity,
                unit_price: product.price,
            };
            total_amount = item
                .line_total()
                .and_then(|line_total| total_amount.checked_add(line_total))
                .ok_or_else(total_overflow)?;

            let entry = requested
                .entry(product.id)
                .or_insert((0, product.stock_quantity));
            entry.0 = entry.0.saturating_add(line.quantity);

            plan = plan.add_action(PlanAction::ConsumePool {
                pool: PoolId::ProductStock(product.id),
                amount: line.quantity,
            });
            items.push(item);
        }

        // Step 4: Warn about lines the current stock cannot cover
        for line in &request.lines {
            if let Some((wanted, on_hand)) = requested.remove(&line.product) {
                if wanted > on_hand {
                    plan = plan.add_warning(format!(
                        "{} has {on_hand} in stock, {wanted} requested",
                        line.product
                    ));
                }
            }
        }

        Ok(plan.add_action(PlanAction::InsertOrder {
            buyer: self.actor.user_id,
            shop: shop.id,
            items,
            total_amount,
            shipping_address: request.shipping_address.clone(),
        }))
    }
}
