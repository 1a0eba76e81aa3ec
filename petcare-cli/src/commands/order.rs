//! Order command implementation.
//!
//! Every `--item` line consumes stock from its product; if any line is
//! short, none of them are kept.

use crate::error::CliError;
use crate::utils::{
    acting_user, load_configuration, open_service, parse_order_line, report_plan, GlobalOptions,
};
use clap::Args;
use petcare::operations::OrderPlan;
use petcare::{OrderLine, OrderRequest, ShopId};

/// Place a product order.
#[derive(Args)]
pub struct OrderCommand {
    /// Shop selling every line
    #[arg(long, value_name = "ID")]
    pub shop: i64,

    /// Order line as PRODUCT:QUANTITY (repeatable)
    #[arg(long = "item", value_name = "PRODUCT:QTY", value_parser = parse_order_line, required = true)]
    pub items: Vec<OrderLine>,

    /// Delivery address
    #[arg(long, value_name = "ADDRESS")]
    pub ship_to: String,

    /// Show the plan without ordering
    #[arg(long)]
    pub dry_run: bool,
}

impl OrderCommand {
    /// Execute the order command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut service = open_service(global, &config)?;
        let actor = acting_user(&service, global)?;

        let mut request = OrderRequest::new(ShopId::new(self.shop), self.ship_to);
        request.lines = self.items;

        if self.dry_run {
            let result = service
                .preview(&OrderPlan::new(actor, request))
                .map_err(CliError::from)?;
            report_plan(&result, global);
            return Ok(());
        }

        let id = service.create_order(actor, request)?;
        println!("{}", id.value());

        Ok(())
    }
}
