//! Add-product command implementation.

use crate::error::CliError;
use crate::utils::{acting_user, load_configuration, open_service, parse_money, GlobalOptions};
use clap::Args;
use petcare::{Money, NewProduct};

/// List a product in the acting manager's shop.
#[derive(Args)]
pub struct AddProductCommand {
    /// Product name
    pub name: String,

    /// Unit price
    #[arg(long, value_parser = parse_money)]
    pub price: Money,

    /// Initial stock
    #[arg(long)]
    pub stock: u32,

    /// Category
    #[arg(long)]
    pub category: Option<String>,

    /// Description
    #[arg(long)]
    pub description: Option<String>,
}

impl AddProductCommand {
    /// Execute the add-product command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut service = open_service(global, &config)?;
        let actor = acting_user(&service, global)?;

        let mut product = NewProduct::new(self.name, self.price, self.stock);
        product.category = self.category;
        product.description = self.description;

        let id = service.add_product(actor, &product).map_err(CliError::from)?;
        println!("{}", id.value());

        Ok(())
    }
}
