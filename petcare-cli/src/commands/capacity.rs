//! Capacity command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_service, GlobalOptions};
use clap::Args;
use petcare::{PoolId, ProductId, VetId};

/// Show the remaining slots of a vet or stock of a product.
#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct CapacityCommand {
    /// Veterinarian whose open slots to show
    #[arg(long, value_name = "ID")]
    pub vet: Option<i64>,

    /// Product whose stock to show
    #[arg(long, value_name = "ID")]
    pub product: Option<i64>,
}

impl CapacityCommand {
    /// Execute the capacity command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let pool = match (self.vet, self.product) {
            (Some(vet), _) => PoolId::VetSlots(VetId::new(vet)),
            (None, Some(product)) => PoolId::ProductStock(ProductId::new(product)),
            (None, None) => {
                return Err(CliError::InvalidArguments(
                    "one of --vet or --product is required".into(),
                ))
            }
        };

        let config = load_configuration(global)?;
        let service = open_service(global, &config)?;
        let available = service.capacity(pool).map_err(CliError::from)?;

        println!("{available}");
        Ok(())
    }
}
