use anyhow::Context;
use shipout::{OmsClient, ShipoutError, WarehousesQueryParams};

use crate::cli::args::{AuthArgs, WarehousesArgs};
use crate::exit_codes::{self, SUCCESS};

pub async fn run(auth: &AuthArgs, args: WarehousesArgs) -> anyhow::Result<i32> {
    let oms = match OmsClient::new(auth.to_config()) {
        Ok(oms) => oms,
        Err(e) => return Ok(report(&e)),
    };

    let params = WarehousesQueryParams { name: args.name };
    match oms.base_info().warehouses(&params).await {
        Ok(warehouses) => {
            let out = serde_json::to_string_pretty(&warehouses)
                .context("failed to render warehouses as JSON")?;
            println!("{out}");
            Ok(SUCCESS)
        }
        Err(e) => Ok(report(&e)),
    }
}

fn report(err: &ShipoutError) -> i32 {
    eprintln!("error: {err}");
    exit_codes::for_error(err)
}
