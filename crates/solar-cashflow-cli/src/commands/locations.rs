use clap::Args;
use serde_json::Value;

use solar_cashflow_core::LocationCatalog;

use crate::input;

/// Arguments for listing locations
#[derive(Args)]
pub struct LocationsArgs {
    /// CSV location table to list instead of the built-in one
    #[arg(long)]
    pub prices: Option<String>,
}

pub fn run_locations(args: LocationsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let catalog = match args.prices {
        Some(ref path) => input::location_table::read_location_table(path)?,
        None => LocationCatalog::builtin(),
    };

    let mut profiles = catalog.profiles().to_vec();
    profiles.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(serde_json::to_value(profiles)?)
}
