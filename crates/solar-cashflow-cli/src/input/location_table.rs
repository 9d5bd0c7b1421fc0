use csv::{ReaderBuilder, Trim};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::error::Error;
use std::fs::File;
use std::io::Read;

use solar_cashflow_core::{LocationCatalog, LocationProfile};

use crate::input::file::resolve_path;

/// Specific yield for rows that give none and match no built-in location.
const FALLBACK_SPECIFIC_YIELD: Decimal = dec!(1400);

/// One row of a state price table.
#[derive(Debug, Deserialize)]
struct PriceRow {
    state: String,
    #[serde(rename = "cost_per_kWh")]
    cost_per_kwh: Decimal,
    #[serde(default)]
    specific_yield_kwh_per_kw: Option<Decimal>,
}

/// Load a location catalog from a CSV file with columns `state`,
/// `cost_per_kWh` and optionally `specific_yield_kwh_per_kw`.
pub fn read_location_table(path: &str) -> Result<LocationCatalog, Box<dyn Error>> {
    let canonical = resolve_path(path)?;
    let file = File::open(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;
    parse_location_table(file)
        .map_err(|e| format!("Invalid location table '{}': {}", canonical.display(), e).into())
}

/// Parse a price table. Rows without a yield borrow it from the built-in
/// location of the same name, else [`FALLBACK_SPECIFIC_YIELD`].
pub fn parse_location_table<R: Read>(reader: R) -> Result<LocationCatalog, Box<dyn Error>> {
    let builtin = LocationCatalog::builtin();
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let mut profiles = Vec::new();
    for (i, row) in rdr.deserialize::<PriceRow>().enumerate() {
        let row = row.map_err(|e| format!("row {}: {}", i + 1, e))?;
        let specific_yield = match row.specific_yield_kwh_per_kw {
            Some(y) => y,
            None => builtin
                .resolve(&row.state)
                .map(|p| p.specific_yield_kwh_per_kw)
                .unwrap_or(FALLBACK_SPECIFIC_YIELD),
        };
        profiles.push(LocationProfile {
            name: row.state,
            electricity_price: row.cost_per_kwh,
            specific_yield_kwh_per_kw: specific_yield,
        });
    }

    tracing::debug!(rows = profiles.len(), "loaded location table");
    Ok(LocationCatalog::from_profiles(profiles)?)
}
