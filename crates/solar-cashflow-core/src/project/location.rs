use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::SolarModelError;
use crate::types::{Energy, Money};
use crate::SolarModelResult;

/// Electricity price and solar resource for one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationProfile {
    /// Display name, e.g. a US state
    pub name: String,
    /// Residential retail electricity price ($/kWh)
    pub electricity_price: Money,
    /// Annual AC output per kW DC installed (kWh/kW-yr)
    pub specific_yield_kwh_per_kw: Energy,
}

/// Residential price ($/kWh) and specific yield (kWh/kW-yr) per state.
const BUILTIN_PROFILES: &[(&str, Decimal, Decimal)] = &[
    ("Alabama", dec!(0.15), dec!(1450)),
    ("Alaska", dec!(0.24), dec!(900)),
    ("Arizona", dec!(0.14), dec!(1750)),
    ("Arkansas", dec!(0.12), dec!(1400)),
    ("California", dec!(0.30), dec!(1600)),
    ("Colorado", dec!(0.15), dec!(1550)),
    ("Connecticut", dec!(0.30), dec!(1250)),
    ("Delaware", dec!(0.16), dec!(1300)),
    ("District of Columbia", dec!(0.17), dec!(1300)),
    ("Florida", dec!(0.15), dec!(1450)),
    ("Georgia", dec!(0.14), dec!(1400)),
    ("Hawaii", dec!(0.43), dec!(1500)),
    ("Idaho", dec!(0.11), dec!(1450)),
    ("Illinois", dec!(0.16), dec!(1250)),
    ("Indiana", dec!(0.15), dec!(1250)),
    ("Iowa", dec!(0.14), dec!(1300)),
    ("Kansas", dec!(0.14), dec!(1450)),
    ("Kentucky", dec!(0.13), dec!(1250)),
    ("Louisiana", dec!(0.12), dec!(1400)),
    ("Maine", dec!(0.26), dec!(1250)),
    ("Maryland", dec!(0.17), dec!(1300)),
    ("Massachusetts", dec!(0.30), dec!(1250)),
    ("Michigan", dec!(0.19), dec!(1200)),
    ("Minnesota", dec!(0.15), dec!(1250)),
    ("Mississippi", dec!(0.13), dec!(1400)),
    ("Missouri", dec!(0.13), dec!(1350)),
    ("Montana", dec!(0.13), dec!(1350)),
    ("Nebraska", dec!(0.12), dec!(1400)),
    ("Nevada", dec!(0.15), dec!(1700)),
    ("New Hampshire", dec!(0.25), dec!(1250)),
    ("New Jersey", dec!(0.18), dec!(1300)),
    ("New Mexico", dec!(0.15), dec!(1700)),
    ("New York", dec!(0.23), dec!(1200)),
    ("North Carolina", dec!(0.14), dec!(1400)),
    ("North Dakota", dec!(0.12), dec!(1300)),
    ("Ohio", dec!(0.16), dec!(1200)),
    ("Oklahoma", dec!(0.13), dec!(1500)),
    ("Oregon", dec!(0.13), dec!(1250)),
    ("Pennsylvania", dec!(0.18), dec!(1250)),
    ("Rhode Island", dec!(0.29), dec!(1250)),
    ("South Carolina", dec!(0.14), dec!(1400)),
    ("South Dakota", dec!(0.13), dec!(1350)),
    ("Tennessee", dec!(0.13), dec!(1350)),
    ("Texas", dec!(0.15), dec!(1500)),
    ("Utah", dec!(0.12), dec!(1550)),
    ("Vermont", dec!(0.21), dec!(1200)),
    ("Virginia", dec!(0.14), dec!(1350)),
    ("Washington", dec!(0.11), dec!(1150)),
    ("West Virginia", dec!(0.15), dec!(1200)),
    ("Wisconsin", dec!(0.17), dec!(1250)),
    ("Wyoming", dec!(0.12), dec!(1450)),
];

/// Lookup table from location name to [`LocationProfile`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationCatalog {
    profiles: Vec<LocationProfile>,
}

impl LocationCatalog {
    /// Built-in table covering the 50 US states and DC.
    pub fn builtin() -> Self {
        let profiles = BUILTIN_PROFILES
            .iter()
            .map(|(name, price, yield_)| LocationProfile {
                name: (*name).to_string(),
                electricity_price: *price,
                specific_yield_kwh_per_kw: *yield_,
            })
            .collect();
        LocationCatalog { profiles }
    }

    /// Build a catalog from caller-supplied profiles (e.g. a CSV price table).
    pub fn from_profiles(mut profiles: Vec<LocationProfile>) -> SolarModelResult<Self> {
        if profiles.is_empty() {
            return Err(SolarModelError::InsufficientData(
                "Location table contains no entries".into(),
            ));
        }

        for profile in &mut profiles {
            profile.name = profile.name.trim().to_string();
            if profile.name.is_empty() {
                return Err(SolarModelError::invalid(
                    "location_table.name",
                    "Location name cannot be empty",
                ));
            }
            if profile.electricity_price <= Decimal::ZERO {
                return Err(SolarModelError::invalid(
                    format!("location_table.{}.electricity_price", profile.name),
                    "Electricity price must be positive",
                ));
            }
            if profile.specific_yield_kwh_per_kw <= Decimal::ZERO {
                return Err(SolarModelError::invalid(
                    format!("location_table.{}.specific_yield_kwh_per_kw", profile.name),
                    "Specific yield must be positive",
                ));
            }
        }

        profiles.sort_by_key(|p| p.name.to_lowercase());
        if let Some(pair) = profiles
            .windows(2)
            .find(|w| w[0].name.eq_ignore_ascii_case(&w[1].name))
        {
            return Err(SolarModelError::invalid(
                "location_table",
                format!("Duplicate location '{}'", pair[1].name),
            ));
        }

        Ok(LocationCatalog { profiles })
    }

    /// Case-insensitive lookup.
    pub fn resolve(&self, name: &str) -> SolarModelResult<&LocationProfile> {
        let wanted = name.trim();
        self.profiles
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                SolarModelError::invalid(
                    "location",
                    format!("Location '{name}' not found in location table"),
                )
            })
    }

    /// Sorted location names, for populating pickers.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.profiles.iter().map(|p| p.name.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn profiles(&self) -> &[LocationProfile] {
        &self.profiles
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl Default for LocationCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
