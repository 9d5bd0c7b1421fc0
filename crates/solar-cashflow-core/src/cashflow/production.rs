use rust_decimal::Decimal;

use crate::error::SolarModelError;
use crate::time_value::compound_factor;
use crate::types::{Energy, Rate};
use crate::SolarModelResult;

/// Annual energy yield for years `0..=horizon_years`.
///
/// Year 0 is the installation year and produces nothing. Year `y >= 1`
/// produces `size × specific_yield × (1 − degradation)^(y−1)`.
pub fn estimate_production(
    system_size_kw_dc: Decimal,
    specific_yield_kwh_per_kw: Energy,
    degradation_rate: Rate,
    horizon_years: u32,
) -> SolarModelResult<Vec<Energy>> {
    if system_size_kw_dc <= Decimal::ZERO {
        return Err(SolarModelError::invalid(
            "system_size_kw_dc",
            "System size must be positive",
        ));
    }
    if specific_yield_kwh_per_kw <= Decimal::ZERO {
        return Err(SolarModelError::invalid(
            "specific_yield_kwh_per_kw",
            "Specific yield must be positive",
        ));
    }
    if degradation_rate < Decimal::ZERO || degradation_rate >= Decimal::ONE {
        return Err(SolarModelError::invalid(
            "degradation_rate",
            format!("Degradation rate {degradation_rate} must be in [0, 1)"),
        ));
    }
    if horizon_years < 1 {
        return Err(SolarModelError::invalid(
            "horizon_years",
            "Horizon must be at least 1 year",
        ));
    }

    let first_year = system_size_kw_dc * specific_yield_kwh_per_kw;
    let mut production = Vec::with_capacity(horizon_years as usize + 1);
    production.push(Decimal::ZERO);
    for year in 1..=horizon_years {
        production.push(first_year * compound_factor(-degradation_rate, year - 1));
    }

    tracing::debug!(
        first_year_kwh = %first_year,
        years = horizon_years,
        "estimated production"
    );
    Ok(production)
}
