use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::project::parameters::ProjectParameters;
use crate::types::Money;

/// Share of the incentive that reduces the depreciable basis.
const BASIS_REDUCTION_SHARE: Decimal = dec!(0.5);

/// Upfront cost, one-time incentive and the depreciation timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncentiveSchedule {
    /// Size × installed cost per kW
    pub installed_cost: Money,
    /// Year-0 credit = installed cost × incentive rate
    pub incentive_applied: Money,
    /// Installed cost less half the incentive
    pub depreciable_basis: Money,
    /// Deduction per year, index 0 = year 0 (always zero)
    pub deductions: Vec<Money>,
    /// Cash value of each deduction at the configured tax rate
    pub tax_benefits: Vec<Money>,
    /// Whether a tax rate was configured; deductions only move cash if so
    pub tax_modeled: bool,
}

/// Apply the incentive and lay out depreciation for years `0..=horizon`.
pub fn apply_incentives(params: &ProjectParameters) -> IncentiveSchedule {
    let installed_cost = params.installed_cost();
    let incentive_applied = installed_cost * params.incentive_rate();
    let depreciable_basis = installed_cost - BASIS_REDUCTION_SHARE * incentive_applied;

    let deductions: Vec<Money> = (0..=params.horizon_years())
        .map(|year| depreciable_basis * params.depreciation().fraction_for_year(year))
        .collect();

    let tax_benefits = match params.tax_rate() {
        Some(rate) => deductions.iter().map(|d| d * rate).collect(),
        None => vec![Decimal::ZERO; deductions.len()],
    };

    IncentiveSchedule {
        installed_cost,
        incentive_applied,
        depreciable_basis,
        deductions,
        tax_benefits,
        tax_modeled: params.tax_rate().is_some(),
    }
}
