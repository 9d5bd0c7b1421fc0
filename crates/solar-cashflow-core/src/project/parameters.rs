use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::SolarModelError;
use crate::project::location::{LocationCatalog, LocationProfile};
use crate::types::{Energy, Money, Rate};
use crate::SolarModelResult;

pub const DEFAULT_HORIZON_YEARS: u32 = 25;
/// Longest supported analysis horizon.
pub const MAX_HORIZON_YEARS: u32 = 50;
/// Longest depreciation table accepted, in years.
pub const MAX_DEPRECIATION_YEARS: u32 = 100;

/// Upper bounds that keep every ledger product within `Decimal` range.
pub const MAX_SYSTEM_SIZE_KW: Decimal = dec!(1000000);
pub const MAX_COST_PER_KW: Money = dec!(100000);
pub const MAX_ELECTRICITY_PRICE: Money = dec!(10);
/// One kW running flat out for a year.
pub const MAX_SPECIFIC_YIELD: Energy = dec!(8760);

const DEFAULT_PRICE_ESCALATION: Rate = dec!(0.025);
const DEFAULT_DEGRADATION: Rate = dec!(0.005);
const DEFAULT_OPERATING_COST_PER_KW: Money = dec!(15);
const DEFAULT_INSTALLED_COST_PER_KW: Money = dec!(2500);
const DEFAULT_INCENTIVE_RATE: Rate = dec!(0.30);
const DEFAULT_DISCOUNT_RATE: Rate = dec!(0.06);

/// Rounding slack allowed when depreciation fractions are summed.
const SCHEDULE_SUM_TOLERANCE: Decimal = dec!(0.000001);

const MACRS_5_YEAR: [Decimal; 6] = [
    dec!(0.20),
    dec!(0.32),
    dec!(0.192),
    dec!(0.1152),
    dec!(0.1152),
    dec!(0.0576),
];

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Loan overlay on the installed cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FinancingTerms {
    /// Share of installed cost borrowed (0..=1)
    pub loan_fraction: Rate,
    /// Annual interest rate on the loan
    pub interest_rate: Rate,
    /// Amortization term in years, at most the analysis horizon
    pub term_years: u32,
}

/// How the depreciable basis is written off over time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum DepreciationMethod {
    /// No depreciation deductions
    None,
    /// 5-year MACRS half-year convention
    #[default]
    Macrs5,
    /// Equal deductions over `years`
    StraightLine { years: u32 },
    /// Explicit fraction of basis per operating year, starting at year 1
    Custom { fractions: Vec<Rate> },
}

impl DepreciationMethod {
    /// Expand the method into a validated year-by-year table.
    pub fn schedule(&self) -> SolarModelResult<DepreciationSchedule> {
        let fractions = match self {
            DepreciationMethod::None => Vec::new(),
            DepreciationMethod::Macrs5 => MACRS_5_YEAR.to_vec(),
            DepreciationMethod::StraightLine { years } => {
                if *years == 0 {
                    return Err(SolarModelError::invalid(
                        "depreciation.years",
                        "Straight-line life must be at least 1 year",
                    ));
                }
                if *years > MAX_DEPRECIATION_YEARS {
                    return Err(SolarModelError::invalid(
                        "depreciation.years",
                        format!("Straight-line life must be at most {MAX_DEPRECIATION_YEARS} years"),
                    ));
                }
                let annual = Decimal::ONE / Decimal::from(*years);
                vec![annual; *years as usize]
            }
            DepreciationMethod::Custom { fractions } => fractions.clone(),
        };
        DepreciationSchedule::new(fractions)
    }
}

/// Year-by-year deduction fractions of the depreciable basis.
///
/// Entry `i` applies to operating year `i + 1`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DepreciationSchedule {
    fractions: Vec<Rate>,
}

impl DepreciationSchedule {
    pub fn new(fractions: Vec<Rate>) -> SolarModelResult<Self> {
        if fractions.len() > MAX_DEPRECIATION_YEARS as usize {
            return Err(SolarModelError::invalid(
                "depreciation.fractions",
                format!(
                    "Schedule has {} entries, at most {MAX_DEPRECIATION_YEARS} allowed",
                    fractions.len()
                ),
            ));
        }
        for (i, f) in fractions.iter().enumerate() {
            if *f < Decimal::ZERO || *f > Decimal::ONE {
                return Err(SolarModelError::invalid(
                    format!("depreciation.fractions[{i}]"),
                    format!("Deduction fraction {f} must be between 0 and 1"),
                ));
            }
        }
        let total: Decimal = fractions.iter().sum();
        if total > Decimal::ONE + SCHEDULE_SUM_TOLERANCE {
            return Err(SolarModelError::invalid(
                "depreciation.fractions",
                format!("Deduction fractions sum to {total}, more than the full basis"),
            ));
        }
        Ok(DepreciationSchedule { fractions })
    }

    /// Deduction fraction for `year`; zero for year 0 and beyond the table.
    pub fn fraction_for_year(&self, year: u32) -> Rate {
        if year == 0 {
            return Decimal::ZERO;
        }
        self.fractions
            .get((year - 1) as usize)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    pub fn fractions(&self) -> &[Rate] {
        &self.fractions
    }

    /// Number of deduction years in the table.
    pub fn len(&self) -> usize {
        self.fractions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fractions.is_empty()
    }
}

fn default_horizon_years() -> u32 {
    DEFAULT_HORIZON_YEARS
}
fn default_price_escalation() -> Rate {
    DEFAULT_PRICE_ESCALATION
}
fn default_degradation() -> Rate {
    DEFAULT_DEGRADATION
}
fn default_operating_cost_per_kw() -> Money {
    DEFAULT_OPERATING_COST_PER_KW
}
fn default_installed_cost_per_kw() -> Money {
    DEFAULT_INSTALLED_COST_PER_KW
}
fn default_incentive_rate() -> Rate {
    DEFAULT_INCENTIVE_RATE
}
fn default_discount_rate() -> Rate {
    DEFAULT_DISCOUNT_RATE
}

/// Unvalidated project inputs as they arrive from a form, file or stdin.
///
/// Only `location` and `system_size_kw_dc` are required; every economic
/// assumption falls back to a residential default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectInputs {
    /// Location name resolved through a [`LocationCatalog`]
    pub location: String,
    /// Nameplate DC capacity (kW)
    pub system_size_kw_dc: Decimal,
    /// Number of operating years after commissioning
    #[serde(default = "default_horizon_years")]
    pub horizon_years: u32,
    /// Overrides the location's electricity price ($/kWh)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub electricity_price: Option<Money>,
    /// Overrides the location's specific yield (kWh/kW-yr)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specific_yield_kwh_per_kw: Option<Energy>,
    /// Annual growth of the electricity price
    #[serde(default = "default_price_escalation")]
    pub price_escalation_rate: Rate,
    /// Annual growth of O&M cost; equals the price escalation when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_escalation_rate: Option<Rate>,
    /// Annual fractional loss of output
    #[serde(default = "default_degradation")]
    pub degradation_rate: Rate,
    /// O&M cost in year 1 ($/kW-yr)
    #[serde(default = "default_operating_cost_per_kw")]
    pub operating_cost_per_kw: Money,
    /// Installed cost ($/kW DC)
    #[serde(default = "default_installed_cost_per_kw")]
    pub installed_cost_per_kw: Money,
    /// One-time incentive as a fraction of installed cost
    #[serde(default = "default_incentive_rate")]
    pub incentive_rate: Rate,
    /// Discount rate for NPV, discounted payback and LCOE
    #[serde(default = "default_discount_rate")]
    pub discount_rate: Rate,
    /// Marginal tax rate; enables the depreciation tax shield when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_rate: Option<Rate>,
    #[serde(default)]
    pub depreciation: DepreciationMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub financing: Option<FinancingTerms>,
    /// Date the system enters service; dates each annual record when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commissioning_date: Option<NaiveDate>,
}

impl ProjectInputs {
    /// Inputs for a location, size and horizon with every other assumption
    /// at its default.
    pub fn new(location: impl Into<String>, system_size_kw_dc: Decimal, horizon_years: u32) -> Self {
        ProjectInputs {
            location: location.into(),
            system_size_kw_dc,
            horizon_years,
            electricity_price: None,
            specific_yield_kwh_per_kw: None,
            price_escalation_rate: DEFAULT_PRICE_ESCALATION,
            cost_escalation_rate: None,
            degradation_rate: DEFAULT_DEGRADATION,
            operating_cost_per_kw: DEFAULT_OPERATING_COST_PER_KW,
            installed_cost_per_kw: DEFAULT_INSTALLED_COST_PER_KW,
            incentive_rate: DEFAULT_INCENTIVE_RATE,
            discount_rate: DEFAULT_DISCOUNT_RATE,
            tax_rate: None,
            depreciation: DepreciationMethod::default(),
            financing: None,
            commissioning_date: None,
        }
    }

    /// Translate a loosely-typed dictionary (e.g. dashboard state) into inputs.
    pub fn from_value(value: serde_json::Value) -> SolarModelResult<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

// ---------------------------------------------------------------------------
// Validated parameters
// ---------------------------------------------------------------------------

/// Validated, immutable parameter set consumed by the cash-flow pipeline.
///
/// Only obtainable through [`ProjectParameters::resolve`], so every value
/// seen by the engine has passed range checks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectParameters {
    location: LocationProfile,
    system_size_kw_dc: Decimal,
    horizon_years: u32,
    electricity_price: Money,
    specific_yield_kwh_per_kw: Energy,
    price_escalation_rate: Rate,
    cost_escalation_rate: Rate,
    degradation_rate: Rate,
    operating_cost_per_kw: Money,
    installed_cost_per_kw: Money,
    incentive_rate: Rate,
    discount_rate: Rate,
    tax_rate: Option<Rate>,
    depreciation: DepreciationSchedule,
    financing: Option<FinancingTerms>,
    commissioning_date: Option<NaiveDate>,
}

impl ProjectParameters {
    /// Validate `inputs` and resolve the location through `catalog`.
    ///
    /// Fails on the first out-of-range field; nothing is clamped.
    pub fn resolve(inputs: &ProjectInputs, catalog: &LocationCatalog) -> SolarModelResult<Self> {
        require_positive("system_size_kw_dc", inputs.system_size_kw_dc)?;
        require_at_most("system_size_kw_dc", inputs.system_size_kw_dc, MAX_SYSTEM_SIZE_KW)?;

        if inputs.horizon_years < 1 {
            return Err(SolarModelError::invalid(
                "horizon_years",
                "Horizon must be at least 1 year",
            ));
        }
        if inputs.horizon_years > MAX_HORIZON_YEARS {
            return Err(SolarModelError::invalid(
                "horizon_years",
                format!("Horizon must be at most {MAX_HORIZON_YEARS} years"),
            ));
        }

        require_unit_rate("price_escalation_rate", inputs.price_escalation_rate)?;
        if let Some(rate) = inputs.cost_escalation_rate {
            require_unit_rate("cost_escalation_rate", rate)?;
        }
        if inputs.degradation_rate < Decimal::ZERO || inputs.degradation_rate >= Decimal::ONE {
            return Err(SolarModelError::invalid(
                "degradation_rate",
                format!(
                    "Degradation rate {} must be in [0, 1)",
                    inputs.degradation_rate
                ),
            ));
        }
        if inputs.operating_cost_per_kw < Decimal::ZERO {
            return Err(SolarModelError::invalid(
                "operating_cost_per_kw",
                "Operating cost cannot be negative",
            ));
        }
        require_at_most("operating_cost_per_kw", inputs.operating_cost_per_kw, MAX_COST_PER_KW)?;
        require_positive("installed_cost_per_kw", inputs.installed_cost_per_kw)?;
        require_at_most("installed_cost_per_kw", inputs.installed_cost_per_kw, MAX_COST_PER_KW)?;
        require_unit_rate("incentive_rate", inputs.incentive_rate)?;
        require_unit_rate("discount_rate", inputs.discount_rate)?;
        if let Some(rate) = inputs.tax_rate {
            require_unit_rate("tax_rate", rate)?;
        }

        let location = catalog.resolve(&inputs.location)?.clone();
        let electricity_price = inputs
            .electricity_price
            .unwrap_or(location.electricity_price);
        require_positive("electricity_price", electricity_price)?;
        require_at_most("electricity_price", electricity_price, MAX_ELECTRICITY_PRICE)?;
        let specific_yield_kwh_per_kw = inputs
            .specific_yield_kwh_per_kw
            .unwrap_or(location.specific_yield_kwh_per_kw);
        require_positive("specific_yield_kwh_per_kw", specific_yield_kwh_per_kw)?;
        require_at_most(
            "specific_yield_kwh_per_kw",
            specific_yield_kwh_per_kw,
            MAX_SPECIFIC_YIELD,
        )?;

        if let Some(ref financing) = inputs.financing {
            validate_financing(financing, inputs.horizon_years)?;
        }

        let depreciation = inputs.depreciation.schedule()?;

        Ok(ProjectParameters {
            location,
            system_size_kw_dc: inputs.system_size_kw_dc,
            horizon_years: inputs.horizon_years,
            electricity_price,
            specific_yield_kwh_per_kw,
            price_escalation_rate: inputs.price_escalation_rate,
            cost_escalation_rate: inputs
                .cost_escalation_rate
                .unwrap_or(inputs.price_escalation_rate),
            degradation_rate: inputs.degradation_rate,
            operating_cost_per_kw: inputs.operating_cost_per_kw,
            installed_cost_per_kw: inputs.installed_cost_per_kw,
            incentive_rate: inputs.incentive_rate,
            discount_rate: inputs.discount_rate,
            tax_rate: inputs.tax_rate,
            depreciation,
            financing: inputs.financing.clone(),
            commissioning_date: inputs.commissioning_date,
        })
    }

    pub fn location(&self) -> &LocationProfile {
        &self.location
    }
    pub fn system_size_kw_dc(&self) -> Decimal {
        self.system_size_kw_dc
    }
    pub fn horizon_years(&self) -> u32 {
        self.horizon_years
    }
    /// Year-1 electricity price after any override ($/kWh)
    pub fn electricity_price(&self) -> Money {
        self.electricity_price
    }
    /// Specific yield after any override (kWh/kW-yr)
    pub fn specific_yield_kwh_per_kw(&self) -> Energy {
        self.specific_yield_kwh_per_kw
    }
    pub fn price_escalation_rate(&self) -> Rate {
        self.price_escalation_rate
    }
    /// O&M escalation; equals the price escalation unless overridden
    pub fn cost_escalation_rate(&self) -> Rate {
        self.cost_escalation_rate
    }
    pub fn degradation_rate(&self) -> Rate {
        self.degradation_rate
    }
    pub fn operating_cost_per_kw(&self) -> Money {
        self.operating_cost_per_kw
    }
    pub fn installed_cost_per_kw(&self) -> Money {
        self.installed_cost_per_kw
    }
    pub fn incentive_rate(&self) -> Rate {
        self.incentive_rate
    }
    pub fn discount_rate(&self) -> Rate {
        self.discount_rate
    }
    pub fn tax_rate(&self) -> Option<Rate> {
        self.tax_rate
    }
    pub fn depreciation(&self) -> &DepreciationSchedule {
        &self.depreciation
    }
    pub fn financing(&self) -> Option<&FinancingTerms> {
        self.financing.as_ref()
    }
    pub fn commissioning_date(&self) -> Option<NaiveDate> {
        self.commissioning_date
    }

    /// Upfront installed cost = size × cost per kW.
    pub fn installed_cost(&self) -> Money {
        self.system_size_kw_dc * self.installed_cost_per_kw
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn require_positive(field: &str, value: Decimal) -> SolarModelResult<()> {
    if value <= Decimal::ZERO {
        return Err(SolarModelError::invalid(
            field,
            format!("Value {value} must be positive"),
        ));
    }
    Ok(())
}

fn require_at_most(field: &str, value: Decimal, max: Decimal) -> SolarModelResult<()> {
    if value > max {
        return Err(SolarModelError::invalid(
            field,
            format!("Value {value} exceeds the maximum of {max}"),
        ));
    }
    Ok(())
}

fn require_unit_rate(field: &str, value: Rate) -> SolarModelResult<()> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(SolarModelError::invalid(
            field,
            format!("Rate {value} must be between 0 and 1"),
        ));
    }
    Ok(())
}

pub(crate) fn validate_financing(financing: &FinancingTerms, horizon_years: u32) -> SolarModelResult<()> {
    require_unit_rate("financing.loan_fraction", financing.loan_fraction)?;
    require_unit_rate("financing.interest_rate", financing.interest_rate)?;
    if financing.term_years < 1 {
        return Err(SolarModelError::invalid(
            "financing.term_years",
            "Loan term must be at least 1 year",
        ));
    }
    if financing.term_years > horizon_years {
        return Err(SolarModelError::invalid(
            "financing.term_years",
            format!(
                "Loan term of {} years exceeds the {horizon_years}-year horizon",
                financing.term_years
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> ProjectInputs {
        ProjectInputs::new("California", dec!(10), 25)
    }

    fn resolve(inputs: &ProjectInputs) -> SolarModelResult<ProjectParameters> {
        ProjectParameters::resolve(inputs, &LocationCatalog::builtin())
    }

    fn assert_invalid(result: SolarModelResult<ProjectParameters>, expected_field: &str) {
        match result {
            Err(SolarModelError::InvalidParameter { field, .. }) => {
                assert_eq!(field, expected_field)
            }
            other => panic!("Expected InvalidParameter on {expected_field}, got: {other:?}"),
        }
    }

    #[test]
    fn test_defaults_resolve_from_location() {
        let params = resolve(&inputs()).unwrap();
        assert_eq!(params.electricity_price(), dec!(0.30));
        assert_eq!(params.specific_yield_kwh_per_kw(), dec!(1600));
        assert_eq!(params.installed_cost(), dec!(25000));
        assert_eq!(params.cost_escalation_rate(), params.price_escalation_rate());
        assert_eq!(params.depreciation().len(), 6);
    }

    #[test]
    fn test_overrides_take_precedence() {
        let mut i = inputs();
        i.electricity_price = Some(dec!(0.15));
        i.specific_yield_kwh_per_kw = Some(dec!(1400));
        i.cost_escalation_rate = Some(dec!(0.01));
        let params = resolve(&i).unwrap();
        assert_eq!(params.electricity_price(), dec!(0.15));
        assert_eq!(params.specific_yield_kwh_per_kw(), dec!(1400));
        assert_eq!(params.cost_escalation_rate(), dec!(0.01));
        assert_eq!(params.price_escalation_rate(), dec!(0.025));
    }

    #[test]
    fn test_rejects_non_positive_size() {
        let mut i = inputs();
        i.system_size_kw_dc = Decimal::ZERO;
        assert_invalid(resolve(&i), "system_size_kw_dc");
    }

    #[test]
    fn test_rejects_zero_and_excessive_horizon() {
        let mut i = inputs();
        i.horizon_years = 0;
        assert_invalid(resolve(&i), "horizon_years");
        i.horizon_years = MAX_HORIZON_YEARS + 1;
        assert_invalid(resolve(&i), "horizon_years");
    }

    #[test]
    fn test_rejects_degradation_of_one() {
        let mut i = inputs();
        i.degradation_rate = Decimal::ONE;
        assert_invalid(resolve(&i), "degradation_rate");
    }

    #[test]
    fn test_rejects_rates_outside_unit_interval() {
        let mut i = inputs();
        i.discount_rate = dec!(1.5);
        assert_invalid(resolve(&i), "discount_rate");

        let mut i = inputs();
        i.incentive_rate = dec!(-0.1);
        assert_invalid(resolve(&i), "incentive_rate");

        let mut i = inputs();
        i.tax_rate = Some(dec!(2));
        assert_invalid(resolve(&i), "tax_rate");
    }

    #[test]
    fn test_rejects_unknown_location() {
        let mut i = inputs();
        i.location = "Narnia".into();
        assert_invalid(resolve(&i), "location");
    }

    #[test]
    fn test_rejects_loan_term_beyond_horizon() {
        let mut i = inputs();
        i.horizon_years = 10;
        i.financing = Some(FinancingTerms {
            loan_fraction: dec!(0.8),
            interest_rate: dec!(0.07),
            term_years: 15,
        });
        assert_invalid(resolve(&i), "financing.term_years");
    }

    #[test]
    fn test_rejects_loan_fraction_above_one() {
        let mut i = inputs();
        i.financing = Some(FinancingTerms {
            loan_fraction: dec!(1.2),
            interest_rate: dec!(0.07),
            term_years: 10,
        });
        assert_invalid(resolve(&i), "financing.loan_fraction");
    }

    #[test]
    fn test_rejects_over_allocated_depreciation() {
        let mut i = inputs();
        i.depreciation = DepreciationMethod::Custom {
            fractions: vec![dec!(0.6), dec!(0.6)],
        };
        assert_invalid(resolve(&i), "depreciation.fractions");
    }

    #[test]
    fn test_rejects_values_above_upper_bounds() {
        let mut i = inputs();
        i.system_size_kw_dc = dec!(1e26);
        assert_invalid(resolve(&i), "system_size_kw_dc");

        let mut i = inputs();
        i.installed_cost_per_kw = MAX_COST_PER_KW + Decimal::ONE;
        assert_invalid(resolve(&i), "installed_cost_per_kw");

        let mut i = inputs();
        i.operating_cost_per_kw = dec!(1e20);
        assert_invalid(resolve(&i), "operating_cost_per_kw");

        let mut i = inputs();
        i.electricity_price = Some(dec!(1e15));
        assert_invalid(resolve(&i), "electricity_price");

        let mut i = inputs();
        i.specific_yield_kwh_per_kw = Some(dec!(8761));
        assert_invalid(resolve(&i), "specific_yield_kwh_per_kw");
    }

    #[test]
    fn test_upper_bounds_are_inclusive() {
        let mut i = inputs();
        i.system_size_kw_dc = MAX_SYSTEM_SIZE_KW;
        i.installed_cost_per_kw = MAX_COST_PER_KW;
        i.operating_cost_per_kw = MAX_COST_PER_KW;
        i.electricity_price = Some(MAX_ELECTRICITY_PRICE);
        i.specific_yield_kwh_per_kw = Some(MAX_SPECIFIC_YIELD);
        let params = resolve(&i).unwrap();
        assert_eq!(params.installed_cost(), dec!(100000000000));
    }

    #[test]
    fn test_rejects_overlong_straight_line_life() {
        let mut i = inputs();
        i.depreciation = DepreciationMethod::StraightLine { years: 4_000_000_000 };
        assert_invalid(resolve(&i), "depreciation.years");

        let schedule = DepreciationMethod::StraightLine {
            years: MAX_DEPRECIATION_YEARS,
        }
        .schedule()
        .unwrap();
        assert_eq!(schedule.len(), MAX_DEPRECIATION_YEARS as usize);
    }

    #[test]
    fn test_rejects_overlong_custom_schedule() {
        let mut i = inputs();
        i.depreciation = DepreciationMethod::Custom {
            fractions: vec![Decimal::ZERO; MAX_DEPRECIATION_YEARS as usize + 1],
        };
        assert_invalid(resolve(&i), "depreciation.fractions");
    }

    #[test]
    fn test_straight_line_schedule() {
        let schedule = DepreciationMethod::StraightLine { years: 4 }.schedule().unwrap();
        assert_eq!(schedule.fractions(), &[dec!(0.25); 4]);
        assert_eq!(schedule.fraction_for_year(0), Decimal::ZERO);
        assert_eq!(schedule.fraction_for_year(4), dec!(0.25));
        assert_eq!(schedule.fraction_for_year(5), Decimal::ZERO);
    }

    #[test]
    fn test_macrs_sums_to_one() {
        let schedule = DepreciationMethod::Macrs5.schedule().unwrap();
        let total: Decimal = schedule.fractions().iter().sum();
        assert_eq!(total, Decimal::ONE);
    }

    #[test]
    fn test_from_value_applies_defaults() {
        let value = serde_json::json!({
            "location": "Texas",
            "system_size_kw_dc": "7.5",
            "financing": { "loan_fraction": "0.5", "interest_rate": "0.06", "term_years": 10 },
            "depreciation": { "method": "straight_line", "years": 5 }
        });
        let i = ProjectInputs::from_value(value).unwrap();
        assert_eq!(i.horizon_years, DEFAULT_HORIZON_YEARS);
        assert_eq!(i.discount_rate, dec!(0.06));
        assert_eq!(i.depreciation, DepreciationMethod::StraightLine { years: 5 });
        assert!(resolve(&i).is_ok());
    }

    #[test]
    fn test_from_value_rejects_unknown_fields() {
        let value = serde_json::json!({
            "location": "Texas",
            "system_size_kw_dc": 7.5,
            "sytem_size": 9
        });
        assert!(matches!(
            ProjectInputs::from_value(value),
            Err(SolarModelError::SerializationError(_))
        ));
    }
}
