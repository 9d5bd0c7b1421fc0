use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cashflow::assembler::CashFlowSchedule;
use crate::error::SolarModelError;
use crate::project::parameters::ProjectParameters;
use crate::time_value::{self, compound_factor};
use crate::types::{Energy, Money, Rate};
use crate::SolarModelResult;

/// Outcome of the IRR search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IrrStatus {
    /// A root was found inside the search interval
    Converged,
    /// Cash flows never change sign, so no rate zeroes NPV
    NoSignChange,
    /// Flows change sign but no root lies inside the search interval
    NotBracketed,
    /// The solver ran out of iterations
    NotConverged,
}

/// Headline metrics derived from a [`CashFlowSchedule`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialSummary {
    /// Sum of the discounted cash flow column
    pub npv: Money,
    /// Present only when `irr_status` is `Converged`
    pub irr: Option<Rate>,
    pub irr_status: IrrStatus,
    /// First year cumulative cash flow turns non-negative
    pub simple_payback_year: Option<u32>,
    /// First year cumulative discounted cash flow turns non-negative
    pub discounted_payback_year: Option<u32>,
    /// Discounted lifetime cost per discounted kWh
    pub lcoe_per_kwh: Money,
    pub installed_cost: Money,
    pub incentive_value: Money,
    pub loan_amount: Money,
    /// Cash out of pocket in year 0
    pub net_upfront_outlay: Money,
    pub first_year_production_kwh: Energy,
    pub lifetime_production_kwh: Energy,
    pub lifetime_revenue: Money,
}

/// Compute NPV, IRR, payback and LCOE over the ledger.
///
/// IRR failures never abort the run: they are recorded in `irr_status` and
/// appended to `warnings`.
pub fn summarize(
    params: &ProjectParameters,
    schedule: &CashFlowSchedule,
    warnings: &mut Vec<String>,
) -> SolarModelResult<FinancialSummary> {
    let records = schedule.records();
    let Some(first) = records.first() else {
        return Err(SolarModelError::InsufficientData(
            "Cash flow schedule is empty".into(),
        ));
    };

    let npv: Money = records.iter().map(|r| r.discounted_cash_flow).sum();

    let net_flows = schedule.net_cash_flows();
    let (irr, irr_status) = compute_irr(&net_flows, warnings);

    let simple_payback_year = records
        .iter()
        .find(|r| r.cumulative_cash_flow >= Decimal::ZERO)
        .map(|r| r.year);

    let mut cumulative_discounted = Decimal::ZERO;
    let mut discounted_payback_year = None;
    for r in records {
        cumulative_discounted += r.discounted_cash_flow;
        if cumulative_discounted >= Decimal::ZERO {
            discounted_payback_year = Some(r.year);
            break;
        }
    }

    if simple_payback_year.is_none() {
        warnings.push(format!(
            "Simple payback not reached within the {}-year horizon",
            params.horizon_years()
        ));
    }

    let lcoe_per_kwh = compute_lcoe(params.discount_rate(), schedule)?;

    Ok(FinancialSummary {
        npv,
        irr,
        irr_status,
        simple_payback_year,
        discounted_payback_year,
        lcoe_per_kwh,
        installed_cost: params.installed_cost(),
        incentive_value: first.incentive_applied,
        loan_amount: first.loan_balance,
        net_upfront_outlay: -first.net_cash_flow,
        first_year_production_kwh: records
            .get(1)
            .map(|r| r.energy_produced_kwh)
            .unwrap_or(Decimal::ZERO),
        lifetime_production_kwh: records.iter().map(|r| r.energy_produced_kwh).sum(),
        lifetime_revenue: records.iter().map(|r| r.revenue).sum(),
    })
}

/// IRR with failures mapped to a status instead of an error.
fn compute_irr(cash_flows: &[Money], warnings: &mut Vec<String>) -> (Option<Rate>, IrrStatus) {
    if !time_value::has_sign_change(cash_flows) {
        warnings.push("IRR undefined: cash flows never change sign".into());
        return (None, IrrStatus::NoSignChange);
    }

    match time_value::irr(cash_flows) {
        Ok(rate) => (Some(rate), IrrStatus::Converged),
        Err(e) => {
            tracing::warn!(error = %e, "IRR not reported");
            let status = match e {
                SolarModelError::NumericNonConvergence { iterations: 0, .. } => {
                    warnings.push(format!(
                        "IRR not reported: no root between {} and {}",
                        time_value::IRR_LOWER_BOUND,
                        time_value::IRR_UPPER_BOUND
                    ));
                    IrrStatus::NotBracketed
                }
                other => {
                    warnings.push(format!("IRR did not converge: {other}"));
                    IrrStatus::NotConverged
                }
            };
            (None, status)
        }
    }
}

/// Levelized cost of energy.
///
/// Costs are the year-0 net outlay plus O&M and debt service, less any tax
/// benefit, each discounted to year 0. Energy is discounted the same way.
fn compute_lcoe(discount_rate: Rate, schedule: &CashFlowSchedule) -> SolarModelResult<Money> {
    let mut cost_pv = Decimal::ZERO;
    let mut energy_pv = Decimal::ZERO;

    for r in schedule {
        let factor = compound_factor(discount_rate, r.year);
        let cost = if r.year == 0 {
            -r.net_cash_flow
        } else {
            r.operating_cost + r.debt_service - r.tax_benefit
        };
        cost_pv += cost / factor;
        energy_pv += r.energy_produced_kwh / factor;
    }

    if energy_pv.is_zero() {
        return Err(SolarModelError::DivisionByZero {
            context: "LCOE discounted energy".into(),
        });
    }

    Ok(cost_pv / energy_pv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_irr_status_no_sign_change() {
        let mut warnings = Vec::new();
        let (irr, status) = compute_irr(&[dec!(-100), dec!(-5), dec!(-5)], &mut warnings);
        assert_eq!(irr, None);
        assert_eq!(status, IrrStatus::NoSignChange);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_irr_status_not_bracketed() {
        let mut warnings = Vec::new();
        let (irr, status) = compute_irr(&[dec!(-100), dec!(1000)], &mut warnings);
        assert_eq!(irr, None);
        assert_eq!(status, IrrStatus::NotBracketed);
        assert!(warnings[0].contains("no root"));
    }

    #[test]
    fn test_irr_status_converged() {
        let mut warnings = Vec::new();
        let (irr, status) = compute_irr(&[dec!(-1000), dec!(400), dec!(400), dec!(400)], &mut warnings);
        assert_eq!(status, IrrStatus::Converged);
        assert!((irr.unwrap() - dec!(0.0970)).abs() < dec!(0.0001));
        assert!(warnings.is_empty());
    }
}
