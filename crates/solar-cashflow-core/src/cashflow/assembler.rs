use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cashflow::financing::FinancingSchedule;
use crate::cashflow::incentives::IncentiveSchedule;
use crate::cashflow::revenue::RevenueLine;
use crate::error::SolarModelError;
use crate::project::parameters::ProjectParameters;
use crate::time_value::compound_factor;
use crate::types::{Energy, Money};
use crate::SolarModelResult;

/// One row of the cash-flow ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualRecord {
    /// 0 = installation, 1..=horizon = operating years
    pub year: u32,
    /// End of the period, when a commissioning date is known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_end: Option<NaiveDate>,
    /// Escalated electricity price ($/kWh)
    pub electricity_price: Option<Money>,
    pub energy_produced_kwh: Energy,
    pub revenue: Money,
    pub operating_cost: Money,
    /// Informational unless a tax rate is configured
    pub depreciation_deduction: Money,
    /// Cash value of the deduction; zero without a tax rate
    pub tax_benefit: Money,
    /// Non-zero in year 0 only
    pub incentive_applied: Money,
    pub debt_service: Money,
    pub interest_paid: Money,
    pub principal_paid: Money,
    /// Outstanding loan at year end
    pub loan_balance: Money,
    pub net_cash_flow: Money,
    pub cumulative_cash_flow: Money,
    pub discounted_cash_flow: Money,
}

/// Chronologically ordered ledger covering years `0..=horizon`.
///
/// Produced by [`assemble`]; row order is year order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CashFlowSchedule {
    records: Vec<AnnualRecord>,
}

impl CashFlowSchedule {
    pub fn records(&self) -> &[AnnualRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AnnualRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn net_cash_flows(&self) -> Vec<Money> {
        self.records.iter().map(|r| r.net_cash_flow).collect()
    }

    pub fn discounted_cash_flows(&self) -> Vec<Money> {
        self.records.iter().map(|r| r.discounted_cash_flow).collect()
    }
}

impl<'a> IntoIterator for &'a CashFlowSchedule {
    type Item = &'a AnnualRecord;
    type IntoIter = std::slice::Iter<'a, AnnualRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Merge the stage outputs into the annual ledger.
///
/// Year 0 nets the installed cost against the incentive and the loan draw.
/// Operating years net revenue against O&M and debt service, plus the tax
/// benefit of depreciation when a tax rate is configured. Cumulative and
/// discounted columns are filled in the same forward pass.
pub fn assemble(
    params: &ProjectParameters,
    production: &[Energy],
    revenue: &[RevenueLine],
    incentives: &IncentiveSchedule,
    financing: &FinancingSchedule,
) -> SolarModelResult<CashFlowSchedule> {
    let periods = params.horizon_years() as usize + 1;
    check_length("production", production.len(), periods)?;
    check_length("revenue", revenue.len(), periods)?;
    check_length("depreciation", incentives.deductions.len(), periods)?;
    check_length("tax benefit", incentives.tax_benefits.len(), periods)?;
    check_length("debt service", financing.debt_service.len(), periods)?;

    let mut records = Vec::with_capacity(periods);
    let mut cumulative = Decimal::ZERO;

    for year in 0..periods {
        let (net_cash_flow, incentive_applied) = if year == 0 {
            let outlay =
                incentives.installed_cost - incentives.incentive_applied - financing.loan_amount;
            (-outlay, incentives.incentive_applied)
        } else {
            let net = revenue[year].revenue - revenue[year].operating_cost
                - financing.debt_service[year]
                + incentives.tax_benefits[year];
            (net, Decimal::ZERO)
        };

        cumulative += net_cash_flow;
        let discounted_cash_flow =
            net_cash_flow / compound_factor(params.discount_rate(), year as u32);

        records.push(AnnualRecord {
            year: year as u32,
            period_end: period_end(params.commissioning_date(), year as u32)?,
            electricity_price: revenue[year].electricity_price,
            energy_produced_kwh: production[year],
            revenue: revenue[year].revenue,
            operating_cost: revenue[year].operating_cost,
            depreciation_deduction: incentives.deductions[year],
            tax_benefit: incentives.tax_benefits[year],
            incentive_applied,
            debt_service: financing.debt_service[year],
            interest_paid: financing.interest[year],
            principal_paid: financing.principal[year],
            loan_balance: financing.balance[year],
            net_cash_flow,
            cumulative_cash_flow: cumulative,
            discounted_cash_flow,
        });
    }

    Ok(CashFlowSchedule { records })
}

fn check_length(label: &str, actual: usize, expected: usize) -> SolarModelResult<()> {
    if actual != expected {
        return Err(SolarModelError::InsufficientData(format!(
            "{label} series has {actual} entries, expected {expected}"
        )));
    }
    Ok(())
}

fn period_end(commissioning: Option<NaiveDate>, year: u32) -> SolarModelResult<Option<NaiveDate>> {
    let Some(start) = commissioning else {
        return Ok(None);
    };
    start
        .checked_add_months(Months::new(12 * year))
        .map(Some)
        .ok_or_else(|| {
            SolarModelError::DateError(format!("year {year} after {start} is out of range"))
        })
}
