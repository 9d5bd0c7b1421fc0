use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::cashflow::assembler::{assemble, CashFlowSchedule};
use crate::cashflow::financing::overlay_financing;
use crate::cashflow::incentives::apply_incentives;
use crate::cashflow::metrics::{summarize, FinancialSummary};
use crate::cashflow::production::estimate_production;
use crate::cashflow::revenue::project_revenue;
use crate::project::parameters::ProjectParameters;
use crate::types::{with_metadata, ComputationOutput};
use crate::SolarModelResult;

/// Ledger plus headline metrics for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolarProjectOutput {
    pub summary: FinancialSummary,
    pub schedule: CashFlowSchedule,
}

/// Run every stage in order. Deterministic: identical parameters always give
/// an identical [`SolarProjectOutput`]. Caveats are appended to `warnings`.
pub fn run_pipeline(
    params: &ProjectParameters,
    warnings: &mut Vec<String>,
) -> SolarModelResult<SolarProjectOutput> {
    let production = estimate_production(
        params.system_size_kw_dc(),
        params.specific_yield_kwh_per_kw(),
        params.degradation_rate(),
        params.horizon_years(),
    )?;
    let revenue = project_revenue(&production, params);
    let incentives = apply_incentives(params);
    let financing = overlay_financing(
        params.installed_cost(),
        params.financing(),
        params.horizon_years(),
    )?;
    let schedule = assemble(params, &production, &revenue, &incentives, &financing)?;

    tracing::debug!(
        records = schedule.len(),
        incentive = %incentives.incentive_applied,
        loan = %financing.loan_amount,
        "assembled cash flow schedule"
    );

    if !incentives.tax_modeled && incentives.deductions.iter().any(|d| !d.is_zero()) {
        warnings.push(
            "No tax rate configured: depreciation deductions are reported but excluded from net cash flow"
                .into(),
        );
    }
    let schedule_years = params.depreciation().len();
    if schedule_years > params.horizon_years() as usize {
        warnings.push(format!(
            "Depreciation schedule runs {schedule_years} years; deductions after year {} are dropped",
            params.horizon_years()
        ));
    }

    let summary = summarize(params, &schedule, warnings)?;

    Ok(SolarProjectOutput { summary, schedule })
}

/// Build the full solar cash-flow projection for `params`.
///
/// Wraps [`run_pipeline`] in the standard output envelope with methodology,
/// assumptions, warnings and timing metadata.
pub fn model_solar_project(
    params: &ProjectParameters,
) -> SolarModelResult<ComputationOutput<SolarProjectOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let output = run_pipeline(params, &mut warnings)?;

    if output.summary.npv.is_sign_negative() && !output.summary.npv.is_zero() {
        warnings.push(format!(
            "NPV of {} is negative at a {} discount rate",
            output.summary.npv.round_dp(2),
            params.discount_rate()
        ));
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Rooftop Solar Cash Flow Projection",
        &serde_json::json!({
            "location": params.location().name,
            "system_size_kw_dc": params.system_size_kw_dc().to_string(),
            "horizon_years": params.horizon_years(),
            "electricity_price": params.electricity_price().to_string(),
            "specific_yield_kwh_per_kw": params.specific_yield_kwh_per_kw().to_string(),
            "price_escalation_rate": params.price_escalation_rate().to_string(),
            "cost_escalation_rate": params.cost_escalation_rate().to_string(),
            "degradation_rate": params.degradation_rate().to_string(),
            "installed_cost_per_kw": params.installed_cost_per_kw().to_string(),
            "incentive_rate": params.incentive_rate().to_string(),
            "discount_rate": params.discount_rate().to_string(),
            "tax_rate": params.tax_rate().map(|r| r.to_string()),
            "financing": params.financing(),
        }),
        warnings,
        elapsed,
        output,
    ))
}
