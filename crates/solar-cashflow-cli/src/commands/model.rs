use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use solar_cashflow_core::project::parameters::{FinancingTerms, DEFAULT_HORIZON_YEARS};
use solar_cashflow_core::{model_solar_project, LocationCatalog, ProjectInputs, ProjectParameters};

use crate::input;

/// Arguments for a cash-flow projection
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ModelArgs {
    /// Path to a JSON or YAML parameter file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// CSV location table replacing the built-in one
    #[arg(long)]
    pub prices: Option<String>,

    /// Location name, e.g. a US state
    #[arg(long)]
    pub location: Option<String>,

    /// System size in kW DC
    #[arg(long)]
    pub system_size: Option<Decimal>,

    /// Projection horizon in years
    #[arg(long, default_value_t = DEFAULT_HORIZON_YEARS)]
    pub years: u32,

    /// Electricity price in $/kWh (defaults to the location's)
    #[arg(long)]
    pub electricity_price: Option<Decimal>,

    /// Annual output per kW DC in kWh (defaults to the location's)
    #[arg(long)]
    pub specific_yield: Option<Decimal>,

    /// Annual electricity price escalation (e.g. 0.025 for 2.5%)
    #[arg(long)]
    pub price_escalation: Option<Decimal>,

    /// Annual O&M cost escalation (defaults to the price escalation)
    #[arg(long)]
    pub cost_escalation: Option<Decimal>,

    /// Annual production degradation
    #[arg(long)]
    pub degradation: Option<Decimal>,

    /// O&M cost in $/kW-yr
    #[arg(long)]
    pub operating_cost: Option<Decimal>,

    /// Installed cost in $/kW DC
    #[arg(long)]
    pub installed_cost: Option<Decimal>,

    /// Upfront incentive as a fraction of installed cost
    #[arg(long, alias = "itc")]
    pub incentive_rate: Option<Decimal>,

    /// Discount rate for NPV and LCOE
    #[arg(long)]
    pub discount_rate: Option<Decimal>,

    /// Marginal tax rate; enables the depreciation tax shield
    #[arg(long)]
    pub tax_rate: Option<Decimal>,

    /// Fraction of installed cost financed with a loan
    #[arg(long)]
    pub loan_fraction: Option<Decimal>,

    /// Annual loan interest rate
    #[arg(long)]
    pub loan_rate: Option<Decimal>,

    /// Loan term in years
    #[arg(long)]
    pub loan_term: Option<u32>,

    /// Commissioning date (YYYY-MM-DD) for dating each period
    #[arg(long)]
    pub commissioning_date: Option<NaiveDate>,
}

pub fn run_model(args: ModelArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let catalog = match args.prices {
        Some(ref path) => input::location_table::read_location_table(path)?,
        None => LocationCatalog::builtin(),
    };

    let inputs: ProjectInputs = if let Some(ref path) = args.input {
        input::file::read_parameters(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        ProjectInputs::from_value(data)?
    } else {
        inputs_from_flags(&args)?
    };

    let params = ProjectParameters::resolve(&inputs, &catalog)?;
    tracing::info!(
        location = %params.location().name,
        size_kw = %params.system_size_kw_dc(),
        years = params.horizon_years(),
        "modeling project"
    );

    let result = model_solar_project(&params)?;
    Ok(serde_json::to_value(result)?)
}

fn inputs_from_flags(args: &ModelArgs) -> Result<ProjectInputs, Box<dyn std::error::Error>> {
    let location = args
        .location
        .clone()
        .ok_or("--location is required (or provide --input)")?;
    let size = args
        .system_size
        .ok_or("--system-size is required (or provide --input)")?;

    let mut inputs = ProjectInputs::new(location, size, args.years);
    inputs.electricity_price = args.electricity_price;
    inputs.specific_yield_kwh_per_kw = args.specific_yield;
    inputs.cost_escalation_rate = args.cost_escalation;
    inputs.tax_rate = args.tax_rate;
    inputs.commissioning_date = args.commissioning_date;

    if let Some(rate) = args.price_escalation {
        inputs.price_escalation_rate = rate;
    }
    if let Some(rate) = args.degradation {
        inputs.degradation_rate = rate;
    }
    if let Some(cost) = args.operating_cost {
        inputs.operating_cost_per_kw = cost;
    }
    if let Some(cost) = args.installed_cost {
        inputs.installed_cost_per_kw = cost;
    }
    if let Some(rate) = args.incentive_rate {
        inputs.incentive_rate = rate;
    }
    if let Some(rate) = args.discount_rate {
        inputs.discount_rate = rate;
    }

    if let Some(loan_fraction) = args.loan_fraction {
        inputs.financing = Some(FinancingTerms {
            loan_fraction,
            interest_rate: args
                .loan_rate
                .ok_or("--loan-rate is required with --loan-fraction")?,
            term_years: args
                .loan_term
                .ok_or("--loan-term is required with --loan-fraction")?,
        });
    } else if args.loan_rate.is_some() || args.loan_term.is_some() {
        return Err("--loan-fraction is required with --loan-rate or --loan-term".into());
    }

    Ok(inputs)
}
