use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::project::parameters::ProjectParameters;
use crate::time_value::compound_factor;
use crate::types::{Energy, Money};

/// Revenue and O&M cost for one year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueLine {
    pub year: u32,
    /// Escalated electricity price ($/kWh); absent in year 0
    pub electricity_price: Option<Money>,
    /// Value of energy produced at the escalated price
    pub revenue: Money,
    /// Escalated O&M cost
    pub operating_cost: Money,
}

/// Price the production curve and charge O&M against it.
///
/// Year `y >= 1`: price escalates at `price_escalation_rate` and O&M at
/// `cost_escalation_rate`, both from their year-1 values. Year 0 carries
/// neither revenue nor cost.
pub fn project_revenue(production: &[Energy], params: &ProjectParameters) -> Vec<RevenueLine> {
    let base_operating_cost = params.system_size_kw_dc() * params.operating_cost_per_kw();

    production
        .iter()
        .enumerate()
        .map(|(idx, energy)| {
            let year = idx as u32;
            if year == 0 {
                return RevenueLine {
                    year,
                    electricity_price: None,
                    revenue: Decimal::ZERO,
                    operating_cost: Decimal::ZERO,
                };
            }

            let price = params.electricity_price()
                * compound_factor(params.price_escalation_rate(), year - 1);
            let operating_cost =
                base_operating_cost * compound_factor(params.cost_escalation_rate(), year - 1);

            RevenueLine {
                year,
                electricity_price: Some(price),
                revenue: *energy * price,
                operating_cost,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::location::LocationCatalog;
    use crate::project::parameters::ProjectInputs;
    use rust_decimal_macros::dec;

    fn params(price_escalation: Decimal, cost_escalation: Option<Decimal>) -> ProjectParameters {
        let mut inputs = ProjectInputs::new("Arizona", dec!(10), 3);
        inputs.electricity_price = Some(dec!(0.15));
        inputs.price_escalation_rate = price_escalation;
        inputs.cost_escalation_rate = cost_escalation;
        inputs.operating_cost_per_kw = dec!(15);
        ProjectParameters::resolve(&inputs, &LocationCatalog::builtin()).unwrap()
    }

    #[test]
    fn test_year_zero_is_empty() {
        let lines = project_revenue(&[Decimal::ZERO, dec!(14000)], &params(dec!(0), None));
        assert_eq!(lines[0].revenue, Decimal::ZERO);
        assert_eq!(lines[0].operating_cost, Decimal::ZERO);
        assert_eq!(lines[0].electricity_price, None);
    }

    #[test]
    fn test_flat_prices() {
        let lines = project_revenue(
            &[Decimal::ZERO, dec!(14000), dec!(14000)],
            &params(dec!(0), None),
        );
        assert_eq!(lines[1].revenue, dec!(2100));
        assert_eq!(lines[1].operating_cost, dec!(150));
        assert_eq!(lines[2].revenue, dec!(2100));
        assert_eq!(lines[2].operating_cost, dec!(150));
    }

    #[test]
    fn test_shared_escalation_by_default() {
        let lines = project_revenue(
            &[Decimal::ZERO, dec!(1000), dec!(1000), dec!(1000)],
            &params(dec!(0.10), None),
        );
        assert_eq!(lines[2].electricity_price, Some(dec!(0.165)));
        assert_eq!(lines[3].revenue, dec!(181.5));
        assert_eq!(lines[3].operating_cost, dec!(181.5));
    }

    #[test]
    fn test_separate_cost_escalation() {
        let lines = project_revenue(
            &[Decimal::ZERO, dec!(1000), dec!(1000)],
            &params(dec!(0.10), Some(dec!(0.0))),
        );
        assert_eq!(lines[2].revenue, dec!(165));
        assert_eq!(lines[2].operating_cost, dec!(150));
    }
}
