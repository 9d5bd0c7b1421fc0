use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::project::parameters::{validate_financing, FinancingTerms};
use crate::time_value::level_payment;
use crate::types::Money;
use crate::SolarModelResult;

/// Loan amortization laid over years `0..=horizon`.
///
/// All vectors are indexed by year. Year 0 draws the loan and pays nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancingSchedule {
    pub loan_amount: Money,
    /// Fixed annual payment during the term
    pub annual_payment: Money,
    pub debt_service: Vec<Money>,
    pub interest: Vec<Money>,
    pub principal: Vec<Money>,
    /// Outstanding balance at year end
    pub balance: Vec<Money>,
}

/// Overlay an optional loan on the installed cost.
///
/// Without financing every year carries zero debt service. With financing the
/// loan is `installed_cost × loan_fraction`, repaid by level payments over
/// `term_years`. The final payment is interest plus the remaining balance,
/// so it can differ from the level payment by rounding residue and the
/// balance is exactly zero afterwards.
pub fn overlay_financing(
    installed_cost: Money,
    financing: Option<&FinancingTerms>,
    horizon_years: u32,
) -> SolarModelResult<FinancingSchedule> {
    let periods = horizon_years as usize + 1;
    let mut schedule = FinancingSchedule {
        loan_amount: Decimal::ZERO,
        annual_payment: Decimal::ZERO,
        debt_service: vec![Decimal::ZERO; periods],
        interest: vec![Decimal::ZERO; periods],
        principal: vec![Decimal::ZERO; periods],
        balance: vec![Decimal::ZERO; periods],
    };

    let Some(terms) = financing else {
        return Ok(schedule);
    };
    validate_financing(terms, horizon_years)?;

    let loan_amount = installed_cost * terms.loan_fraction;
    let payment = level_payment(loan_amount, terms.interest_rate, terms.term_years)?;
    schedule.loan_amount = loan_amount;
    schedule.annual_payment = payment;
    schedule.balance[0] = loan_amount;

    let mut outstanding = loan_amount;
    for year in 1..=terms.term_years as usize {
        let interest = outstanding * terms.interest_rate;
        // Final payment absorbs the rounding residue so the balance closes at zero.
        let (principal, debt_service) = if year == terms.term_years as usize {
            (outstanding, interest + outstanding)
        } else {
            (payment - interest, payment)
        };
        outstanding -= principal;

        schedule.debt_service[year] = debt_service;
        schedule.interest[year] = interest;
        schedule.principal[year] = principal;
        schedule.balance[year] = outstanding;
    }

    tracing::debug!(
        loan = %loan_amount,
        payment = %payment,
        term = terms.term_years,
        "financing overlay"
    );
    Ok(schedule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SolarModelError;
    use rust_decimal_macros::dec;

    fn terms(loan_fraction: Decimal, interest_rate: Decimal, term_years: u32) -> FinancingTerms {
        FinancingTerms {
            loan_fraction,
            interest_rate,
            term_years,
        }
    }

    #[test]
    fn test_no_financing_is_all_zero() {
        let s = overlay_financing(dec!(25000), None, 5).unwrap();
        assert_eq!(s.debt_service.len(), 6);
        assert_eq!(s.loan_amount, Decimal::ZERO);
        assert!(s.debt_service.iter().all(|d| d.is_zero()));
    }

    #[test]
    fn test_level_payment_amortizes_to_zero() {
        let s = overlay_financing(dec!(25000), Some(&terms(dec!(0.8), dec!(0.07), 10)), 25).unwrap();
        assert_eq!(s.loan_amount, dec!(20000));
        // 20,000 over 10 years at 7% ≈ 2847.55
        assert!((s.annual_payment - dec!(2847.55)).abs() < dec!(0.01));
        assert_eq!(s.balance[0], dec!(20000));
        assert_eq!(s.balance[10], Decimal::ZERO);
        for year in 1..10 {
            assert_eq!(s.debt_service[year], s.annual_payment);
        }
        assert!((s.debt_service[10] - s.annual_payment).abs() < dec!(0.000001));
        for year in 11..=25 {
            assert_eq!(s.debt_service[year], Decimal::ZERO);
            assert_eq!(s.balance[year], Decimal::ZERO);
        }
        let principal: Decimal = s.principal.iter().sum();
        assert!((principal - dec!(20000)).abs() < dec!(0.000001));
    }

    #[test]
    fn test_each_payment_splits_into_interest_and_principal() {
        let s = overlay_financing(dec!(25000), Some(&terms(dec!(0.8), dec!(0.07), 10)), 25).unwrap();
        for year in 0..=25 {
            let residue = s.interest[year] + s.principal[year] - s.debt_service[year];
            assert!(residue.abs() < dec!(0.0000000001), "year {year}: {residue}");
        }
        assert_eq!(s.interest[10] + s.principal[10], s.debt_service[10]);
    }

    #[test]
    fn test_balance_declines() {
        let s = overlay_financing(dec!(30000), Some(&terms(dec!(0.5), dec!(0.05), 12)), 20).unwrap();
        for w in s.balance[..=12].windows(2) {
            assert!(w[1] < w[0]);
        }
    }

    #[test]
    fn test_zero_interest_is_straight_line() {
        let s = overlay_financing(dec!(10000), Some(&terms(Decimal::ONE, Decimal::ZERO, 5)), 5).unwrap();
        assert_eq!(s.annual_payment, dec!(2000));
        assert!(s.interest.iter().all(|i| i.is_zero()));
        assert_eq!(s.balance[3], dec!(4000));
    }

    #[test]
    fn test_zero_loan_fraction_matches_no_financing() {
        let none = overlay_financing(dec!(25000), None, 8).unwrap();
        let zero = overlay_financing(dec!(25000), Some(&terms(Decimal::ZERO, dec!(0.07), 8)), 8).unwrap();
        assert_eq!(none.debt_service, zero.debt_service);
        assert_eq!(zero.loan_amount, Decimal::ZERO);
    }

    #[test]
    fn test_rejects_term_beyond_horizon() {
        let result = overlay_financing(dec!(25000), Some(&terms(dec!(0.5), dec!(0.05), 12)), 10);
        match result {
            Err(SolarModelError::InvalidParameter { field, .. }) => {
                assert_eq!(field, "financing.term_years")
            }
            other => panic!("Expected InvalidParameter, got: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_loan_fraction_out_of_range() {
        let result = overlay_financing(dec!(25000), Some(&terms(dec!(1.5), dec!(0.05), 5)), 10);
        assert!(result.is_err());
    }
}
