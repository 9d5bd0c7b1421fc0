use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::SolarModelError;
use crate::types::{Money, Rate};
use crate::SolarModelResult;

const CONVERGENCE_THRESHOLD: Decimal = dec!(0.0000001);
const BRACKET_TOLERANCE: Decimal = dec!(0.0000000001);
const MAX_IRR_ITERATIONS: u32 = 200;

/// Lower end of the IRR search interval.
pub const IRR_LOWER_BOUND: Rate = dec!(-0.99);
/// Upper end of the IRR search interval.
pub const IRR_UPPER_BOUND: Rate = dec!(1.0);

/// (1 + rate)^periods by repeated multiplication.
///
/// Every escalation, degradation and discount factor in the engine goes
/// through this function, so the same inputs always produce the same digits.
pub fn compound_factor(rate: Rate, periods: u32) -> Decimal {
    let one_plus_r = Decimal::ONE + rate;
    let mut factor = Decimal::ONE;
    for _ in 0..periods {
        factor *= one_plus_r;
    }
    factor
}

/// Net Present Value of a series of cash flows, first flow at t = 0.
pub fn npv(rate: Rate, cash_flows: &[Money]) -> SolarModelResult<Money> {
    if rate <= dec!(-1) {
        return Err(SolarModelError::invalid(
            "rate",
            "Discount rate must be greater than -100%",
        ));
    }

    let mut result = Decimal::ZERO;
    let one_plus_r = Decimal::ONE + rate;
    let mut discount = Decimal::ONE;

    for (t, cf) in cash_flows.iter().enumerate() {
        if t > 0 {
            discount *= one_plus_r;
        }
        if discount.is_zero() {
            return Err(SolarModelError::DivisionByZero {
                context: format!("NPV discount factor at period {t}"),
            });
        }
        result += cf / discount;
    }

    Ok(result)
}

/// True when the series holds at least one strictly positive and one
/// strictly negative flow.
pub fn has_sign_change(cash_flows: &[Money]) -> bool {
    let any_positive = cash_flows.iter().any(|cf| cf.is_sign_positive() && !cf.is_zero());
    let any_negative = cash_flows.iter().any(|cf| cf.is_sign_negative() && !cf.is_zero());
    any_positive && any_negative
}

/// Internal Rate of Return by bisection over [`IRR_LOWER_BOUND`, `IRR_UPPER_BOUND`].
///
/// Roots are searched on `sum(cf_t * (1+r)^(N-t))`, which shares its roots
/// with NPV on the interval but needs no division. A failure to bracket a
/// root is reported as `NumericNonConvergence` with zero iterations; running
/// out of iterations reports the iteration budget.
pub fn irr(cash_flows: &[Money]) -> SolarModelResult<Rate> {
    if cash_flows.len() < 2 {
        return Err(SolarModelError::InsufficientData(
            "IRR requires at least 2 cash flows".into(),
        ));
    }

    let mut lo = IRR_LOWER_BOUND;
    let mut hi = IRR_UPPER_BOUND;
    let mut f_lo = scaled_npv(lo, cash_flows)?;
    let f_hi = scaled_npv(hi, cash_flows)?;

    if f_lo.is_zero() {
        return Ok(lo);
    }
    if f_hi.is_zero() {
        return Ok(hi);
    }
    if f_lo.is_sign_positive() == f_hi.is_sign_positive() {
        return Err(SolarModelError::NumericNonConvergence {
            function: "IRR".into(),
            iterations: 0,
            last_delta: f_lo,
        });
    }

    for _ in 0..MAX_IRR_ITERATIONS {
        let mid = (lo + hi) / dec!(2);
        let f_mid = scaled_npv(mid, cash_flows)?;

        if f_mid.abs() < CONVERGENCE_THRESHOLD || hi - lo < BRACKET_TOLERANCE {
            return Ok(mid);
        }

        if f_mid.is_sign_positive() == f_lo.is_sign_positive() {
            lo = mid;
            f_lo = f_mid;
        } else {
            hi = mid;
        }
    }

    Err(SolarModelError::NumericNonConvergence {
        function: "IRR".into(),
        iterations: MAX_IRR_ITERATIONS,
        last_delta: hi - lo,
    })
}

/// NPV scaled by (1+r)^N, evaluated in Horner form with checked arithmetic.
fn scaled_npv(rate: Rate, cash_flows: &[Money]) -> SolarModelResult<Decimal> {
    let growth = Decimal::ONE + rate;
    cash_flows.iter().try_fold(Decimal::ZERO, |acc, cf| {
        acc.checked_mul(growth)
            .and_then(|v| v.checked_add(*cf))
            .ok_or_else(|| SolarModelError::NumericNonConvergence {
                function: "IRR".into(),
                iterations: 0,
                last_delta: acc,
            })
    })
}

/// Fixed annual payment that fully amortizes `principal` over `nper` years.
///
/// `principal * r / (1 - (1+r)^-n)`, or straight-line when the rate is zero.
pub fn level_payment(principal: Money, rate: Rate, nper: u32) -> SolarModelResult<Money> {
    if nper == 0 {
        return Err(SolarModelError::invalid(
            "nper",
            "Number of periods must be > 0",
        ));
    }

    if rate.is_zero() {
        return Ok(principal / Decimal::from(nper));
    }

    let factor = compound_factor(rate, nper);
    let annuity_factor = Decimal::ONE - Decimal::ONE / factor;

    if annuity_factor.is_zero() {
        return Err(SolarModelError::DivisionByZero {
            context: "level payment annuity factor".into(),
        });
    }

    Ok(principal * rate / annuity_factor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_npv_basic() {
        let cfs = vec![dec!(-1000), dec!(300), dec!(400), dec!(500)];
        let result = npv(dec!(0.10), &cfs).unwrap();
        // NPV at 10%: -1000 + 300/1.1 + 400/1.21 + 500/1.331 ≈ -21.04
        assert!((result - dec!(-21.04)).abs() < dec!(0.01));
    }

    #[test]
    fn test_npv_zero_rate() {
        let cfs = vec![dec!(-100), dec!(50), dec!(50), dec!(50)];
        let result = npv(dec!(0.0), &cfs).unwrap();
        assert_eq!(result, dec!(50));
    }

    #[test]
    fn test_npv_rejects_rate_at_minus_one() {
        let result = npv(dec!(-1), &[dec!(-100), dec!(50)]);
        assert!(matches!(
            result,
            Err(SolarModelError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_compound_factor() {
        assert_eq!(compound_factor(dec!(0.05), 0), Decimal::ONE);
        assert_eq!(compound_factor(dec!(0.05), 2), dec!(1.1025));
        assert_eq!(compound_factor(dec!(-0.5), 3), dec!(0.125));
        assert_eq!(compound_factor(Decimal::ZERO, 40), Decimal::ONE);
    }

    #[test]
    fn test_irr_basic() {
        let cfs = vec![dec!(-1000), dec!(400), dec!(400), dec!(400)];
        let result = irr(&cfs).unwrap();
        // IRR should be ~9.70%
        assert!((result - dec!(0.0970)).abs() < dec!(0.0001));
    }

    #[test]
    fn test_irr_zeroes_npv() {
        let cfs = vec![dec!(-17500), dec!(4000), dec!(4100), dec!(4200), dec!(4300), dec!(4400), dec!(4500)];
        let rate = irr(&cfs).unwrap();
        let residual = npv(rate, &cfs).unwrap();
        assert!(residual.abs() < dec!(0.001), "residual NPV {residual}");
    }

    #[test]
    fn test_irr_negative_rate() {
        // -17500 + 1950x + 1950x^2 = 0 with x = 1/(1+r)
        let cfs = vec![dec!(-17500), dec!(1950), dec!(1950)];
        let rate = irr(&cfs).unwrap();
        assert!((rate - dec!(-0.6059)).abs() < dec!(0.001), "got {rate}");
    }

    #[test]
    fn test_irr_not_bracketed_above_upper_bound() {
        // IRR of 400% lies outside [-0.99, 1.0]
        let cfs = vec![dec!(-100), dec!(500)];
        match irr(&cfs) {
            Err(SolarModelError::NumericNonConvergence { iterations, .. }) => {
                assert_eq!(iterations, 0)
            }
            other => panic!("Expected NumericNonConvergence, got: {other:?}"),
        }
    }

    #[test]
    fn test_irr_insufficient_flows() {
        assert!(matches!(
            irr(&[dec!(-100)]),
            Err(SolarModelError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_has_sign_change() {
        assert!(has_sign_change(&[dec!(-1), dec!(0), dec!(2)]));
        assert!(!has_sign_change(&[dec!(-1), dec!(-2)]));
        assert!(!has_sign_change(&[dec!(0), dec!(3)]));
        assert!(!has_sign_change(&[]));
    }

    #[test]
    fn test_level_payment_basic() {
        // 10,000 over 10 years at 6%: ≈ 1358.68
        let pmt = level_payment(dec!(10000), dec!(0.06), 10).unwrap();
        assert!((pmt - dec!(1358.68)).abs() < dec!(0.01), "got {pmt}");
    }

    #[test]
    fn test_level_payment_zero_rate() {
        let pmt = level_payment(dec!(12000), Decimal::ZERO, 4).unwrap();
        assert_eq!(pmt, dec!(3000));
    }

    #[test]
    fn test_level_payment_zero_periods() {
        assert!(level_payment(dec!(1000), dec!(0.05), 0).is_err());
    }
}
