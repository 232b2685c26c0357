//! Payment sizing: the floor a periodic payment must clear, and the level
//! annuity installment that retires the loan over its amortizing periods.

use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::terms::LoanTerms;
use crate::error::LendingError;
use crate::types::{minor_unit, with_metadata, ComputationOutput, Money, Rate};
use crate::LendingResult;

/// Payment bounds for a set of loan terms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentQuote {
    /// Smallest payment that still reduces principal in the first amortizing period.
    pub minimum_payment: Money,
    /// Level installment that fully amortizes over the amortizing periods.
    pub level_payment: Money,
    pub amortizing_periods: u32,
    pub periodic_rate: Rate,
    /// First-period interest at the starting balance.
    pub first_period_interest: Money,
}

/// Smallest periodic payment that avoids `InsufficientPayment`.
///
/// Grace periods are interest-only, so the first amortizing period still
/// accrues on the full principal.
pub fn minimum_payment(terms: &LoanTerms) -> LendingResult<Money> {
    terms.validate()?;
    let interest = terms.period_interest(terms.rounded_principal())?;
    interest
        .checked_add(minor_unit(terms.precision()))
        .ok_or_else(|| overflow("annual_interest_rate_pct"))
}

/// Level annuity payment `P·r / (1 − (1+r)^−n)`, rounded up to the minor unit.
///
/// Rounding up means the schedule closes with a final installment at or just
/// below the level payment rather than a balloon.
pub fn level_payment(terms: &LoanTerms) -> LendingResult<Money> {
    let minimum = minimum_payment(terms)?;
    let dp = terms.precision();
    let principal = terms.rounded_principal();
    let rate = terms.periodic_rate();
    let n = Decimal::from(terms.amortizing_months());

    let raw = if rate.is_zero() {
        principal / n
    } else {
        let factor = (Decimal::ONE + rate)
            .checked_powi(terms.amortizing_months() as i64)
            .ok_or_else(|| overflow("term_months"))?;
        let discount = Decimal::ONE - Decimal::ONE / factor;
        principal
            .checked_mul(rate)
            .and_then(|pr| pr.checked_div(discount))
            .ok_or_else(|| overflow("annual_interest_rate_pct"))?
    };

    let level = raw.round_dp_with_strategy(dp, RoundingStrategy::ToPositiveInfinity);
    Ok(level.max(minimum))
}

fn overflow(field: &str) -> LendingError {
    LendingError::invalid(
        field,
        "Compounded payment exceeds the representable range",
    )
}

/// Quote both payment bounds in the standard computation envelope.
pub fn quote_payments(terms: &LoanTerms) -> LendingResult<ComputationOutput<PaymentQuote>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let minimum = minimum_payment(terms)?;
    let level = level_payment(terms)?;
    if terms.grace_months > 0 {
        warnings.push(format!(
            "{} interest-only grace period(s) precede amortization",
            terms.grace_months
        ));
    }

    let quote = PaymentQuote {
        minimum_payment: minimum,
        level_payment: level,
        amortizing_periods: terms.amortizing_months(),
        periodic_rate: terms.periodic_rate(),
        first_period_interest: terms.period_interest(terms.rounded_principal())?,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Level annuity payment rounded up to minor unit; minimum = first amortizing interest + one minor unit",
        &serde_json::json!({
            "principal": terms.principal.to_string(),
            "annual_interest_rate_pct": terms.annual_interest_rate_pct.to_string(),
            "term_months": terms.term_months,
            "grace_months": terms.grace_months,
        }),
        warnings,
        elapsed,
        quote,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::schedule::generate_schedule;
    use crate::amortization::terms::AmortizationRequest;
    use crate::error::LendingError;
    use crate::types::Currency;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn terms(rate: Decimal, term: u32, grace: u32) -> LoanTerms {
        LoanTerms {
            principal: dec!(12000),
            annual_interest_rate_pct: rate,
            term_months: term,
            grace_months: grace,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            currency: Currency::USD,
        }
    }

    #[test]
    fn test_level_payment_standard_annuity() {
        assert_eq!(level_payment(&terms(dec!(6), 12, 0)).unwrap(), dec!(1032.80));
    }

    #[test]
    fn test_level_payment_zero_rate() {
        assert_eq!(level_payment(&terms(dec!(0), 12, 0)).unwrap(), dec!(1000));
        assert_eq!(level_payment(&terms(dec!(0), 12, 2)).unwrap(), dec!(1200));
    }

    #[test]
    fn test_level_payment_amortizes_without_balloon() {
        let t = terms(dec!(6), 12, 0);
        let level = level_payment(&t).unwrap();
        let schedule = generate_schedule(
            &t,
            &AmortizationRequest {
                periodic_payment: level,
            },
        )
        .unwrap();

        assert_eq!(schedule.len(), 12);
        let last = schedule.last().unwrap();
        assert_eq!(last.remaining_balance, Decimal::ZERO);
        assert!((last.installment_amount - level).abs() <= dec!(0.10));
    }

    #[test]
    fn test_minimum_payment_is_the_boundary() {
        let t = terms(dec!(6), 12, 0);
        let min = minimum_payment(&t).unwrap();
        assert_eq!(min, dec!(60.01));

        let ok = generate_schedule(
            &t,
            &AmortizationRequest {
                periodic_payment: min,
            },
        );
        assert!(ok.is_ok());

        let err = generate_schedule(
            &t,
            &AmortizationRequest {
                periodic_payment: min - dec!(0.01),
            },
        )
        .unwrap_err();
        assert!(matches!(err, LendingError::InsufficientPayment { .. }));
    }

    #[test]
    fn test_quote_reports_grace() {
        let out = quote_payments(&terms(dec!(6), 12, 2)).unwrap();
        assert_eq!(out.result.amortizing_periods, 10);
        assert_eq!(out.result.first_period_interest, dec!(60.00));
        assert_eq!(out.warnings.len(), 1);
        assert!(out.result.level_payment > out.result.minimum_payment);
    }

    #[test]
    fn test_compounding_overflow_names_term() {
        // 5% a month compounded over 1500 months exceeds 28 significant digits.
        let err = level_payment(&terms(dec!(60), 1500, 0)).unwrap_err();
        assert_eq!(err.field(), Some("term_months"));
        assert!(minimum_payment(&terms(dec!(60), 1500, 0)).is_ok());
    }

    #[test]
    fn test_quote_interest_overflow_names_rate() {
        let mut t = terms(dec!(1000000000000), 12, 0);
        t.principal = dec!(100000000000000000000);
        let err = quote_payments(&t).unwrap_err();
        assert_eq!(err.field(), Some("annual_interest_rate_pct"));
    }

    #[test]
    fn test_quote_rejects_invalid_terms() {
        let mut t = terms(dec!(6), 12, 0);
        t.term_months = 0;
        assert_eq!(quote_payments(&t).unwrap_err().field(), Some("term_months"));
    }
}
