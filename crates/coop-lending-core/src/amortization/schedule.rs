//! Fixed-installment amortization schedules.
//!
//! Interest accrues monthly on the outstanding balance at `annual % / 100 / 12`.
//! Leading grace periods are interest-only. Every amortizing period applies
//! the flat installment to interest first and the remainder to principal; the
//! last period (contractual or early payoff) takes whatever balance remains so
//! the schedule always closes at exactly zero. All figures are rounded half-up
//! to the currency's minor unit as they are computed.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, warn};

use super::terms::{AmortizationRequest, LoanTerms, ScheduleEntry};
use crate::error::LendingError;
use crate::types::{round_money, with_metadata, ComputationOutput, Money};
use crate::LendingResult;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// A schedule together with its totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationOutput {
    pub schedule: Vec<ScheduleEntry>,
    /// Number of entries actually generated (may be below the term on early payoff).
    pub periods: u32,
    pub total_principal: Money,
    pub total_interest: Money,
    pub total_paid: Money,
    pub final_installment: Money,
    pub maturity_date: NaiveDate,
    pub paid_off_early: bool,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Generate the period-by-period schedule for `terms` paid at `request.periodic_payment`.
///
/// Fails with `InvalidInput` on malformed terms or payment, and with
/// `InsufficientPayment` when the first amortizing period's interest already
/// consumes the whole payment.
pub fn generate_schedule(
    terms: &LoanTerms,
    request: &AmortizationRequest,
) -> LendingResult<Vec<ScheduleEntry>> {
    request.validate()?;
    terms.validate()?;

    let dp = terms.precision();
    let payment = request.periodic_payment;

    let mut balance = terms.rounded_principal();
    let mut schedule: Vec<ScheduleEntry> = Vec::new();

    for sequence in 1..=terms.term_months {
        let interest_portion = terms.period_interest(balance)?;

        let principal_portion = if sequence <= terms.grace_months {
            Decimal::ZERO
        } else {
            let scheduled = round_money(payment - interest_portion, dp);
            if scheduled <= Decimal::ZERO {
                warn!(
                    sequence,
                    %interest_portion,
                    %payment,
                    "payment does not cover accrued interest"
                );
                return Err(LendingError::InsufficientPayment {
                    sequence,
                    interest: interest_portion,
                    payment,
                });
            }
            // Final period, or the payment would overshoot: pay off exactly.
            if sequence == terms.term_months || scheduled >= balance {
                balance
            } else {
                scheduled
            }
        };

        balance -= principal_portion;

        schedule.push(ScheduleEntry {
            sequence,
            due_date: terms.due_date(sequence)?,
            installment_amount: checked_total(interest_portion, principal_portion)?,
            interest_portion,
            principal_portion,
            remaining_balance: balance,
        });

        if balance.is_zero() {
            break;
        }
    }

    debug!(
        principal = %terms.principal,
        term_months = terms.term_months,
        periods = schedule.len(),
        "generated amortization schedule"
    );

    Ok(schedule)
}

/// Generate a schedule and summarise it inside the standard computation envelope.
pub fn amortize(
    terms: &LoanTerms,
    request: &AmortizationRequest,
) -> LendingResult<ComputationOutput<AmortizationOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let schedule = generate_schedule(terms, request)?;

    let total_principal = schedule
        .iter()
        .try_fold(Decimal::ZERO, |acc, e| checked_total(acc, e.principal_portion))?;
    let total_interest = schedule
        .iter()
        .try_fold(Decimal::ZERO, |acc, e| checked_total(acc, e.interest_portion))?;
    let total_paid = checked_total(total_principal, total_interest)?;
    let periods = schedule.len() as u32;

    // A generated schedule always has at least one entry.
    let last = &schedule[schedule.len() - 1];
    let final_installment = last.installment_amount;
    let maturity_date = last.due_date;

    let paid_off_early = periods < terms.term_months;
    if paid_off_early {
        warnings.push(format!(
            "Loan is fully repaid at period {} of a {}-month term",
            periods, terms.term_months
        ));
    }
    if final_installment > request.periodic_payment {
        warnings.push(format!(
            "Final installment {} exceeds the periodic payment {} (balloon)",
            final_installment, request.periodic_payment
        ));
    }

    let output = AmortizationOutput {
        schedule,
        periods,
        total_principal,
        total_interest,
        total_paid,
        final_installment,
        maturity_date,
        paid_off_early,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-installment amortization, interest-only grace, half-up rounding at minor unit",
        &serde_json::json!({
            "principal": terms.principal.to_string(),
            "annual_interest_rate_pct": terms.annual_interest_rate_pct.to_string(),
            "periodic_rate": terms.periodic_rate().to_string(),
            "term_months": terms.term_months,
            "grace_months": terms.grace_months,
            "periodic_payment": request.periodic_payment.to_string(),
            "currency": terms.currency,
        }),
        warnings,
        elapsed,
        output,
    ))
}

fn checked_total(a: Money, b: Money) -> LendingResult<Money> {
    a.checked_add(b).ok_or_else(|| {
        LendingError::invalid(
            "annual_interest_rate_pct",
            "Accrued interest exceeds the representable range",
        )
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
