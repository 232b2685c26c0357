//! Loan terms, payment requests, and schedule rows for the amortization engine.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::LendingError;
use crate::types::{round_money, Currency, Money, Rate};
use crate::LendingResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);
const PERCENT: Decimal = dec!(100);

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Principal-bearing terms of a loan. Immutable for the duration of a calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Amount financed.
    pub principal: Money,
    /// Annual nominal rate in percent (5 = 5%).
    pub annual_interest_rate_pct: Decimal,
    /// Total scheduled periods, grace periods included.
    pub term_months: u32,
    /// Leading interest-only periods.
    #[serde(default)]
    pub grace_months: u32,
    /// Anchor date; period `n` falls due `n` months after it.
    pub start_date: NaiveDate,
    #[serde(default)]
    pub currency: Currency,
}

/// The flat installment the borrower commits to each amortizing period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRequest {
    pub periodic_payment: Money,
}

/// Terms and payment submitted together, as read from JSON input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationInput {
    pub terms: LoanTerms,
    pub request: AmortizationRequest,
}

/// One period of a generated schedule.
///
/// Field names on the wire follow the loan-ledger schema
/// (`seq`, `due_date`, `amortization`, `principal`, `interest`, `remaining_balance`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    #[serde(rename = "seq")]
    pub sequence: u32,
    pub due_date: NaiveDate,
    #[serde(rename = "amortization")]
    pub installment_amount: Money,
    #[serde(rename = "principal")]
    pub principal_portion: Money,
    #[serde(rename = "interest")]
    pub interest_portion: Money,
    pub remaining_balance: Money,
}

// ---------------------------------------------------------------------------
// LoanTerms
// ---------------------------------------------------------------------------

impl LoanTerms {
    pub fn validate(&self) -> LendingResult<()> {
        if self.principal <= Decimal::ZERO {
            return Err(LendingError::invalid(
                "principal",
                "Principal must be positive",
            ));
        }
        if self.rounded_principal().is_zero() {
            return Err(LendingError::invalid(
                "principal",
                "Principal rounds to zero at the currency's minor unit",
            ));
        }
        if self.term_months == 0 {
            return Err(LendingError::invalid(
                "term_months",
                "Term must be at least 1 month",
            ));
        }
        if self.grace_months >= self.term_months {
            return Err(LendingError::invalid(
                "grace_months",
                "Grace period must be shorter than the term",
            ));
        }
        if self.maturity_date().is_err() {
            return Err(LendingError::invalid(
                "term_months",
                "Term runs past the last representable calendar date",
            ));
        }
        if self.annual_interest_rate_pct < Decimal::ZERO {
            return Err(LendingError::invalid(
                "annual_interest_rate_pct",
                "Interest rate cannot be negative",
            ));
        }
        Ok(())
    }

    /// Monthly rate as a decimal: annual percent / 100 / 12.
    pub fn periodic_rate(&self) -> Rate {
        self.annual_interest_rate_pct / PERCENT / MONTHS_PER_YEAR
    }

    /// Decimal places every monetary figure is rounded to.
    pub fn precision(&self) -> u32 {
        self.currency.minor_units()
    }

    /// Principal rounded to the currency's minor unit.
    pub fn rounded_principal(&self) -> Money {
        round_money(self.principal, self.precision())
    }

    /// Interest accrued on `balance` for one period, rounded to the minor unit.
    pub fn period_interest(&self, balance: Money) -> LendingResult<Money> {
        let interest = balance.checked_mul(self.periodic_rate()).ok_or_else(|| {
            LendingError::invalid(
                "annual_interest_rate_pct",
                "Periodic interest on the balance exceeds the representable range",
            )
        })?;
        Ok(round_money(interest, self.precision()))
    }

    /// Periods in which principal is actually repaid.
    pub fn amortizing_months(&self) -> u32 {
        self.term_months.saturating_sub(self.grace_months)
    }

    /// `start_date` advanced by `sequence` calendar months, clamped to month end.
    pub fn due_date(&self, sequence: u32) -> LendingResult<NaiveDate> {
        self.start_date
            .checked_add_months(Months::new(sequence))
            .ok_or_else(|| {
                LendingError::DateError(format!(
                    "due date overflow: {} + {} months",
                    self.start_date, sequence
                ))
            })
    }

    /// Contractual maturity: due date of the last scheduled period.
    pub fn maturity_date(&self) -> LendingResult<NaiveDate> {
        self.due_date(self.term_months)
    }
}

impl AmortizationRequest {
    pub fn validate(&self) -> LendingResult<()> {
        if self.periodic_payment <= Decimal::ZERO {
            return Err(LendingError::invalid(
                "periodic_payment",
                "Periodic payment must be positive",
            ));
        }
        Ok(())
    }
}
