use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::amortization::{AmortizationRequest, LoanTerms, ScheduleEntry};
use crate::types::{Currency, Money};

/// Lifecycle state of a loan application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    #[default]
    Pending,
    Released,
    Reject,
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LoanStatus::Pending => "pending",
            LoanStatus::Released => "released",
            LoanStatus::Reject => "reject",
        };
        f.write_str(s)
    }
}

/// Product line a loan was originated under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanType {
    Quick,
    Salary,
    Emergency,
    Multipurpose,
}

/// A member's loan as recorded by the lending office.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub id: u64,
    pub member_id: u64,
    pub loan_type: LoanType,
    pub loan_amount: Money,
    /// Annual interest in percent.
    pub interest: Decimal,
    /// Term in months, grace included.
    pub term: u32,
    #[serde(default)]
    pub grace: u32,
    pub payment_start_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maturity_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: LoanStatus,
    #[serde(default)]
    pub currency: Currency,
}

impl Loan {
    pub fn terms(&self) -> LoanTerms {
        LoanTerms {
            principal: self.loan_amount,
            annual_interest_rate_pct: self.interest,
            term_months: self.term,
            grace_months: self.grace,
            start_date: self.payment_start_date,
            currency: self.currency.clone(),
        }
    }
}

/// Body of a "create schedule" call: the installment chosen for the loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateScheduleRequest {
    pub amortization: Money,
}

impl From<&CreateScheduleRequest> for AmortizationRequest {
    fn from(req: &CreateScheduleRequest) -> Self {
        AmortizationRequest {
            periodic_payment: req.amortization,
        }
    }
}

/// A loan, the requested installment, and any schedule already on file for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanScheduleInput {
    pub loan: Loan,
    pub amortization: Money,
    #[serde(default)]
    pub existing_schedule: Vec<ScheduleEntry>,
}
