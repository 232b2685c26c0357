use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LendingError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error(
        "Insufficient payment: period {sequence} accrues {interest} interest but the payment is {payment}"
    )]
    InsufficientPayment {
        sequence: u32,
        interest: Decimal,
        payment: Decimal,
    },

    #[error("Loan {loan_id} not released (status: {status})")]
    LoanNotReleased { loan_id: u64, status: String },

    #[error("Schedule already exists for loan {loan_id}")]
    ScheduleExists { loan_id: u64 },

    #[error("Date error: {0}")]
    DateError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl LendingError {
    pub(crate) fn invalid(field: &str, reason: &str) -> Self {
        LendingError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending input field, for validation failures.
    pub fn field(&self) -> Option<&str> {
        match self {
            LendingError::InvalidInput { field, .. } => Some(field),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for LendingError {
    fn from(e: serde_json::Error) -> Self {
        LendingError::SerializationError(e.to_string())
    }
}
