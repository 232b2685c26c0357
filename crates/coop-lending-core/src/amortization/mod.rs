//! Loan amortization: terms, schedule generation, and payment sizing.

pub mod payment;
pub mod schedule;
pub mod terms;

pub use payment::{level_payment, minimum_payment, quote_payments, PaymentQuote};
pub use schedule::{amortize, generate_schedule, AmortizationOutput};
pub use terms::{AmortizationInput, AmortizationRequest, LoanTerms, ScheduleEntry};
