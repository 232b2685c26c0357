//! Loan records and the one-schedule-per-loan book.

pub mod book;
pub mod record;

pub use book::{schedule_loan, ScheduleBook};
pub use record::{CreateScheduleRequest, Loan, LoanScheduleInput, LoanStatus, LoanType};
