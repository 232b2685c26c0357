pub mod amortization;
pub mod loans;
