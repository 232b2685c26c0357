pub mod error;
pub mod types;

#[cfg(feature = "amortization")]
pub mod amortization;

#[cfg(feature = "loans")]
pub mod loans;

pub use error::LendingError;
pub use types::*;

/// Standard result type for all coop-lending operations
pub type LendingResult<T> = Result<T, LendingError>;
