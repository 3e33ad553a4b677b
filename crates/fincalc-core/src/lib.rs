pub mod amortization;
pub mod error;
pub mod format;
pub mod query;
pub mod tables;
pub mod time_value;
pub mod types;

#[cfg(feature = "loans")]
pub mod loans;

#[cfg(feature = "loans")]
pub mod report;

#[cfg(feature = "savings")]
pub mod savings;

#[cfg(feature = "tax")]
pub mod tax;

pub use error::FinCalcError;
pub use types::*;

/// Standard result type for all engine operations
pub type FinCalcResult<T> = Result<T, FinCalcError>;
