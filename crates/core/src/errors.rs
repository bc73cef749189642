//! Core error types for the ledger returns library.
//!
//! Integrity faults found while extracting cashflows abort the extraction call.
//! Missing prices are reported as [`FxError`] and are handled per bucket by the
//! boundary valuation. Root-finding failures are not errors at all: see
//! [`crate::returns::XirrError`].

use chrono::{NaiveDate, ParseError as ChronoParseError};
use thiserror::Error;

use crate::fx::FxError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the library.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Cashflow extraction failed: {0}")]
    Cashflow(#[from] CashflowError),

    #[error("Fx error: {0}")]
    Fx(#[from] FxError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Failed to load configuration: {0}")]
    ConfigIO(String),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),

    #[error("Failed to load ledger: {0}")]
    Ledger(String),
}

/// Errors raised while turning postings and balances into cashflows.
///
/// Everything except `InvalidAccountPattern` is a data-integrity fault: the
/// valuation step did not deliver an amount in the requested currency.
#[derive(Error, Debug)]
pub enum CashflowError {
    #[error("Invalid account pattern '{pattern}': {reason}")]
    InvalidAccountPattern { pattern: String, reason: String },

    #[error("Posting to {account} on {date} converted to {actual}, expected {expected}")]
    CurrencyMismatch {
        account: String,
        date: NaiveDate,
        expected: String,
        actual: String,
    },

    #[error("Could not convert posting to {account} on {date} to {currency}: {reason}")]
    UnconvertedPosting {
        account: String,
        date: NaiveDate,
        currency: String,
        reason: String,
    },

    #[error("Total of {asset_account} in {currency} overflows")]
    AmountOverflow {
        asset_account: String,
        currency: String,
    },

    #[error("Market value of {account} is not a single {currency} amount (holds {holdings})")]
    MixedInventory {
        account: String,
        currency: String,
        holdings: String,
    },
}

impl CashflowError {
    /// Whether this fault means a converted value could not be trusted.
    pub fn is_integrity_fault(&self) -> bool {
        !matches!(self, CashflowError::InvalidAccountPattern { .. })
    }
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),

    #[error("Failed to parse date/time: {0}")]
    DateTimeParse(#[from] ChronoParseError),
}

// === From implementations for common error types ===

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<ChronoParseError> for Error {
    fn from(err: ChronoParseError) -> Self {
        Error::Validation(ValidationError::DateTimeParse(err))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
