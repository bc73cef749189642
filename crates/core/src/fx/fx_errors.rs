use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FxError {
    #[error("Price not found: {0}")]
    RateNotFound(String),
    #[error("Invalid price: {0}")]
    InvalidRate(String),
    #[error("Currency conversion error: {0}")]
    ConversionError(String),
}
