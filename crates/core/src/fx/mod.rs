//! FX module - commodity prices and conversion paths between currencies.

mod fx_errors;
mod fx_model;
pub mod price_map;

pub use fx_errors::FxError;
pub use fx_model::PriceEntry;
pub use price_map::PriceMap;
