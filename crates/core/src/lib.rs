//! Ledger Returns Core - cashflow extraction and money-weighted returns.
//!
//! Turns the transactions of a double-entry ledger into dated cashflows per
//! asset account, values holdings at the edges of a report window and solves
//! for the annualized internal rate of return of each series.

pub mod cashflows;
pub mod constants;
pub mod errors;
pub mod fx;
pub mod ledger;
pub mod returns;
pub mod settings;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
