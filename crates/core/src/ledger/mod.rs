//! Ledger module - transactions, chart of accounts, inventories and valuation.

pub mod accounts;
mod inventory;
mod ledger_model;
mod ledger_service;
mod ledger_traits;
mod valuation_engine;

#[cfg(test)]
mod ledger_service_tests;

pub use inventory::{Inventory, Position};
pub use ledger_model::{Amount, CostOrPrice, LedgerSnapshot, Posting, Transaction};
pub use ledger_service::Ledger;
pub use ledger_traits::{LedgerProviderTrait, ValuationEngineTrait};
pub use valuation_engine::MarketValuation;
