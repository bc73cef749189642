use super::accounts;
use super::ledger_model::{LedgerSnapshot, Transaction};
use super::ledger_traits::LedgerProviderTrait;
use crate::constants::DEFAULT_ASSETS_ROOT;
use crate::errors::{Error, Result};
use crate::fx::{PriceEntry, PriceMap};
use log::{debug, info};
use std::fs;
use std::path::Path;

/// An in-memory, immutable ledger: transactions, prices and the chart of
/// accounts they imply.
#[derive(Debug, Clone)]
pub struct Ledger {
    transactions: Vec<Transaction>,
    price_map: PriceMap,
    assets_root: String,
}

impl Ledger {
    /// Builds a ledger, ordering transactions by date. Transactions sharing a
    /// date keep the order they were given in.
    pub fn new(mut transactions: Vec<Transaction>, prices: Vec<PriceEntry>) -> Result<Self> {
        transactions.sort_by_key(|txn| txn.date);
        let price_count = prices.len();
        let price_map = PriceMap::new(prices)?;
        debug!(
            "Ledger built with {} transactions and {} prices",
            transactions.len(),
            price_count
        );
        Ok(Ledger {
            transactions,
            price_map,
            assets_root: DEFAULT_ASSETS_ROOT.to_string(),
        })
    }

    pub fn from_snapshot(snapshot: LedgerSnapshot) -> Result<Self> {
        Ledger::new(snapshot.transactions, snapshot.prices)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let snapshot: LedgerSnapshot = serde_json::from_str(json)
            .map_err(|e| Error::Ledger(format!("Invalid ledger snapshot: {}", e)))?;
        Ledger::from_snapshot(snapshot)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Ledger(format!("{}: {}", path.display(), e)))?;
        let ledger = Ledger::from_json_str(&contents)?;
        info!(
            "Loaded {} transactions from {}",
            ledger.transactions.len(),
            path.display()
        );
        Ok(ledger)
    }

    /// Uses a different root component to recognise asset accounts.
    pub fn with_assets_root(mut self, assets_root: &str) -> Self {
        self.assets_root = assets_root.to_string();
        self
    }
}

impl LedgerProviderTrait for Ledger {
    fn list_transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    fn account_ancestors(&self, account: &str) -> Vec<String> {
        accounts::parents(account).map(str::to_string).collect()
    }

    fn is_asset_account(&self, account: &str) -> bool {
        accounts::root(account) == self.assets_root
    }

    fn price_map(&self) -> &PriceMap {
        &self.price_map
    }
}
