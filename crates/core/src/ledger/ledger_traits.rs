use super::inventory::Inventory;
use super::ledger_model::{Amount, Transaction};
use crate::fx::{FxError, PriceMap};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Trait defining the contract for a loaded ledger.
pub trait LedgerProviderTrait {
    /// All transactions in chronological order.
    fn list_transactions(&self) -> &[Transaction];

    /// The account followed by each of its ancestors up to the root.
    fn account_ancestors(&self, account: &str) -> Vec<String>;

    fn is_asset_account(&self, account: &str) -> bool;

    fn price_map(&self) -> &PriceMap;
}

/// Trait defining the contract for balance and market value computations.
pub trait ValuationEngineTrait {
    /// Balance of every account touched by `transactions`, keyed by account.
    /// Each inventory holds only the account's own postings.
    fn realize_balances(&self, transactions: &[Transaction]) -> BTreeMap<String, Inventory>;

    fn realize_balance(&self, transactions: &[Transaction], account: &str) -> Inventory;

    /// Converts `amount` into `target_currency` with prices visible at `as_of`
    /// (latest prices when `as_of` is `None`).
    fn convert_amount(
        &self,
        amount: &Amount,
        target_currency: &str,
        as_of: Option<NaiveDate>,
    ) -> Result<Amount, FxError>;

    /// Market value of every position of `inventory` in `target_currency`.
    fn convert_inventory(
        &self,
        inventory: &Inventory,
        target_currency: &str,
        as_of: Option<NaiveDate>,
    ) -> Result<Inventory, FxError>;
}
