use super::account_mapper::AccountMapper;
use crate::errors::{CashflowError, Result};
use crate::ledger::{accounts, LedgerProviderTrait, Transaction, ValuationEngineTrait};
use chrono::NaiveDate;
use log::{debug, warn};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet};

/// Values asset account holdings at a cutoff date, the basis of the synthetic
/// starting and ending balance cashflows.
pub struct BoundaryValuator<'a> {
    ledger: &'a dyn LedgerProviderTrait,
    mapper: &'a AccountMapper,
    valuation: &'a dyn ValuationEngineTrait,
    assets_root: Option<&'a str>,
}

impl<'a> BoundaryValuator<'a> {
    pub fn new(
        ledger: &'a dyn LedgerProviderTrait,
        mapper: &'a AccountMapper,
        valuation: &'a dyn ValuationEngineTrait,
    ) -> Self {
        BoundaryValuator {
            ledger,
            mapper,
            valuation,
            assets_root: None,
        }
    }

    /// Values accounts under `assets_root` instead of the ledger's own root.
    pub fn with_assets_root(mut self, assets_root: &'a str) -> Self {
        self.assets_root = Some(assets_root);
        self
    }

    fn is_asset_account(&self, account: &str) -> bool {
        match self.assets_root {
            Some(assets_root) => accounts::root(account) == assets_root,
            None => self.ledger.is_asset_account(account),
        }
    }

    /// Market value in `currency` of every asset account bucket, counting
    /// transactions dated strictly before `cutoff` (all of them when absent)
    /// and prices visible at `cutoff` (latest prices when absent).
    ///
    /// Holdings of several accounts mapping to one bucket are summed, and each
    /// value also counts toward the enclosing target buckets. A bucket holding
    /// something that cannot be priced is left out of the result.
    pub fn value_accounts(
        &self,
        transactions: &[Transaction],
        cutoff: Option<NaiveDate>,
        currency: &str,
    ) -> Result<BTreeMap<String, Decimal>> {
        // Transactions are chronological.
        let realized = match cutoff {
            Some(cutoff) => {
                let end = transactions.partition_point(|txn| txn.date < cutoff);
                &transactions[..end]
            }
            None => transactions,
        };

        let mut market_values: BTreeMap<String, Decimal> = BTreeMap::new();
        let mut unpriced: BTreeSet<String> = BTreeSet::new();

        for (account, inventory) in self.valuation.realize_balances(realized) {
            if !self.is_asset_account(&account) {
                continue;
            }
            let Some(asset_account) = self.mapper.resolve(&account) else {
                continue;
            };
            let buckets = self.mapper.ancestors_within(&asset_account);

            let market_value = match self.valuation.convert_inventory(&inventory, currency, cutoff)
            {
                Ok(market_value) => market_value,
                Err(e) => {
                    warn!(
                        "Cannot value {} {} in {}: {}. Omitting its balance from {:?}.",
                        account, inventory, currency, e, buckets
                    );
                    unpriced.extend(buckets);
                    continue;
                }
            };
            if market_value.is_empty() {
                continue;
            }

            let value = match market_value.only_position() {
                Some(position) if position.units.currency == currency => position.units.number,
                _ => {
                    return Err(CashflowError::MixedInventory {
                        account,
                        currency: currency.to_string(),
                        holdings: market_value.to_string(),
                    }
                    .into())
                }
            };

            for bucket in buckets {
                let total = market_values.entry(bucket.clone()).or_insert(Decimal::ZERO);
                *total = total
                    .checked_add(value)
                    .ok_or_else(|| CashflowError::AmountOverflow {
                        asset_account: bucket,
                        currency: currency.to_string(),
                    })?;
            }
        }

        for bucket in &unpriced {
            market_values.remove(bucket);
        }
        debug!(
            "Valued {} asset accounts as of {:?}",
            market_values.len(),
            cutoff
        );
        Ok(market_values)
    }
}
