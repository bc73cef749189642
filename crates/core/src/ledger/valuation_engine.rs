use super::inventory::Inventory;
use super::ledger_model::{Amount, Transaction};
use super::ledger_traits::ValuationEngineTrait;
use crate::fx::{FxError, PriceMap};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Computes balances and market values from a ledger's prices.
pub struct MarketValuation<'a> {
    prices: &'a PriceMap,
}

impl<'a> MarketValuation<'a> {
    pub fn new(prices: &'a PriceMap) -> Self {
        MarketValuation { prices }
    }
}

impl ValuationEngineTrait for MarketValuation<'_> {
    fn realize_balances(&self, transactions: &[Transaction]) -> BTreeMap<String, Inventory> {
        let mut balances: BTreeMap<String, Inventory> = BTreeMap::new();
        for txn in transactions {
            for posting in &txn.postings {
                balances
                    .entry(posting.account.clone())
                    .or_default()
                    .add_position(&posting.units, posting.cost());
            }
        }
        balances
    }

    fn realize_balance(&self, transactions: &[Transaction], account: &str) -> Inventory {
        let mut inventory = Inventory::new();
        for posting in transactions
            .iter()
            .flat_map(|txn| txn.postings.iter())
            .filter(|posting| posting.account == account)
        {
            inventory.add_position(&posting.units, posting.cost());
        }
        inventory
    }

    fn convert_amount(
        &self,
        amount: &Amount,
        target_currency: &str,
        as_of: Option<NaiveDate>,
    ) -> Result<Amount, FxError> {
        let number = self
            .prices
            .convert(amount.number, &amount.currency, target_currency, as_of)?;
        Ok(Amount::new(number, target_currency))
    }

    fn convert_inventory(
        &self,
        inventory: &Inventory,
        target_currency: &str,
        as_of: Option<NaiveDate>,
    ) -> Result<Inventory, FxError> {
        let mut converted = Inventory::new();
        for position in inventory.positions() {
            let value = self.convert_amount(&position.units, target_currency, as_of)?;
            converted.add_amount(&value);
        }
        Ok(converted)
    }
}
