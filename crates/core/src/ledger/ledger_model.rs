use crate::fx::{FxError, PriceEntry};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A quantity of a single currency or commodity.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Amount {
    pub number: Decimal,
    pub currency: String,
}

impl Amount {
    pub fn new(number: Decimal, currency: &str) -> Self {
        Amount {
            number,
            currency: currency.to_string(),
        }
    }

    pub fn zero(currency: &str) -> Self {
        Amount::new(Decimal::ZERO, currency)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.number, self.currency)
    }
}

/// Per-unit annotation on a posting.
///
/// A cost turns the posting into a lot held at that cost; a price only states
/// the rate the units were exchanged at.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum CostOrPrice {
    Cost(Amount),
    Price(Amount),
}

/// One account/amount leg of a transaction.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Posting {
    pub account: String,
    pub units: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_or_price: Option<CostOrPrice>,
}

impl Posting {
    pub fn new(account: &str, number: Decimal, currency: &str) -> Self {
        Posting {
            account: account.to_string(),
            units: Amount::new(number, currency),
            cost_or_price: None,
        }
    }

    pub fn at_cost(mut self, number: Decimal, currency: &str) -> Self {
        self.cost_or_price = Some(CostOrPrice::Cost(Amount::new(number, currency)));
        self
    }

    pub fn at_price(mut self, number: Decimal, currency: &str) -> Self {
        self.cost_or_price = Some(CostOrPrice::Price(Amount::new(number, currency)));
        self
    }

    /// Per-unit cost of the lot, if this posting is held at cost.
    pub fn cost(&self) -> Option<&Amount> {
        match &self.cost_or_price {
            Some(CostOrPrice::Cost(cost)) => Some(cost),
            _ => None,
        }
    }

    /// The amount this posting contributes to its transaction's balance.
    ///
    /// Units times cost for lots held at cost, units times price for priced
    /// conversions, otherwise the units themselves.
    pub fn weight(&self) -> Result<Amount, FxError> {
        match &self.cost_or_price {
            Some(CostOrPrice::Cost(per_unit)) | Some(CostOrPrice::Price(per_unit)) => {
                let number = self
                    .units
                    .number
                    .checked_mul(per_unit.number)
                    .ok_or_else(|| {
                        FxError::ConversionError(format!(
                            "{} at {} per unit overflows",
                            self.units, per_unit
                        ))
                    })?;
                Ok(Amount::new(number, &per_unit.currency))
            }
            None => Ok(self.units.clone()),
        }
    }
}

/// An immutable, dated ledger entry whose postings balance.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub date: NaiveDate,
    #[serde(default)]
    pub narration: String,
    pub postings: Vec<Posting>,
}

impl Transaction {
    pub fn new(date: NaiveDate, narration: &str, postings: Vec<Posting>) -> Self {
        Transaction {
            date,
            narration: narration.to_string(),
            postings,
        }
    }
}

/// Serialized form of a loaded ledger.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSnapshot {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub prices: Vec<PriceEntry>,
}
