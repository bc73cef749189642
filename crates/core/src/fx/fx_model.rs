use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One unit of `currency` was worth `rate` units of `quote_currency` on `date`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceEntry {
    pub date: NaiveDate,
    pub currency: String,
    pub quote_currency: String,
    pub rate: Decimal,
}

impl PriceEntry {
    pub fn new(date: NaiveDate, currency: &str, quote_currency: &str, rate: Decimal) -> Self {
        PriceEntry {
            date,
            currency: currency.to_string(),
            quote_currency: quote_currency.to_string(),
            rate,
        }
    }
}
