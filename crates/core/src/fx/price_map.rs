use crate::fx::fx_errors::FxError;
use crate::fx::fx_model::PriceEntry;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

/// Commodity prices stored as independent time-series per currency pair.
/// Paths between currencies that are not directly quoted are found on demand.
///
/// A lookup for a date only sees prices dated on or before it: a price quoted
/// after the valuation date was not known yet. A lookup without a date uses the
/// latest price of each pair.
#[derive(Debug, Clone, Default)]
pub struct PriceMap {
    /// Graph adjacency list: Currency -> Set of connected currencies.
    /// Ordered so that path search is deterministic.
    adj: HashMap<String, BTreeSet<String>>,

    /// Key: (From_Currency, To_Currency)
    /// Value: BTreeMap<Date, Rate>
    rates: HashMap<(String, String), BTreeMap<NaiveDate, Decimal>>,
}

impl PriceMap {
    /// Creates a new `PriceMap` from a Vec of price entries.
    pub fn new(prices: Vec<PriceEntry>) -> Result<Self, FxError> {
        let mut price_map = PriceMap::default();
        price_map.add_prices(prices)?;
        Ok(price_map)
    }

    /// Adds prices, storing the inverse of every nonzero rate as well.
    /// A later entry for the same pair and date replaces the earlier one.
    pub fn add_prices(&mut self, prices: Vec<PriceEntry>) -> Result<(), FxError> {
        for price in prices {
            if price.currency == price.quote_currency {
                continue;
            }
            if price.rate.is_sign_negative() {
                return Err(FxError::InvalidRate(format!(
                    "{} {} {} on {}",
                    price.currency, price.rate, price.quote_currency, price.date
                )));
            }

            let forward_pair = (price.currency.clone(), price.quote_currency.clone());
            self.rates
                .entry(forward_pair)
                .or_default()
                .insert(price.date, price.rate);
            self.adj
                .entry(price.currency.clone())
                .or_default()
                .insert(price.quote_currency.clone());

            if !price.rate.is_zero() {
                let inverse_pair = (price.quote_currency.clone(), price.currency.clone());
                self.rates
                    .entry(inverse_pair)
                    .or_default()
                    .insert(price.date, Decimal::ONE / price.rate);
                self.adj
                    .entry(price.quote_currency)
                    .or_default()
                    .insert(price.currency);
            }
        }
        Ok(())
    }

    /// Latest rate for a directly quoted pair, on or before `date` when given.
    fn get_direct_rate(&self, from: &str, to: &str, date: Option<NaiveDate>) -> Option<Decimal> {
        let history = self.rates.get(&(from.to_string(), to.to_string()))?;
        match date {
            Some(date) => history.range(..=date).next_back().map(|(_, rate)| *rate),
            None => history.values().next_back().copied(),
        }
    }

    /// Rate converting one unit of `from_currency` into `to_currency`.
    ///
    /// Breadth-first search over quoted pairs finds the shortest path; an edge
    /// is only usable when it has a price visible at `date`.
    pub fn get_rate(
        &self,
        from_currency: &str,
        to_currency: &str,
        date: Option<NaiveDate>,
    ) -> Result<Decimal, FxError> {
        if from_currency == to_currency {
            return Ok(Decimal::ONE);
        }

        // BFS State: (Current Currency, Accumulated Rate)
        let mut queue: VecDeque<(&str, Decimal)> = VecDeque::new();
        let mut visited: HashSet<&str> = HashSet::new();

        queue.push_back((from_currency, Decimal::ONE));
        visited.insert(from_currency);

        while let Some((current, current_rate)) = queue.pop_front() {
            if current == to_currency {
                return Ok(current_rate);
            }

            if let Some(neighbors) = self.adj.get(current) {
                for neighbor in neighbors {
                    if visited.contains(neighbor.as_str()) {
                        continue;
                    }
                    if let Some(rate) = self.get_direct_rate(current, neighbor, date) {
                        visited.insert(neighbor.as_str());
                        let path_rate = current_rate.checked_mul(rate).ok_or_else(|| {
                            FxError::ConversionError(format!(
                                "Rate for {} -> {} overflows",
                                from_currency, neighbor
                            ))
                        })?;
                        queue.push_back((neighbor.as_str(), path_rate));
                    }
                }
            }
        }

        Err(FxError::RateNotFound(match date {
            Some(date) => format!(
                "No conversion path found for {} -> {} on or before {}",
                from_currency, to_currency, date
            ),
            None => format!(
                "No conversion path found for {} -> {}",
                from_currency, to_currency
            ),
        }))
    }

    /// Converts `number` units of `from_currency` into `to_currency`.
    pub fn convert(
        &self,
        number: Decimal,
        from_currency: &str,
        to_currency: &str,
        date: Option<NaiveDate>,
    ) -> Result<Decimal, FxError> {
        if from_currency == to_currency {
            return Ok(number);
        }
        let rate = self.get_rate(from_currency, to_currency, date)?;
        number.checked_mul(rate).ok_or_else(|| {
            FxError::ConversionError(format!(
                "{} {} at {} {} overflows",
                number, from_currency, rate, to_currency
            ))
        })
    }
}
