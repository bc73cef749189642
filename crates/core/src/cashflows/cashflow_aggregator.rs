use super::account_mapper::AccountMapper;
use super::cashflow_model::{Cashflow, CashflowsByAssetAccount};
use crate::constants::CASHFLOW_ROUNDING_DP;
use crate::errors::{CashflowError, Result};
use crate::ledger::{Posting, Transaction, ValuationEngineTrait};
use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// A posting's weight in the query currency together with the asset account
/// it resolves to.
struct ValuedPosting<'t> {
    posting: &'t Posting,
    value: Decimal,
    buckets: Vec<String>,
}

/// Turns ledger transactions into per-asset-account cashflows.
pub struct CashflowAggregator<'a> {
    mapper: &'a AccountMapper,
    valuation: &'a dyn ValuationEngineTrait,
}

impl<'a> CashflowAggregator<'a> {
    pub fn new(mapper: &'a AccountMapper, valuation: &'a dyn ValuationEngineTrait) -> Self {
        CashflowAggregator { mapper, valuation }
    }

    /// Cashflows of every asset account from transactions dated within
    /// `[start, end]` (an absent bound is unbounded).
    ///
    /// A transaction yields one cashflow per bucket whose net amount is
    /// nonzero at cent precision, so transfers inside a bucket disappear. Any
    /// posting that cannot be converted to `currency` aborts the extraction.
    pub fn aggregate(
        &self,
        transactions: &[Transaction],
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        currency: &str,
    ) -> Result<CashflowsByAssetAccount> {
        let mut cashflows = CashflowsByAssetAccount::new();

        for txn in transactions {
            if start.is_some_and(|start| txn.date < start) || end.is_some_and(|end| txn.date > end)
            {
                continue;
            }

            let valued = self.value_postings(txn, currency)?;

            let mut pending: BTreeMap<&str, Decimal> = BTreeMap::new();
            for valued_posting in &valued {
                for bucket in &valued_posting.buckets {
                    let total = pending.entry(bucket.as_str()).or_insert(Decimal::ZERO);
                    *total = total.checked_add(valued_posting.value).ok_or_else(|| {
                        CashflowError::AmountOverflow {
                            asset_account: bucket.clone(),
                            currency: currency.to_string(),
                        }
                    })?;
                }
            }

            for (bucket, amount) in pending {
                if amount.round_dp(CASHFLOW_ROUNDING_DP).is_zero() {
                    continue;
                }
                let mut cashflow = Cashflow::from_transaction(txn, amount);
                for valued_posting in valued
                    .iter()
                    .filter(|v| !v.buckets.iter().any(|b| b == bucket))
                {
                    let account = valued_posting.posting.account.clone();
                    if valued_posting.value > Decimal::ZERO {
                        cashflow.outflow_accounts.insert(account);
                    } else {
                        cashflow.inflow_accounts.insert(account);
                    }
                }
                debug!("{} {}: cashflow of {} {}", txn.date, bucket, amount, currency);
                cashflows.entry(bucket.to_string()).or_default().push(cashflow);
            }
        }

        Ok(cashflows)
    }

    fn value_postings<'t>(
        &self,
        txn: &'t Transaction,
        currency: &str,
    ) -> Result<Vec<ValuedPosting<'t>>> {
        txn.postings
            .iter()
            .map(|posting| {
                let value = self.posting_value(txn.date, posting, currency)?;
                let buckets = self
                    .mapper
                    .resolve(&posting.account)
                    .map(|asset_account| self.mapper.ancestors_within(&asset_account))
                    .unwrap_or_default();
                Ok(ValuedPosting {
                    posting,
                    value,
                    buckets,
                })
            })
            .collect()
    }

    /// Weight of `posting` in `currency` at `date`.
    fn posting_value(&self, date: NaiveDate, posting: &Posting, currency: &str) -> Result<Decimal> {
        let converted = posting
            .weight()
            .and_then(|weight| self.valuation.convert_amount(&weight, currency, Some(date)))
            .map_err(|e| CashflowError::UnconvertedPosting {
                account: posting.account.clone(),
                date,
                currency: currency.to_string(),
                reason: e.to_string(),
            })?;

        if converted.currency != currency {
            return Err(CashflowError::CurrencyMismatch {
                account: posting.account.clone(),
                date,
                expected: currency.to_string(),
                actual: converted.currency,
            }
            .into());
        }
        Ok(converted.number)
    }
}
