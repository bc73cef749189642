use super::account_mapper::AccountMapper;
use super::boundary_valuator::BoundaryValuator;
use super::cashflow_aggregator::CashflowAggregator;
use super::cashflow_model::{Cashflow, CashflowsByAssetAccount};
use crate::constants::GROUP_ASSET_ACCOUNT;
use crate::errors::Result;
use crate::ledger::{LedgerProviderTrait, MarketValuation, ValuationEngineTrait};
use chrono::{Days, NaiveDate};
use log::{debug, info};

/// Extracts complete cashflow series (transactions plus boundary valuations)
/// from a ledger.
pub struct CashflowService<'a> {
    ledger: &'a dyn LedgerProviderTrait,
    valuation: Box<dyn ValuationEngineTrait + 'a>,
    assets_root: Option<String>,
}

impl<'a> CashflowService<'a> {
    /// Service valuing holdings with the ledger's own prices.
    pub fn new(ledger: &'a dyn LedgerProviderTrait) -> Self {
        CashflowService {
            ledger,
            valuation: Box::new(MarketValuation::new(ledger.price_map())),
            assets_root: None,
        }
    }

    pub fn with_valuation(
        ledger: &'a dyn LedgerProviderTrait,
        valuation: Box<dyn ValuationEngineTrait + 'a>,
    ) -> Self {
        CashflowService {
            ledger,
            valuation,
            assets_root: None,
        }
    }

    /// Recognises asset accounts by `assets_root` instead of asking the ledger.
    pub fn with_assets_root(mut self, assets_root: &str) -> Self {
        self.assets_root = Some(assets_root.to_string());
        self
    }

    /// For each asset account, the cashflows between `start` and `end`
    /// (inclusive) denominated in `currency`.
    ///
    /// When `start` is given, an asset account holding something at the
    /// beginning of `start` gets a first cashflow valuing it as an inflow.
    /// Every asset account holding something at the end of `end` gets a last
    /// cashflow valuing it as an outflow. Without `end` that valuation covers
    /// the whole ledger and is dated at its latest transaction, or at `start`
    /// when that comes later.
    pub fn cashflows_by_asset_account(
        &self,
        mapper: &AccountMapper,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        currency: &str,
    ) -> Result<CashflowsByAssetAccount> {
        let transactions = self.ledger.list_transactions();
        let valuation = self.valuation.as_ref();

        let mut cashflows = CashflowAggregator::new(mapper, valuation)
            .aggregate(transactions, start, end, currency)?;

        let mut valuator = BoundaryValuator::new(self.ledger, mapper, valuation);
        if let Some(assets_root) = &self.assets_root {
            valuator = valuator.with_assets_root(assets_root);
        }

        if let Some(start) = start {
            let starting_values = valuator.value_accounts(transactions, Some(start), currency)?;
            for (asset_account, market_value) in starting_values {
                cashflows
                    .entry(asset_account)
                    .or_default()
                    .insert(0, Cashflow::starting_balance(start, market_value));
            }
        }

        // Valuing at the end of `end` must include that day's transactions.
        let ending_cutoff = end.and_then(|end| end.checked_add_days(Days::new(1)));
        // Unbounded: the latest transaction, but never before the starting balance.
        let ending_date = end.or_else(|| {
            transactions
                .last()
                .map(|txn| start.map_or(txn.date, |start| start.max(txn.date)))
        });
        if let Some(ending_date) = ending_date {
            let ending_values = valuator.value_accounts(transactions, ending_cutoff, currency)?;
            for (asset_account, market_value) in ending_values {
                cashflows
                    .entry(asset_account)
                    .or_default()
                    .push(Cashflow::ending_balance(ending_date, market_value));
            }
        }

        info!(
            "Extracted cashflows for {} asset accounts ({:?} to {:?}, {})",
            cashflows.len(),
            start,
            end,
            currency
        );
        Ok(cashflows)
    }

    /// Cashflows of one group of accounts taken together.
    ///
    /// `interesting` and `internal` are patterns matching the start of account
    /// names. Flows among matched accounts (a dividend landing in the
    /// brokerage account, say) cancel out; only money crossing to accounts
    /// matched by neither is a cashflow.
    pub fn group_cashflows(
        &self,
        interesting: &[String],
        internal: &[String],
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        currency: &str,
    ) -> Result<Vec<Cashflow>> {
        let mapper = AccountMapper::for_groups(interesting, internal)?;
        let mut by_asset_account = self.cashflows_by_asset_account(&mapper, start, end, currency)?;
        let cashflows = by_asset_account
            .remove(GROUP_ASSET_ACCOUNT)
            .unwrap_or_default();
        debug!("Group of {:?} has {} cashflows", interesting, cashflows.len());
        Ok(cashflows)
    }
}
