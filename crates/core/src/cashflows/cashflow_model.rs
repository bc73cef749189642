use crate::ledger::Transaction;
use chrono::NaiveDate;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CashflowKind {
    /// Money crossing the asset account boundary in a ledger transaction
    Transaction,
    /// Market value held at the start of the window, as an inflow
    StartingBalance,
    /// Market value held at the end of the window, as an outflow
    EndingBalance,
}

/// A dated, signed movement of money into (positive) or out of (negative) an
/// asset account, in the query currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cashflow {
    pub date: NaiveDate,
    pub amount: Decimal,
    pub kind: CashflowKind,
    /// Accounts outside the asset account that funded this flow
    #[serde(default)]
    pub inflow_accounts: BTreeSet<String>,
    /// Accounts outside the asset account that received this flow
    #[serde(default)]
    pub outflow_accounts: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction: Option<Transaction>,
}

impl Cashflow {
    pub fn from_transaction(transaction: &Transaction, amount: Decimal) -> Self {
        Cashflow {
            date: transaction.date,
            amount,
            kind: CashflowKind::Transaction,
            inflow_accounts: BTreeSet::new(),
            outflow_accounts: BTreeSet::new(),
            transaction: Some(transaction.clone()),
        }
    }

    pub fn starting_balance(date: NaiveDate, market_value: Decimal) -> Self {
        Cashflow::boundary(date, market_value, CashflowKind::StartingBalance)
    }

    /// Holdings at the end of the window leave the account: the amount is the
    /// negated market value.
    pub fn ending_balance(date: NaiveDate, market_value: Decimal) -> Self {
        Cashflow::boundary(date, -market_value, CashflowKind::EndingBalance)
    }

    fn boundary(date: NaiveDate, amount: Decimal, kind: CashflowKind) -> Self {
        Cashflow {
            date,
            amount,
            kind,
            inflow_accounts: BTreeSet::new(),
            outflow_accounts: BTreeSet::new(),
            transaction: None,
        }
    }

    /// (date, amount) pair for the rate solver.
    pub fn as_point(&self) -> (NaiveDate, f64) {
        // Every Decimal is within f64 range; only precision is lost.
        (self.date, self.amount.to_f64().unwrap_or_default())
    }
}

/// Cashflows of each asset account, keyed by asset account name.
pub type CashflowsByAssetAccount = BTreeMap<String, Vec<Cashflow>>;
