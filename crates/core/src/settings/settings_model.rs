use crate::cashflows::AccountMappingConfig;
use crate::constants::{DEFAULT_ASSETS_ROOT, DEFAULT_CURRENCY};
use crate::returns::ReportPeriod;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// What to report on and how to group the ledger's accounts.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ReturnsSettings {
    pub currency: String,
    /// Ordered `pattern -> replacement` rules naming the asset account of each
    /// ledger account. First match wins.
    pub asset_account_map: Vec<AccountMappingConfig>,
    /// Prefixes of the accounts reported on together as one group
    pub interesting_accounts: Vec<String>,
    /// Prefixes of accounts whose flows count as part of the group
    pub internal_accounts: Vec<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub period: Option<ReportPeriod>,
    pub assets_root: String,
}

impl Default for ReturnsSettings {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            asset_account_map: Vec::new(),
            interesting_accounts: Vec::new(),
            internal_accounts: Vec::new(),
            start_date: None,
            end_date: None,
            period: None,
            assets_root: DEFAULT_ASSETS_ROOT.to_string(),
        }
    }
}
