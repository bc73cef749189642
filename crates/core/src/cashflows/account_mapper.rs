use crate::constants::GROUP_ASSET_ACCOUNT;
use crate::errors::{CashflowError, Result};
use crate::ledger::accounts;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// A configured mapping rule, before compilation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AccountMappingConfig {
    pub pattern: String,
    pub replacement: String,
}

impl AccountMappingConfig {
    pub fn new(pattern: &str, replacement: &str) -> Self {
        AccountMappingConfig {
            pattern: pattern.to_string(),
            replacement: replacement.to_string(),
        }
    }
}

/// A compiled rule: a pattern that must match a prefix of an account name, and
/// the replacement for that prefix.
#[derive(Debug, Clone)]
pub struct AccountMappingRule {
    pattern: Regex,
    replacement: String,
}

impl AccountMappingRule {
    pub fn new(pattern: &str, replacement: &str) -> Result<Self> {
        let anchored = format!("^(?:{})", pattern);
        let compiled = Regex::new(&anchored).map_err(|e| CashflowError::InvalidAccountPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(AccountMappingRule {
            pattern: compiled,
            replacement: replacement.to_string(),
        })
    }

    /// The asset account `account` maps to under this rule alone.
    pub fn apply(&self, account: &str) -> Option<String> {
        if !self.pattern.is_match(account) {
            return None;
        }
        Some(
            self.pattern
                .replacen(account, 1, self.replacement.as_str())
                .into_owned(),
        )
    }
}

/// Resolves account names to the asset account they are accounted under.
///
/// Rules are tried in declaration order and the first match wins, even when a
/// later rule would match a longer prefix.
#[derive(Debug, Clone, Default)]
pub struct AccountMapper {
    rules: Vec<AccountMappingRule>,
}

impl AccountMapper {
    pub fn new(rules: Vec<AccountMappingRule>) -> Self {
        AccountMapper { rules }
    }

    pub fn from_config(configs: &[AccountMappingConfig]) -> Result<Self> {
        let rules = configs
            .iter()
            .map(|config| AccountMappingRule::new(&config.pattern, &config.replacement))
            .collect::<Result<Vec<_>>>()?;
        Ok(AccountMapper::new(rules))
    }

    /// Mapper sending every interesting and internal account, sub-accounts
    /// included, to the single bucket [`GROUP_ASSET_ACCOUNT`].
    ///
    /// Flows between two mapped accounts cancel out; only flows crossing to
    /// accounts matched by neither list are cashflows of the group.
    pub fn for_groups(interesting: &[String], internal: &[String]) -> Result<Self> {
        let rules = interesting
            .iter()
            .chain(internal.iter())
            .map(|pattern| {
                AccountMappingRule::new(&format!("(?:{}).*", pattern), GROUP_ASSET_ACCOUNT)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(AccountMapper::new(rules))
    }

    pub fn resolve(&self, account: &str) -> Option<String> {
        self.rules.iter().find_map(|rule| rule.apply(account))
    }

    /// `asset_account` followed by each enclosing ancestor that is itself a
    /// target of the mapping (it resolves to itself), nearest first.
    ///
    /// The walk ends at the first ancestor no rule matches.
    pub fn ancestors_within(&self, asset_account: &str) -> Vec<String> {
        let mut buckets = vec![asset_account.to_string()];
        for ancestor in accounts::parents(asset_account).skip(1) {
            match self.resolve(ancestor) {
                Some(target) if target == ancestor => buckets.push(target),
                Some(_) => {}
                None => break,
            }
        }
        buckets
    }
}
