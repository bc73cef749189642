use super::settings_model::ReturnsSettings;
use crate::cashflows::{AccountMapper, AccountMappingConfig};
use crate::errors::{Error, Result, ValidationError};
use chrono::NaiveDate;
use log::{debug, info};
use std::fs;
use std::path::Path;

impl ReturnsSettings {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: ReturnsSettings = serde_json::from_str(json)
            .map_err(|e| Error::InvalidConfigValue(format!("Invalid returns settings: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::ConfigIO(format!("{}: {}", path.display(), e)))?;
        let settings = ReturnsSettings::from_json_str(&contents)?;
        info!("Loaded returns settings from {}", path.display());
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.currency.trim().is_empty() {
            return Err(Error::InvalidConfigValue(
                "currency must not be empty".to_string(),
            ));
        }
        if self.assets_root.trim().is_empty() {
            return Err(Error::InvalidConfigValue(
                "assetsRoot must not be empty".to_string(),
            ));
        }
        if self.is_group_mode() && !self.asset_account_map.is_empty() {
            return Err(Error::InvalidConfigValue(
                "interestingAccounts and assetAccountMap cannot be combined".to_string(),
            ));
        }
        if !self.internal_accounts.is_empty() && !self.is_group_mode() {
            return Err(Error::InvalidConfigValue(
                "internalAccounts requires interestingAccounts".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether the accounts are reported on as a single group.
    pub fn is_group_mode(&self) -> bool {
        !self.interesting_accounts.is_empty()
    }

    /// Mapper for per-asset-account reporting. Without explicit rules every
    /// account under the assets root is its own asset account.
    pub fn account_mapper(&self) -> Result<AccountMapper> {
        if self.asset_account_map.is_empty() {
            let identity = AccountMappingConfig::new(&self.assets_root, &self.assets_root);
            return AccountMapper::from_config(&[identity]);
        }
        AccountMapper::from_config(&self.asset_account_map)
    }

    /// Report window as `(start, end)`. A named period and explicit dates are
    /// mutually exclusive; `end` defaults to `today`.
    pub fn resolve_window(&self, today: NaiveDate) -> Result<(Option<NaiveDate>, NaiveDate)> {
        let (start, end) = match self.period {
            Some(period) => {
                if self.start_date.is_some() || self.end_date.is_some() {
                    return Err(ValidationError::InvalidInput(
                        "period cannot be combined with startDate or endDate".to_string(),
                    )
                    .into());
                }
                let (start, end) = period.resolve(today)?;
                (Some(start), end)
            }
            None => (self.start_date, self.end_date.unwrap_or(today)),
        };

        if let Some(start) = start {
            if start > end {
                return Err(ValidationError::InvalidInput(format!(
                    "start date {} is after end date {}",
                    start, end
                ))
                .into());
            }
        }
        debug!("Report window {:?} to {}", start, end);
        Ok((start, end))
    }
}
