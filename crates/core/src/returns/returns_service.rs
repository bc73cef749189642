use super::return_solver::xirr;
use super::returns_model::{AssetReturnSummary, RateOfReturn};
use crate::cashflows::{Cashflow, CashflowKind, CashflowService, CashflowsByAssetAccount};
use crate::constants::{GROUP_ASSET_ACCOUNT, XIRR_DEFAULT_GUESS};
use crate::errors::Result;
use crate::ledger::LedgerProviderTrait;
use crate::settings::ReturnsSettings;
use chrono::NaiveDate;
use log::{debug, info, warn};

/// Computes money-weighted returns from extracted cashflows.
pub struct ReturnsService {
    guess: f64,
}

impl Default for ReturnsService {
    fn default() -> Self {
        ReturnsService::new()
    }
}

impl ReturnsService {
    pub fn new() -> Self {
        ReturnsService {
            guess: XIRR_DEFAULT_GUESS,
        }
    }

    /// Starts the root search at `guess` instead of 10%.
    pub fn with_guess(guess: f64) -> Self {
        ReturnsService { guess }
    }

    /// Annualized rate of return of one cashflow series.
    ///
    /// A series without both signs has no rate and reports as diverged.
    pub fn rate_of_return(&self, cashflows: &[Cashflow]) -> RateOfReturn {
        if cashflows.len() < 2 {
            return RateOfReturn::InsufficientData;
        }

        let points: Vec<_> = cashflows.iter().map(Cashflow::as_point).collect();
        RateOfReturn::from_xirr(xirr(&points, self.guess))
    }

    /// One summary row per asset account, sorted by account name.
    pub fn summarize(&self, cashflows_by_account: &CashflowsByAssetAccount) -> Vec<AssetReturnSummary> {
        cashflows_by_account
            .iter()
            .map(|(asset_account, cashflows)| {
                let summary = self.summarize_account(asset_account, cashflows);
                if summary.rate == RateOfReturn::InsufficientData {
                    warn!(
                        "Not enough cashflows to compute a return for {} ({} cashflows)",
                        asset_account,
                        cashflows.len()
                    );
                }
                debug!("{}: {}", asset_account, summary.rate);
                summary
            })
            .collect()
    }

    /// Extracts the cashflows `settings` describe from `ledger` and summarizes
    /// them. In group mode the result is a single row for the whole group.
    pub fn report(
        &self,
        ledger: &dyn LedgerProviderTrait,
        settings: &ReturnsSettings,
        today: NaiveDate,
    ) -> Result<Vec<AssetReturnSummary>> {
        let (start, end) = settings.resolve_window(today)?;
        let cashflow_service =
            CashflowService::new(ledger).with_assets_root(&settings.assets_root);

        let cashflows = if settings.is_group_mode() {
            let group = cashflow_service.group_cashflows(
                &settings.interesting_accounts,
                &settings.internal_accounts,
                start,
                Some(end),
                &settings.currency,
            )?;
            CashflowsByAssetAccount::from([(GROUP_ASSET_ACCOUNT.to_string(), group)])
        } else {
            let mapper = settings.account_mapper()?;
            cashflow_service.cashflows_by_asset_account(
                &mapper,
                start,
                Some(end),
                &settings.currency,
            )?
        };

        let rows = self.summarize(&cashflows);
        info!("Computed returns for {} asset accounts", rows.len());
        Ok(rows)
    }

    fn summarize_account(&self, asset_account: &str, cashflows: &[Cashflow]) -> AssetReturnSummary {
        let net_inflows = cashflows
            .iter()
            .filter(|cf| cf.kind != CashflowKind::EndingBalance)
            .map(|cf| cf.amount)
            .sum();
        let market_value = cashflows
            .iter()
            .rev()
            .find(|cf| cf.kind == CashflowKind::EndingBalance)
            .map(|cf| -cf.amount);

        AssetReturnSummary {
            asset_account: asset_account.to_string(),
            net_inflows,
            market_value,
            rate: self.rate_of_return(cashflows),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{Ledger, Posting, Transaction};
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn deposit_and_growth() -> Vec<Cashflow> {
        vec![
            Cashflow::starting_balance(date(2023, 1, 1), dec!(1000)),
            Cashflow::ending_balance(date(2024, 1, 1), dec!(1100)),
        ]
    }

    #[test]
    fn test_rate_of_return_from_boundaries() {
        let service = ReturnsService::with_guess(0.05);
        let rate = service.rate_of_return(&deposit_and_growth()).rate().unwrap();
        assert!((rate - 0.10).abs() < 1e-6);
    }

    #[test]
    fn test_single_cashflow_is_insufficient() {
        let service = ReturnsService::new();
        let cashflows = vec![Cashflow::starting_balance(date(2023, 1, 1), dec!(1000))];
        assert_eq!(
            service.rate_of_return(&cashflows),
            RateOfReturn::InsufficientData
        );
    }

    #[test]
    fn test_one_signed_series_diverges() {
        let service = ReturnsService::new();
        let cashflows = vec![
            Cashflow::starting_balance(date(2023, 1, 1), dec!(1000)),
            Cashflow::starting_balance(date(2023, 6, 1), dec!(500)),
        ];
        assert_eq!(service.rate_of_return(&cashflows), RateOfReturn::Diverged);
    }

    #[test]
    fn test_report_values_holdings_under_configured_assets_root() {
        let ledger = Ledger::new(
            vec![Transaction::new(
                date(2023, 1, 10),
                "Einzahlung",
                vec![
                    Posting::new("Vermoegen:Depot", dec!(1000), "USD"),
                    Posting::new("Equity:Opening", dec!(-1000), "USD"),
                ],
            )],
            vec![],
        )
        .unwrap();
        let settings = ReturnsSettings::from_json_str(
            r#"{ "assetsRoot": "Vermoegen", "period": { "year": 2023 } }"#,
        )
        .unwrap();

        let rows = ReturnsService::new()
            .report(&ledger, &settings, date(2024, 3, 1))
            .unwrap();

        let names: Vec<&str> = rows.iter().map(|r| r.asset_account.as_str()).collect();
        assert_eq!(names, vec!["Vermoegen", "Vermoegen:Depot"]);
        for row in &rows {
            assert_eq!(row.net_inflows, dec!(1000));
            assert_eq!(row.market_value, Some(dec!(1000)));
            assert!(row.rate.rate().unwrap().abs() < 1e-6);
        }
    }

    #[test]
    fn test_summarize_rows() {
        let mut by_account = CashflowsByAssetAccount::new();
        by_account.insert("Assets:B".to_string(), deposit_and_growth());
        by_account.insert(
            "Assets:A".to_string(),
            vec![Cashflow::starting_balance(date(2023, 1, 1), dec!(5))],
        );

        let rows = ReturnsService::new().summarize(&by_account);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].asset_account, "Assets:A");
        assert_eq!(rows[0].net_inflows, dec!(5));
        assert_eq!(rows[0].market_value, None);
        assert_eq!(rows[0].rate, RateOfReturn::InsufficientData);
        assert_eq!(rows[1].asset_account, "Assets:B");
        assert_eq!(rows[1].net_inflows, dec!(1000));
        assert_eq!(rows[1].market_value, Some(dec!(1100)));
        assert!(rows[1].rate.rate().is_some());
    }
}
