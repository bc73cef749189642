//! Tests for ledger loading and chart-of-accounts queries.

#[cfg(test)]
mod tests {
    use crate::errors::Error;
    use crate::fx::FxError;
    use crate::ledger::{
        Amount, CostOrPrice, Ledger, LedgerProviderTrait, Posting, Transaction,
    };
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::io::Write;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    const SNAPSHOT: &str = r#"{
        "transactions": [
            {
                "date": "2016-12-01",
                "narration": "Buy more",
                "postings": [
                    { "account": "Assets:Brokerage", "units": { "number": "1000", "currency": "ABC" },
                      "costOrPrice": { "cost": { "number": "2.00", "currency": "USD" } } },
                    { "account": "Assets:Cash", "units": { "number": "-2000", "currency": "USD" } }
                ]
            },
            {
                "date": "2015-12-01",
                "postings": [
                    { "account": "Assets:Cash", "units": { "number": 3000, "currency": "USD" } },
                    { "account": "Equity:Opening-Balances", "units": { "number": -3000, "currency": "USD" } }
                ]
            }
        ],
        "prices": [
            { "date": "2015-12-01", "currency": "ABC", "quoteCurrency": "USD", "rate": "1.00" }
        ]
    }"#;

    // ==================== Loading ====================

    #[test]
    fn test_from_json_orders_transactions_by_date() {
        let ledger = Ledger::from_json_str(SNAPSHOT).unwrap();
        let dates: Vec<NaiveDate> = ledger
            .list_transactions()
            .iter()
            .map(|txn| txn.date)
            .collect();
        assert_eq!(dates, vec![date(2015, 12, 1), date(2016, 12, 1)]);
    }

    #[test]
    fn test_from_json_reads_costs_and_prices() {
        let ledger = Ledger::from_json_str(SNAPSHOT).unwrap();
        let buy = &ledger.list_transactions()[1];
        assert_eq!(
            buy.postings[0].cost_or_price,
            Some(CostOrPrice::Cost(Amount::new(dec!(2.00), "USD")))
        );
        assert_eq!(
            buy.postings[0].weight().unwrap(),
            Amount::new(dec!(2000), "USD")
        );

        let rate = ledger
            .price_map()
            .get_rate("ABC", "USD", Some(date(2016, 1, 1)))
            .unwrap();
        assert_eq!(rate, dec!(1.00));
    }

    #[test]
    fn test_from_json_rejects_malformed_snapshot() {
        let result = Ledger::from_json_str("{ \"transactions\": 12 }");
        assert!(matches!(result, Err(Error::Ledger(_))));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SNAPSHOT.as_bytes()).unwrap();

        let ledger = Ledger::from_path(file.path()).unwrap();
        assert_eq!(ledger.list_transactions().len(), 2);
    }

    #[test]
    fn test_from_path_missing_file() {
        let result = Ledger::from_path(std::path::Path::new("/nonexistent/ledger.json"));
        assert!(matches!(result, Err(Error::Ledger(_))));
    }

    #[test]
    fn test_same_day_transactions_keep_input_order() {
        let first = Transaction::new(date(2023, 1, 1), "first", vec![]);
        let second = Transaction::new(date(2023, 1, 1), "second", vec![]);
        let earlier = Transaction::new(date(2022, 1, 1), "earlier", vec![]);
        let ledger = Ledger::new(vec![first, second, earlier], vec![]).unwrap();

        let narrations: Vec<&str> = ledger
            .list_transactions()
            .iter()
            .map(|txn| txn.narration.as_str())
            .collect();
        assert_eq!(narrations, vec!["earlier", "first", "second"]);
    }

    // ==================== Chart of accounts ====================

    #[test]
    fn test_is_asset_account() {
        let ledger = Ledger::new(vec![], vec![]).unwrap();
        assert!(ledger.is_asset_account("Assets:Brokerage:BND"));
        assert!(!ledger.is_asset_account("Income:Dividends"));
        assert!(!ledger.is_asset_account("AssetsLike:Thing"));
    }

    #[test]
    fn test_custom_assets_root() {
        let ledger = Ledger::new(vec![], vec![]).unwrap().with_assets_root("Actifs");
        assert!(ledger.is_asset_account("Actifs:Banque"));
        assert!(!ledger.is_asset_account("Assets:Bank"));
    }

    #[test]
    fn test_account_ancestors() {
        let ledger = Ledger::new(vec![], vec![]).unwrap();
        assert_eq!(
            ledger.account_ancestors("Assets:Brokerage:BND"),
            vec!["Assets:Brokerage:BND", "Assets:Brokerage", "Assets"]
        );
    }

    #[test]
    fn test_posting_weight_with_price() {
        let posting = Posting::new("Assets:EUR", dec!(100), "EUR").at_price(dec!(1.1), "USD");
        assert_eq!(posting.weight().unwrap(), Amount::new(dec!(110.0), "USD"));
        assert!(posting.cost().is_none());
    }

    #[test]
    fn test_posting_weight_overflow_is_an_error() {
        let posting = Posting::new("Assets:Brokerage", dec!(1000000000000000), "ABC")
            .at_cost(dec!(1000000000000000), "USD");
        assert!(matches!(
            posting.weight(),
            Err(FxError::ConversionError(_))
        ));
    }
}
