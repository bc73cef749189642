//! Property-based integration tests for cashflow extraction and the return
//! solver.
//!
//! These tests verify that universal properties hold across randomly generated
//! ledgers, using the `proptest` crate for random test case generation.

use chrono::{Days, NaiveDate};
use ledger_returns_core::cashflows::{
    AccountMapper, AccountMappingConfig, Cashflow, CashflowKind, CashflowService,
};
use ledger_returns_core::ledger::{Ledger, Posting, Transaction};
use ledger_returns_core::returns::xnpv;
use proptest::prelude::*;
use rust_decimal::Decimal;

// =============================================================================
// Generators
// =============================================================================

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
}

fn day(offset: u64) -> NaiveDate {
    base_date().checked_add_days(Days::new(offset)).unwrap()
}

/// Generates a nonzero amount in whole cents.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    prop_oneof![-1_000_000i64..-1, 1i64..1_000_000].prop_map(|cents| Decimal::new(cents, 2))
}

fn arb_sub_account() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("Assets:Broker:Cash"),
        Just("Assets:Broker:Bonds"),
        Just("Assets:Broker:Stocks"),
    ]
}

/// Generates a transfer between two sub-accounts of the broker.
fn arb_internal_transfer() -> impl Strategy<Value = Transaction> {
    (0u64..365, arb_sub_account(), arb_sub_account(), arb_amount()).prop_map(
        |(offset, from, to, amount)| {
            Transaction::new(
                day(offset),
                "Transfer",
                vec![
                    Posting::new(from, -amount, "USD"),
                    Posting::new(to, amount, "USD"),
                ],
            )
        },
    )
}

/// Generates a deposit (or withdrawal) between checking and a broker
/// sub-account.
fn arb_external_flow() -> impl Strategy<Value = Transaction> {
    (0u64..365, arb_sub_account(), arb_amount()).prop_map(|(offset, account, amount)| {
        Transaction::new(
            day(offset),
            "External",
            vec![
                Posting::new(account, amount, "USD"),
                Posting::new("Assets:Checking", -amount, "USD"),
            ],
        )
    })
}

fn mapper(pattern: &str, replacement: &str) -> AccountMapper {
    AccountMapper::from_config(&[AccountMappingConfig::new(pattern, replacement)]).unwrap()
}

fn sum_of_transaction_flows(cashflows: &[Cashflow]) -> Decimal {
    cashflows
        .iter()
        .filter(|cf| cf.kind == CashflowKind::Transaction)
        .map(|cf| cf.amount)
        .sum()
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Transfers among accounts of one asset account net to zero there and
    /// emit no transaction cashflow.
    #[test]
    fn prop_internal_transfers_net_out(
        transfers in proptest::collection::vec(arb_internal_transfer(), 1..30)
    ) {
        let ledger = Ledger::new(transfers, vec![]).unwrap();
        let service = CashflowService::new(&ledger);
        let m = mapper("Assets:Broker(:.*)?$", "Assets:Broker");

        let by_account = service
            .cashflows_by_asset_account(&m, None, Some(day(400)), "USD")
            .unwrap();

        for cashflows in by_account.values() {
            prop_assert!(
                cashflows.iter().all(|cf| cf.kind != CashflowKind::Transaction),
                "Internal transfers should not produce transaction cashflows"
            );
        }
    }

    /// An enclosing asset account receives the same contributions as the
    /// accounts inside it, so its flows add up to theirs.
    #[test]
    fn prop_ancestor_equals_sum_of_children(
        flows in proptest::collection::vec(arb_external_flow(), 1..30)
    ) {
        let ledger = Ledger::new(flows, vec![]).unwrap();
        let service = CashflowService::new(&ledger);
        let m = mapper("Assets:Broker", "Assets:Broker");

        let by_account = service
            .cashflows_by_asset_account(&m, None, Some(day(400)), "USD")
            .unwrap();

        let parent = by_account
            .get("Assets:Broker")
            .map(|cfs| sum_of_transaction_flows(cfs))
            .unwrap_or(Decimal::ZERO);
        let children: Decimal = by_account
            .iter()
            .filter(|(account, _)| account.starts_with("Assets:Broker:"))
            .map(|(_, cfs)| sum_of_transaction_flows(cfs))
            .sum();

        prop_assert_eq!(parent, children);
    }

    /// With a start date every valued asset account opens with its starting
    /// balance and closes with its ending balance.
    #[test]
    fn prop_boundaries_frame_the_series(
        flows in proptest::collection::vec(arb_external_flow(), 1..30),
        start_offset in 1u64..200,
        length in 1u64..200,
    ) {
        let ledger = Ledger::new(flows, vec![]).unwrap();
        let service = CashflowService::new(&ledger);
        let m = mapper("Assets:Broker", "Assets:Broker");
        let start = day(start_offset);
        let end = day(start_offset + length);

        let by_account = service
            .cashflows_by_asset_account(&m, Some(start), Some(end), "USD")
            .unwrap();

        for cashflows in by_account.values() {
            prop_assert!(!cashflows.is_empty());
            for cf in cashflows {
                prop_assert!(cf.date >= start && cf.date <= end);
            }
            let starting: Vec<usize> = cashflows
                .iter()
                .enumerate()
                .filter(|(_, cf)| cf.kind == CashflowKind::StartingBalance)
                .map(|(i, _)| i)
                .collect();
            prop_assert!(starting.is_empty() || starting == vec![0]);

            // Holdings that net to nothing have no ending balance.
            let ending: Vec<usize> = cashflows
                .iter()
                .enumerate()
                .filter(|(_, cf)| cf.kind == CashflowKind::EndingBalance)
                .map(|(i, _)| i)
                .collect();
            prop_assert!(ending.is_empty() || ending == vec![cashflows.len() - 1]);
            if let Some(last) = cashflows.last().filter(|cf| cf.kind == CashflowKind::EndingBalance) {
                prop_assert_eq!(last.date, end);
            }
        }
    }

    /// Discounting at a zero rate leaves the amounts unchanged.
    #[test]
    fn prop_xnpv_at_zero_is_sum(
        points in proptest::collection::vec((0u64..3650, -1.0e6f64..1.0e6), 0..50)
    ) {
        let cashflows: Vec<(NaiveDate, f64)> = points
            .iter()
            .map(|(offset, amount)| (day(*offset), *amount))
            .collect();
        let sum: f64 = cashflows.iter().map(|(_, amount)| amount).sum();

        prop_assert!((xnpv(0.0, &cashflows) - sum).abs() < 1e-6);
    }
}
