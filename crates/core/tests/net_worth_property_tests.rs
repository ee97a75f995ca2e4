//! Property-based integration tests for balance history, aggregation and
//! chart series bucketing.
//!
//! These tests verify that universal properties hold across all valid inputs,
//! using the `proptest` crate for random test case generation.

use chrono::{DateTime, TimeZone, Utc};
use networth_core::accounts::{
    append_balance, current_balance, Account, AccountType, BalanceEntry,
};
use networth_core::portfolio::history::{build_chart_series, HistoricalDataPoint, TimeFrame};
use networth_core::portfolio::net_worth::aggregate;
use networth_core::portfolio::snapshot::NetWorthSnapshot;
use networth_core::utils::time_utils::DEFAULT_VALUATION_TZ;
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::{BTreeSet, HashSet};

// =============================================================================
// Generators
// =============================================================================

/// 2020-01-01T00:00:00Z
const BASE_TS: i64 = 1_577_836_800;

fn instant(offset_minutes: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(BASE_TS + offset_minutes * 60, 0).unwrap()
}

fn now() -> DateTime<Utc> {
    // 2024-12-31
    instant(60 * 24 * 1826)
}

/// Money amount with two decimal places.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (-100_000_000i64..100_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn arb_account_type() -> impl Strategy<Value = AccountType> {
    proptest::sample::select(AccountType::ALL.to_vec())
}

/// History with distinct timestamps, in arbitrary order.
fn arb_history(max_len: usize) -> impl Strategy<Value = Vec<BalanceEntry>> {
    proptest::collection::btree_set(0i64..2_000_000, 0..=max_len)
        .prop_flat_map(|offsets| {
            let len = offsets.len();
            (
                Just(offsets.into_iter().collect::<Vec<_>>()),
                proptest::collection::vec(arb_amount(), len),
            )
        })
        .prop_map(|(offsets, amounts)| {
            offsets
                .into_iter()
                .zip(amounts)
                .map(|(o, a)| BalanceEntry::new(a, instant(o)))
                .collect::<Vec<_>>()
        })
        .prop_shuffle()
}

fn arb_account() -> impl Strategy<Value = Account> {
    ("[a-z]{8}", arb_account_type(), arb_history(6)).prop_map(|(id, account_type, history)| {
        Account {
            id,
            owner_id: "user-1".to_string(),
            institution: "Bank".to_string(),
            name: None,
            account_type,
            category: None,
            tags: BTreeSet::new(),
            display_order: 0,
            balance_history: history,
            created_at: instant(0),
            updated_at: instant(0),
        }
    })
}

fn arb_snapshots(max_len: usize) -> impl Strategy<Value = Vec<NetWorthSnapshot>> {
    proptest::collection::vec((0i64..60 * 24 * 1826, arb_amount()), 0..=max_len).prop_map(
        |points| {
            points
                .into_iter()
                .enumerate()
                .map(|(i, (offset, value))| NetWorthSnapshot {
                    id: format!("snap-{}", i),
                    date: instant(offset),
                    total_assets: value,
                    total_liabilities: Decimal::ZERO,
                    net_worth: value,
                    account_balances: vec![],
                })
                .collect()
        },
    )
}

fn arb_historical() -> impl Strategy<Value = Vec<HistoricalDataPoint>> {
    proptest::collection::btree_map(2000i32..2024, arb_amount(), 0..5).prop_map(|points| {
        points
            .into_iter()
            .map(|(year, value)| HistoricalDataPoint::new(year, value))
            .collect()
    })
}

fn arb_time_frame() -> impl Strategy<Value = TimeFrame> {
    proptest::sample::select(TimeFrame::ALL_FRAMES.to_vec())
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The current balance is the balance of the latest-dated entry, whatever
    /// order the entries are stored in.
    #[test]
    fn prop_current_balance_is_latest_dated_entry(account in arb_account()) {
        let expected = account
            .balance_history
            .iter()
            .max_by_key(|e| e.date)
            .map(|e| e.balance)
            .unwrap_or(Decimal::ZERO);

        prop_assert_eq!(current_balance(&account), expected);
    }

    /// Appending keeps the history sorted with one entry per timestamp.
    #[test]
    fn prop_append_keeps_history_sorted_and_unique(
        account in arb_account(),
        offset in 0i64..2_000_000,
        amount in arb_amount(),
    ) {
        let updated = append_balance(&account, amount, instant(offset));
        let dates: Vec<_> = updated.balance_history.iter().map(|e| e.date).collect();

        prop_assert!(dates.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(updated
            .balance_history
            .iter()
            .any(|e| e.date == instant(offset) && e.balance == amount));
    }

    /// Each account contributes its current balance to exactly one total.
    #[test]
    fn prop_aggregate_partitions_accounts(
        accounts in proptest::collection::vec(arb_account(), 0..10)
    ) {
        let totals = aggregate(&accounts);

        let liabilities: Decimal = accounts
            .iter()
            .filter(|a| a.account_type.is_liability())
            .map(current_balance)
            .sum();
        let assets: Decimal = accounts
            .iter()
            .filter(|a| !a.account_type.is_liability())
            .map(current_balance)
            .sum();

        prop_assert_eq!(totals.total_assets, assets);
        prop_assert_eq!(totals.total_liabilities, liabilities);
        prop_assert_eq!(totals.net_worth, assets - liabilities);
    }

    /// Re-ordering the inputs never changes the series.
    #[test]
    fn prop_series_is_order_independent(
        (snapshots, shuffled) in arb_snapshots(30)
            .prop_flat_map(|s| (Just(s.clone()), Just(s).prop_shuffle())),
        historical in arb_historical(),
        time_frame in arb_time_frame(),
    ) {
        let mut reversed_historical = historical.clone();
        reversed_historical.reverse();

        let tz = DEFAULT_VALUATION_TZ;
        let a = build_chart_series(&snapshots, &historical, time_frame, now(), tz);
        let b = build_chart_series(&shuffled, &reversed_historical, time_frame, now(), tz);

        prop_assert_eq!(a, b);
    }

    /// The one-month window keeps every point inside it.
    #[test]
    fn prop_one_month_count_matches_points_in_window(
        snapshots in arb_snapshots(30),
        historical in arb_historical(),
    ) {
        let series = build_chart_series(
            &snapshots, &historical, TimeFrame::OneMonth, now(), DEFAULT_VALUATION_TZ,
        );
        let start = now() - chrono::Months::new(1);
        let expected = snapshots.iter().filter(|s| s.date >= start).count();

        prop_assert_eq!(series.len(), expected);
    }

    /// The series is sorted, historical points pass through unchanged, and
    /// monthly buckets are unique and bounded by their inputs.
    #[test]
    fn prop_monthly_buckets_are_unique_and_bounded(
        snapshots in arb_snapshots(40),
        historical in arb_historical(),
    ) {
        let series = build_chart_series(
            &snapshots, &historical, TimeFrame::All, now(), DEFAULT_VALUATION_TZ,
        );

        prop_assert!(series.windows(2).all(|w| w[0].date <= w[1].date));

        let historical_out = series.iter().filter(|p| p.is_historical).count();
        prop_assert_eq!(historical_out, historical.len());

        let mut anchors = HashSet::new();
        for point in series.iter().filter(|p| !p.is_historical) {
            prop_assert!(anchors.insert(point.date));
        }

        if let (Some(min), Some(max)) = (
            snapshots.iter().map(|s| s.net_worth).min(),
            snapshots.iter().map(|s| s.net_worth).max(),
        ) {
            for point in series.iter().filter(|p| !p.is_historical) {
                prop_assert!(point.value >= min && point.value <= max);
            }
        }
    }
}
