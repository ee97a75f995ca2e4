//! Tests for the snapshot planner and the local snapshot store.

use super::*;
use crate::accounts::{Account, AccountType, BalanceEntry};
use crate::utils::time_utils::DEFAULT_VALUATION_TZ;
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeSet;

fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

fn account(id: &str, account_type: AccountType, balance: Decimal) -> Account {
    Account {
        id: id.to_string(),
        owner_id: "user-1".to_string(),
        institution: "Bank".to_string(),
        name: None,
        account_type,
        category: None,
        tags: BTreeSet::new(),
        display_order: 0,
        balance_history: vec![BalanceEntry::new(balance, at(2024, 1, 1, 12))],
        created_at: at(2024, 1, 1, 12),
        updated_at: at(2024, 1, 1, 12),
    }
}

fn snapshot(id: &str, date: DateTime<Utc>, net_worth: Decimal) -> NetWorthSnapshot {
    NetWorthSnapshot {
        id: id.to_string(),
        date,
        total_assets: net_worth,
        total_liabilities: Decimal::ZERO,
        net_worth,
        account_balances: vec![],
    }
}

const THRESHOLD: Decimal = dec!(0.01);

#[test]
fn test_no_accounts_skips() {
    let decision = plan_snapshot(&[], &[], at(2024, 6, 1, 15), THRESHOLD, DEFAULT_VALUATION_TZ);
    assert_eq!(decision, SnapshotDecision::Skip(SkipReason::NoAccounts));
    assert!(decision.snapshot().is_none());
}

#[test]
fn test_first_snapshot_of_day_is_inserted() {
    let accounts = vec![
        account("a", AccountType::Savings, dec!(1000)),
        account("b", AccountType::Liability, dec!(400)),
    ];
    let existing = vec![snapshot("old", at(2024, 5, 31, 15), dec!(500))];
    let decision = plan_snapshot(
        &accounts,
        &existing,
        at(2024, 6, 1, 15),
        THRESHOLD,
        DEFAULT_VALUATION_TZ,
    );

    let SnapshotDecision::Insert(snap) = decision else {
        panic!("expected insert, got {:?}", decision);
    };
    assert_ne!(snap.id, "old");
    assert_eq!(snap.total_assets, dec!(1000));
    assert_eq!(snap.total_liabilities, dec!(400));
    assert_eq!(snap.net_worth, dec!(600));
    assert_eq!(snap.balance_for("b"), Some(dec!(400)));
    assert_eq!(snap.balance_for("missing"), None);
}

#[test]
fn test_same_day_material_change_replaces_in_place() {
    let accounts = vec![account("a", AccountType::Savings, dec!(1000))];
    let existing = vec![snapshot("today", at(2024, 6, 1, 14), dec!(900))];
    let decision = plan_snapshot(
        &accounts,
        &existing,
        at(2024, 6, 1, 18),
        THRESHOLD,
        DEFAULT_VALUATION_TZ,
    );

    let SnapshotDecision::Replace(snap) = decision else {
        panic!("expected replace, got {:?}", decision);
    };
    assert_eq!(snap.id, "today");
    assert_eq!(snap.net_worth, dec!(1000));
    assert_eq!(snap.date, at(2024, 6, 1, 18));
}

#[test]
fn test_same_day_immaterial_change_skips() {
    let accounts = vec![account("a", AccountType::Savings, dec!(1000.005))];
    let existing = vec![snapshot("today", at(2024, 6, 1, 14), dec!(1000))];
    let decision = plan_snapshot(
        &accounts,
        &existing,
        at(2024, 6, 1, 18),
        THRESHOLD,
        DEFAULT_VALUATION_TZ,
    );
    assert_eq!(decision, SnapshotDecision::Skip(SkipReason::BelowThreshold));
}

#[test]
fn test_exact_threshold_change_is_material() {
    let accounts = vec![account("a", AccountType::Savings, dec!(1000.01))];
    let existing = vec![snapshot("today", at(2024, 6, 1, 14), dec!(1000))];
    let decision = plan_snapshot(
        &accounts,
        &existing,
        at(2024, 6, 1, 18),
        THRESHOLD,
        DEFAULT_VALUATION_TZ,
    );
    assert!(matches!(decision, SnapshotDecision::Replace(_)));
}

#[test]
fn test_calendar_day_follows_valuation_timezone() {
    // 2024-06-02 02:00 UTC is still June 1st in New York.
    let accounts = vec![account("a", AccountType::Savings, dec!(2000))];
    let existing = vec![snapshot("ny-june-1", at(2024, 6, 1, 14), dec!(1000))];
    let decision = plan_snapshot(
        &accounts,
        &existing,
        at(2024, 6, 2, 2),
        THRESHOLD,
        DEFAULT_VALUATION_TZ,
    );
    assert_eq!(decision.snapshot().map(|s| s.id.as_str()), Some("ny-june-1"));

    let decision = plan_snapshot(
        &accounts,
        &existing,
        at(2024, 6, 2, 2),
        THRESHOLD,
        chrono_tz::UTC,
    );
    assert!(matches!(decision, SnapshotDecision::Insert(_)));
}

#[test]
fn test_apply_snapshot_keeps_order_and_replaces_by_id() {
    let mut log = vec![
        snapshot("a", at(2024, 6, 1, 12), dec!(1)),
        snapshot("c", at(2024, 6, 3, 12), dec!(3)),
    ];
    apply_snapshot(&mut log, snapshot("b", at(2024, 6, 2, 12), dec!(2)));
    apply_snapshot(&mut log, snapshot("a", at(2024, 6, 1, 20), dec!(10)));

    let ids: Vec<_> = log.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
    assert_eq!(log[0].net_worth, dec!(10));
}

#[tokio::test]
async fn test_local_repository_is_owner_scoped() {
    let repo = LocalSnapshotRepository::new();
    repo.save_snapshot("user-1", &snapshot("s2", at(2024, 6, 2, 12), dec!(2)))
        .await
        .unwrap();
    repo.save_snapshot("user-1", &snapshot("s1", at(2024, 6, 1, 12), dec!(1)))
        .await
        .unwrap();
    repo.save_snapshot("user-2", &snapshot("x", at(2024, 6, 1, 12), dec!(9)))
        .await
        .unwrap();

    let listed = repo.list_snapshots("user-1").unwrap();
    assert_eq!(
        listed.iter().map(|s| s.id.as_str()).collect::<Vec<_>>(),
        vec!["s1", "s2"]
    );

    assert_eq!(repo.delete_all_snapshots("user-1").await.unwrap(), 2);
    assert!(repo.list_snapshots("user-1").unwrap().is_empty());
    assert_eq!(repo.list_snapshots("user-2").unwrap().len(), 1);
}
