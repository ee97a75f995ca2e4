//! The state transition function.
//!
//! `reduce` is total: every action is accepted in every state. Actions naming
//! an unknown account or year leave the state as it was.

use log::debug;

use super::state_model::{Action, NetWorthState};
use crate::accounts::{append_balance, sort_for_display, Account};
use crate::portfolio::history::HistoricalDataPoint;
use crate::portfolio::snapshot::{apply_snapshot, sort_snapshots};

pub fn reduce(mut state: NetWorthState, action: Action) -> NetWorthState {
    match action {
        Action::DataLoaded(data) => {
            let mut accounts = data.accounts;
            sort_for_display(&mut accounts);
            let mut snapshots = data.snapshots;
            sort_snapshots(&mut snapshots);
            let mut historical = data.historical;
            sort_historical(&mut historical);

            NetWorthState {
                owner_id: Some(data.owner_id),
                accounts,
                snapshots,
                historical,
                goal: data.goal,
                is_loading: false,
                last_error: None,
                is_stale: false,
                snapshot_backend: data.snapshot_backend,
            }
        }
        Action::AccountAdded(account) | Action::AccountUpdated(account) => {
            upsert_account(&mut state.accounts, account);
            state
        }
        Action::AccountDeleted { account_id } => {
            state.accounts.retain(|a| a.id != account_id);
            state
        }
        Action::BalanceRecorded { account_id, entry } => {
            match state.accounts.iter_mut().find(|a| a.id == account_id) {
                Some(account) => *account = append_balance(account, entry.balance, entry.date),
                None => debug!("Ignoring balance for unknown account {}", account_id),
            }
            state
        }
        Action::SnapshotRecorded(snapshot) => {
            apply_snapshot(&mut state.snapshots, snapshot);
            state
        }
        Action::SnapshotBackendChanged(backend) => {
            state.snapshot_backend = backend;
            state
        }
        Action::HistoricalUpserted(point) => {
            state.historical.retain(|p| p.year != point.year);
            state.historical.push(point);
            sort_historical(&mut state.historical);
            state
        }
        Action::HistoricalDeleted { year } => {
            state.historical.retain(|p| p.year != year);
            state
        }
        Action::GoalSet(goal) => {
            state.goal = Some(goal);
            state
        }
        Action::GoalCleared => {
            state.goal = None;
            state
        }
        Action::SetLoading(is_loading) => {
            state.is_loading = is_loading;
            state
        }
        Action::WriteFailed(message) => {
            state.last_error = Some(message);
            state.is_stale = true;
            state.is_loading = false;
            state
        }
        Action::Reset => NetWorthState::default(),
    }
}

fn upsert_account(accounts: &mut Vec<Account>, account: Account) {
    match accounts.iter_mut().find(|a| a.id == account.id) {
        Some(existing) => *existing = account,
        None => accounts.push(account),
    }
    sort_for_display(accounts);
}

fn sort_historical(points: &mut [HistoricalDataPoint]) {
    points.sort_by_key(|p| p.year);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::{AccountType, BalanceEntry};
    use crate::goals::UserGoal;
    use crate::portfolio::snapshot::NetWorthSnapshot;
    use crate::state::{LoadedData, SnapshotBackend};
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::collections::BTreeSet;

    fn ts(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn account(id: &str, order: i32, balance: Decimal) -> Account {
        Account {
            id: id.to_string(),
            owner_id: "user-1".to_string(),
            institution: format!("Bank {}", id),
            name: None,
            account_type: AccountType::Checking,
            category: None,
            tags: BTreeSet::new(),
            display_order: order,
            balance_history: vec![BalanceEntry::new(balance, ts(2024, 1, 1))],
            created_at: ts(2024, 1, 1),
            updated_at: ts(2024, 1, 1),
        }
    }

    fn loaded() -> NetWorthState {
        reduce(
            NetWorthState::default(),
            Action::DataLoaded(LoadedData {
                owner_id: "user-1".to_string(),
                accounts: vec![account("b", 2, dec!(20)), account("a", 1, dec!(10))],
                snapshots: vec![],
                historical: vec![
                    HistoricalDataPoint::new(2021, dec!(2)),
                    HistoricalDataPoint::new(2020, dec!(1)),
                ],
                goal: None,
                snapshot_backend: SnapshotBackend::Local,
            }),
        )
    }

    #[test]
    fn test_data_loaded_sorts_and_clears_flags() {
        let stale = NetWorthState {
            is_stale: true,
            last_error: Some("boom".to_string()),
            is_loading: true,
            ..Default::default()
        };
        let state = reduce(
            stale,
            Action::DataLoaded(LoadedData {
                owner_id: "user-1".to_string(),
                accounts: vec![account("b", 2, dec!(20)), account("a", 1, dec!(10))],
                snapshots: vec![],
                historical: vec![],
                goal: None,
                snapshot_backend: SnapshotBackend::Remote,
            }),
        );

        assert_eq!(state.owner_id.as_deref(), Some("user-1"));
        assert_eq!(state.accounts[0].id, "a");
        assert!(!state.is_stale);
        assert!(!state.is_loading);
        assert!(state.last_error.is_none());
        assert_eq!(loaded().historical[0].year, 2020);
    }

    #[test]
    fn test_account_lifecycle() {
        let state = reduce(loaded(), Action::AccountAdded(account("c", 0, dec!(5))));
        assert_eq!(state.accounts[0].id, "c");

        let mut renamed = account("c", 9, dec!(5));
        renamed.institution = "Renamed".to_string();
        let state = reduce(state, Action::AccountUpdated(renamed));
        assert_eq!(state.accounts.len(), 3);
        assert_eq!(state.accounts[2].institution, "Renamed");

        let state = reduce(
            state,
            Action::AccountDeleted {
                account_id: "c".to_string(),
            },
        );
        assert_eq!(state.accounts.len(), 2);
        assert!(state.account("c").is_none());
    }

    #[test]
    fn test_balance_recorded() {
        let state = reduce(
            loaded(),
            Action::BalanceRecorded {
                account_id: "a".to_string(),
                entry: BalanceEntry::new(dec!(99), ts(2024, 2, 1)),
            },
        );
        let account = state.account("a").unwrap();
        assert_eq!(account.balance_history.len(), 2);
        assert_eq!(crate::accounts::current_balance(account), dec!(99));

        let unchanged = reduce(
            state.clone(),
            Action::BalanceRecorded {
                account_id: "missing".to_string(),
                entry: BalanceEntry::new(dec!(1), ts(2024, 2, 1)),
            },
        );
        assert_eq!(unchanged, state);
    }

    #[test]
    fn test_snapshots_historical_and_goal() {
        let snapshot = NetWorthSnapshot {
            id: "s1".to_string(),
            date: ts(2024, 2, 1),
            total_assets: dec!(30),
            total_liabilities: dec!(0),
            net_worth: dec!(30),
            account_balances: vec![],
        };
        let state = reduce(loaded(), Action::SnapshotRecorded(snapshot));
        assert_eq!(state.snapshots.len(), 1);

        let state = reduce(
            state,
            Action::HistoricalUpserted(HistoricalDataPoint::new(2020, dec!(7))),
        );
        assert_eq!(state.historical.len(), 2);
        assert_eq!(state.historical[0].net_worth, dec!(7));
        let state = reduce(state, Action::HistoricalDeleted { year: 2021 });
        assert_eq!(state.historical.len(), 1);

        let goal = UserGoal {
            target_amount: dec!(1000),
            target_date: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
        };
        let state = reduce(state, Action::GoalSet(goal));
        assert_eq!(state.goal, Some(goal));
        let state = reduce(state, Action::GoalCleared);
        assert!(state.goal.is_none());
    }

    #[test]
    fn test_write_failed_marks_stale_without_touching_data() {
        let before = loaded();
        let after = reduce(before.clone(), Action::WriteFailed("disk full".to_string()));

        assert!(after.is_stale);
        assert_eq!(after.last_error.as_deref(), Some("disk full"));
        assert_eq!(after.accounts, before.accounts);
    }

    #[test]
    fn test_reset() {
        assert_eq!(reduce(loaded(), Action::Reset), NetWorthState::default());
    }
}
