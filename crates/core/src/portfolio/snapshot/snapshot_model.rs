//! Net worth snapshot models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::accounts::{current_balance, Account};
use crate::portfolio::net_worth::aggregate;

/// Balance of one account at the moment a snapshot was taken.
///
/// The account id is a weak reference: the account may since have been deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotAccountBalance {
    pub account_id: String,
    pub balance: Decimal,
}

/// Point-in-time aggregate totals.
///
/// Totals are fixed at creation and never recomputed from later account state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetWorthSnapshot {
    pub id: String,
    pub date: DateTime<Utc>,
    pub total_assets: Decimal,
    pub total_liabilities: Decimal,
    pub net_worth: Decimal,
    #[serde(default)]
    pub account_balances: Vec<SnapshotAccountBalance>,
}

impl NetWorthSnapshot {
    /// Captures the current totals of `accounts` under a fresh id.
    pub fn capture(accounts: &[Account], date: DateTime<Utc>) -> Self {
        Self::capture_with_id(uuid::Uuid::new_v4().to_string(), accounts, date)
    }

    pub fn capture_with_id(id: String, accounts: &[Account], date: DateTime<Utc>) -> Self {
        let totals = aggregate(accounts);
        Self {
            id,
            date,
            total_assets: totals.total_assets,
            total_liabilities: totals.total_liabilities,
            net_worth: totals.net_worth,
            account_balances: accounts
                .iter()
                .map(|a| SnapshotAccountBalance {
                    account_id: a.id.clone(),
                    balance: current_balance(a),
                })
                .collect(),
        }
    }

    /// Returns the recorded balance of `account_id`, if it was part of this snapshot.
    pub fn balance_for(&self, account_id: &str) -> Option<Decimal> {
        self.account_balances
            .iter()
            .find(|b| b.account_id == account_id)
            .map(|b| b.balance)
    }
}

/// Sorts snapshots ascending by date.
pub fn sort_snapshots(snapshots: &mut [NetWorthSnapshot]) {
    snapshots.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
}
