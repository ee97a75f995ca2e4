//! In-memory net worth state and the actions that change it.

use serde::{Deserialize, Serialize};

use crate::accounts::{Account, BalanceEntry};
use crate::goals::UserGoal;
use crate::portfolio::history::HistoricalDataPoint;
use crate::portfolio::snapshot::NetWorthSnapshot;

/// Where snapshots are currently read from and written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum SnapshotBackend {
    #[default]
    Remote,
    /// The persistent snapshot table is absent; the process-local store is used.
    Local,
}

/// Cached view of one owner's data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NetWorthState {
    pub owner_id: Option<String>,
    /// Sorted for display
    pub accounts: Vec<Account>,
    /// Ascending by date
    pub snapshots: Vec<NetWorthSnapshot>,
    /// Ascending by year
    pub historical: Vec<HistoricalDataPoint>,
    pub goal: Option<UserGoal>,
    pub is_loading: bool,
    pub last_error: Option<String>,
    /// Set after a failed write; cleared by the next successful load.
    pub is_stale: bool,
    pub snapshot_backend: SnapshotBackend,
}

impl NetWorthState {
    pub fn account(&self, account_id: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == account_id)
    }
}

/// Everything fetched by a load.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedData {
    pub owner_id: String,
    pub accounts: Vec<Account>,
    pub snapshots: Vec<NetWorthSnapshot>,
    pub historical: Vec<HistoricalDataPoint>,
    pub goal: Option<UserGoal>,
    pub snapshot_backend: SnapshotBackend,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    DataLoaded(LoadedData),
    AccountAdded(Account),
    AccountUpdated(Account),
    AccountDeleted { account_id: String },
    BalanceRecorded { account_id: String, entry: BalanceEntry },
    SnapshotRecorded(NetWorthSnapshot),
    SnapshotBackendChanged(SnapshotBackend),
    HistoricalUpserted(HistoricalDataPoint),
    HistoricalDeleted { year: i32 },
    GoalSet(UserGoal),
    GoalCleared,
    SetLoading(bool),
    /// A write or load failed; the cache no longer matches the store.
    WriteFailed(String),
    Reset,
}
