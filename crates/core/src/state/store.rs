//! Session store: the cached state plus the I/O around it.
//!
//! Reads are served from the cache. Mutations are serialized by `write_lock`
//! so that balance writes reach the repositories in issue order. Account,
//! balance, historical and goal changes are dispatched only after the
//! repository confirms them; snapshots are applied locally first.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use log::{debug, error, info, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};
use tokio::sync::Mutex;

use super::reducer::reduce;
use super::state_model::{Action, LoadedData, NetWorthState, SnapshotBackend};
use crate::accounts::{
    append_balance, Account, AccountRepositoryTrait, AccountUpdate, BalanceEntry, NewAccount,
};
use crate::errors::{Error, Result};
use crate::goals::{GoalProgress, GoalRepositoryTrait, NewUserGoal, UserGoal};
use crate::identity::IdentityProviderTrait;
use crate::portfolio::history::{
    build_chart_series, ChartPoint, HistoricalDataPoint, HistoricalDataRepositoryTrait, TimeFrame,
};
use crate::portfolio::net_worth::{aggregate, allocation, AllocationItem, NetWorthTotals};
use crate::portfolio::performance::{compute_performance, SeriesPerformance};
use crate::portfolio::snapshot::{
    apply_snapshot, plan_snapshot, LocalSnapshotRepository, NetWorthSnapshot, SnapshotDecision,
    SnapshotRepositoryTrait,
};
use crate::settings::Settings;
use crate::utils::time_utils::valuation_date_from_utc;

/// Repositories the store reads from and writes to.
#[derive(Clone)]
pub struct NetWorthRepositories {
    pub accounts: Arc<dyn AccountRepositoryTrait>,
    pub snapshots: Arc<dyn SnapshotRepositoryTrait>,
    pub historical: Arc<dyn HistoricalDataRepositoryTrait>,
    pub goals: Arc<dyn GoalRepositoryTrait>,
}

/// Everything the dashboard shows for one time window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetWorthSummary {
    pub time_frame: TimeFrame,
    pub totals: NetWorthTotals,
    pub allocation: Vec<AllocationItem>,
    pub series: Vec<ChartPoint>,
    pub performance: Option<SeriesPerformance>,
    pub goal_progress: Option<GoalProgress>,
}

pub struct NetWorthStore {
    repositories: NetWorthRepositories,
    local_snapshots: Arc<LocalSnapshotRepository>,
    identity: Arc<dyn IdentityProviderTrait>,
    threshold: Decimal,
    tz: Tz,
    state: RwLock<NetWorthState>,
    write_lock: Mutex<()>,
}

impl NetWorthStore {
    /// Creates an empty store. Fails if `settings` are invalid.
    pub fn new(
        repositories: NetWorthRepositories,
        local_snapshots: Arc<LocalSnapshotRepository>,
        identity: Arc<dyn IdentityProviderTrait>,
        settings: &Settings,
    ) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            repositories,
            local_snapshots,
            identity,
            threshold: settings.snapshot_materiality_threshold,
            tz: settings.timezone()?,
            state: RwLock::new(NetWorthState::default()),
            write_lock: Mutex::new(()),
        })
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    pub fn state(&self) -> NetWorthState {
        self.state.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn totals(&self) -> NetWorthTotals {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        aggregate(&state.accounts)
    }

    pub fn allocation(&self) -> Vec<AllocationItem> {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        allocation(&state.accounts)
    }

    pub fn chart_series(&self, time_frame: TimeFrame, now: DateTime<Utc>) -> Vec<ChartPoint> {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        build_chart_series(&state.snapshots, &state.historical, time_frame, now, self.tz)
    }

    pub fn performance(
        &self,
        time_frame: TimeFrame,
        now: DateTime<Utc>,
    ) -> Option<SeriesPerformance> {
        compute_performance(&self.chart_series(time_frame, now))
    }

    pub fn goal_progress(&self, today: NaiveDate) -> Option<GoalProgress> {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        let goal = state.goal?;
        Some(GoalProgress::compute(
            &goal,
            aggregate(&state.accounts).net_worth,
            today,
        ))
    }

    pub fn summary(&self, time_frame: TimeFrame, now: DateTime<Utc>) -> NetWorthSummary {
        let series = self.chart_series(time_frame, now);
        NetWorthSummary {
            time_frame,
            totals: self.totals(),
            allocation: self.allocation(),
            performance: compute_performance(&series),
            series,
            goal_progress: self.goal_progress(valuation_date_from_utc(now, self.tz)),
        }
    }

    // ------------------------------------------------------------------
    // Load / reset
    // ------------------------------------------------------------------

    /// Fetches everything for the current user and replaces the cache.
    ///
    /// Without a signed-in user the cache is reset and nothing is fetched.
    pub async fn load(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let Some(user) = self.identity.current_user() else {
            debug!("No signed-in user, resetting net worth state");
            self.dispatch(Action::Reset);
            return Ok(());
        };

        self.dispatch(Action::SetLoading(true));
        match self.fetch_all(&user.id).await {
            Ok(data) => {
                info!(
                    "Loaded {} accounts and {} snapshots for {}",
                    data.accounts.len(),
                    data.snapshots.len(),
                    data.owner_id
                );
                self.dispatch(Action::DataLoaded(data));
                Ok(())
            }
            Err(e) => self.fail("load", e),
        }
    }

    async fn fetch_all(&self, owner_id: &str) -> Result<LoadedData> {
        let accounts = self.repositories.accounts.list(owner_id)?;
        let historical = self.repositories.historical.list_historical(owner_id)?;
        let goal = self.repositories.goals.get_goal(owner_id)?;
        let local = self.local_snapshots.list_snapshots(owner_id)?;

        let (snapshots, snapshot_backend) =
            match self.repositories.snapshots.list_snapshots(owner_id) {
                Ok(remote) => (
                    self.reconcile_local_snapshots(owner_id, remote, local).await,
                    SnapshotBackend::Remote,
                ),
                Err(e) if e.is_table_not_found() => {
                    warn!("Snapshot table unavailable, using local snapshot store: {}", e);
                    (local, SnapshotBackend::Local)
                }
                Err(e) => return Err(e),
            };

        Ok(LoadedData {
            owner_id: owner_id.to_string(),
            accounts,
            snapshots,
            historical,
            goal,
            snapshot_backend,
        })
    }

    /// Pushes snapshots that only reached the local store to the remote one.
    ///
    /// A local snapshot is newer than a remote one with the same id (a same-day
    /// replacement whose remote write failed), so it wins the merge. Snapshots
    /// that still cannot be written stay in the local store for the next load.
    async fn reconcile_local_snapshots(
        &self,
        owner_id: &str,
        mut remote: Vec<NetWorthSnapshot>,
        local: Vec<NetWorthSnapshot>,
    ) -> Vec<NetWorthSnapshot> {
        if local.is_empty() {
            return remote;
        }

        let mut pending = Vec::new();
        for snapshot in local {
            if let Err(e) = self.repositories.snapshots.save_snapshot(owner_id, &snapshot).await {
                warn!("Snapshot {} still not persisted: {}", snapshot.id, e);
                pending.push(snapshot.clone());
            }
            apply_snapshot(&mut remote, snapshot);
        }
        debug!("{} local snapshots remain unsynced for {}", pending.len(), owner_id);
        self.local_snapshots.replace_all(owner_id, pending);
        remote
    }

    /// Tears the cache down, e.g. on sign-out.
    pub fn clear(&self) {
        self.dispatch(Action::Reset);
    }

    /// Deletes all of the current user's data and resets the cache.
    pub async fn reset_all_data(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let owner_id = self.require_user("reset_all_data")?;

        if let Err(e) = self.delete_remote_data(&owner_id).await {
            return self.fail("reset_all_data", e);
        }
        self.local_snapshots.delete_all_snapshots(&owner_id).await?;

        info!("Deleted all net worth data for {}", owner_id);
        self.dispatch(Action::Reset);
        Ok(())
    }

    async fn delete_remote_data(&self, owner_id: &str) -> Result<()> {
        match self.repositories.snapshots.delete_all_snapshots(owner_id).await {
            Ok(_) => {}
            Err(e) if e.is_table_not_found() => {
                debug!("No snapshot table to clear: {}", e);
            }
            Err(e) => return Err(e),
        }
        for account in self.repositories.accounts.list(owner_id)? {
            self.repositories.accounts.delete(owner_id, &account.id).await?;
        }
        for point in self.repositories.historical.list_historical(owner_id)? {
            self.repositories
                .historical
                .delete_historical(owner_id, point.year)
                .await?;
        }
        self.repositories.goals.delete_goal(owner_id).await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Accounts and balances
    // ------------------------------------------------------------------

    pub async fn add_account(&self, new_account: NewAccount) -> Result<Account> {
        let _guard = self.write_lock.lock().await;
        let owner_id = self.require_user("add_account")?;
        new_account.validate()?;

        let account = new_account.into_account(&owner_id, Utc::now());
        let saved = match self.repositories.accounts.insert(account).await {
            Ok(saved) => saved,
            Err(e) => return self.fail("add_account", e),
        };
        debug!("Added account {}", saved.id);
        self.dispatch(Action::AccountAdded(saved.clone()));

        self.snapshot_after_change(&owner_id).await;
        Ok(saved)
    }

    pub async fn update_account(&self, update: AccountUpdate) -> Result<Account> {
        let _guard = self.write_lock.lock().await;
        let owner_id = self.require_user("update_account")?;
        update.validate()?;

        let account_id = update.id.clone().unwrap_or_default();
        let existing = self.cached_account(&account_id)?;
        let updated = update.apply_to(&existing, Utc::now());

        let saved = match self.repositories.accounts.update(updated).await {
            Ok(saved) => saved,
            Err(e) => return self.fail("update_account", e),
        };
        self.dispatch(Action::AccountUpdated(saved.clone()));

        if existing.account_type != saved.account_type {
            self.snapshot_after_change(&owner_id).await;
        }
        Ok(saved)
    }

    pub async fn delete_account(&self, account_id: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let owner_id = self.require_user("delete_account")?;

        if let Err(e) = self.repositories.accounts.delete(&owner_id, account_id).await {
            return self.fail("delete_account", e);
        }
        debug!("Deleted account {}", account_id);
        self.dispatch(Action::AccountDeleted {
            account_id: account_id.to_string(),
        });

        self.snapshot_after_change(&owner_id).await;
        Ok(())
    }

    /// Appends a balance observation to an account.
    pub async fn record_balance(
        &self,
        account_id: &str,
        balance: Decimal,
        date: DateTime<Utc>,
    ) -> Result<Account> {
        let _guard = self.write_lock.lock().await;
        let owner_id = self.require_user("record_balance")?;

        let existing = self.cached_account(account_id)?;
        let mut updated = append_balance(&existing, balance, date);
        updated.updated_at = Utc::now();

        let saved = match self.repositories.accounts.update(updated).await {
            Ok(saved) => saved,
            Err(e) => return self.fail("record_balance", e),
        };
        self.dispatch(Action::BalanceRecorded {
            account_id: account_id.to_string(),
            entry: BalanceEntry::new(balance, date),
        });

        self.snapshot_after_change(&owner_id).await;
        Ok(saved)
    }

    // ------------------------------------------------------------------
    // Historical data and goal
    // ------------------------------------------------------------------

    pub async fn upsert_historical(
        &self,
        point: HistoricalDataPoint,
    ) -> Result<HistoricalDataPoint> {
        let _guard = self.write_lock.lock().await;
        let owner_id = self.require_user("upsert_historical")?;
        point.validate()?;

        match self.repositories.historical.upsert_historical(&owner_id, point).await {
            Ok(saved) => {
                self.dispatch(Action::HistoricalUpserted(saved));
                Ok(saved)
            }
            Err(e) => self.fail("upsert_historical", e),
        }
    }

    pub async fn delete_historical(&self, year: i32) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let owner_id = self.require_user("delete_historical")?;

        match self.repositories.historical.delete_historical(&owner_id, year).await {
            Ok(_) => {
                self.dispatch(Action::HistoricalDeleted { year });
                Ok(())
            }
            Err(e) => self.fail("delete_historical", e),
        }
    }

    pub async fn set_goal(&self, new_goal: NewUserGoal) -> Result<UserGoal> {
        let _guard = self.write_lock.lock().await;
        let owner_id = self.require_user("set_goal")?;
        new_goal.validate()?;

        match self
            .repositories
            .goals
            .upsert_goal(&owner_id, UserGoal::from(new_goal))
            .await
        {
            Ok(saved) => {
                self.dispatch(Action::GoalSet(saved));
                Ok(saved)
            }
            Err(e) => self.fail("set_goal", e),
        }
    }

    pub async fn clear_goal(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let owner_id = self.require_user("clear_goal")?;

        match self.repositories.goals.delete_goal(&owner_id).await {
            Ok(_) => {
                self.dispatch(Action::GoalCleared);
                Ok(())
            }
            Err(e) => self.fail("clear_goal", e),
        }
    }

    // ------------------------------------------------------------------
    // Snapshots
    // ------------------------------------------------------------------

    /// Records a snapshot of the current totals at `date`.
    ///
    /// Returns `None` when the snapshot was skipped. The snapshot is applied to
    /// the cache before it is persisted; if persisting fails it is kept in the
    /// local store and the error is returned.
    pub async fn record_snapshot(&self, date: DateTime<Utc>) -> Result<Option<NetWorthSnapshot>> {
        let _guard = self.write_lock.lock().await;
        let owner_id = self.require_user("record_snapshot")?;
        self.record_snapshot_locked(&owner_id, date).await
    }

    async fn snapshot_after_change(&self, owner_id: &str) {
        if let Err(e) = self.record_snapshot_locked(owner_id, Utc::now()).await {
            warn!("Snapshot after change was not persisted: {}", e);
        }
    }

    async fn record_snapshot_locked(
        &self,
        owner_id: &str,
        date: DateTime<Utc>,
    ) -> Result<Option<NetWorthSnapshot>> {
        let (decision, backend) = {
            let state = self.state.read().unwrap_or_else(|e| e.into_inner());
            (
                plan_snapshot(&state.accounts, &state.snapshots, date, self.threshold, self.tz),
                state.snapshot_backend,
            )
        };

        let snapshot = match decision {
            SnapshotDecision::Skip(reason) => {
                debug!("Snapshot skipped: {:?}", reason);
                return Ok(None);
            }
            SnapshotDecision::Insert(s) | SnapshotDecision::Replace(s) => s,
        };
        self.dispatch(Action::SnapshotRecorded(snapshot.clone()));

        if backend == SnapshotBackend::Local {
            if let Err(e) = self.local_snapshots.save_snapshot(owner_id, &snapshot).await {
                return self.fail("record_snapshot", e);
            }
            return Ok(Some(snapshot));
        }

        match self.repositories.snapshots.save_snapshot(owner_id, &snapshot).await {
            Ok(()) => Ok(Some(snapshot)),
            Err(e) if e.is_table_not_found() => {
                warn!("Snapshot table unavailable, switching to local store: {}", e);
                self.dispatch(Action::SnapshotBackendChanged(SnapshotBackend::Local));
                if let Err(e) = self.local_snapshots.save_snapshot(owner_id, &snapshot).await {
                    return self.fail("record_snapshot", e);
                }
                Ok(Some(snapshot))
            }
            Err(e) => {
                let saved_locally = self.local_snapshots.save_snapshot(owner_id, &snapshot).await;
                if let Err(local_err) = saved_locally {
                    error!("Snapshot {} lost: {}", snapshot.id, local_err);
                }
                self.fail("record_snapshot", e)
            }
        }
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    fn dispatch(&self, action: Action) {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        let current = std::mem::take(&mut *state);
        *state = reduce(current, action);
    }

    fn require_user(&self, operation: &str) -> Result<String> {
        self.identity
            .current_user()
            .map(|u| u.id)
            .ok_or_else(|| Error::NoActiveUser(operation.to_string()))
    }

    fn cached_account(&self, account_id: &str) -> Result<Account> {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        state
            .account(account_id)
            .cloned()
            .ok_or_else(|| Error::AccountNotFound(account_id.to_string()))
    }

    fn fail<T>(&self, operation: &str, err: Error) -> Result<T> {
        error!("{} failed: {}", operation, err);
        self.dispatch(Action::WriteFailed(format!("{} failed: {}", operation, err)));
        Err(err)
    }
}
