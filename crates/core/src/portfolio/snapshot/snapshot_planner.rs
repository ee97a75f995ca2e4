//! Decides whether a new snapshot is written, and how.
//!
//! At most one snapshot is kept per valuation-timezone calendar day. A
//! same-day snapshot is replaced in place (keeping its id) unless the net worth
//! moved by less than the materiality threshold.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use log::debug;
use rust_decimal::Decimal;

use super::snapshot_model::NetWorthSnapshot;
use crate::accounts::Account;
use crate::utils::time_utils::valuation_date_from_utc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// There are no accounts to snapshot.
    NoAccounts,
    /// A same-day snapshot exists and the change is below the threshold.
    BelowThreshold,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotDecision {
    Skip(SkipReason),
    Insert(NetWorthSnapshot),
    /// Overwrites the same-day snapshot; `snapshot.id` is the replaced id.
    Replace(NetWorthSnapshot),
}

impl SnapshotDecision {
    /// The snapshot to write, if any.
    pub fn snapshot(&self) -> Option<&NetWorthSnapshot> {
        match self {
            SnapshotDecision::Skip(_) => None,
            SnapshotDecision::Insert(s) | SnapshotDecision::Replace(s) => Some(s),
        }
    }
}

/// Plans the snapshot for `accounts` at `date` against the `existing` log.
pub fn plan_snapshot(
    accounts: &[Account],
    existing: &[NetWorthSnapshot],
    date: DateTime<Utc>,
    threshold: Decimal,
    tz: Tz,
) -> SnapshotDecision {
    if accounts.is_empty() {
        return SnapshotDecision::Skip(SkipReason::NoAccounts);
    }

    let day = valuation_date_from_utc(date, tz);
    let same_day = existing
        .iter()
        .filter(|s| valuation_date_from_utc(s.date, tz) == day)
        .max_by_key(|s| s.date);

    match same_day {
        Some(previous) => {
            let candidate = NetWorthSnapshot::capture_with_id(previous.id.clone(), accounts, date);
            let delta = (candidate.net_worth - previous.net_worth).abs();
            if delta < threshold {
                debug!(
                    "Skipping snapshot for {}: net worth change {} below threshold {}",
                    day, delta, threshold
                );
                SnapshotDecision::Skip(SkipReason::BelowThreshold)
            } else {
                SnapshotDecision::Replace(candidate)
            }
        }
        None => SnapshotDecision::Insert(NetWorthSnapshot::capture(accounts, date)),
    }
}

/// Applies a written snapshot to an in-memory log, keeping it sorted by date.
pub fn apply_snapshot(existing: &mut Vec<NetWorthSnapshot>, snapshot: NetWorthSnapshot) {
    existing.retain(|s| s.id != snapshot.id);
    existing.push(snapshot);
    super::sort_snapshots(existing);
}
