//! Repository trait for net worth snapshots.

use async_trait::async_trait;

use super::NetWorthSnapshot;
use crate::errors::Result;

/// Repository trait for the per-owner snapshot log.
///
/// Backends without a snapshot table report `DatabaseError::TableNotFound`,
/// which callers treat as a signal to use the local fallback.
#[async_trait]
pub trait SnapshotRepositoryTrait: Send + Sync {
    /// Lists all snapshots for the owner, ascending by date.
    fn list_snapshots(&self, owner_id: &str) -> Result<Vec<NetWorthSnapshot>>;

    /// Inserts the snapshot, or overwrites the one with the same id.
    async fn save_snapshot(&self, owner_id: &str, snapshot: &NetWorthSnapshot) -> Result<()>;

    /// Deletes every snapshot for the owner.
    async fn delete_all_snapshots(&self, owner_id: &str) -> Result<usize>;
}
