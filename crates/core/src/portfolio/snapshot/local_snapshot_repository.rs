//! In-memory snapshot store used when the persistent snapshot table is absent.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use super::{sort_snapshots, NetWorthSnapshot, SnapshotRepositoryTrait};
use crate::errors::Result;

/// Process-local snapshot log keyed by owner.
///
/// Writes here never fail, which makes a snapshot at least locally durable
/// even when the remote write does not go through.
#[derive(Debug, Default)]
pub struct LocalSnapshotRepository {
    snapshots: RwLock<HashMap<String, Vec<NetWorthSnapshot>>>,
}

impl LocalSnapshotRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the owner's log wholesale.
    pub fn replace_all(&self, owner_id: &str, mut snapshots: Vec<NetWorthSnapshot>) {
        sort_snapshots(&mut snapshots);
        let mut guard = self.snapshots.write().unwrap_or_else(|e| e.into_inner());
        guard.insert(owner_id.to_string(), snapshots);
    }
}

#[async_trait]
impl SnapshotRepositoryTrait for LocalSnapshotRepository {
    fn list_snapshots(&self, owner_id: &str) -> Result<Vec<NetWorthSnapshot>> {
        let guard = self.snapshots.read().unwrap_or_else(|e| e.into_inner());
        Ok(guard.get(owner_id).cloned().unwrap_or_default())
    }

    async fn save_snapshot(&self, owner_id: &str, snapshot: &NetWorthSnapshot) -> Result<()> {
        let mut guard = self.snapshots.write().unwrap_or_else(|e| e.into_inner());
        let log = guard.entry(owner_id.to_string()).or_default();
        super::apply_snapshot(log, snapshot.clone());
        Ok(())
    }

    async fn delete_all_snapshots(&self, owner_id: &str) -> Result<usize> {
        let mut guard = self.snapshots.write().unwrap_or_else(|e| e.into_inner());
        Ok(guard.remove(owner_id).map_or(0, |log| log.len()))
    }
}
