use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::SqliteConnection;
use log::debug;
use std::sync::Arc;

use super::model::SnapshotDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::net_worth_snapshots;
use crate::schema::net_worth_snapshots::dsl::*;
use networth_core::errors::Result;
use networth_core::portfolio::snapshot::{NetWorthSnapshot, SnapshotRepositoryTrait};

pub struct SnapshotRepository {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl SnapshotRepository {
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl SnapshotRepositoryTrait for SnapshotRepository {
    fn list_snapshots(&self, owner: &str) -> Result<Vec<NetWorthSnapshot>> {
        let mut conn = get_connection(&self.pool)?;
        // RFC 3339 strings in UTC sort chronologically
        let rows = net_worth_snapshots
            .filter(owner_id.eq(owner))
            .select(SnapshotDB::as_select())
            .order((snapshot_date.asc(), id.asc()))
            .load::<SnapshotDB>(&mut conn)
            .map_err(StorageError::from)?;

        rows.into_iter().map(NetWorthSnapshot::try_from).collect()
    }

    async fn save_snapshot(&self, owner: &str, snapshot: &NetWorthSnapshot) -> Result<()> {
        let row = SnapshotDB::from_domain(owner, snapshot)?;
        debug!("Saving net worth snapshot {} for {}", row.id, row.owner_id);
        self.writer
            .exec(move |conn| {
                diesel::replace_into(net_worth_snapshots::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }

    async fn delete_all_snapshots(&self, owner: &str) -> Result<usize> {
        let owner = owner.to_string();
        self.writer
            .exec(move |conn| {
                let affected = diesel::delete(net_worth_snapshots.filter(owner_id.eq(owner)))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(affected)
            })
            .await
    }
}
