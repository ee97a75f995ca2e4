use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use std::sync::Arc;

use super::model::HistoricalNetWorthDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::historical_net_worth;
use crate::schema::historical_net_worth::dsl::*;
use crate::utils::format_timestamp;
use networth_core::errors::Result;
use networth_core::portfolio::history::{HistoricalDataPoint, HistoricalDataRepositoryTrait};

pub struct HistoricalDataRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl HistoricalDataRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl HistoricalDataRepositoryTrait for HistoricalDataRepository {
    fn list_historical(&self, owner: &str) -> Result<Vec<HistoricalDataPoint>> {
        let mut conn = get_connection(&self.pool)?;
        historical_net_worth
            .filter(owner_id.eq(owner))
            .select(HistoricalNetWorthDB::as_select())
            .order(year.asc())
            .load::<HistoricalNetWorthDB>(&mut conn)
            .map_err(StorageError::from)?
            .into_iter()
            .map(HistoricalDataPoint::try_from)
            .collect()
    }

    /// Replaces any existing row for the same owner and year.
    async fn upsert_historical(
        &self,
        owner: &str,
        point: HistoricalDataPoint,
    ) -> Result<HistoricalDataPoint> {
        let row = HistoricalNetWorthDB::from_domain(owner, &point, format_timestamp(Utc::now()));
        self.writer
            .exec(move |conn| {
                diesel::replace_into(historical_net_worth::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(point)
            })
            .await
    }

    async fn delete_historical(&self, owner: &str, target_year: i32) -> Result<usize> {
        let owner = owner.to_string();
        self.writer
            .exec(move |conn| {
                let affected = diesel::delete(
                    historical_net_worth
                        .filter(owner_id.eq(owner))
                        .filter(year.eq(target_year)),
                )
                .execute(conn)
                .map_err(StorageError::from)?;
                Ok(affected)
            })
            .await
    }
}
