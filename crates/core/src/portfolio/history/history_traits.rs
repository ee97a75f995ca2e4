//! Repository trait for manually entered historical net worth.

use async_trait::async_trait;

use super::HistoricalDataPoint;
use crate::errors::Result;

#[async_trait]
pub trait HistoricalDataRepositoryTrait: Send + Sync {
    /// Lists the owner's points, ascending by year.
    fn list_historical(&self, owner_id: &str) -> Result<Vec<HistoricalDataPoint>>;

    /// Inserts the point or overwrites the one with the same year.
    async fn upsert_historical(
        &self,
        owner_id: &str,
        point: HistoricalDataPoint,
    ) -> Result<HistoricalDataPoint>;

    /// Deletes the point for `year`, returning the number of deleted rows.
    async fn delete_historical(&self, owner_id: &str, year: i32) -> Result<usize>;
}
