//! Database model for manually entered year-end net worth.

use diesel::prelude::*;

use crate::utils::parse_decimal;
use networth_core::errors::{Error, Result};
use networth_core::portfolio::history::HistoricalDataPoint;

#[derive(Queryable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::historical_net_worth)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct HistoricalNetWorthDB {
    pub owner_id: String,
    pub year: i32,
    pub net_worth: String,
    pub updated_at: String,
}

impl HistoricalNetWorthDB {
    pub fn from_domain(owner: &str, point: &HistoricalDataPoint, updated_at: String) -> Self {
        Self {
            owner_id: owner.to_string(),
            year: point.year,
            net_worth: point.net_worth.to_string(),
            updated_at,
        }
    }
}

impl TryFrom<HistoricalNetWorthDB> for HistoricalDataPoint {
    type Error = Error;

    fn try_from(db: HistoricalNetWorthDB) -> Result<Self> {
        Ok(HistoricalDataPoint::new(
            db.year,
            parse_decimal(&db.net_worth, "net_worth")?,
        ))
    }
}
