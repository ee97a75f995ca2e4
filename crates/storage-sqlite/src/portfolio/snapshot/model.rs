//! Database model for net worth snapshots.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::utils::{format_timestamp, parse_decimal, parse_timestamp};
use networth_core::errors::{Error, Result};
use networth_core::portfolio::snapshot::{NetWorthSnapshot, SnapshotAccountBalance};

/// Database model for net worth snapshots
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = crate::schema::net_worth_snapshots)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SnapshotDB {
    pub id: String,
    pub owner_id: String,
    pub snapshot_date: String,
    pub total_assets: String,
    pub total_liabilities: String,
    pub net_worth: String,
    /// JSON array of `SnapshotAccountBalanceDB`
    pub account_balances: String,
}

/// One element of the `account_balances` JSON column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotAccountBalanceDB {
    pub account_id: String,
    pub balance: String,
}

impl SnapshotDB {
    pub fn from_domain(owner: &str, snapshot: &NetWorthSnapshot) -> Result<Self> {
        let balances: Vec<SnapshotAccountBalanceDB> = snapshot
            .account_balances
            .iter()
            .map(|b| SnapshotAccountBalanceDB {
                account_id: b.account_id.clone(),
                balance: b.balance.to_string(),
            })
            .collect();

        Ok(Self {
            id: snapshot.id.clone(),
            owner_id: owner.to_string(),
            snapshot_date: format_timestamp(snapshot.date),
            total_assets: snapshot.total_assets.to_string(),
            total_liabilities: snapshot.total_liabilities.to_string(),
            net_worth: snapshot.net_worth.to_string(),
            account_balances: serde_json::to_string(&balances)?,
        })
    }
}

impl TryFrom<SnapshotDB> for NetWorthSnapshot {
    type Error = Error;

    fn try_from(db: SnapshotDB) -> Result<Self> {
        let balances: Vec<SnapshotAccountBalanceDB> = if db.account_balances.trim().is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(&db.account_balances)?
        };

        Ok(Self {
            date: parse_timestamp(&db.snapshot_date, "snapshot_date")?,
            total_assets: parse_decimal(&db.total_assets, "total_assets")?,
            total_liabilities: parse_decimal(&db.total_liabilities, "total_liabilities")?,
            net_worth: parse_decimal(&db.net_worth, "net_worth")?,
            account_balances: balances
                .into_iter()
                .map(|b| {
                    Ok(SnapshotAccountBalance {
                        balance: parse_decimal(&b.balance, "balance")?,
                        account_id: b.account_id,
                    })
                })
                .collect::<Result<Vec<_>>>()?,
            id: db.id,
        })
    }
}
