//! Database model for accounts.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::convert::TryFrom;
use std::str::FromStr;

use crate::utils::{format_timestamp, parse_decimal, parse_timestamp};
use networth_core::accounts::{Account, AccountType, BalanceEntry};
use networth_core::errors::{Error, Result};

/// Database model for accounts
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::accounts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct AccountDB {
    pub id: String,
    pub owner_id: String,
    pub institution: String,
    pub name: Option<String>,
    pub account_type: String,
    pub category: Option<String>,
    /// JSON array of strings
    pub tags: String,
    pub display_order: i32,
    /// JSON array of `BalanceEntryDB`
    pub balance_history: String,
    pub created_at: String,
    pub updated_at: String,
}

/// One element of the `balance_history` JSON column.
///
/// The balance is kept as a string so it round-trips without float loss.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BalanceEntryDB {
    pub date: String,
    pub balance: String,
}

impl TryFrom<AccountDB> for Account {
    type Error = Error;

    fn try_from(db: AccountDB) -> Result<Self> {
        let tags: BTreeSet<String> = serde_json::from_str(&db.tags)?;
        let entries: Vec<BalanceEntryDB> = serde_json::from_str(&db.balance_history)?;
        let mut balance_history = entries
            .iter()
            .map(|e| {
                Ok(BalanceEntry::new(
                    parse_decimal(&e.balance, "balance")?,
                    parse_timestamp(&e.date, "balance date")?,
                ))
            })
            .collect::<Result<Vec<_>>>()?;
        balance_history.sort_by_key(|e| e.date);

        Ok(Self {
            account_type: AccountType::from_str(&db.account_type)?,
            id: db.id,
            owner_id: db.owner_id,
            institution: db.institution,
            name: db.name,
            category: db.category,
            tags,
            display_order: db.display_order,
            balance_history,
            created_at: parse_timestamp(&db.created_at, "created_at")?,
            updated_at: parse_timestamp(&db.updated_at, "updated_at")?,
        })
    }
}

impl TryFrom<&Account> for AccountDB {
    type Error = Error;

    fn try_from(domain: &Account) -> Result<Self> {
        let entries: Vec<BalanceEntryDB> = domain
            .balance_history
            .iter()
            .map(|e| BalanceEntryDB {
                date: format_timestamp(e.date),
                balance: e.balance.to_string(),
            })
            .collect();

        Ok(Self {
            id: domain.id.clone(),
            owner_id: domain.owner_id.clone(),
            institution: domain.institution.clone(),
            name: domain.name.clone(),
            account_type: domain.account_type.as_str().to_string(),
            category: domain.category.clone(),
            tags: serde_json::to_string(&domain.tags)?,
            display_order: domain.display_order,
            balance_history: serde_json::to_string(&entries)?,
            created_at: format_timestamp(domain.created_at),
            updated_at: format_timestamp(domain.updated_at),
        })
    }
}
