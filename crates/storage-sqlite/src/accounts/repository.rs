use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use std::convert::TryFrom;
use std::sync::Arc;

use super::model::AccountDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::accounts;
use crate::schema::accounts::dsl::*;
use networth_core::accounts::{Account, AccountRepositoryTrait};
use networth_core::errors::{Error, Result};

/// Repository for managing account data in the database
pub struct AccountRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl AccountRepository {
    /// Creates a new AccountRepository instance
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl AccountRepositoryTrait for AccountRepository {
    /// Lists the owner's accounts by display order, then institution
    fn list(&self, owner: &str) -> Result<Vec<Account>> {
        let mut conn = get_connection(&self.pool)?;

        let results = accounts::table
            .filter(owner_id.eq(owner))
            .select(AccountDB::as_select())
            .order((display_order.asc(), institution.asc()))
            .load::<AccountDB>(&mut conn)
            .map_err(StorageError::from)?;

        results.into_iter().map(Account::try_from).collect()
    }

    fn get_by_id(&self, owner: &str, account_id: &str) -> Result<Account> {
        let mut conn = get_connection(&self.pool)?;

        let account = accounts
            .filter(owner_id.eq(owner))
            .filter(id.eq(account_id))
            .select(AccountDB::as_select())
            .first::<AccountDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .ok_or_else(|| Error::AccountNotFound(account_id.to_string()))?;

        Account::try_from(account)
    }

    async fn insert(&self, account: Account) -> Result<Account> {
        let account_db = AccountDB::try_from(&account)?;
        self.writer
            .exec(move |conn| {
                diesel::insert_into(accounts::table)
                    .values(&account_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(account)
            })
            .await
    }

    /// Replaces metadata and history of an existing account.
    ///
    /// Last write wins; `created_at` is kept from the stored row.
    async fn update(&self, account: Account) -> Result<Account> {
        let mut account_db = AccountDB::try_from(&account)?;
        self.writer
            .exec(move |conn| {
                let existing = accounts
                    .filter(owner_id.eq(&account_db.owner_id))
                    .filter(id.eq(&account_db.id))
                    .select(AccountDB::as_select())
                    .first::<AccountDB>(conn)
                    .optional()
                    .map_err(StorageError::from)?
                    .ok_or_else(|| Error::AccountNotFound(account_db.id.clone()))?;
                account_db.created_at = existing.created_at;

                diesel::update(accounts.find(&account_db.id))
                    .set(&account_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                Account::try_from(account_db)
            })
            .await
    }

    /// Deletes an account; its balance history goes with the row.
    async fn delete(&self, owner: &str, account_id: &str) -> Result<usize> {
        let owner_owned = owner.to_string();
        let id_to_delete_owned = account_id.to_string();
        self.writer
            .exec(move |conn| {
                let affected_rows = diesel::delete(
                    accounts
                        .filter(owner_id.eq(owner_owned))
                        .filter(id.eq(id_to_delete_owned)),
                )
                .execute(conn)
                .map_err(StorageError::from)?;
                Ok(affected_rows)
            })
            .await
    }
}
