//! Account repository trait.
//!
//! This trait defines the contract for account persistence without any
//! database-specific types, allowing for different storage implementations.

use async_trait::async_trait;

use super::accounts_model::Account;
use crate::errors::Result;

/// Trait defining the contract for Account repository operations.
///
/// Records are keyed by owner and id. The balance history travels with the
/// account as an ordered array; there is no separate entry table.
#[async_trait]
pub trait AccountRepositoryTrait: Send + Sync {
    /// Lists all accounts belonging to `owner_id`.
    fn list(&self, owner_id: &str) -> Result<Vec<Account>>;

    /// Retrieves a single account.
    fn get_by_id(&self, owner_id: &str, account_id: &str) -> Result<Account>;

    /// Inserts a new account, returning the stored record.
    async fn insert(&self, account: Account) -> Result<Account>;

    /// Replaces an existing account (metadata and history), returning the stored record.
    async fn update(&self, account: Account) -> Result<Account>;

    /// Deletes an account and, with it, its balance history.
    ///
    /// Returns the number of deleted records.
    async fn delete(&self, owner_id: &str, account_id: &str) -> Result<usize>;
}
