//! SQLite storage implementation for accounts.

mod model;
mod repository;

pub use model::{AccountDB, BalanceEntryDB};
pub use repository::AccountRepository;
