//! Accounts module - domain models, balance history, and traits.

mod accounts_constants;
mod accounts_model;
mod accounts_traits;
pub mod balance_history;

#[cfg(test)]
mod accounts_model_tests;

// Re-export the public interface
pub use accounts_constants::*;
pub use accounts_model::{
    parse_balance_input, sort_for_display, Account, AccountUpdate, BalanceEntry, NewAccount,
};
pub use accounts_traits::AccountRepositoryTrait;
pub use balance_history::{append_balance, current_balance, latest_entry, previous_entry};
