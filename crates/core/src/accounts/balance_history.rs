//! Balance history operations.
//!
//! Lookups never rely on the stored order of `balance_history`: an account read
//! from an external store may carry its entries in any order.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::accounts_model::{Account, BalanceEntry};

/// Returns the entry with the latest date, or `None` for an empty history.
pub fn latest_entry(account: &Account) -> Option<&BalanceEntry> {
    account.balance_history.iter().max_by_key(|e| e.date)
}

/// Returns the balance of the latest entry; zero when the history is empty.
pub fn current_balance(account: &Account) -> Decimal {
    latest_entry(account).map_or(Decimal::ZERO, |e| e.balance)
}

/// Returns the entry immediately preceding the latest one.
pub fn previous_entry(account: &Account) -> Option<&BalanceEntry> {
    let latest = latest_entry(account)?;
    account
        .balance_history
        .iter()
        .filter(|e| e.date < latest.date)
        .max_by_key(|e| e.date)
}

/// Returns the history sorted ascending by date (oldest first).
pub fn sorted_history(account: &Account) -> Vec<BalanceEntry> {
    let mut history = account.balance_history.clone();
    history.sort_by_key(|e| e.date);
    history
}

/// Returns a copy of `account` with the balance recorded at `date`.
///
/// An existing entry with the exact same timestamp is replaced rather than
/// duplicated. The resulting history is sorted ascending by date.
pub fn append_balance(account: &Account, balance: Decimal, date: DateTime<Utc>) -> Account {
    let mut history: Vec<BalanceEntry> = account
        .balance_history
        .iter()
        .filter(|e| e.date != date)
        .cloned()
        .collect();
    history.push(BalanceEntry::new(balance, date));
    history.sort_by_key(|e| e.date);

    Account {
        balance_history: history,
        ..account.clone()
    }
}
