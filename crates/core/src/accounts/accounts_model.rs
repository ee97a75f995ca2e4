//! Account domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::accounts_constants::AccountType;
use crate::{errors::ValidationError, Error, Result};

/// One dated balance observation for an account.
///
/// Entries are never edited in place; recording a new balance appends a new
/// entry (or replaces the one with the exact same timestamp).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceEntry {
    pub date: DateTime<Utc>,
    /// Stored as a magnitude for liabilities; the sign comes from the account type.
    pub balance: Decimal,
}

impl BalanceEntry {
    pub fn new(balance: Decimal, date: DateTime<Utc>) -> Self {
        Self { date, balance }
    }
}

/// Domain model representing a tracked account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub owner_id: String,
    pub institution: String,
    pub name: Option<String>,
    pub account_type: AccountType,
    pub category: Option<String>,
    pub tags: BTreeSet<String>,
    pub display_order: i32,
    /// Sorted ascending by date.
    pub balance_history: Vec<BalanceEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Name shown to the user: the display name when set, otherwise the institution.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.institution)
    }

    pub fn is_liability(&self) -> bool {
        self.account_type.is_liability()
    }
}

/// Input model for creating a new account together with its seed balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub institution: String,
    pub name: Option<String>,
    pub account_type: AccountType,
    pub category: Option<String>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub display_order: i32,
    pub initial_balance: Decimal,
    pub balance_date: DateTime<Utc>,
}

impl NewAccount {
    /// Validates the new account data.
    pub fn validate(&self) -> Result<()> {
        if self.institution.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Institution cannot be empty".to_string(),
            )));
        }
        Ok(())
    }

    /// Builds the account record with its single seed balance entry.
    pub fn into_account(self, owner_id: &str, now: DateTime<Utc>) -> Account {
        Account {
            id: self
                .id
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            owner_id: owner_id.to_string(),
            institution: self.institution.trim().to_string(),
            name: normalize_optional(self.name),
            account_type: self.account_type,
            category: normalize_optional(self.category),
            tags: normalize_tags(self.tags),
            display_order: self.display_order,
            balance_history: vec![BalanceEntry::new(self.initial_balance, self.balance_date)],
            created_at: now,
            updated_at: now,
        }
    }
}

/// Input model for updating account metadata.
///
/// Balance history is deliberately absent: it is only changed by recording balances.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountUpdate {
    pub id: Option<String>,
    pub institution: String,
    pub name: Option<String>,
    pub account_type: AccountType,
    pub category: Option<String>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    pub display_order: i32,
}

impl AccountUpdate {
    /// Validates the account update data.
    pub fn validate(&self) -> Result<()> {
        if self.id.as_deref().map_or(true, |id| id.trim().is_empty()) {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Account ID is required for updates".to_string(),
            )));
        }
        if self.institution.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Institution cannot be empty".to_string(),
            )));
        }
        Ok(())
    }

    /// Applies the metadata to `account`, leaving its history untouched.
    pub fn apply_to(self, account: &Account, now: DateTime<Utc>) -> Account {
        Account {
            institution: self.institution.trim().to_string(),
            name: normalize_optional(self.name),
            account_type: self.account_type,
            category: normalize_optional(self.category),
            tags: normalize_tags(self.tags),
            display_order: self.display_order,
            updated_at: now,
            ..account.clone()
        }
    }
}

/// Parses a user-entered balance, rejecting anything that is not a number.
pub fn parse_balance_input(raw: &str) -> Result<Decimal> {
    let text = raw.trim().replace(',', "");
    if text.is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            "balance".to_string(),
        )));
    }
    text.parse::<Decimal>().map_err(|_| {
        Error::Validation(ValidationError::InvalidInput(format!(
            "Balance must be a number, got '{}'",
            raw
        )))
    })
}

/// Orders accounts for display: by display order, then institution.
pub fn sort_for_display(accounts: &mut [Account]) {
    accounts.sort_by(|a, b| {
        a.display_order
            .cmp(&b.display_order)
            .then_with(|| a.institution.cmp(&b.institution))
    });
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn normalize_tags(tags: BTreeSet<String>) -> BTreeSet<String> {
    tags.into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}
