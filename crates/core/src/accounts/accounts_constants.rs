use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{Error, ValidationError};

/// Default account type for new accounts
pub const DEFAULT_ACCOUNT_TYPE: AccountType = AccountType::Checking;

/// Classification of a tracked account.
///
/// The set is closed: every account is exactly one of these, and only
/// `Liability` is subtracted when aggregating net worth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    #[default]
    Checking,
    Savings,
    Cash,
    Investment,
    Crypto,
    RealEstate,
    OtherAssets,
    Liability,
}

impl AccountType {
    pub const ALL: [AccountType; 8] = [
        AccountType::Checking,
        AccountType::Savings,
        AccountType::Cash,
        AccountType::Investment,
        AccountType::Crypto,
        AccountType::RealEstate,
        AccountType::OtherAssets,
        AccountType::Liability,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Checking => "checking",
            AccountType::Savings => "savings",
            AccountType::Cash => "cash",
            AccountType::Investment => "investment",
            AccountType::Crypto => "crypto",
            AccountType::RealEstate => "real_estate",
            AccountType::OtherAssets => "other_assets",
            AccountType::Liability => "liability",
        }
    }

    /// Returns true if the account type is a liability.
    pub fn is_liability(&self) -> bool {
        matches!(self, AccountType::Liability)
    }

    /// Returns the display group name used when organizing accounts.
    pub fn default_group(&self) -> &'static str {
        match self {
            AccountType::Checking | AccountType::Savings => "Bank Accounts",
            AccountType::Cash => "Cash",
            AccountType::Investment => "Investments",
            AccountType::Crypto => "Crypto",
            AccountType::RealEstate => "Real Estate",
            AccountType::OtherAssets => "Other Assets",
            AccountType::Liability => "Liabilities",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        AccountType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| {
                Error::Validation(ValidationError::InvalidInput(format!(
                    "Unsupported account type: {}",
                    s
                )))
            })
    }
}
