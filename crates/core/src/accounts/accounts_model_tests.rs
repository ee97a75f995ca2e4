//! Tests for account domain models and validation.

#[cfg(test)]
mod tests {
    use crate::accounts::{
        parse_balance_input, sort_for_display, Account, AccountType, AccountUpdate, NewAccount,
    };
    use crate::errors::{Error, ValidationError};
    use chrono::{DateTime, TimeZone, Utc};
    use rust_decimal_macros::dec;
    use std::collections::BTreeSet;
    use std::str::FromStr;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap()
    }

    fn new_account(institution: &str) -> NewAccount {
        NewAccount {
            id: None,
            institution: institution.to_string(),
            name: None,
            account_type: AccountType::Savings,
            category: None,
            tags: BTreeSet::new(),
            display_order: 0,
            initial_balance: dec!(1000),
            balance_date: now(),
        }
    }

    fn stored_account(id: &str, institution: &str, order: i32) -> Account {
        new_account(institution)
            .into_account("user-1", now())
            .with_id(id, order)
    }

    trait WithId {
        fn with_id(self, id: &str, order: i32) -> Self;
    }

    impl WithId for Account {
        fn with_id(mut self, id: &str, order: i32) -> Self {
            self.id = id.to_string();
            self.display_order = order;
            self
        }
    }

    // ==================== AccountType ====================

    #[test]
    fn test_account_type_serialization() {
        assert_eq!(
            serde_json::to_string(&AccountType::RealEstate).unwrap(),
            "\"real_estate\""
        );
        assert_eq!(
            serde_json::from_str::<AccountType>("\"other_assets\"").unwrap(),
            AccountType::OtherAssets
        );
    }

    #[test]
    fn test_account_type_from_str() {
        assert_eq!(AccountType::from_str("Liability").unwrap(), AccountType::Liability);
        assert_eq!(AccountType::from_str(" crypto ").unwrap(), AccountType::Crypto);
        assert!(AccountType::from_str("brokerage").is_err());
    }

    #[test]
    fn test_only_liability_is_liability() {
        let liabilities: Vec<_> = AccountType::ALL
            .iter()
            .filter(|t| t.is_liability())
            .collect();
        assert_eq!(liabilities, vec![&AccountType::Liability]);
    }

    #[test]
    fn test_account_type_display_round_trips() {
        for t in AccountType::ALL {
            assert_eq!(AccountType::from_str(&t.to_string()).unwrap(), t);
        }
    }

    // ==================== NewAccount ====================

    #[test]
    fn test_new_account_rejects_empty_institution() {
        let result = new_account("   ").validate();
        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::InvalidInput(_)))
        ));
    }

    #[test]
    fn test_new_account_seeds_one_entry() {
        let input = new_account("  First Bank ");
        input.validate().unwrap();
        let account = input.into_account("user-1", now());

        assert!(!account.id.is_empty());
        assert_eq!(account.owner_id, "user-1");
        assert_eq!(account.institution, "First Bank");
        assert_eq!(account.balance_history.len(), 1);
        assert_eq!(account.balance_history[0].balance, dec!(1000));
        assert_eq!(account.display_name(), "First Bank");
    }

    #[test]
    fn test_new_account_keeps_supplied_id_and_trims_tags() {
        let mut input = new_account("First Bank");
        input.id = Some("acc-42".to_string());
        input.name = Some("Emergency fund".to_string());
        input.tags = ["  rainy day ".to_string(), "".to_string()].into_iter().collect();

        let account = input.into_account("user-1", now());
        assert_eq!(account.id, "acc-42");
        assert_eq!(account.display_name(), "Emergency fund");
        assert_eq!(
            account.tags.into_iter().collect::<Vec<_>>(),
            vec!["rainy day".to_string()]
        );
    }

    // ==================== AccountUpdate ====================

    #[test]
    fn test_update_requires_id() {
        let update = AccountUpdate {
            id: None,
            institution: "First Bank".to_string(),
            name: None,
            account_type: AccountType::Checking,
            category: None,
            tags: BTreeSet::new(),
            display_order: 1,
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_update_does_not_touch_history() {
        let account = stored_account("acc-1", "First Bank", 0);
        let later = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();
        let update = AccountUpdate {
            id: Some("acc-1".to_string()),
            institution: "Second Bank".to_string(),
            name: Some("Joint".to_string()),
            account_type: AccountType::Checking,
            category: Some("Everyday".to_string()),
            tags: BTreeSet::new(),
            display_order: 3,
        };
        update.validate().unwrap();
        let updated = update.apply_to(&account, later);

        assert_eq!(updated.institution, "Second Bank");
        assert_eq!(updated.account_type, AccountType::Checking);
        assert_eq!(updated.balance_history, account.balance_history);
        assert_eq!(updated.created_at, account.created_at);
        assert_eq!(updated.updated_at, later);
    }

    // ==================== Balance input ====================

    #[test]
    fn test_parse_balance_input() {
        assert_eq!(parse_balance_input("1,234.50").unwrap(), dec!(1234.50));
        assert_eq!(parse_balance_input(" -20 ").unwrap(), dec!(-20));
        assert!(matches!(
            parse_balance_input(""),
            Err(Error::Validation(ValidationError::MissingField(_)))
        ));
        assert!(matches!(
            parse_balance_input("abc"),
            Err(Error::Validation(ValidationError::InvalidInput(_)))
        ));
    }

    #[test]
    fn test_sort_for_display() {
        let mut accounts = vec![
            stored_account("a", "Zeta", 1),
            stored_account("b", "Beta", 1),
            stored_account("c", "Alpha", 2),
            stored_account("d", "Omega", 0),
        ];
        sort_for_display(&mut accounts);
        let ids: Vec<_> = accounts.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["d", "b", "a", "c"]);
    }
}
