use super::SettingsRepositoryTrait;
use crate::errors::{DatabaseError, Error, Result};
use crate::settings::{Settings, SettingsUpdate};
use async_trait::async_trait;
use log::{debug, warn};
use std::sync::Arc;

#[async_trait]
pub trait SettingsServiceTrait: Send + Sync {
    fn get_settings(&self) -> Result<Settings>;

    async fn update_settings(&self, new_settings: &SettingsUpdate) -> Result<()>;

    /// Get a single setting value by key. Returns None if not found.
    fn get_setting_value(&self, key: &str) -> Result<Option<String>>;

    /// Set a single setting value by key.
    async fn set_setting_value(&self, key: &str, value: &str) -> Result<()>;
}

pub struct SettingsService {
    settings_repository: Arc<dyn SettingsRepositoryTrait>,
}

#[async_trait]
impl SettingsServiceTrait for SettingsService {
    fn get_settings(&self) -> Result<Settings> {
        let settings = self.settings_repository.get_settings()?;
        if let Err(e) = settings.validate() {
            warn!("Stored settings are invalid ({}), using defaults", e);
            return Ok(Settings::default());
        }
        Ok(settings)
    }

    async fn update_settings(&self, new_settings: &SettingsUpdate) -> Result<()> {
        let current = self.settings_repository.get_settings()?;
        let next = new_settings.apply_to(&current);
        next.validate()?;

        debug!("Updating settings: {:?}", new_settings);
        self.settings_repository
            .update_settings(new_settings)
            .await?;
        Ok(())
    }

    fn get_setting_value(&self, key: &str) -> Result<Option<String>> {
        match self.settings_repository.get_setting(key) {
            Ok(value) => Ok(Some(value)),
            Err(Error::Database(DatabaseError::NotFound(_))) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn set_setting_value(&self, key: &str, value: &str) -> Result<()> {
        let mut candidate = self.settings_repository.get_settings()?;
        candidate.apply_stored_value(key, value);
        candidate.validate()?;
        self.settings_repository.update_setting(key, value).await
    }
}

impl SettingsService {
    pub fn new(settings_repository: Arc<dyn SettingsRepositoryTrait>) -> Self {
        SettingsService {
            settings_repository,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{SNAPSHOT_THRESHOLD_KEY, VALUATION_TIMEZONE_KEY};
    use std::collections::HashMap;
    use std::sync::RwLock;

    #[derive(Default)]
    struct MockSettingsRepository {
        values: RwLock<HashMap<String, String>>,
    }

    #[async_trait]
    impl SettingsRepositoryTrait for MockSettingsRepository {
        fn get_settings(&self) -> Result<Settings> {
            let mut settings = Settings::default();
            for (k, v) in self.values.read().unwrap().iter() {
                settings.apply_stored_value(k, v);
            }
            Ok(settings)
        }

        async fn update_settings(&self, new_settings: &SettingsUpdate) -> Result<()> {
            let mut values = self.values.write().unwrap();
            for (k, v) in new_settings.to_key_values() {
                values.insert(k.to_string(), v);
            }
            Ok(())
        }

        fn get_setting(&self, setting_key: &str) -> Result<String> {
            self.values
                .read()
                .unwrap()
                .get(setting_key)
                .cloned()
                .ok_or_else(|| DatabaseError::NotFound(setting_key.to_string()).into())
        }

        async fn update_setting(&self, setting_key: &str, setting_value: &str) -> Result<()> {
            self.values
                .write()
                .unwrap()
                .insert(setting_key.to_string(), setting_value.to_string());
            Ok(())
        }
    }

    fn service() -> (SettingsService, Arc<MockSettingsRepository>) {
        let repo = Arc::new(MockSettingsRepository::default());
        (SettingsService::new(repo.clone()), repo)
    }

    #[tokio::test]
    async fn test_update_rejects_invalid_timezone() {
        let (service, repo) = service();
        let update = SettingsUpdate {
            valuation_timezone: Some("Nowhere/Land".to_string()),
            ..Default::default()
        };
        assert!(service.update_settings(&update).await.is_err());
        assert!(repo.values.read().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_set_and_get_single_value() {
        let (service, _repo) = service();
        assert_eq!(service.get_setting_value(VALUATION_TIMEZONE_KEY).unwrap(), None);

        service
            .set_setting_value(VALUATION_TIMEZONE_KEY, "Asia/Tokyo")
            .await
            .unwrap();
        assert_eq!(
            service.get_setting_value(VALUATION_TIMEZONE_KEY).unwrap(),
            Some("Asia/Tokyo".to_string())
        );
        assert_eq!(service.get_settings().unwrap().valuation_timezone, "Asia/Tokyo");

        assert!(service.set_setting_value(SNAPSHOT_THRESHOLD_KEY, "-1").await.is_err());
    }
}
