//! Theme preference persisted in the local key-value store.

use std::sync::Arc;

use tracing::{debug, warn};

use schooladmin_core::result::AppResult;
use schooladmin_core::traits::KeyValueStore;
use schooladmin_entity::preference::ThemePreference;

/// Store key of the colour scheme.
pub const THEME_KEY: &str = "school_admin_theme";

/// Reads and writes display preferences. Independent of the session, so
/// logging out keeps the chosen theme.
#[derive(Debug, Clone)]
pub struct PreferenceService {
    kv: Arc<dyn KeyValueStore>,
}

impl PreferenceService {
    /// Creates a new preference service.
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Stored theme; missing, unreadable, or unknown values read as dark.
    pub async fn theme(&self) -> ThemePreference {
        match self.kv.get(THEME_KEY).await {
            Ok(Some(raw)) => raw.parse().unwrap_or_else(|e| {
                debug!(error = %e, "Ignoring stored theme");
                ThemePreference::default()
            }),
            Ok(None) => ThemePreference::default(),
            Err(e) => {
                warn!(error = %e, "Theme preference unreadable");
                ThemePreference::default()
            }
        }
    }

    /// Persist a theme.
    pub async fn set_theme(&self, theme: ThemePreference) -> AppResult<()> {
        self.kv.set(THEME_KEY, theme.as_str()).await
    }

    /// Switch to the other theme and return it.
    pub async fn toggle_theme(&self) -> AppResult<ThemePreference> {
        let next = self.theme().await.toggled();
        self.set_theme(next).await?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schooladmin_auth::MemoryKeyValueStore;

    #[tokio::test]
    async fn test_theme_defaults_to_dark_and_toggles() {
        let kv = Arc::new(MemoryKeyValueStore::new());
        let prefs = PreferenceService::new(kv.clone());

        assert_eq!(prefs.theme().await, ThemePreference::Dark);
        assert_eq!(prefs.toggle_theme().await.unwrap(), ThemePreference::Light);
        assert_eq!(kv.get(THEME_KEY).await.unwrap().as_deref(), Some("light"));
    }

    #[tokio::test]
    async fn test_unknown_stored_value_reads_as_default() {
        let kv = Arc::new(MemoryKeyValueStore::new());
        kv.set(THEME_KEY, "sepia").await.unwrap();
        assert_eq!(PreferenceService::new(kv).theme().await, ThemePreference::Dark);
    }
}
