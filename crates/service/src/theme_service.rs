use std::sync::Arc;

use recordkit_core::Theme;
use recordkit_core::constants::THEME_STORAGE_KEY;
use recordkit_storage::RecordStore;

use crate::ServiceError;

/// Dark-mode preference persisted under `darkMode`.
pub struct ThemeService {
    store: Arc<dyn RecordStore>,
    system_prefers_dark: Option<bool>,
}

impl ThemeService {
    /// Uses `RECORDKIT_PREFERS_DARK` as the system preference.
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self::with_system_preference(store, Theme::system_preference())
    }

    #[must_use]
    pub fn with_system_preference(store: Arc<dyn RecordStore>, prefers_dark: Option<bool>) -> Self {
        Self { store, system_prefers_dark: prefers_dark }
    }

    /// Stored preference, else the system one, else light.
    pub fn current(&self) -> Result<Theme, ServiceError> {
        let stored = self.store.get_raw(THEME_STORAGE_KEY)?;
        Ok(Theme::resolve(stored.as_deref(), self.system_prefers_dark))
    }

    pub fn set(&self, theme: Theme) -> Result<Theme, ServiceError> {
        self.store.put_raw(THEME_STORAGE_KEY, theme.as_stored())?;
        tracing::debug!(theme = %theme, "saved theme preference");
        Ok(theme)
    }

    pub fn toggle(&self) -> Result<Theme, ServiceError> {
        self.set(self.current()?.toggled())
    }
}
