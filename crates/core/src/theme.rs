//! Dark-mode preference and its resolution order.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::PREFERS_DARK_ENV;
use crate::env_config::env_flag;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub const fn from_dark(dark: bool) -> Self {
        if dark { Self::Dark } else { Self::Light }
    }

    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Persisted form under the `darkMode` key.
    #[must_use]
    pub const fn as_stored(self) -> &'static str {
        if self.is_dark() { "true" } else { "false" }
    }

    /// Parse the persisted form. Unknown text is ignored.
    #[must_use]
    pub fn from_stored(raw: &str) -> Option<Self> {
        match serde_json::from_str::<bool>(raw.trim()) {
            Ok(dark) => Some(Self::from_dark(dark)),
            Err(_) => {
                tracing::warn!(value = raw, "ignoring unreadable theme preference");
                None
            },
        }
    }

    /// Stored preference first, then the system preference, then light.
    #[must_use]
    pub fn resolve(stored: Option<&str>, system_prefers_dark: Option<bool>) -> Self {
        stored
            .and_then(Self::from_stored)
            .or_else(|| system_prefers_dark.map(Self::from_dark))
            .unwrap_or_default()
    }

    /// The system preference as exposed through the environment.
    #[must_use]
    pub fn system_preference() -> Option<bool> {
        env_flag(PREFERS_DARK_ENV)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.is_dark() { "dark" } else { "light" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_value_wins_over_system() {
        assert_eq!(Theme::resolve(Some("false"), Some(true)), Theme::Light);
        assert_eq!(Theme::resolve(Some("true"), Some(false)), Theme::Dark);
    }

    #[test]
    fn falls_back_to_system_then_light() {
        assert_eq!(Theme::resolve(None, Some(true)), Theme::Dark);
        assert_eq!(Theme::resolve(Some("garbage"), Some(true)), Theme::Dark);
        assert_eq!(Theme::resolve(None, None), Theme::Light);
    }

    #[test]
    fn stored_form_round_trips() {
        for theme in [Theme::Light, Theme::Dark] {
            assert_eq!(Theme::from_stored(theme.as_stored()), Some(theme));
        }
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }
}
