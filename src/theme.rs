//! Dark/light theme state
//!
//! The current theme is derived from the persisted preference at startup and
//! written back on every change. Storage failures never block a toggle.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::storage::{KeyValueStore, THEME_KEY};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Process-wide theme state
#[derive(Debug, Clone)]
pub struct ThemeState {
    current: Theme,
}

impl ThemeState {
    pub fn new(current: Theme) -> Self {
        Self { current }
    }

    /// Derive the theme from the persisted preference, falling back to `default`
    pub fn load(store: &dyn KeyValueStore, default: Theme) -> Self {
        let current = match store.get(THEME_KEY) {
            Ok(Some(value)) => Theme::from_str(&value).unwrap_or_else(|| {
                log::warn!("Ignoring unknown theme preference '{}'", value);
                default
            }),
            Ok(None) => default,
            Err(e) => {
                log::warn!("Theme preference unavailable: {}", e);
                default
            }
        };
        Self::new(current)
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    /// Flip the theme and persist the result
    pub fn toggle(&mut self, store: &mut dyn KeyValueStore) -> Theme {
        let next = self.current.toggled();
        self.set(next, store)
    }

    /// Switch to `theme` and persist it
    pub fn set(&mut self, theme: Theme, store: &mut dyn KeyValueStore) -> Theme {
        self.current = theme;
        if let Err(e) = store.set(THEME_KEY, theme.as_str()) {
            log::warn!("Failed to persist theme preference: {}", e);
        }
        log::info!("Theme set to {}", theme);
        theme
    }
}
