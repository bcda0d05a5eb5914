use std::fmt;

use anyhow::Result;
use tracing::info;

use crate::local_storage::LocalStorage;

/// Local-storage key holding the theme.
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Anything but `"dark"` reads as light.
    fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Process-wide theme, read at startup and written on every toggle.
pub struct ThemePreference {
    storage: LocalStorage,
    current: Theme,
}

impl ThemePreference {
    pub fn load(storage: LocalStorage) -> Result<Self> {
        let current = Theme::from_stored(storage.get(THEME_KEY)?.as_deref());
        Ok(Self { storage, current })
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    pub fn toggle(&mut self) -> Result<Theme> {
        let next = self.current.toggled();
        self.storage.set(THEME_KEY, next.as_str())?;
        self.current = next;
        info!("Theme set to {next}");
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_defaults_to_light() {
        let dir = tempfile::tempdir().unwrap();
        let pref = ThemePreference::load(LocalStorage::new(dir.path().join("s.json"))).unwrap();
        assert_eq!(pref.current(), Theme::Light);
    }

    #[test]
    fn test_unknown_value_is_light() {
        assert_eq!(Theme::from_stored(Some("solarized")), Theme::Light);
        assert_eq!(Theme::from_stored(Some("dark")), Theme::Dark);
    }

    #[test]
    fn test_toggle_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("s.json");
        let mut pref = ThemePreference::load(LocalStorage::new(&path)).unwrap();
        assert_eq!(pref.toggle().unwrap(), Theme::Dark);

        let reloaded = ThemePreference::load(LocalStorage::new(&path)).unwrap();
        assert_eq!(reloaded.current(), Theme::Dark);
        assert_eq!(
            LocalStorage::new(&path).get(THEME_KEY).unwrap().as_deref(),
            Some("dark")
        );

        let mut pref = reloaded;
        assert_eq!(pref.toggle().unwrap(), Theme::Light);
    }
}
