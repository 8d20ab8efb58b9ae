//! Local persistence: one state directory, two entries.
//!
//! `selection.json` holds the saved selection as a JSON array of date keys;
//! `theme` holds the literal theme token. Loads are total — a missing,
//! unreadable, or unparsable entry degrades to the default with a warning,
//! never an error. Saves propagate errors so callers can surface them and
//! only advance the saved baseline on success.

use crate::history::Snapshot;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// File holding the saved selection.
pub const SELECTION_FILE: &str = "selection.json";

/// File holding the literal theme token.
pub const THEME_FILE: &str = "theme";

/// Environment variable overriding the state directory.
pub const STATE_DIR_ENV: &str = "ROTA_STATE_DIR";

/// Display theme token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The literal token stored on disk.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// The other theme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl FromStr for Theme {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(()),
        }
    }
}

/// File-backed store for the selection and theme.
#[derive(Debug, Clone)]
pub struct StateStore {
    dir: PathBuf,
}

impl StateStore {
    /// Use an explicit state directory.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Resolve the state directory: `ROTA_STATE_DIR`, else the platform
    /// data dir, else `.rota` in the working directory.
    #[must_use]
    pub fn resolve() -> Self {
        let dir = std::env::var_os(STATE_DIR_ENV).map_or_else(
            || {
                dirs::data_dir()
                    .map_or_else(|| PathBuf::from(".rota"), |d| d.join("rota"))
            },
            PathBuf::from,
        );
        Self { dir }
    }

    /// The resolved state directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load the saved selection. Total: any failure yields the empty
    /// selection and a warning.
    #[must_use]
    pub fn load_selection(&self) -> Snapshot {
        let path = self.dir.join(SELECTION_FILE);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Snapshot::empty();
            }
            Err(err) => {
                tracing::warn!("failed to read {}: {err}; starting empty", path.display());
                return Snapshot::empty();
            }
        };
        match serde_json::from_str::<Vec<crate::datekey::DateKey>>(&raw) {
            Ok(keys) => Snapshot::new(keys),
            Err(err) => {
                tracing::warn!("failed to parse {}: {err}; starting empty", path.display());
                Snapshot::empty()
            }
        }
    }

    /// Serialize and write the selection.
    pub fn save_selection(&self, snapshot: &Snapshot) -> Result<()> {
        self.ensure_dir()?;
        let path = self.dir.join(SELECTION_FILE);
        let raw = serde_json::to_string(snapshot.keys()).context("serialize selection")?;
        fs::write(&path, raw).with_context(|| format!("write {}", path.display()))?;
        tracing::debug!("saved {} duty days to {}", snapshot.len(), path.display());
        Ok(())
    }

    /// Load the theme token. Total: any failure yields the default theme.
    #[must_use]
    pub fn load_theme(&self) -> Theme {
        let path = self.dir.join(THEME_FILE);
        match fs::read_to_string(&path) {
            Ok(raw) => raw.parse().unwrap_or_else(|()| {
                tracing::warn!(
                    "unrecognized theme token in {}; using default",
                    path.display()
                );
                Theme::default()
            }),
            Err(_) => Theme::default(),
        }
    }

    /// Write the literal theme token.
    pub fn save_theme(&self, theme: Theme) -> Result<()> {
        self.ensure_dir()?;
        let path = self.dir.join(THEME_FILE);
        fs::write(&path, theme.token()).with_context(|| format!("write {}", path.display()))
    }

    fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("create state dir {}", self.dir.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datekey::DateKey;
    use tempfile::tempdir;

    fn snap(keys: &[&str]) -> Snapshot {
        keys.iter()
            .map(|s| s.parse::<DateKey>().expect("valid key"))
            .collect()
    }

    #[test]
    fn round_trips_selection() {
        let dir = tempdir().expect("tempdir");
        let store = StateStore::new(dir.path());

        let snapshot = snap(&["2024-05-01", "2024-05-15"]);
        store.save_selection(&snapshot).expect("save");

        let loaded = store.load_selection();
        assert!(loaded.same_selection(&snapshot));
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempdir().expect("tempdir");
        let store = StateStore::new(dir.path().join("nothing-here"));
        assert!(store.load_selection().is_empty());
    }

    #[test]
    fn corrupt_file_loads_empty() {
        let dir = tempdir().expect("tempdir");
        std::fs::write(dir.path().join(SELECTION_FILE), "{not json!").expect("write");
        let store = StateStore::new(dir.path());
        assert!(store.load_selection().is_empty());
    }

    #[test]
    fn invalid_keys_in_file_load_empty() {
        let dir = tempdir().expect("tempdir");
        std::fs::write(dir.path().join(SELECTION_FILE), r#"["2024-99-99"]"#).expect("write");
        let store = StateStore::new(dir.path());
        assert!(store.load_selection().is_empty());
    }

    #[test]
    fn theme_round_trip_and_default() {
        let dir = tempdir().expect("tempdir");
        let store = StateStore::new(dir.path());

        assert_eq!(store.load_theme(), Theme::Light);
        store.save_theme(Theme::Dark).expect("save theme");
        assert_eq!(store.load_theme(), Theme::Dark);

        let raw = std::fs::read_to_string(dir.path().join(THEME_FILE)).expect("read");
        assert_eq!(raw, "dark");
    }

    #[test]
    fn garbage_theme_token_defaults_to_light() {
        let dir = tempdir().expect("tempdir");
        std::fs::write(dir.path().join(THEME_FILE), "solarized").expect("write");
        let store = StateStore::new(dir.path());
        assert_eq!(store.load_theme(), Theme::Light);
    }

    #[test]
    fn theme_toggles_between_tokens() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!("dark".parse::<Theme>(), Ok(Theme::Dark));
        assert!("blue".parse::<Theme>().is_err());
    }
}
