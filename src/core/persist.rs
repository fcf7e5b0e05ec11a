//! Persisted UI state: known repositories and the selected theme.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ThemeRef;

/// Cached config directory path.
static CONFIG_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Get the stagediff config directory (cached).
pub fn config_dir() -> &'static Path {
    CONFIG_DIR.get_or_init(|| {
        directories::ProjectDirs::from("", "", "stagediff")
            .map(|d| d.config_dir().to_path_buf())
            .unwrap_or_else(dirs_fallback)
    })
}

/// Fallback config directory if `directories` fails.
fn dirs_fallback() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".config").join("stagediff"))
        .unwrap_or_else(|| PathBuf::from(".stagediff"))
}

/// Errors from the state file.
#[derive(Debug, Error)]
pub enum StateError {
    /// Reading or writing the file failed.
    #[error("state file io error: {0}")]
    Io(#[from] std::io::Error),
    /// Encoding the state failed.
    #[error("state file encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A repository entry in the state file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedRepository {
    /// Working tree root.
    pub path: PathBuf,
    /// Sidebar color index.
    pub color: usize,
}

/// State file schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedState {
    /// Known repositories, in discovery order.
    #[serde(default)]
    pub repositories: Vec<PersistedRepository>,
    /// Selected theme.
    #[serde(default)]
    pub theme: ThemeRef,
}

/// JSON-file backed state. Callers invoke [`StateStore::save`] after mutating.
#[derive(Debug)]
pub struct StateStore {
    path: PathBuf,
    state: PersistedState,
}

impl StateStore {
    /// Default state file location.
    pub fn default_path() -> PathBuf {
        config_dir().join("state.json")
    }

    /// Open the state file at `path`. A missing or unreadable file yields defaults.
    pub fn open(path: PathBuf) -> Result<Self, StateError> {
        let state = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            serde_json::from_str(&content).unwrap_or_else(|e| {
                log::warn!("ignoring corrupt state file {}: {}", path.display(), e);
                PersistedState::default()
            })
        } else {
            PersistedState::default()
        };

        Ok(Self { path, state })
    }

    /// Current state.
    pub fn state(&self) -> &PersistedState {
        &self.state
    }

    /// State file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the repository list.
    pub fn set_repositories(&mut self, repositories: Vec<PersistedRepository>) {
        self.state.repositories = repositories;
    }

    /// Replace the selected theme.
    pub fn set_theme(&mut self, theme: ThemeRef) {
        self.state.theme = theme;
    }

    /// Write state to disk (atomic: temp file + rename).
    #[must_use = "this returns a Result that should be checked"]
    pub fn save(&self) -> Result<(), StateError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        let content = serde_json::to_string_pretty(&self.state)?;
        std::fs::write(&temp_path, content)?;
        std::fs::rename(&temp_path, &self.path)?;

        log::debug!("saved state to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{find_theme, THEMES};

    #[test]
    fn schema_matches_wire_format() {
        let state = PersistedState {
            repositories: vec![PersistedRepository {
                path: PathBuf::from("/src/a"),
                color: 2,
            }],
            theme: ThemeRef::from(&THEMES[1]),
        };

        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(value["repositories"][0]["path"], "/src/a");
        assert_eq!(value["repositories"][0]["color"], 2);
        assert_eq!(value["theme"]["label"], "Light");
        assert_eq!(value["theme"]["file"], THEMES[1].file);
    }

    #[test]
    fn missing_fields_default() {
        let state: PersistedState = serde_json::from_str("{}").unwrap();
        assert!(state.repositories.is_empty());
        assert_eq!(state.theme, ThemeRef::default());
    }

    #[test]
    fn save_and_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");

        {
            let mut store = StateStore::open(path.clone()).unwrap();
            store.set_repositories(vec![PersistedRepository {
                path: PathBuf::from("/src/a"),
                color: 1,
            }]);
            store.set_theme(ThemeRef::from(find_theme("Light").unwrap()));
            store.save().unwrap();
        }

        let store = StateStore::open(path).unwrap();
        assert_eq!(store.state().repositories.len(), 1);
        assert_eq!(store.state().theme.label, "Light");
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = StateStore::open(path).unwrap();
        assert_eq!(store.state(), &PersistedState::default());
    }
}
