//! Known repositories, deduplicated by path.

use std::path::{Path, PathBuf};

use super::{DiscoveredRepo, PersistedRepository};

/// A repository shown in the sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    /// Working tree root. Unique within the registry.
    pub path: PathBuf,
    /// Index into the sidebar color palette.
    pub color: usize,
    /// Whether status has been loaded at least once this session.
    pub loaded: bool,
}

impl Repository {
    /// Short display name (last path component).
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Append-only registry of repositories.
#[derive(Debug, Clone)]
pub struct RepositoryRegistry {
    repos: Vec<Repository>,
    palette_len: usize,
}

impl RepositoryRegistry {
    /// Create an empty registry cycling through `palette_len` colors.
    pub fn new(palette_len: usize) -> Self {
        Self {
            repos: Vec::new(),
            palette_len: palette_len.max(1),
        }
    }

    /// Restore repositories from persisted state, keeping their colors.
    pub fn from_persisted(saved: &[PersistedRepository], palette_len: usize) -> Self {
        let mut registry = Self::new(palette_len);
        for repo in saved {
            if registry.find(&repo.path).is_some() {
                continue;
            }
            registry.repos.push(Repository {
                path: repo.path.clone(),
                color: repo.color % registry.palette_len,
                loaded: false,
            });
        }
        registry
    }

    /// Accept a discovery batch. Already-known paths are skipped.
    ///
    /// Returns how many repositories were added.
    pub fn accept(&mut self, batch: &[DiscoveredRepo]) -> usize {
        let mut added = 0;
        for found in batch {
            if self.find(&found.path).is_some() {
                log::trace!("ignoring known repository {}", found.path.display());
                continue;
            }
            let color = self.repos.len() % self.palette_len;
            self.repos.push(Repository {
                path: found.path.clone(),
                color,
                loaded: false,
            });
            log::info!("discovered repository {}", found.path.display());
            added += 1;
        }
        added
    }

    /// Find a repository index by path.
    pub fn find(&self, path: &Path) -> Option<usize> {
        self.repos.iter().position(|r| r.path == path)
    }

    /// Get a repository by index.
    pub fn get(&self, idx: usize) -> Option<&Repository> {
        self.repos.get(idx)
    }

    /// Record that status was loaded for a repository.
    pub fn mark_loaded(&mut self, path: &Path) {
        if let Some(idx) = self.find(path) {
            self.repos[idx].loaded = true;
        }
    }

    /// All repositories in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &Repository> {
        self.repos.iter()
    }

    /// Number of repositories.
    pub fn len(&self) -> usize {
        self.repos.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.repos.is_empty()
    }

    /// Snapshot for the state file.
    pub fn to_persisted(&self) -> Vec<PersistedRepository> {
        self.repos
            .iter()
            .map(|r| PersistedRepository {
                path: r.path.clone(),
                color: r.color,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn found(path: &str) -> DiscoveredRepo {
        DiscoveredRepo {
            path: PathBuf::from(path),
        }
    }

    #[test]
    fn same_path_twice_is_one_entry() {
        let mut registry = RepositoryRegistry::new(6);
        assert_eq!(registry.accept(&[found("/src/a")]), 1);
        assert_eq!(registry.accept(&[found("/src/a")]), 0);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn duplicates_within_one_batch_are_dropped() {
        let mut registry = RepositoryRegistry::new(6);
        let added = registry.accept(&[found("/src/a"), found("/src/b"), found("/src/a")]);
        assert_eq!(added, 2);
        let paths: Vec<_> = registry.iter().map(|r| r.path.clone()).collect();
        assert_eq!(paths, vec![PathBuf::from("/src/a"), PathBuf::from("/src/b")]);
    }

    #[test]
    fn known_path_does_not_stop_rest_of_batch() {
        let mut registry = RepositoryRegistry::new(6);
        registry.accept(&[found("/src/a")]);
        let added = registry.accept(&[found("/src/a"), found("/src/b")]);
        assert_eq!(added, 1);
        assert!(registry.find(Path::new("/src/b")).is_some());
    }

    #[test]
    fn colors_cycle_through_palette() {
        let mut registry = RepositoryRegistry::new(2);
        registry.accept(&[found("/a"), found("/b"), found("/c")]);
        let colors: Vec<_> = registry.iter().map(|r| r.color).collect();
        assert_eq!(colors, vec![0, 1, 0]);
    }

    #[test]
    fn persisted_colors_survive_restore() {
        let saved = vec![
            PersistedRepository {
                path: PathBuf::from("/a"),
                color: 4,
            },
            PersistedRepository {
                path: PathBuf::from("/a"),
                color: 1,
            },
        ];
        let registry = RepositoryRegistry::from_persisted(&saved, 6);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(0).unwrap().color, 4);
        assert_eq!(registry.to_persisted(), vec![saved[0].clone()]);
    }

    #[test]
    fn mark_loaded_sets_flag() {
        let mut registry = RepositoryRegistry::new(6);
        registry.accept(&[found("/a")]);
        assert!(!registry.get(0).unwrap().loaded);
        registry.mark_loaded(Path::new("/a"));
        assert!(registry.get(0).unwrap().loaded);
    }
}
