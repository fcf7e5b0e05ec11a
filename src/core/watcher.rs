//! File system watching for live status refresh.

use std::path::{Component, Path};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::time::Duration;

use notify::RecursiveMode;
use notify_debouncer_mini::{new_debouncer, DebounceEventResult};

/// Events emitted by the repo watcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    /// Working tree or index changed; status should be reloaded.
    Changed,
}

/// Watches one repository's working tree and index.
pub struct RepoWatcher {
    rx: Receiver<WatchEvent>,
    /// Dropping this stops watching.
    _watcher: notify_debouncer_mini::Debouncer<notify::RecommendedWatcher>,
}

impl std::fmt::Debug for RepoWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepoWatcher").finish_non_exhaustive()
    }
}

impl RepoWatcher {
    /// Watch `root` recursively with a 200ms debounce window.
    ///
    /// Inside `.git/` only `index` and `HEAD` count, since those are what
    /// staging and commits touch.
    pub fn new(root: &Path) -> Result<Self, notify::Error> {
        let (tx, rx) = mpsc::channel();
        let repo_path = root.to_path_buf();

        let mut debouncer = new_debouncer(
            Duration::from_millis(200),
            move |res: DebounceEventResult| match res {
                Ok(events) => {
                    if events.iter().any(|e| is_relevant(&e.path, &repo_path)) {
                        let _ = tx.send(WatchEvent::Changed);
                    }
                }
                Err(e) => log::warn!("watch error: {:?}", e),
            },
        )?;

        debouncer.watcher().watch(root, RecursiveMode::Recursive)?;
        log::debug!("watching {}", root.display());

        Ok(Self {
            rx,
            _watcher: debouncer,
        })
    }

    /// Poll without blocking, coalescing everything pending into one event.
    pub fn poll(&self) -> Option<WatchEvent> {
        match self.rx.try_recv() {
            Ok(event) => {
                while self.rx.try_recv().is_ok() {}
                Some(event)
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }
}

/// Whether a changed path can affect status.
fn is_relevant(path: &Path, repo_root: &Path) -> bool {
    let Ok(rel) = path.strip_prefix(repo_root) else {
        return false;
    };

    let mut components = rel.components();
    match components.next() {
        Some(Component::Normal(first)) if first == ".git" => {
            let rest: Vec<_> = components.collect();
            matches!(rest.as_slice(), [Component::Normal(name)] if *name == "index" || *name == "HEAD")
        }
        Some(_) => true,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn relevance_of_paths() {
        let root = PathBuf::from("/repo");

        assert!(is_relevant(Path::new("/repo/src/main.rs"), &root));
        assert!(is_relevant(Path::new("/repo/.git/index"), &root));
        assert!(is_relevant(Path::new("/repo/.git/HEAD"), &root));
        assert!(is_relevant(Path::new("/repo/some/.gitignore"), &root));

        assert!(!is_relevant(Path::new("/repo/.git/objects/ab/cdef"), &root));
        assert!(!is_relevant(Path::new("/repo/.git/index.lock"), &root));
        assert!(!is_relevant(Path::new("/elsewhere/file"), &root));
        assert!(!is_relevant(Path::new("/repo"), &root));
    }
}
