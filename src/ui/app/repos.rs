use crate::core::RepoWatcher;

use super::App;

impl App {
    /// Drain the discovery channel. Returns true if a repository was added.
    pub fn poll_discovery(&mut self) -> bool {
        let found = self.discovery.drain();
        if found.is_empty() {
            return false;
        }

        let added = self.repos.accept(&found);
        if added == 0 {
            return false;
        }

        self.store.set_repositories(self.repos.to_persisted());
        if let Err(e) = self.store.save() {
            log::warn!("failed to save state: {}", e);
            self.ui.error = Some(format!("Failed to save state: {}", e));
        }

        if self.diffs.repository().is_none() {
            self.activate_repository(0);
        }
        self.ui.dirty = true;
        true
    }

    /// Make a repository active: mount its lists and watch it.
    pub fn activate_repository(&mut self, idx: usize) {
        let Some(repo) = self.repos.get(idx) else {
            return;
        };
        let path = repo.path.clone();
        self.sidebar.selected_idx = idx;

        if self.diffs.repository() == Some(path.as_path()) {
            self.refresh_status();
            return;
        }

        log::info!("activating repository {}", path.display());
        self.diffs.select_repository(path.clone());
        self.engine.document.scroll_to(0.0);
        self.sticky.clear();
        self.cursor = 0;

        self.watcher = None;
        if self.watch {
            match RepoWatcher::new(&path) {
                Ok(w) => self.watcher = Some(w),
                Err(e) => log::warn!("file watching disabled for {}: {}", path.display(), e),
            }
        }

        self.refresh_status();
    }

    /// Activate the highlighted repository.
    pub fn activate_selected_repository(&mut self) {
        self.activate_repository(self.sidebar.selected_idx);
    }

    /// Move the repository highlight down.
    pub fn select_next_repository(&mut self) {
        if self.sidebar.selected_idx + 1 < self.repos.len() {
            self.sidebar.selected_idx += 1;
            self.ui.dirty = true;
        }
    }

    /// Move the repository highlight up.
    pub fn select_prev_repository(&mut self) {
        if self.sidebar.selected_idx > 0 {
            self.sidebar.selected_idx -= 1;
            self.ui.dirty = true;
        }
    }
}
