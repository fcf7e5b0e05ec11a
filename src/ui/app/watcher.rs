use super::App;

impl App {
    /// Poll the file watcher and reload status when the repository changed.
    pub fn poll_watcher(&mut self) -> bool {
        let Some(ref watcher) = self.watcher else {
            return false;
        };

        if watcher.poll().is_some() {
            log::debug!("repository changed on disk");
            self.refresh_status();
            true
        } else {
            false
        }
    }
}
