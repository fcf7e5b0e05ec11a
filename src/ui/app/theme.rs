use super::{App, Mode};
use crate::core::{find_theme, list_themes, ThemeRef};
use crate::theme::Theme;

impl App {
    /// Open the theme selector overlay.
    pub fn open_theme_selector(&mut self) {
        self.theme_selector.items = list_themes(&self.theme_ref);
        self.theme_selector.selected_idx = self
            .theme_selector
            .items
            .iter()
            .position(|t| t.selected)
            .unwrap_or(0);
        self.ui.mode = Mode::SelectTheme;
        self.ui.dirty = true;
    }

    /// Close the theme selector without applying changes.
    pub fn close_theme_selector(&mut self) {
        self.theme = Theme::for_ref(&self.theme_ref);
        self.ui.mode = Mode::Normal;
        self.ui.dirty = true;
    }

    /// Move selection to the previous theme preview.
    pub fn theme_select_prev(&mut self) {
        if self.theme_selector.selected_idx > 0 {
            self.theme_selector.selected_idx -= 1;
            self.preview_selected_theme();
        }
    }

    /// Move selection to the next theme preview.
    pub fn theme_select_next(&mut self) {
        if self.theme_selector.selected_idx + 1 < self.theme_selector.items.len() {
            self.theme_selector.selected_idx += 1;
            self.preview_selected_theme();
        }
    }

    fn preview_selected_theme(&mut self) {
        if let Some(spec) = self
            .theme_selector
            .items
            .get(self.theme_selector.selected_idx)
            .and_then(|item| find_theme(item.label))
        {
            self.theme = Theme::for_ref(&ThemeRef::from(spec));
        }
        self.ui.dirty = true;
    }

    /// Apply the currently highlighted theme.
    pub fn theme_apply(&mut self) {
        if let Some(item) = self
            .theme_selector
            .items
            .get(self.theme_selector.selected_idx)
        {
            let label = item.label;
            self.select_theme(label);
        }
        self.ui.mode = Mode::Normal;
        self.ui.dirty = true;
    }

    /// Switch to a theme by label and persist the choice.
    ///
    /// Returns false for an unknown label.
    pub fn select_theme(&mut self, label: &str) -> bool {
        let Some(spec) = find_theme(label) else {
            return false;
        };
        self.theme_ref = ThemeRef::from(spec);
        self.theme = Theme::for_ref(&self.theme_ref);
        self.store.set_theme(self.theme_ref.clone());
        if let Err(e) = self.store.save() {
            log::warn!("failed to save theme: {}", e);
            self.ui.error = Some(format!("Failed to save theme: {}", e));
        }
        log::info!("theme set to {}", spec.label);
        self.ui.dirty = true;
        true
    }
}
