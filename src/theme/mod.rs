//! Color palettes for the TUI.
//!
//! Two palettes are built in (see [`crate::core::THEMES`]). A JSON file at
//! `<config dir>/<theme file>` overrides individual colors of the matching
//! palette, using the same `{defs, theme}` layout as before:
//!
//! ```json
//! { "defs": { "teal": "#50c8c8" }, "theme": { "accent": "teal" } }
//! ```

use std::collections::HashMap;
use std::path::Path;

use ratatui::style::Color;
use serde::Deserialize;

use crate::core::{config_dir, ThemeRef};

/// Colors assigned to repositories in discovery order.
pub const SIDEBAR_COLORS: [Color; 6] = [
    Color::Rgb(80, 200, 200),
    Color::Rgb(198, 120, 221),
    Color::Rgb(229, 192, 123),
    Color::Rgb(97, 175, 239),
    Color::Rgb(152, 195, 121),
    Color::Rgb(224, 108, 117),
];

/// A complete palette.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub struct Theme {
    // Base colors
    pub bg_dark: Color,
    pub bg_surface: Color,
    pub bg_elevated: Color,
    pub bg_selected: Color,

    // Borders
    pub border_dim: Color,
    pub border_active: Color,
    pub gutter_sep: Color,
    pub pane_divider: Color,

    // Text
    pub text_muted: Color,
    pub text_dim: Color,
    pub text_normal: Color,
    pub text_bright: Color,

    pub accent: Color,

    // Diff backgrounds
    pub diff_delete_bg: Color,
    pub diff_insert_bg: Color,
    pub diff_empty_bg: Color,

    // Status
    pub success: Color,
    pub error: Color,
    pub warning: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

/// Theme override file format.
#[derive(Debug, Default, Deserialize)]
#[allow(missing_docs)]
pub struct ThemeJson {
    #[serde(default)]
    pub defs: HashMap<String, String>,
    #[serde(default)]
    pub theme: HashMap<String, String>,
}

impl Theme {
    /// Palette for a persisted theme selection, with user overrides applied.
    pub fn for_ref(theme: &ThemeRef) -> Self {
        let base = Self::builtin(&theme.label);
        let path = config_dir().join(&theme.file);
        match load_overrides(&path) {
            Some(json) => base.with_overrides(&json),
            None => base,
        }
    }

    /// Built-in palette by label. Unknown labels get the dark palette.
    pub fn builtin(label: &str) -> Self {
        if label.eq_ignore_ascii_case("light") {
            Self::light()
        } else {
            Self::dark()
        }
    }

    /// Default dark palette.
    pub fn dark() -> Self {
        Self {
            bg_dark: Color::Rgb(18, 18, 22),
            bg_surface: Color::Rgb(26, 26, 32),
            bg_elevated: Color::Rgb(36, 36, 44),
            bg_selected: Color::Rgb(45, 45, 55),

            border_dim: Color::Rgb(50, 50, 60),
            border_active: Color::Rgb(80, 200, 200),
            gutter_sep: Color::Rgb(38, 38, 46),
            pane_divider: Color::Rgb(55, 55, 65),

            text_muted: Color::Rgb(80, 80, 92),
            text_dim: Color::Rgb(110, 110, 125),
            text_normal: Color::Rgb(175, 175, 185),
            text_bright: Color::Rgb(230, 230, 235),

            accent: Color::Rgb(80, 200, 200),

            diff_delete_bg: Color::Rgb(45, 25, 30),
            diff_insert_bg: Color::Rgb(25, 45, 32),
            diff_empty_bg: Color::Rgb(22, 22, 26),

            success: Color::Rgb(85, 185, 105),
            error: Color::Rgb(215, 85, 85),
            warning: Color::Rgb(215, 175, 80),
        }
    }

    /// Light palette.
    pub fn light() -> Self {
        Self {
            bg_dark: Color::Rgb(250, 250, 250),
            bg_surface: Color::Rgb(243, 243, 245),
            bg_elevated: Color::Rgb(232, 232, 236),
            bg_selected: Color::Rgb(218, 222, 232),

            border_dim: Color::Rgb(210, 210, 216),
            border_active: Color::Rgb(3, 102, 214),
            gutter_sep: Color::Rgb(225, 225, 230),
            pane_divider: Color::Rgb(200, 200, 208),

            text_muted: Color::Rgb(150, 150, 160),
            text_dim: Color::Rgb(106, 115, 125),
            text_normal: Color::Rgb(36, 41, 46),
            text_bright: Color::Rgb(0, 0, 0),

            accent: Color::Rgb(3, 102, 214),

            diff_delete_bg: Color::Rgb(255, 235, 233),
            diff_insert_bg: Color::Rgb(230, 255, 236),
            diff_empty_bg: Color::Rgb(246, 248, 250),

            success: Color::Rgb(34, 134, 58),
            error: Color::Rgb(203, 36, 49),
            warning: Color::Rgb(176, 136, 0),
        }
    }

    /// Apply a parsed override file. Unknown keys and bad colors are ignored.
    pub fn with_overrides(mut self, json: &ThemeJson) -> Self {
        for (key, value) in &json.theme {
            let Some(slot) = self.slot_mut(key) else {
                log::debug!("unknown theme key {}", key);
                continue;
            };
            *slot = resolve_color(value, &json.defs, *slot);
        }
        self
    }

    fn slot_mut(&mut self, key: &str) -> Option<&mut Color> {
        let slot = match key {
            "bgDark" => &mut self.bg_dark,
            "bgSurface" => &mut self.bg_surface,
            "bgElevated" => &mut self.bg_elevated,
            "bgSelected" => &mut self.bg_selected,
            "borderDim" => &mut self.border_dim,
            "borderActive" => &mut self.border_active,
            "gutterSep" => &mut self.gutter_sep,
            "paneDivider" => &mut self.pane_divider,
            "textMuted" => &mut self.text_muted,
            "textDim" => &mut self.text_dim,
            "textNormal" => &mut self.text_normal,
            "textBright" => &mut self.text_bright,
            "accent" => &mut self.accent,
            "diffDeleteBg" => &mut self.diff_delete_bg,
            "diffInsertBg" => &mut self.diff_insert_bg,
            "diffEmptyBg" => &mut self.diff_empty_bg,
            "success" => &mut self.success,
            "error" => &mut self.error,
            "warning" => &mut self.warning,
            _ => return None,
        };
        Some(slot)
    }
}

/// Sidebar color for a repository color index.
pub fn sidebar_color(index: usize) -> Color {
    SIDEBAR_COLORS[index % SIDEBAR_COLORS.len()]
}

fn load_overrides(path: &Path) -> Option<ThemeJson> {
    let content = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&content) {
        Ok(json) => Some(json),
        Err(e) => {
            log::warn!("ignoring theme file {}: {}", path.display(), e);
            None
        }
    }
}

/// Parse a hex color string to Color.
fn parse_hex(s: &str) -> Option<Color> {
    let s = s.trim_start_matches('#');
    if s.len() != 6 {
        return None;
    }

    let r = u8::from_str_radix(s.get(0..2)?, 16).ok()?;
    let g = u8::from_str_radix(s.get(2..4)?, 16).ok()?;
    let b = u8::from_str_radix(s.get(4..6)?, 16).ok()?;

    Some(Color::Rgb(r, g, b))
}

/// Resolve a color value (hex or reference).
fn resolve_color(value: &str, defs: &HashMap<String, String>, fallback: Color) -> Color {
    if value.starts_with('#') {
        parse_hex(value).unwrap_or(fallback)
    } else if let Some(def) = defs.get(value) {
        parse_hex(def).unwrap_or(fallback)
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parsing() {
        assert_eq!(parse_hex("#50c8c8"), Some(Color::Rgb(80, 200, 200)));
        assert_eq!(parse_hex("ffffff"), Some(Color::Rgb(255, 255, 255)));
        assert_eq!(parse_hex("#fff"), None);
        assert_eq!(parse_hex("#gggggg"), None);
    }

    #[test]
    fn overrides_resolve_defs_and_keep_the_rest() {
        let json: ThemeJson = serde_json::from_str(
            r##"{
                "defs": { "teal": "#112233" },
                "theme": { "accent": "teal", "error": "#ff0000", "bogus": "#000000", "success": "nope" }
            }"##,
        )
        .unwrap();
        let theme = Theme::dark().with_overrides(&json);
        assert_eq!(theme.accent, Color::Rgb(0x11, 0x22, 0x33));
        assert_eq!(theme.error, Color::Rgb(255, 0, 0));
        assert_eq!(theme.success, Theme::dark().success);
        assert_eq!(theme.bg_dark, Theme::dark().bg_dark);
    }

    #[test]
    fn builtin_by_label() {
        assert_eq!(Theme::builtin("Light"), Theme::light());
        assert_eq!(Theme::builtin("Dark"), Theme::dark());
        assert_eq!(Theme::builtin("whatever"), Theme::dark());
    }

    #[test]
    fn sidebar_colors_wrap() {
        assert_eq!(sidebar_color(0), sidebar_color(SIDEBAR_COLORS.len()));
    }
}
