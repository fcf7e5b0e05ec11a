//! Static theme catalogue and the picker's view of it.

use serde::{Deserialize, Serialize};

/// A named palette resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeSpec {
    /// Name shown in the picker.
    pub label: &'static str,
    /// Palette resource, relative to the themes directory.
    pub file: &'static str,
}

/// Built-in themes. The first entry is the default.
pub const THEMES: &[ThemeSpec] = &[
    ThemeSpec {
        label: "Dark",
        file: "themes/dark.json",
    },
    ThemeSpec {
        label: "Light",
        file: "themes/light.json",
    },
];

/// Persisted reference to the selected theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeRef {
    /// Name shown in the picker.
    pub label: String,
    /// Palette resource.
    pub file: String,
}

impl From<&ThemeSpec> for ThemeRef {
    fn from(spec: &ThemeSpec) -> Self {
        Self {
            label: spec.label.to_string(),
            file: spec.file.to_string(),
        }
    }
}

impl Default for ThemeRef {
    fn default() -> Self {
        Self::from(&THEMES[0])
    }
}

/// A picker row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeItem {
    /// Theme label.
    pub label: &'static str,
    /// Whether this is the current theme.
    pub selected: bool,
}

/// List themes, marking the one whose file matches `current`.
pub fn list_themes(current: &ThemeRef) -> Vec<ThemeItem> {
    THEMES
        .iter()
        .map(|t| ThemeItem {
            label: t.label,
            selected: t.file == current.file,
        })
        .collect()
}

/// Look up a built-in theme by label (case-insensitive).
pub fn find_theme(label: &str) -> Option<&'static ThemeSpec> {
    THEMES.iter().find(|t| t.label.eq_ignore_ascii_case(label))
}
