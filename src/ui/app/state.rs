use ratatui::layout::Rect;

use crate::core::{ChangeFacet, ThemeItem};

/// Focus state for the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Repository list.
    Sidebar,
    /// Staged and unstaged file lists.
    #[default]
    Files,
}

/// UI mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Normal navigation mode.
    #[default]
    Normal,
    /// Selecting a theme.
    SelectTheme,
    /// Viewing help overlay.
    Help,
}

/// UI mode and message state.
#[derive(Debug, Default)]
pub struct UiState {
    /// Current mode.
    pub mode: Mode,
    /// Error message.
    pub error: Option<String>,
    /// Status message.
    pub status: Option<String>,
    /// Dirty flag for redraw.
    pub dirty: bool,
}

/// Repository list navigation.
#[derive(Debug, Default)]
pub struct SidebarState {
    /// Highlighted repository index.
    pub selected_idx: usize,
    /// First visible repository.
    pub scroll: usize,
}

/// Theme selector overlay state.
#[derive(Debug, Default)]
pub struct ThemeSelectorState {
    /// Entries shown in the selector.
    pub items: Vec<ThemeItem>,
    /// Highlighted entry.
    pub selected_idx: usize,
}

/// One row of the laid-out document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocRow {
    /// List heading.
    Heading(ChangeFacet),
    /// File entry header.
    File(ChangeFacet, usize),
    /// Row `row` of the expanded diff for an entry.
    DiffLine(ChangeFacet, usize, usize),
    /// Placeholder for an expanded diff with no rows (binary or unchanged).
    DiffNotice(ChangeFacet, usize),
    /// Placeholder for an empty list.
    Empty(ChangeFacet),
    /// Spacer between lists.
    Blank,
}

/// Last computed document layout, in terminal cells.
#[derive(Debug, Default)]
pub struct DocumentLayout {
    /// Screen area of the document.
    pub area: Rect,
    /// Screen area of the repository sidebar.
    pub sidebar_area: Rect,
    /// Every document row, top to bottom.
    pub rows: Vec<DocRow>,
    /// Set when entries or content change; cleared by the next layout.
    pub stale: bool,
}

impl DocumentLayout {
    /// Document row of an entry's header.
    pub fn file_row(&self, facet: ChangeFacet, idx: usize) -> Option<usize> {
        self.rows
            .iter()
            .position(|r| *r == DocRow::File(facet, idx))
    }
}
