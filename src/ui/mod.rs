//! Terminal UI using ratatui.

mod app;
mod input;
pub mod render;

pub use app::{
    App, AppOptions, DocRow, DocumentLayout, Focus, Mode, SidebarState, StickyHeaders,
    ThemeSelectorState, UiState, WHEEL_COLUMNS, WHEEL_LINES,
};
pub use input::handle_input;
pub use render::render;
