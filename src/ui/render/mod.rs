//! UI rendering with ratatui.
//!
//! Layout: repository sidebar on the left, the staged and unstaged lists
//! with their expanded diffs on the right, one-line bars above and below.

mod bars;
mod files;
mod helpers;
mod overlays;
mod sidebar;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Block,
    Frame,
};

use super::app::{App, Mode};

pub use helpers::{clip_columns, truncate_path, truncate_str, GUTTER_WIDTH, SIDEBAR_WIDTH};

/// Main render function.
pub fn render(frame: &mut Frame, app: &mut App) {
    let _timer = crate::metrics::FrameTimer::start("render_frame");

    // Fill background
    let bg_block = Block::default().style(Style::default().bg(app.theme.bg_dark));
    frame.render_widget(bg_block, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Top bar
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Bottom bar
        ])
        .split(frame.area());

    bars::render_top_bar(frame, app, chunks[0]);
    render_main(frame, app, chunks[1]);
    bars::render_bottom_bar(frame, app, chunks[2]);

    // Overlays
    match app.ui.mode {
        Mode::SelectTheme => overlays::render_theme_selector(frame, app),
        Mode::Help => overlays::render_help_overlay(frame, app),
        Mode::Normal => {}
    }
}

fn render_main(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(SIDEBAR_WIDTH), // Repositories
            Constraint::Min(0),                // Document
        ])
        .split(area);

    app.sync_layout(chunks[1], chunks[0]);
    sidebar::render_sidebar(frame, app, chunks[0]);
    files::render_document(frame, app, chunks[1]);
}
