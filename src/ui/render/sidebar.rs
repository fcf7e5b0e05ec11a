//! Repository list rendering.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::theme::sidebar_color;
use crate::ui::app::{App, Focus};

use super::helpers::truncate_path;

/// Render the repository sidebar.
pub fn render_sidebar(frame: &mut Frame, app: &mut App, area: Rect) {
    let is_focused = app.focus == Focus::Sidebar;

    let border_color = if is_focused {
        app.theme.accent
    } else {
        app.theme.border_dim
    };
    let title_style = if is_focused {
        Style::default().fg(app.theme.accent)
    } else {
        Style::default().fg(app.theme.text_muted)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(Span::styled(
            format!(" Repositories ({}) ", app.repos.len()),
            title_style,
        ))
        .style(Style::default().bg(app.theme.bg_surface));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let height = inner.height as usize;
    if height == 0 {
        return;
    }

    if app.repos.is_empty() {
        let para = Paragraph::new("Discovering…").style(
            Style::default()
                .fg(app.theme.text_muted)
                .bg(app.theme.bg_surface),
        );
        frame.render_widget(para, inner);
        return;
    }

    // Keep selection visible
    let selected = app.sidebar.selected_idx;
    let max_scroll = app.repos.len().saturating_sub(height);
    app.sidebar.scroll = app.sidebar.scroll.min(max_scroll);
    if selected < app.sidebar.scroll {
        app.sidebar.scroll = selected;
    } else if selected >= app.sidebar.scroll + height {
        app.sidebar.scroll = selected + 1 - height;
    }

    let active_path = app.diffs.repository().map(|p| p.to_path_buf());
    let name_width = (inner.width as usize).saturating_sub(3);

    let mut lines: Vec<Line> = Vec::with_capacity(height);
    for (idx, repo) in app
        .repos
        .iter()
        .enumerate()
        .skip(app.sidebar.scroll)
        .take(height)
    {
        let is_selected = idx == selected;
        let is_active = active_path.as_deref() == Some(repo.path.as_path());

        let row_bg = if is_selected {
            app.theme.bg_selected
        } else {
            app.theme.bg_surface
        };
        let select_indicator = if is_selected { "▌" } else { " " };
        let dot = if repo.loaded { "●" } else { "○" };

        let mut name_style = Style::default().bg(row_bg).fg(if is_active {
            app.theme.text_bright
        } else {
            app.theme.text_normal
        });
        if is_active {
            name_style = name_style.add_modifier(Modifier::BOLD);
        }

        lines.push(Line::from(vec![
            Span::styled(
                select_indicator,
                Style::default().fg(app.theme.accent).bg(row_bg),
            ),
            Span::styled(
                dot,
                Style::default().fg(sidebar_color(repo.color)).bg(row_bg),
            ),
            Span::styled(" ", Style::default().bg(row_bg)),
            Span::styled(truncate_path(&repo.name(), name_width), name_style),
        ]));
    }

    let para = Paragraph::new(lines).style(Style::default().bg(app.theme.bg_surface));
    frame.render_widget(para, inner);
}
