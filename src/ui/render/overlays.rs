//! Modal overlay rendering (theme selector, help).

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::theme::Theme;
use crate::ui::app::App;

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let x = (area.width.saturating_sub(width)) / 2;
    let y = (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

fn overlay_block<'a>(theme: &Theme, title: &'a str) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent))
        .title(Span::styled(
            title,
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(theme.bg_elevated))
}

fn pad_lines(lines: &mut Vec<Line>, height: u16, theme: &Theme) {
    while lines.len() < height as usize {
        lines.push(Line::from(Span::styled(
            "",
            Style::default().bg(theme.bg_elevated),
        )));
    }
}

/// Render the theme selector overlay.
pub fn render_theme_selector(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let items = &app.theme_selector.items;

    let width = 32.min(area.width.saturating_sub(4));
    let height = (items.len() as u16 + 2).min(area.height.saturating_sub(4));
    let overlay_area = centered(area, width, height);

    frame.render_widget(Clear, overlay_area);
    let block = overlay_block(&app.theme, " Theme ");
    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    let visible_height = inner.height as usize;
    if visible_height == 0 {
        return;
    }

    let selected = app.theme_selector.selected_idx;
    let scroll = selected.saturating_sub(visible_height.saturating_sub(1));

    let mut lines: Vec<Line> = Vec::new();
    for (i, item) in items.iter().enumerate().skip(scroll).take(visible_height) {
        let is_highlighted = i == selected;
        let row_bg = if is_highlighted {
            app.theme.bg_selected
        } else {
            app.theme.bg_elevated
        };
        let text_color = if is_highlighted {
            app.theme.text_bright
        } else {
            app.theme.text_normal
        };
        let indicator = if is_highlighted { "▌" } else { " " };
        let current = if item.selected { " ✓" } else { "" };

        lines.push(Line::from(vec![
            Span::styled(indicator, Style::default().fg(app.theme.accent).bg(row_bg)),
            Span::styled(
                format!(" {}", item.label),
                Style::default().fg(text_color).bg(row_bg),
            ),
            Span::styled(current, Style::default().fg(app.theme.success).bg(row_bg)),
        ]));
    }

    pad_lines(&mut lines, inner.height, &app.theme);
    let para = Paragraph::new(lines).style(Style::default().bg(app.theme.bg_elevated));
    frame.render_widget(para, inner);
}

/// Render the help overlay.
pub fn render_help_overlay(frame: &mut Frame, app: &App) {
    let entries = [
        ("Tab, 1, 2", "Switch focus between repositories/changes"),
        ("j/k or ↑/↓", "Move selection"),
        ("Enter", "Open repository / expand or collapse file"),
        ("Space", "Expand or collapse file"),
        ("s / u", "Stage / unstage selected file"),
        ("J / K", "Scroll the document"),
        ("PgDn / PgUp", "Scroll the document by a page"),
        ("h/l or ←/→", "Scroll the selected diff horizontally"),
        ("r", "Reload status"),
        ("T", "Theme selector"),
        ("?", "Close this help overlay"),
        ("q or Ctrl+C", "Quit stagediff"),
    ];

    let area = frame.area();
    let width = 64.min(area.width.saturating_sub(2).max(1));
    let needed_height = (entries.len() as u16 + 7).max(10);
    let height = needed_height.min(area.height.saturating_sub(2).max(1));
    let overlay_area = centered(area, width, height);

    frame.render_widget(Clear, overlay_area);
    let block = overlay_block(&app.theme, " Help ");
    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    if inner.height == 0 {
        return;
    }

    let theme = &app.theme;
    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            "Keybindings",
            Style::default()
                .fg(theme.accent)
                .bg(theme.bg_elevated)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Press ? again, Esc, or q to close.",
            Style::default().fg(theme.text_muted).bg(theme.bg_elevated),
        )),
        Line::from(Span::styled("", Style::default().bg(theme.bg_elevated))),
    ];

    for (key, desc) in entries {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<16}", key),
                Style::default().fg(theme.accent).bg(theme.bg_elevated),
            ),
            Span::styled(
                desc,
                Style::default().fg(theme.text_normal).bg(theme.bg_elevated),
            ),
        ]));
    }

    for (key, desc) in [
        ("Wheel", "Scroll every visible diff together"),
        ("Shift+Wheel", "Scroll the diff under the cursor sideways"),
    ] {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<16}", key),
                Style::default().fg(theme.accent).bg(theme.bg_elevated),
            ),
            Span::styled(
                desc,
                Style::default().fg(theme.text_normal).bg(theme.bg_elevated),
            ),
        ]));
    }

    pad_lines(&mut lines, inner.height, theme);
    let para = Paragraph::new(lines).style(Style::default().bg(theme.bg_elevated));
    frame.render_widget(para, inner);
}
