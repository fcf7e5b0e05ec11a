//! Top and bottom bar rendering.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::core::ChangeFacet;
use crate::theme::sidebar_color;
use crate::ui::app::{App, Focus, Mode};

use super::helpers::truncate_str;

/// Render the top bar showing the active repository and change counts.
pub fn render_top_bar(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.bg_elevated;
    let mut spans = vec![Span::styled("  ", Style::default().bg(bg))];

    match app.active_repository() {
        Some(repo) => {
            spans.push(Span::styled(
                "● ",
                Style::default().fg(sidebar_color(repo.color)).bg(bg),
            ));
            spans.push(Span::styled(
                repo.name(),
                Style::default()
                    .fg(app.theme.text_bright)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(
                format!("  {}", repo.path.display()),
                Style::default().fg(app.theme.text_muted).bg(bg),
            ));
        }
        None => spans.push(Span::styled(
            "No repository",
            Style::default().fg(app.theme.text_muted).bg(bg),
        )),
    }

    let counts = ChangeFacet::ALL
        .iter()
        .map(|facet| {
            let n = app.diffs.list(*facet).map_or(0, |l| l.len());
            format!("{} {}", n, facet.heading().to_lowercase())
        })
        .collect::<Vec<_>>()
        .join("  ");
    let right_text = format!("{}  ", counts);
    let right_len = right_text.chars().count();

    let left_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding_len = (area.width as usize)
        .saturating_sub(left_len)
        .saturating_sub(right_len);
    spans.push(Span::styled(" ".repeat(padding_len), Style::default().bg(bg)));
    spans.push(Span::styled(
        right_text,
        Style::default().fg(app.theme.accent).bg(bg),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the bottom bar: error, then status, then key hints.
pub fn render_bottom_bar(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.bg_elevated;

    if app.ui.mode == Mode::SelectTheme {
        let line = Line::from(vec![
            Span::styled(" Theme ", Style::default().fg(app.theme.accent).bg(bg)),
            Span::styled(
                " j/k: move  Enter: apply  Esc: cancel",
                Style::default().fg(app.theme.text_muted).bg(bg),
            ),
        ]);
        frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
        return;
    }

    let message_width = (area.width as usize).saturating_sub(4);

    if let Some(ref err) = app.ui.error {
        let line = Line::from(vec![
            Span::styled(" ✗ ", Style::default().fg(app.theme.error).bg(bg)),
            Span::styled(
                truncate_str(err, message_width),
                Style::default().fg(app.theme.error).bg(bg),
            ),
        ]);
        frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
        return;
    }

    if let Some(ref msg) = app.ui.status {
        let line = Line::from(vec![
            Span::styled(" ✓ ", Style::default().fg(app.theme.success).bg(bg)),
            Span::styled(
                truncate_str(msg, message_width),
                Style::default().fg(app.theme.success).bg(bg),
            ),
        ]);
        frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
        return;
    }

    let hints: &[(&str, &str)] = match app.focus {
        Focus::Sidebar => &[("j/k", "navigate"), ("↵", "open"), ("⇥", "switch")],
        Focus::Files => &[
            ("j/k", "select"),
            ("↵", "expand"),
            ("s/u", "stage/unstage"),
            ("J/K", "scroll"),
            ("h/l", "pan"),
            ("⇥", "switch"),
        ],
    };

    let surface = app.theme.bg_surface;
    let mut spans = vec![Span::styled(" ", Style::default().bg(surface))];
    let all_hints = hints.iter().chain(&[("?", "help"), ("q", "quit")]);
    for (i, (key, desc)) in all_hints.enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", Style::default().bg(surface)));
        }
        spans.push(Span::styled(
            *key,
            Style::default().fg(app.theme.accent).bg(surface),
        ));
        spans.push(Span::styled(
            format!(" {}", desc),
            Style::default().fg(app.theme.text_dim).bg(surface),
        ));
    }

    let para = Paragraph::new(Line::from(spans)).style(Style::default().bg(surface));
    frame.render_widget(para, area);
}
