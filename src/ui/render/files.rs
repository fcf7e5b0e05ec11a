//! Staged/unstaged lists with expanded side-by-side diffs.
//!
//! Painting also rebuilds [`crate::scroll::Scene`], which the next frame's
//! horizontal gestures hit-test against.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::core::{ChangeFacet, ChangeKind, DiffRow, LineRef};
use crate::scroll::{is_visible, DiffView, ElementRole, ListEntry, Rect as SceneRect, Side};
use crate::theme::Theme;
use crate::ui::app::{App, DocRow, Focus};

use super::helpers::{clip_columns, gutter, kind_color, truncate_path, GUTTER_WIDTH};

/// Column split of the document area.
struct Columns {
    left: u16,
    right: u16,
}

impl Columns {
    fn new(width: u16) -> Self {
        let left = width.saturating_sub(1) / 2;
        Self {
            left,
            right: width.saturating_sub(left + 1),
        }
    }

    /// Text columns per pane. Both panes get the width of the narrower
    /// one, matching the client width the layout gives them.
    fn text(&self) -> usize {
        usize::from(self.left.min(self.right).saturating_sub(GUTTER_WIDTH))
    }
}

/// Render the document and rebuild the scene.
pub fn render_document(frame: &mut Frame, app: &mut App, area: Rect) {
    app.scene.clear();
    if area.width == 0 || area.height == 0 {
        return;
    }

    let scroll_top = app.engine.document.scroll_top();
    let first_row = scroll_top as usize;
    let height = area.height as usize;
    let columns = Columns::new(area.width);
    let selected = app.selected_entry().filter(|_| app.focus == Focus::Files);

    let mut lines: Vec<Line> = Vec::with_capacity(height);
    for row in app.layout.rows.iter().skip(first_row).take(height) {
        lines.push(render_row(app, *row, selected, &columns, area.width));
    }
    while lines.len() < height {
        lines.push(Line::from(""));
    }
    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(app.theme.bg_dark)),
        area,
    );

    // One root per visible diff with its panes as children, then pinned
    // headers on top.
    let viewport_height = f64::from(area.height);
    let mut pinned = Vec::new();
    for facet in ChangeFacet::ALL {
        let Some(list) = app.diffs.list(facet) else {
            continue;
        };
        for (idx, entry) in list.entries().iter().enumerate() {
            let Some(diff) = entry.active_diff() else {
                continue;
            };
            if !is_visible(diff.extent, scroll_top, viewport_height) {
                continue;
            }

            let top = diff.extent.top.max(scroll_top) - scroll_top;
            let bottom = diff.extent.bottom().min(scroll_top + viewport_height) - scroll_top;
            if bottom <= top {
                continue;
            }
            let x = f64::from(area.x);
            let y = f64::from(area.y) + top;
            let h = bottom - top;

            app.scene.insert(
                diff.root,
                None,
                SceneRect::new(x, y, f64::from(area.width), h),
                ElementRole::DiffRoot,
            );
            app.scene.push(
                Some(diff.root),
                SceneRect::new(x, y, f64::from(columns.left), h),
                ElementRole::Pane(Side::Left),
            );
            app.scene.push(
                Some(diff.root),
                SceneRect::new(
                    x + f64::from(columns.left) + 1.0,
                    y,
                    f64::from(columns.right),
                    h,
                ),
                ElementRole::Pane(Side::Right),
            );

            if app.sticky.is_pinned(diff) {
                pinned.push((facet, idx));
            }
        }
    }

    for (facet, idx) in pinned {
        let Some(entry) = app.entry(facet, idx) else {
            continue;
        };
        let line = file_header(
            &app.theme,
            facet,
            entry,
            selected == Some((facet, idx)),
            area.width,
        );
        let header_area = Rect::new(area.x, area.y, area.width, 1);
        frame.render_widget(Paragraph::new(line), header_area);
        app.scene.push(
            None,
            SceneRect::new(f64::from(area.x), f64::from(area.y), f64::from(area.width), 1.0),
            ElementRole::Other,
        );
    }
}

fn render_row(
    app: &App,
    row: DocRow,
    selected: Option<(ChangeFacet, usize)>,
    columns: &Columns,
    width: u16,
) -> Line<'static> {
    let theme = &app.theme;
    match row {
        DocRow::Heading(facet) => {
            let count = app.diffs.list(facet).map_or(0, |l| l.len());
            let text = format!(" {} ({})", facet.heading(), count);
            let pad = usize::from(width).saturating_sub(text.chars().count());
            Line::from(vec![
                Span::styled(
                    text,
                    Style::default()
                        .fg(theme.accent)
                        .bg(theme.bg_elevated)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" ".repeat(pad), Style::default().bg(theme.bg_elevated)),
            ])
        }
        DocRow::Empty(facet) => {
            let text = if app.diffs.repository().is_none() {
                "   No repository selected".to_string()
            } else {
                format!("   No {} changes", facet.heading().to_lowercase())
            };
            Line::from(Span::styled(text, Style::default().fg(theme.text_muted)))
        }
        DocRow::Blank => Line::from(""),
        DocRow::File(facet, idx) => match app.entry(facet, idx) {
            Some(entry) => file_header(theme, facet, entry, selected == Some((facet, idx)), width),
            None => Line::from(""),
        },
        DocRow::DiffNotice(facet, idx) => {
            let binary = app
                .entry(facet, idx)
                .and_then(ListEntry::active_diff)
                .is_some_and(|d| d.content.is_binary);
            let text = if binary {
                "     Binary file"
            } else {
                "     No content changes"
            };
            Line::from(Span::styled(
                text,
                Style::default().fg(theme.text_dim).bg(theme.diff_empty_bg),
            ))
        }
        DocRow::DiffLine(facet, idx, r) => {
            let Some(diff) = app.entry(facet, idx).and_then(ListEntry::active_diff) else {
                return Line::from("");
            };
            match diff.content.rows.get(r) {
                Some(diff_row) => diff_line(theme, diff, diff_row, columns),
                None => Line::from(""),
            }
        }
    }
}

fn file_header(
    theme: &Theme,
    facet: ChangeFacet,
    entry: &ListEntry,
    is_selected: bool,
    width: u16,
) -> Line<'static> {
    let row_bg = if is_selected {
        theme.bg_selected
    } else {
        theme.bg_surface
    };
    let indicator = if is_selected { "▌" } else { " " };
    let marker = if entry.active { "▾ " } else { "▸ " };
    let (badge, badge_color) = match entry.file.kind(facet) {
        Some(kind) => (kind.badge(), kind_color(kind, theme)),
        None => (" ", theme.text_muted),
    };
    let text_color = if is_selected {
        theme.text_bright
    } else {
        theme.text_normal
    };

    let path_width = usize::from(width).saturating_sub(6);
    let path = truncate_path(entry.file.path.as_str(), path_width);
    let pad = path_width.saturating_sub(path.chars().count());

    Line::from(vec![
        Span::styled(indicator, Style::default().fg(theme.accent).bg(row_bg)),
        Span::styled(marker, Style::default().fg(theme.text_dim).bg(row_bg)),
        Span::styled(
            badge,
            Style::default()
                .fg(badge_color)
                .bg(row_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ", Style::default().bg(row_bg)),
        Span::styled(path, Style::default().fg(text_color).bg(row_bg)),
        Span::styled(" ".repeat(pad + 1), Style::default().bg(row_bg)),
    ])
}

fn side_background(theme: &Theme, kind: ChangeKind, side: Side, line: Option<&LineRef>) -> Color {
    if line.is_none() {
        return theme.diff_empty_bg;
    }
    match (kind, side) {
        (ChangeKind::Delete | ChangeKind::Replace, Side::Left) => theme.diff_delete_bg,
        (ChangeKind::Insert | ChangeKind::Replace, Side::Right) => theme.diff_insert_bg,
        _ => theme.bg_dark,
    }
}

fn diff_line(theme: &Theme, diff: &DiffView, row: &DiffRow, columns: &Columns) -> Line<'static> {
    let mut spans = Vec::with_capacity(5);

    let text_width = columns.text();
    for (side, line, pane) in [
        (Side::Left, row.old.as_ref(), &diff.left),
        (Side::Right, row.new.as_ref(), &diff.right),
    ] {
        if side == Side::Right {
            spans.push(Span::styled(
                "│",
                Style::default().fg(theme.pane_divider).bg(theme.bg_dark),
            ));
        }
        let bg = side_background(theme, row.kind, side, line);
        spans.push(Span::styled(
            gutter(line.map(|l| l.line_num)),
            Style::default().fg(theme.text_muted).bg(bg),
        ));
        let content = line.map_or("", |l| l.content.as_str());
        spans.push(Span::styled(
            clip_columns(content, pane.scroll_left() as usize, text_width),
            Style::default().fg(theme.text_normal).bg(bg),
        ));
    }

    Line::from(spans)
}
