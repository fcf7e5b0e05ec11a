//! Input handling.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Position, Rect};

use super::app::{App, DocRow, Focus, Mode, WHEEL_COLUMNS, WHEEL_LINES};
use crate::scroll::WheelEvent;

/// Handle a crossterm event.
/// Returns true if the event was handled.
pub fn handle_input(app: &mut App, event: Event) -> bool {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(app, key),
        Event::Mouse(mouse) => handle_mouse(app, mouse),
        _ => false,
    }
}

/// Handle a key event.
fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    match app.ui.mode {
        Mode::Help => return handle_help_key(app, key),
        Mode::SelectTheme => return handle_theme_key(app, key),
        Mode::Normal => {}
    }

    // Any key press clears transient messages.
    if app.ui.status.take().is_some() {
        app.mark_dirty();
    }

    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            return true;
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
            return true;
        }
        KeyCode::Char('?') => {
            app.open_help();
            return true;
        }
        KeyCode::Char('T') => {
            app.open_theme_selector();
            return true;
        }
        KeyCode::Char('r') => {
            app.manual_reload();
            return true;
        }
        KeyCode::Tab => {
            app.toggle_focus();
            return true;
        }
        KeyCode::Char('1') => {
            app.set_focus(Focus::Sidebar);
            return true;
        }
        KeyCode::Char('2') => {
            app.set_focus(Focus::Files);
            return true;
        }
        _ => {}
    }

    match app.focus {
        Focus::Sidebar => handle_sidebar_key(app, key),
        Focus::Files => handle_files_key(app, key),
    }
}

fn handle_sidebar_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            app.select_next_repository();
            true
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.select_prev_repository();
            true
        }
        KeyCode::Enter => {
            app.activate_selected_repository();
            app.set_focus(Focus::Files);
            true
        }
        _ => false,
    }
}

fn handle_files_key(app: &mut App, key: KeyEvent) -> bool {
    let page = app.engine.document.client_height().max(1.0);
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            app.select_next();
            true
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.select_prev();
            true
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            app.toggle_selected();
            true
        }
        KeyCode::Char('s') => {
            app.stage_selected();
            true
        }
        KeyCode::Char('u') => {
            app.unstage_selected();
            true
        }
        KeyCode::Char('J') => {
            app.scroll_document(WHEEL_LINES);
            true
        }
        KeyCode::Char('K') => {
            app.scroll_document(-WHEEL_LINES);
            true
        }
        KeyCode::PageDown => {
            app.scroll_document(page);
            true
        }
        KeyCode::PageUp => {
            app.scroll_document(-page);
            true
        }
        KeyCode::Char('l') | KeyCode::Right => {
            app.scroll_selected_horizontally(WHEEL_COLUMNS);
            true
        }
        KeyCode::Char('h') | KeyCode::Left => {
            app.scroll_selected_horizontally(-WHEEL_COLUMNS);
            true
        }
        _ => false,
    }
}

fn handle_help_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => {
            app.close_help();
            true
        }
        _ => false,
    }
}

fn handle_theme_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            app.theme_select_next();
            true
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.theme_select_prev();
            true
        }
        KeyCode::Enter => {
            app.theme_apply();
            true
        }
        KeyCode::Esc | KeyCode::Char('q') => {
            app.close_theme_selector();
            true
        }
        _ => false,
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    area.contains(Position::new(column, row))
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) -> bool {
    if app.ui.mode != Mode::Normal {
        return false;
    }
    let (column, row) = (mouse.column, mouse.row);

    if contains(app.layout.sidebar_area, column, row) {
        return handle_sidebar_mouse(app, mouse);
    }
    if !contains(app.layout.area, column, row) {
        return false;
    }

    let (x, y) = (f64::from(column), f64::from(row));
    let shift = mouse.modifiers.contains(KeyModifiers::SHIFT);
    let event = match mouse.kind {
        MouseEventKind::ScrollDown if shift => WheelEvent::new(WHEEL_COLUMNS, 0.0, x, y),
        MouseEventKind::ScrollUp if shift => WheelEvent::new(-WHEEL_COLUMNS, 0.0, x, y),
        MouseEventKind::ScrollDown => WheelEvent::new(0.0, WHEEL_LINES, x, y),
        MouseEventKind::ScrollUp => WheelEvent::new(0.0, -WHEEL_LINES, x, y),
        MouseEventKind::ScrollRight => WheelEvent::new(WHEEL_COLUMNS, 0.0, x, y),
        MouseEventKind::ScrollLeft => WheelEvent::new(-WHEEL_COLUMNS, 0.0, x, y),
        MouseEventKind::Down(MouseButton::Left) => {
            app.set_focus(Focus::Files);
            click_document_row(app, row);
            return true;
        }
        _ => return false,
    };
    app.on_wheel(event);
    true
}

fn handle_sidebar_mouse(app: &mut App, mouse: MouseEvent) -> bool {
    match mouse.kind {
        MouseEventKind::ScrollDown => app.select_next_repository(),
        MouseEventKind::ScrollUp => app.select_prev_repository(),
        MouseEventKind::Down(MouseButton::Left) => {
            app.set_focus(Focus::Sidebar);
            // Border row, then one row per repository.
            let offset = mouse.row.saturating_sub(app.layout.sidebar_area.y + 1) as usize;
            let idx = app.sidebar.scroll + offset;
            if idx < app.repos.len() {
                app.activate_repository(idx);
            }
        }
        _ => return false,
    }
    true
}

/// Clicking a file header selects it; clicking it again toggles it.
fn click_document_row(app: &mut App, row: u16) {
    let doc_row = app.engine.document.scroll_top() as usize
        + usize::from(row.saturating_sub(app.layout.area.y));
    let Some(DocRow::File(facet, idx)) = app.layout.rows.get(doc_row).copied() else {
        return;
    };
    if app.selected_entry() == Some((facet, idx)) {
        app.toggle_selected();
    } else {
        app.select_entry(facet, idx);
    }
}
