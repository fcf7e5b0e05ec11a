//! Shared rendering helpers and constants.

use ratatui::style::Color;

use crate::core::{expand_tabs, FileChangeKind};
use crate::theme::Theme;

/// Width of the repository sidebar.
pub const SIDEBAR_WIDTH: u16 = 28;

/// Gutter: 4 (line num) + 1 (separator) = 5 columns.
pub const GUTTER_WIDTH: u16 = 5;

/// Sanitize control characters.
pub fn sanitize_char(c: char) -> char {
    match c {
        '\x00'..='\x1f' | '\x7f' => '\u{FFFD}',
        _ => c,
    }
}

/// The `width` columns of `line` starting at column `offset`, padded with spaces.
pub fn clip_columns(line: &str, offset: usize, width: usize) -> String {
    let expanded = expand_tabs(line);
    let mut out: String = expanded
        .chars()
        .skip(offset)
        .take(width)
        .map(sanitize_char)
        .collect();
    let len = out.chars().count();
    out.extend(std::iter::repeat(' ').take(width - len));
    out
}

/// Right-aligned 1-based line number for the gutter.
pub fn gutter(line_num: Option<usize>) -> String {
    let digits = usize::from(GUTTER_WIDTH - 1);
    match line_num {
        Some(n) => format!("{:>digits$} ", n + 1),
        None => " ".repeat(usize::from(GUTTER_WIDTH)),
    }
}

/// Truncate with a trailing ellipsis.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        s.to_string()
    } else if max_len == 0 {
        String::new()
    } else {
        let truncated: String = s.chars().take(max_len - 1).collect();
        format!("{}…", truncated)
    }
}

/// Truncate a path from the left with an ellipsis prefix.
pub fn truncate_path(path: &str, max_len: usize) -> String {
    let char_count = path.chars().count();
    if char_count > max_len && max_len > 0 {
        let skip = char_count - max_len + 1;
        let truncated: String = path.chars().skip(skip).collect();
        format!("…{}", truncated)
    } else {
        path.to_string()
    }
}

/// Badge color for a change kind.
pub fn kind_color(kind: FileChangeKind, theme: &Theme) -> Color {
    match kind {
        FileChangeKind::Added => theme.success,
        FileChangeKind::Modified | FileChangeKind::TypeChange => theme.warning,
        FileChangeKind::Deleted | FileChangeKind::Conflicted => theme.error,
        FileChangeKind::Renamed => theme.accent,
        FileChangeKind::Untracked => theme.text_muted,
    }
}
