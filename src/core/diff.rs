//! Side-by-side row alignment for a pair of file contents.

use std::borrow::Cow;

use similar::{ChangeTag, TextDiff};

/// Display columns a tab advances to.
pub const TAB_WIDTH: usize = 4;

/// One side of a diff row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRef {
    /// Line number in its file (0-indexed).
    pub line_num: usize,
    /// Line content without the trailing newline.
    pub content: String,
}

/// Kind of change for a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// Both sides are equal.
    Equal,
    /// Only the old side is present.
    Delete,
    /// Only the new side is present.
    Insert,
    /// Both sides present but different.
    Replace,
}

/// A row of the side-by-side view: 0..1 old line and 0..1 new line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffRow {
    /// Line from the old file.
    pub old: Option<LineRef>,
    /// Line from the new file.
    pub new: Option<LineRef>,
    /// The kind of change.
    pub kind: ChangeKind,
}

/// Aligned rows for the twin panes of one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SideBySide {
    /// Aligned rows.
    pub rows: Vec<DiffRow>,
    /// Widest old line, in display columns.
    pub old_width: usize,
    /// Widest new line, in display columns.
    pub new_width: usize,
    /// Either side looked binary; `rows` is empty.
    pub is_binary: bool,
}

impl SideBySide {
    /// Align two file contents into rows.
    pub fn compute(old: &[u8], new: &[u8]) -> Self {
        if looks_binary(old) || looks_binary(new) {
            return Self {
                is_binary: true,
                ..Self::default()
            };
        }

        let old_text = String::from_utf8_lossy(old);
        let new_text = String::from_utf8_lossy(new);
        let old_lines = split_lines(&old_text);
        let new_lines = split_lines(&new_text);

        let diff = TextDiff::from_slices(&old_lines, &new_lines);
        let mut rows = Vec::new();
        let mut deletes: Vec<LineRef> = Vec::new();
        let mut inserts: Vec<LineRef> = Vec::new();

        for change in diff.iter_all_changes() {
            match change.tag() {
                ChangeTag::Equal => {
                    flush_run(&mut rows, &mut deletes, &mut inserts);
                    let content = change.value().to_string();
                    rows.push(DiffRow {
                        old: change.old_index().map(|line_num| LineRef {
                            line_num,
                            content: content.clone(),
                        }),
                        new: change.new_index().map(|line_num| LineRef { line_num, content }),
                        kind: ChangeKind::Equal,
                    });
                }
                ChangeTag::Delete => deletes.push(LineRef {
                    line_num: change.old_index().unwrap_or(0),
                    content: change.value().to_string(),
                }),
                ChangeTag::Insert => inserts.push(LineRef {
                    line_num: change.new_index().unwrap_or(0),
                    content: change.value().to_string(),
                }),
            }
        }
        flush_run(&mut rows, &mut deletes, &mut inserts);

        let old_width = widest(rows.iter().filter_map(|r| r.old.as_ref()));
        let new_width = widest(rows.iter().filter_map(|r| r.new.as_ref()));

        Self {
            rows,
            old_width,
            new_width,
            is_binary: false,
        }
    }

    /// Whether any row differs.
    pub fn has_changes(&self) -> bool {
        self.rows.iter().any(|r| r.kind != ChangeKind::Equal)
    }
}

/// Pair a run of deletes with the inserts that followed it.
fn flush_run(rows: &mut Vec<DiffRow>, deletes: &mut Vec<LineRef>, inserts: &mut Vec<LineRef>) {
    let len = deletes.len().max(inserts.len());
    let mut olds = deletes.drain(..);
    let mut news = inserts.drain(..);

    for _ in 0..len {
        let old = olds.next();
        let new = news.next();
        let kind = match (&old, &new) {
            (Some(_), Some(_)) => ChangeKind::Replace,
            (Some(_), None) => ChangeKind::Delete,
            _ => ChangeKind::Insert,
        };
        rows.push(DiffRow { old, new, kind });
    }
}

fn split_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .collect()
}

fn looks_binary(bytes: &[u8]) -> bool {
    bytes.iter().take(8000).any(|&b| b == 0)
}

fn widest<'a>(lines: impl Iterator<Item = &'a LineRef>) -> usize {
    lines.map(|l| display_width(&l.content)).max().unwrap_or(0)
}

/// Display width of a line with tabs expanded to [`TAB_WIDTH`] stops.
pub fn display_width(line: &str) -> usize {
    expand_tabs(line).chars().count()
}

/// Expand tabs to spaces so columns line up with scroll offsets.
pub fn expand_tabs(line: &str) -> Cow<'_, str> {
    if !line.contains('\t') {
        return Cow::Borrowed(line);
    }

    let mut out = String::with_capacity(line.len() + TAB_WIDTH);
    let mut col = 0;
    for c in line.chars() {
        if c == '\t' {
            let pad = TAB_WIDTH - col % TAB_WIDTH;
            out.extend(std::iter::repeat(' ').take(pad));
            col += pad;
        } else {
            out.push(c);
            col += 1;
        }
    }
    Cow::Owned(out)
}
