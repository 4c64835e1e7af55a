//! Borderless, left-aligned table of commit rows.

use crossterm::style::ContentStyle;
use std::io::{self, Write};
use unicode_width::UnicodeWidthStr;

use super::styles;
use crate::model::CommitRow;

const COLUMNS: usize = 5;
const SEPARATOR: &str = "  ";

struct Segment {
    text: String,
    style: Option<ContentStyle>,
}

#[derive(Default)]
struct Cell {
    segments: Vec<Segment>,
}

impl Cell {
    fn styled(text: impl Into<String>, style: ContentStyle) -> Self {
        let mut cell = Self::default();
        cell.push(text, Some(style));
        cell
    }

    fn push(&mut self, text: impl Into<String>, style: Option<ContentStyle>) {
        self.segments.push(Segment {
            text: text.into(),
            style,
        });
    }

    fn width(&self) -> usize {
        self.segments.iter().map(|s| s.text.width()).sum()
    }

    fn write_to<W: Write>(&self, out: &mut W, styled: bool) -> io::Result<()> {
        for segment in &self.segments {
            match segment.style {
                Some(style) if styled => write!(out, "{}", style.apply(&segment.text))?,
                _ => write!(out, "{}", segment.text)?,
            }
        }
        Ok(())
    }
}

fn row_cells(row: &CommitRow) -> [Cell; COLUMNS] {
    let mut diff = Cell::default();
    for (idx, (kind, count)) in row.diff_parts().into_iter().enumerate() {
        if idx > 0 {
            diff.push(",", None);
        }
        diff.push(
            format!("{}({})", count, kind.symbol()),
            Some(styles::stat_style(kind)),
        );
    }

    let mut message = Cell::default();
    for name in &row.refs {
        message.push(format!("({})", name), Some(styles::ref_name_style()));
    }
    if !row.refs.is_empty() {
        message.push(" ", None);
    }
    message.push(row.subject.as_str(), None);

    [
        Cell::styled(row.hash.as_str(), styles::hash_style()),
        Cell::styled(row.relative_time.as_str(), styles::relative_time_style()),
        Cell::styled(row.author.as_str(), styles::author_style()),
        diff,
        message,
    ]
}

/// Write one line per row, padding every column but the last to its widest
/// cell. Every column keeps its separator, even when all its cells are empty.
pub fn render_table<W: Write>(out: &mut W, rows: &[CommitRow], styled: bool) -> io::Result<()> {
    let cells: Vec<[Cell; COLUMNS]> = rows.iter().map(row_cells).collect();

    let mut widths = [0usize; COLUMNS];
    for row in &cells {
        for (col, cell) in row.iter().enumerate() {
            widths[col] = widths[col].max(cell.width());
        }
    }
    for row in &cells {
        for (col, cell) in row.iter().enumerate() {
            if col > 0 {
                write!(out, "{}", SEPARATOR)?;
            }
            cell.write_to(out, styled)?;
            if col + 1 < COLUMNS {
                write!(out, "{:pad$}", "", pad = widths[col] - cell.width())?;
            }
        }
        writeln!(out)?;
    }

    out.flush()
}
