use crossterm::style::{Attribute, Color, ContentStyle};

use crate::model::StatKind;

// Column colors
pub const HASH: Color = Color::Yellow;
pub const RELATIVE_TIME: Color = Color::Green;
pub const AUTHOR: Color = Color::Blue;
pub const REF_NAME: Color = Color::Red;

// Diff stat colors
pub const STAT_FILES: Color = Color::Yellow;
pub const STAT_INSERTIONS: Color = Color::Green;
pub const STAT_DELETIONS: Color = Color::Red;

fn fg(color: Color) -> ContentStyle {
    ContentStyle {
        foreground_color: Some(color),
        ..ContentStyle::default()
    }
}

pub fn hash_style() -> ContentStyle {
    fg(HASH)
}

pub fn relative_time_style() -> ContentStyle {
    fg(RELATIVE_TIME)
}

pub fn author_style() -> ContentStyle {
    ContentStyle {
        attributes: Attribute::Bold.into(),
        ..fg(AUTHOR)
    }
}

pub fn ref_name_style() -> ContentStyle {
    fg(REF_NAME)
}

pub fn stat_style(kind: StatKind) -> ContentStyle {
    let color = match kind {
        StatKind::Files => STAT_FILES,
        StatKind::Insertions => STAT_INSERTIONS,
        StatKind::Deletions => STAT_DELETIONS,
    };
    fg(color)
}
