pub mod format;
pub mod styles;
pub mod table;

pub use format::format_row;
pub use table::render_table;
