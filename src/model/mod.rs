pub mod commit;
pub mod diff_stat;
pub mod row;

pub use commit::CommitInfo;
pub use diff_stat::{DiffStat, StatKind};
pub use row::CommitRow;
