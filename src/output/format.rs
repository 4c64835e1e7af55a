use chrono::{DateTime, Utc};

use crate::model::{CommitInfo, CommitRow, DiffStat};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 365 * DAY;

/// Build the display row for one commit. `refs` are the names pointing at it,
/// in enumeration order.
pub fn format_row(
    commit: &CommitInfo,
    diff: Option<DiffStat>,
    refs: &[String],
    now: DateTime<Utc>,
) -> CommitRow {
    CommitRow {
        hash: commit.short_id(),
        relative_time: relative_time(commit.time, now),
        author: commit.author.clone(),
        diff,
        refs: refs.to_vec(),
        subject: commit.subject().to_string(),
    }
}

/// Elapsed time since `then`, e.g. "3 days ago". Timestamps in the future
/// read as "just now".
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = now.signed_duration_since(then).num_seconds();
    if secs < MINUTE {
        return "just now".to_string();
    }

    let (count, unit) = match secs {
        s if s < HOUR => (s / MINUTE, "minute"),
        s if s < DAY => (s / HOUR, "hour"),
        s if s < WEEK => (s / DAY, "day"),
        s if s < MONTH => (s / WEEK, "week"),
        s if s < YEAR => (s / MONTH, "month"),
        s => (s / YEAR, "year"),
    };

    if count == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", count, unit)
    }
}
