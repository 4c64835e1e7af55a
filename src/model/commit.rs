use chrono::{DateTime, Utc};
use git2::Oid;

pub const SHORT_ID_LEN: usize = 7;

/// A commit as read from the object database. Never mutated after loading.
#[derive(Debug, Clone)]
pub struct CommitInfo {
    pub id: Oid,
    pub author: String,
    pub time: DateTime<Utc>,
    pub message: String,
    pub parent_ids: Vec<Oid>,
    pub tree_id: Oid,
}

impl CommitInfo {
    pub fn short_id(&self) -> String {
        let id = self.id.to_string();
        id[..SHORT_ID_LEN.min(id.len())].to_string()
    }

    /// First non-blank line of the message, trimmed of surrounding whitespace.
    /// Leading blank lines are skipped rather than yielding an empty subject.
    pub fn subject(&self) -> &str {
        self.message
            .trim_start()
            .lines()
            .next()
            .unwrap_or("")
            .trim()
    }
}
