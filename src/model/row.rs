use super::diff_stat::{DiffStat, StatKind};

/// One display row of the log table, before any styling is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRow {
    pub hash: String,
    pub relative_time: String,
    pub author: String,
    pub diff: Option<DiffStat>,
    pub refs: Vec<String>,
    pub subject: String,
}

impl CommitRow {
    pub fn diff_parts(&self) -> Vec<(StatKind, usize)> {
        self.diff.map(|d| d.components()).unwrap_or_default()
    }

    /// `3(~),10(+),2(-)` with zero components left out; empty without a stat.
    pub fn diff_field(&self) -> String {
        self.diff_parts()
            .into_iter()
            .map(|(kind, count)| format!("{}({})", count, kind.symbol()))
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn ref_prefix(&self) -> String {
        self.refs.iter().map(|r| format!("({})", r)).collect()
    }

    pub fn message_field(&self) -> String {
        if self.refs.is_empty() {
            self.subject.clone()
        } else {
            format!("{} {}", self.ref_prefix(), self.subject)
        }
    }
}
