use std::ops::AddAssign;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatKind {
    Files,
    Insertions,
    Deletions,
}

impl StatKind {
    pub fn symbol(self) -> char {
        match self {
            StatKind::Files => '~',
            StatKind::Insertions => '+',
            StatKind::Deletions => '-',
        }
    }
}

/// Files changed, lines inserted and lines deleted between two trees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffStat {
    pub files_changed: usize,
    pub insertions: usize,
    pub deletions: usize,
}

impl DiffStat {
    pub fn new(files_changed: usize, insertions: usize, deletions: usize) -> Self {
        Self {
            files_changed,
            insertions,
            deletions,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    /// Non-zero components in display order: files, insertions, deletions.
    pub fn components(&self) -> Vec<(StatKind, usize)> {
        [
            (StatKind::Files, self.files_changed),
            (StatKind::Insertions, self.insertions),
            (StatKind::Deletions, self.deletions),
        ]
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .collect()
    }
}

impl AddAssign for DiffStat {
    fn add_assign(&mut self, rhs: Self) {
        self.files_changed += rhs.files_changed;
        self.insertions += rhs.insertions;
        self.deletions += rhs.deletions;
    }
}
