use git2::{DiffDelta, Pathspec, PathspecFlags};
use std::path::Path;

use crate::error::Result;

/// Path patterns whose changes are left out of diff stats.
///
/// Patterns use git pathspec matching: a plain path also covers everything
/// below it, and wildcards match across directory separators.
#[derive(Debug, Clone, Default)]
pub struct PathExclusionSet {
    patterns: Vec<String>,
}

impl PathExclusionSet {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns
                .into_iter()
                .map(Into::into)
                .filter(|p: &String| !p.is_empty())
                .collect(),
        }
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Negated pathspecs for the `git` command line.
    pub fn to_pathspec_args(&self) -> Vec<String> {
        self.patterns
            .iter()
            .map(|p| format!(":(exclude){}", p))
            .collect()
    }

    pub fn matcher(&self) -> Result<ExclusionMatcher> {
        let pathspec = if self.is_empty() {
            None
        } else {
            Some(Pathspec::new(self.patterns.iter().map(String::as_str))?)
        };
        Ok(ExclusionMatcher { pathspec })
    }
}

pub struct ExclusionMatcher {
    pathspec: Option<Pathspec>,
}

impl ExclusionMatcher {
    pub fn matches_path(&self, path: &Path) -> bool {
        self.pathspec
            .as_ref()
            .is_some_and(|spec| spec.matches_path(path, PathspecFlags::DEFAULT))
    }

    /// Which sides of a delta survive exclusion. `git diff` filters paths
    /// before rename detection, so a rename with one excluded side is seen as
    /// a plain addition or deletion of the other side.
    pub fn scope(&self, delta: &DiffDelta<'_>) -> DeltaScope {
        let old_excluded = delta.old_file().path().is_none_or(|p| self.matches_path(p));
        let new_excluded = delta.new_file().path().is_none_or(|p| self.matches_path(p));

        match (old_excluded, new_excluded) {
            (true, true) => DeltaScope::Excluded,
            (false, false) => DeltaScope::Included,
            (true, false) => DeltaScope::NewSideOnly,
            (false, true) => DeltaScope::OldSideOnly,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaScope {
    Excluded,
    Included,
    /// Only the new path is kept: counts as an added file.
    NewSideOnly,
    /// Only the old path is kept: counts as a deleted file.
    OldSideOnly,
}
