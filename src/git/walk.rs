use git2::{Repository, Revwalk, Sort};

use crate::error::{BranchlogError, Result};
use crate::git::repository::commit_info;
use crate::model::CommitInfo;

/// Newest-first walk from HEAD that yields at most `limit` commits.
///
/// Running out of history before the limit is a normal end of iteration.
pub struct CommitLog<'repo> {
    repo: &'repo Repository,
    revwalk: Revwalk<'repo>,
    remaining: usize,
}

impl<'repo> CommitLog<'repo> {
    /// A non-positive `limit` yields nothing.
    pub fn from_head(repo: &'repo Repository, limit: i64, first_parent: bool) -> Result<Self> {
        let mut revwalk = repo.revwalk()?;
        // Sorting resets the walker, so it has to come before pushing HEAD
        revwalk.set_sorting(Sort::TIME)?;
        if first_parent {
            revwalk.simplify_first_parent()?;
        }
        revwalk
            .push_head()
            .map_err(|e| BranchlogError::HeadUnreadable(e.message().to_string()))?;

        Ok(Self {
            repo,
            revwalk,
            remaining: usize::try_from(limit).unwrap_or(0),
        })
    }
}

impl Iterator for CommitLog<'_> {
    type Item = Result<CommitInfo>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let oid = match self.revwalk.next() {
            Some(Ok(oid)) => oid,
            Some(Err(e)) => return Some(Err(e.into())),
            None => {
                self.remaining = 0;
                return None;
            }
        };

        self.remaining -= 1;
        Some(commit_info(self.repo, oid))
    }
}
