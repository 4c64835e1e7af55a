use git2::{ErrorCode, Oid, Repository};
use log::{debug, warn};

use crate::error::{BranchlogError, Result};

/// Whether `base` is reachable from HEAD, i.e. it is one of the merge bases
/// of HEAD and itself. Disjoint histories are simply `false`.
pub fn is_ancestor_of_head(repo: &Repository, base: Oid) -> Result<bool> {
    let head = repo
        .head()
        .and_then(|h| h.peel_to_commit())
        .map_err(|e| BranchlogError::HeadUnreadable(e.message().to_string()))?
        .id();

    match repo.merge_bases(head, base) {
        Ok(bases) => Ok(bases.iter().any(|id| *id == base)),
        Err(e) if e.code() == ErrorCode::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Run the ancestry check once, degrading to "not ahead" when it fails.
pub fn probe_ancestry(repo: &Repository, base: Oid) -> bool {
    match is_ancestor_of_head(repo, base) {
        Ok(is_ancestor) => {
            debug!("base {} reachable from HEAD: {}", base, is_ancestor);
            is_ancestor
        }
        Err(e) => {
            warn!("unable to determine ancestry of base {}: {}", base, e);
            false
        }
    }
}

/// Tracks whether the walk is still above the base commit.
///
/// Seeded from [`probe_ancestry`]; flips to `false` for good the first time the
/// walk visits the base itself, so every commit at or below the base is left
/// without a diff even if the upfront probe was wrong.
#[derive(Debug, Clone, Copy)]
pub struct TraversalState {
    base: Oid,
    still_ahead: bool,
}

impl TraversalState {
    pub fn new(base: Oid, base_is_ancestor: bool) -> Self {
        Self {
            base,
            still_ahead: base_is_ancestor,
        }
    }

    /// Record a visited commit and report whether it is ahead of the base.
    pub fn visit(&mut self, id: Oid) -> bool {
        if id == self.base {
            self.still_ahead = false;
        }
        self.still_ahead
    }

    pub fn still_ahead(&self) -> bool {
        self.still_ahead
    }
}
