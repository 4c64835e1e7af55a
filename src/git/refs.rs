use git2::{Oid, ReferenceType, Repository};
use log::{debug, warn};
use std::collections::HashMap;

use crate::error::{BranchlogError, Result};
use crate::git::repository::commit_info;
use crate::model::CommitInfo;

/// Searched in order when no explicit base is given.
pub const DEFAULT_BASE_REFS: [&str; 2] = ["refs/heads/main", "refs/heads/master"];

/// Resolve the base commit. An empty `revision` searches [`DEFAULT_BASE_REFS`];
/// anything else goes through full revision syntax.
pub fn resolve_base(repo: &Repository, revision: &str) -> Result<CommitInfo> {
    if revision.is_empty() {
        for name in DEFAULT_BASE_REFS {
            let Ok(reference) = repo.find_reference(name) else {
                continue;
            };
            if let Ok(commit) = reference.peel_to_commit() {
                debug!("using {} as base", name);
                return commit_info(repo, commit.id());
            }
        }
        return Err(BranchlogError::BaseNotFound);
    }

    let commit = repo
        .revparse_single(revision)
        .and_then(|object| object.peel_to_commit())
        .map_err(|_| BranchlogError::InvalidRevision(revision.to_string()))?;
    commit_info(repo, commit.id())
}

/// Short reference names keyed by the commit they point at.
#[derive(Debug, Default)]
pub struct RefNames {
    by_commit: HashMap<Oid, Vec<String>>,
}

impl RefNames {
    pub fn get(&self, id: &Oid) -> &[String] {
        self.by_commit.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn insert(&mut self, id: Oid, name: impl Into<String>) {
        self.by_commit.entry(id).or_default().push(name.into());
    }

    pub fn len(&self) -> usize {
        self.by_commit.values().map(Vec::len).sum()
    }
}

/// Map every direct reference to the commit it peels to, in enumeration order.
/// References that fail to peel are skipped with a warning.
pub fn load_ref_names(repo: &Repository) -> Result<RefNames> {
    let mut names = RefNames::default();

    for reference in repo.references()? {
        let reference = match reference {
            Ok(reference) => reference,
            Err(e) => {
                warn!("skipping unreadable reference: {}", e);
                continue;
            }
        };

        if reference.kind() == Some(ReferenceType::Symbolic) {
            continue;
        }

        let Some(name) = reference.shorthand().map(str::to_string) else {
            warn!("skipping reference with a non UTF-8 name");
            continue;
        };

        match reference.peel_to_commit() {
            Ok(commit) => names.insert(commit.id(), name),
            Err(e) => warn!("skipping reference {}: {}", name, e.message()),
        }
    }

    debug!("loaded {} reference names", names.len());
    Ok(names)
}
