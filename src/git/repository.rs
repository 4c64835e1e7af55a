use chrono::{DateTime, TimeZone, Utc};
use git2::{Oid, Repository};
use std::path::{Path, PathBuf};

use crate::error::{BranchlogError, Result};
use crate::model::CommitInfo;

pub struct RepoInfo {
    pub repo: Repository,
    pub root_path: PathBuf,
    pub head_commit: Option<Oid>,
    pub branch_name: Option<String>,
}

impl RepoInfo {
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Repository::discover(path)
            .map_err(|_| BranchlogError::NotARepository(path.to_path_buf()))?;

        // Bare repositories have no work directory; git accepts the git dir instead.
        let root_path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();

        let head_commit = repo
            .head()
            .ok()
            .and_then(|h| h.peel_to_commit().ok())
            .map(|c| c.id());

        let branch_name = repo.head().ok().and_then(|h| {
            if h.is_branch() {
                h.shorthand().map(|s| s.to_string())
            } else {
                None
            }
        });

        Ok(Self {
            repo,
            root_path,
            head_commit,
            branch_name,
        })
    }
}

pub fn commit_info(repo: &Repository, oid: Oid) -> Result<CommitInfo> {
    let commit = repo.find_commit(oid)?;

    let signature = commit.author();
    let author = signature.name().unwrap_or("Unknown").to_string();
    let time = authored_at(signature.when().seconds());
    let message = String::from_utf8_lossy(commit.message_bytes()).to_string();

    Ok(CommitInfo {
        id: oid,
        author,
        time,
        message,
        parent_ids: commit.parent_ids().collect(),
        tree_id: commit.tree_id(),
    })
}

fn authored_at(seconds: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(seconds, 0)
        .single()
        .unwrap_or_else(Utc::now)
}
