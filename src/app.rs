use chrono::{DateTime, Utc};
use log::{debug, warn};

use crate::config::{Config, DiffEngine};
use crate::error::Result;
use crate::git::{
    CommitLog, DiffStatProvider, ExternalDiff, PathExclusionSet, RefNames, RepoInfo,
    TraversalState, TreeDiff, load_ref_names, probe_ancestry, resolve_base,
};
use crate::model::{CommitInfo, CommitRow, DiffStat};
use crate::output::format_row;

pub struct App {
    pub repo_info: RepoInfo,
    pub config: Config,
    pub base: CommitInfo,
    pub ref_names: RefNames,
    pub exclusions: PathExclusionSet,
    base_is_ancestor: bool,
    diff_provider: Box<dyn DiffStatProvider>,
}

impl App {
    /// Open the repository and resolve everything the walk depends on. Any
    /// failure here is fatal.
    pub fn new(config: Config) -> Result<Self> {
        let repo_info = RepoInfo::open(&config.repo_path)?;
        debug!(
            "opened {} at {:?} on branch {:?}",
            repo_info.root_path.display(),
            repo_info.head_commit,
            repo_info.branch_name
        );

        let base = resolve_base(&repo_info.repo, &config.base)?;
        debug!("base commit {} ({})", base.short_id(), base.subject());

        let ref_names = load_ref_names(&repo_info.repo)?;
        let base_is_ancestor = probe_ancestry(&repo_info.repo, base.id);

        let diff_provider: Box<dyn DiffStatProvider> = match config.diff_engine {
            DiffEngine::Tree => Box::new(TreeDiff),
            DiffEngine::External => Box::new(ExternalDiff::new(
                repo_info.root_path.clone(),
                config.diff_timeout,
            )),
        };
        let exclusions = PathExclusionSet::new(config.exclude.iter().cloned());
        debug!("excluding {:?} from diff stats", exclusions.patterns());

        Ok(Self {
            repo_info,
            config,
            base,
            ref_names,
            exclusions,
            base_is_ancestor,
            diff_provider,
        })
    }

    pub fn rows(&self) -> Result<Vec<CommitRow>> {
        self.rows_at(Utc::now())
    }

    /// Walk from HEAD and build one row per commit, newest first. Commits
    /// above the base carry a diff stat against it; everything from the base
    /// down does not.
    pub fn rows_at(&self, now: DateTime<Utc>) -> Result<Vec<CommitRow>> {
        let repo = &self.repo_info.repo;
        let mut state = TraversalState::new(self.base.id, self.base_is_ancestor);
        let mut rows = Vec::new();

        let log = CommitLog::from_head(repo, self.config.num_commits, self.config.first_parent)?;

        for commit in log {
            let commit = commit?;
            debug!(
                "visiting {} with {} parent(s)",
                commit.short_id(),
                commit.parent_ids.len()
            );
            let diff = if state.visit(commit.id) {
                self.diff_against_base(&commit)
            } else {
                None
            };
            rows.push(format_row(
                &commit,
                diff,
                self.ref_names.get(&commit.id),
                now,
            ));
        }

        debug!("walk finished, still ahead of base: {}", state.still_ahead());
        Ok(rows)
    }

    fn diff_against_base(&self, commit: &CommitInfo) -> Option<DiffStat> {
        match self.diff_provider.diff_stat(
            &self.repo_info.repo,
            &self.base,
            commit,
            &self.exclusions,
        ) {
            Ok(stat) => {
                if stat.is_zero() {
                    debug!("{} has no changes outside excluded paths", commit.short_id());
                }
                Some(stat)
            }
            Err(e) => {
                warn!("no diff stat for {}: {}", commit.short_id(), e);
                None
            }
        }
    }
}
