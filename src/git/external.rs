//! Diff stats from the `git` binary's `--shortstat` summary.

use git2::Repository;
use log::debug;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::LazyLock;
use std::thread;
use std::time::{Duration, Instant};

use crate::error::{BranchlogError, Result};
use crate::git::diff::DiffStatProvider;
use crate::git::exclude::PathExclusionSet;
use crate::model::{CommitInfo, DiffStat};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

static SHORTSTAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:(\d+) files? changed)?(?:,?\s*(\d+) insertions?\(\+\))?(?:,?\s*(\d+) deletions?\(-\))?",
    )
    .expect("shortstat pattern is valid")
});

/// Runs `git diff --shortstat` in the repository root for every commit.
#[derive(Debug, Clone)]
pub struct ExternalDiff {
    root: PathBuf,
    timeout: Duration,
}

impl ExternalDiff {
    pub fn new(root: PathBuf, timeout: Duration) -> Self {
        Self { root, timeout }
    }
}

impl DiffStatProvider for ExternalDiff {
    fn diff_stat(
        &self,
        _repo: &Repository,
        from: &CommitInfo,
        to: &CommitInfo,
        exclude: &PathExclusionSet,
    ) -> Result<DiffStat> {
        let from_id = from.id.to_string();
        let to_id = to.id.to_string();
        let excluded = exclude.to_pathspec_args();

        let mut args = vec![
            "diff",
            "--shortstat",
            "-M",
            "--no-ext-diff",
            "--no-color",
            from_id.as_str(),
            to_id.as_str(),
            "--",
            ".",
        ];
        args.extend(excluded.iter().map(String::as_str));

        debug!("running git {}", args.join(" "));
        let output = run_git_command(&self.root, &args, self.timeout)?;
        parse_shortstat(&output)
    }
}

/// Parse a `--shortstat` summary such as
/// ` 3 files changed, 10 insertions(+), 2 deletions(-)`.
///
/// Missing groups count as zero and empty output means no changes at all.
pub fn parse_shortstat(output: &str) -> Result<DiffStat> {
    let line = output.trim();
    if line.is_empty() {
        return Ok(DiffStat::default());
    }

    let captures = SHORTSTAT
        .captures(line)
        .filter(|c| c.iter().skip(1).any(|group| group.is_some()))
        .ok_or_else(|| BranchlogError::DiffSummary(line.to_string()))?;

    let count = |idx: usize| -> Result<usize> {
        match captures.get(idx) {
            Some(m) => m
                .as_str()
                .parse()
                .map_err(|_| BranchlogError::DiffSummary(line.to_string())),
            None => Ok(0),
        }
    };

    Ok(DiffStat::new(count(1)?, count(2)?, count(3)?))
}

/// Run a git command and return its stdout, killing it once `timeout` elapses.
fn run_git_command(root: &Path, args: &[&str], timeout: Duration) -> Result<String> {
    let mut child = Command::new("git")
        .current_dir(root)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| BranchlogError::DiffCommand(format!("Failed to run git: {}", e)))?;

    let deadline = Instant::now() + timeout;
    while child.try_wait()?.is_none() {
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            return Err(BranchlogError::DiffCommand(format!(
                "git {} timed out after {:?}",
                args.join(" "),
                timeout
            )));
        }
        thread::sleep(POLL_INTERVAL);
    }

    let output = child.wait_with_output()?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(BranchlogError::DiffCommand(format!(
            "git {} failed: {}",
            args.join(" "),
            stderr.trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}
