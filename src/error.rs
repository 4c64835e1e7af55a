use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BranchlogError {
    #[error("not a git repository: {}", .0.display())]
    NotARepository(PathBuf),

    #[error("unable to find base branch among \"main\" or \"master\"")]
    BaseNotFound,

    #[error("the provided base {0} is invalid")]
    InvalidRevision(String),

    #[error("unable to read HEAD: {0}")]
    HeadUnreadable(String),

    #[error("diff command failed: {0}")]
    DiffCommand(String),

    #[error("unrecognized diff summary: {0}")]
    DiffSummary(String),

    #[error("git error: {0}")]
    Git(#[from] git2::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BranchlogError>;
