//! Command line configuration.
//!
//! Every flag exists in a short and a long form. They are declared as separate
//! arguments so that the long form can take precedence when both are given,
//! which clap's own override handling does not express.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

pub const DEFAULT_NUM_COMMITS: i64 = 30;
pub const DEFAULT_DIFF_TIMEOUT_SECS: u64 = 10;

/// Strategy used to compute the diff stat of a commit against the base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DiffEngine {
    /// Diff the two trees in-process with libgit2.
    Tree,
    /// Run `git diff --shortstat` and parse its summary line.
    External,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

#[derive(Parser, Debug)]
#[command(
    name = "branchlog",
    version,
    about = "A condensed, colorized commit log annotated with diff stats against your base branch"
)]
pub struct Cli {
    #[arg(long = "repo-path", value_name = "PATH", help = "Repository location to open")]
    repo_path: Option<PathBuf>,
    #[arg(short = 'r', value_name = "PATH", help = "Short form of --repo-path")]
    repo_path_short: Option<PathBuf>,

    #[arg(
        long = "base",
        value_name = "REV",
        help = "The commit against which to compare (defaults to main, then master)"
    )]
    base: Option<String>,
    #[arg(short = 'b', value_name = "REV", help = "Short form of --base")]
    base_short: Option<String>,

    #[arg(
        long = "num-commits",
        value_name = "N",
        allow_negative_numbers = true,
        help = "The number of commits to display. Note that a large number will degrade performance"
    )]
    num_commits: Option<i64>,
    #[arg(
        short = 'n',
        value_name = "N",
        allow_negative_numbers = true,
        help = "Short form of --num-commits"
    )]
    num_commits_short: Option<i64>,

    #[arg(
        long = "exclude",
        value_name = "PATTERN",
        help = "Path pattern excluded from diff stats (repeatable)"
    )]
    exclude: Vec<String>,
    #[arg(short = 'e', value_name = "PATTERN", help = "Short form of --exclude")]
    exclude_short: Vec<String>,

    #[arg(long, value_enum, default_value_t = DiffEngine::Tree, help = "How diff stats are computed")]
    diff_engine: DiffEngine,

    #[arg(long, help = "Follow only the first parent of merge commits")]
    first_parent: bool,

    #[arg(
        long,
        value_name = "SECONDS",
        default_value_t = DEFAULT_DIFF_TIMEOUT_SECS,
        help = "Maximum run time of one external diff invocation"
    )]
    diff_timeout: u64,

    #[arg(long, value_enum, default_value_t = ColorChoice::Auto, help = "When to colorize output")]
    color: ColorChoice,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub repo_path: PathBuf,
    /// Empty means "search for the default branch".
    pub base: String,
    pub num_commits: i64,
    pub exclude: Vec<String>,
    pub diff_engine: DiffEngine,
    pub first_parent: bool,
    pub diff_timeout: Duration,
    pub color: ColorChoice,
}

impl Cli {
    pub fn into_config(self) -> Config {
        // Prefer the long version if both are provided
        let repo_path = self
            .repo_path
            .or(self.repo_path_short)
            .unwrap_or_else(|| PathBuf::from("."));
        let base = self.base.or(self.base_short).unwrap_or_default();
        let num_commits = self
            .num_commits
            .or(self.num_commits_short)
            .unwrap_or(DEFAULT_NUM_COMMITS);

        let mut exclude = self.exclude;
        exclude.extend(self.exclude_short);

        Config {
            repo_path,
            base,
            num_commits,
            exclude,
            diff_engine: self.diff_engine,
            first_parent: self.first_parent,
            diff_timeout: Duration::from_secs(self.diff_timeout),
            color: self.color,
        }
    }
}

impl Config {
    pub fn from_args() -> Self {
        Cli::parse().into_config()
    }
}
