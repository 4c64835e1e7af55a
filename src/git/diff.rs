use git2::{Diff, DiffFindOptions, DiffOptions, Oid, Patch, Repository};

use crate::error::Result;
use crate::git::exclude::{DeltaScope, PathExclusionSet};
use crate::model::{CommitInfo, DiffStat};

/// Computes the aggregate diff stat from one commit's tree to another's.
///
/// Implementations must report all zeros when every change falls under an
/// excluded path, and count a pure rename as one changed file.
pub trait DiffStatProvider {
    fn diff_stat(
        &self,
        repo: &Repository,
        from: &CommitInfo,
        to: &CommitInfo,
        exclude: &PathExclusionSet,
    ) -> Result<DiffStat>;
}

/// In-process tree-to-tree diff through libgit2.
#[derive(Debug, Default, Clone, Copy)]
pub struct TreeDiff;

impl DiffStatProvider for TreeDiff {
    fn diff_stat(
        &self,
        repo: &Repository,
        from: &CommitInfo,
        to: &CommitInfo,
        exclude: &PathExclusionSet,
    ) -> Result<DiffStat> {
        if from.tree_id == to.tree_id {
            return Ok(DiffStat::default());
        }

        let old_tree = repo.find_tree(from.tree_id)?;
        let new_tree = repo.find_tree(to.tree_id)?;

        let mut opts = DiffOptions::new();
        opts.ignore_submodules(true);
        let mut diff = repo.diff_tree_to_tree(Some(&old_tree), Some(&new_tree), Some(&mut opts))?;

        let mut find_opts = DiffFindOptions::new();
        find_opts.renames(true);
        diff.find_similar(Some(&mut find_opts))?;

        let matcher = exclude.matcher()?;
        let mut stat = DiffStat::default();

        for (delta_idx, delta) in diff.deltas().enumerate() {
            stat += match matcher.scope(&delta) {
                DeltaScope::Excluded => continue,
                DeltaScope::Included => patch_stat(&diff, delta_idx)?,
                DeltaScope::NewSideOnly => {
                    DiffStat::new(1, blob_lines(repo, delta.new_file().id())?, 0)
                }
                DeltaScope::OldSideOnly => {
                    DiffStat::new(1, 0, blob_lines(repo, delta.old_file().id())?)
                }
            };
        }

        Ok(stat)
    }
}

fn patch_stat(diff: &Diff<'_>, delta_idx: usize) -> Result<DiffStat> {
    // Binary files have a patch without hunks and contribute no lines
    match Patch::from_diff(diff, delta_idx)? {
        Some(patch) => {
            let (_, additions, deletions) = patch.line_stats()?;
            Ok(DiffStat::new(1, additions, deletions))
        }
        None => Ok(DiffStat::new(1, 0, 0)),
    }
}

/// Line count of a blob as `git diff` reports it for a whole-file change.
fn blob_lines(repo: &Repository, id: Oid) -> Result<usize> {
    let blob = repo.find_blob(id)?;
    if blob.is_binary() {
        return Ok(0);
    }
    let content = blob.content();
    let newlines = content.iter().filter(|&&b| b == b'\n').count();
    let unterminated = content.last().is_some_and(|&b| b != b'\n');
    Ok(newlines + usize::from(unterminated))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::repository::commit_info;
    use crate::git::test_repo::TestRepo;
    use git2::Oid;

    fn stat_between(test: &TestRepo, from: Oid, to: Oid, exclude: &[&str]) -> DiffStat {
        let from = commit_info(&test.repo, from).unwrap();
        let to = commit_info(&test.repo, to).unwrap();
        TreeDiff
            .diff_stat(
                &test.repo,
                &from,
                &to,
                &PathExclusionSet::new(exclude.iter().copied()),
            )
            .unwrap()
    }

    #[test]
    fn should_be_zero_against_itself() {
        // given
        let mut test = TestRepo::init("main");
        test.write("a.txt", "one\n");
        let base = test.commit("base");

        // when / then
        assert!(stat_between(&test, base, base, &[]).is_zero());
    }

    #[test]
    fn should_count_files_insertions_and_deletions() {
        // given
        let mut test = TestRepo::init("main");
        test.write("a.txt", "one\ntwo\nthree\n");
        test.write("b.txt", "keep\ndrop\n");
        let base = test.commit("base");
        test.write("a.txt", "one\n2\nthree\nfour\n");
        test.write("b.txt", "keep\n");
        test.write("c.txt", "new\nfile\n");
        let head = test.commit("head");

        // when
        let stat = stat_between(&test, base, head, &[]);

        // then
        assert_eq!(stat, DiffStat::new(3, 4, 2));
    }

    #[test]
    fn should_accumulate_against_base_not_parent() {
        // given
        let mut test = TestRepo::init("main");
        test.write("a.txt", "one\n");
        let base = test.commit("base");
        test.write("b.txt", "two\n");
        test.commit("middle");
        test.write("c.txt", "three\n");
        let head = test.commit("head");

        // when
        let stat = stat_between(&test, base, head, &[]);

        // then
        assert_eq!(stat, DiffStat::new(2, 2, 0));
    }

    #[test]
    fn should_be_zero_when_all_changes_are_excluded() {
        // given
        let mut test = TestRepo::init("main");
        test.write("src/lib.rs", "pub fn a() {}\n");
        let base = test.commit("base");
        test.write("docs/guide.md", "# Guide\n\nHello\n");
        test.write("Cargo.lock", "lock\n");
        let head = test.commit("docs");

        // when
        let unfiltered = stat_between(&test, base, head, &[]);
        let filtered = stat_between(&test, base, head, &["docs", "*.lock"]);

        // then
        assert_eq!(unfiltered, DiffStat::new(2, 4, 0));
        assert!(filtered.is_zero());
    }

    #[test]
    fn should_only_exclude_matching_files() {
        // given
        let mut test = TestRepo::init("main");
        test.write("src/lib.rs", "pub fn a() {}\n");
        let base = test.commit("base");
        test.write("docs/guide.md", "# Guide\n");
        test.write("src/lib.rs", "pub fn a() {}\npub fn b() {}\n");
        let head = test.commit("mixed");

        // when
        let stat = stat_between(&test, base, head, &["docs"]);

        // then
        assert_eq!(stat, DiffStat::new(1, 1, 0));
    }

    #[test]
    fn should_count_pure_rename_once() {
        // given
        let mut test = TestRepo::init("main");
        test.write("old.txt", "line one\nline two\nline three\nline four\n");
        let base = test.commit("base");
        test.rename("old.txt", "new.txt");
        let head = test.commit("rename");

        // when
        let stat = stat_between(&test, base, head, &[]);

        // then
        assert_eq!(stat, DiffStat::new(1, 0, 0));
    }

    #[test]
    fn should_count_rename_out_of_excluded_path_as_addition() {
        // given
        let mut test = TestRepo::init("main");
        test.write("docs/notes.txt", "1\n2\n3\n4\n5\n");
        let base = test.commit("base");
        test.rename("docs/notes.txt", "src/notes.txt");
        let head = test.commit("move out of docs");

        // when
        let stat = stat_between(&test, base, head, &["docs"]);

        // then
        assert_eq!(stat, DiffStat::new(1, 5, 0));
    }

    #[test]
    fn should_count_rename_into_excluded_path_as_deletion() {
        // given
        let mut test = TestRepo::init("main");
        test.write("src/notes.txt", "1\n2\n3\n4\nno newline");
        let base = test.commit("base");
        test.rename("src/notes.txt", "docs/notes.txt");
        let head = test.commit("move into docs");

        // when
        let stat = stat_between(&test, base, head, &["docs"]);

        // then
        assert_eq!(stat, DiffStat::new(1, 0, 5));
    }

    #[test]
    fn should_count_deleted_file_lines() {
        // given
        let mut test = TestRepo::init("main");
        test.write("a.txt", "a\n");
        test.write("gone.txt", "x\ny\nz\n");
        let base = test.commit("base");
        test.delete("gone.txt");
        let head = test.commit("delete");

        // when
        let stat = stat_between(&test, base, head, &[]);

        // then
        assert_eq!(stat, DiffStat::new(1, 0, 3));
    }
}
