//! Throwaway repositories for tests, built through libgit2 so no `git`
//! binary or user configuration is needed.

use git2::{IndexAddOption, Oid, Repository, RepositoryInitOptions, Signature, Time};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub const AUTHOR: &str = "Ada Lovelace";
const EMAIL: &str = "ada@example.com";
const EPOCH: i64 = 1_700_000_000;

pub struct TestRepo {
    pub dir: TempDir,
    pub repo: Repository,
    clock: i64,
}

impl TestRepo {
    /// Create an empty repository whose unborn HEAD points at `refs/heads/<head>`.
    pub fn init(head: &str) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let mut opts = RepositoryInitOptions::new();
        opts.initial_head(head);
        let repo = Repository::init_opts(dir.path(), &opts).expect("Failed to init repo");
        Self {
            dir,
            repo,
            clock: EPOCH,
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, path: &str, content: &str) {
        let full_path = self.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create dir");
        }
        fs::write(full_path, content).expect("Failed to write file");
    }

    pub fn delete(&self, path: &str) {
        fs::remove_file(self.path().join(path)).expect("Failed to delete file");
    }

    pub fn rename(&self, from: &str, to: &str) {
        let target = self.path().join(to);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).expect("Failed to create dir");
        }
        fs::rename(self.path().join(from), target).expect("Failed to rename file");
    }

    /// Stage the whole work tree and commit it on top of HEAD.
    pub fn commit(&mut self, message: &str) -> Oid {
        let sig = self.next_signature();
        let tree = self.stage();
        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();
        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to commit")
    }

    /// Commit the staged work tree with explicit parents without moving any ref.
    pub fn commit_detached(&mut self, message: &str, parents: &[Oid]) -> Oid {
        let sig = self.next_signature();
        let tree = self.stage();
        let parents: Vec<git2::Commit> = parents
            .iter()
            .map(|id| self.repo.find_commit(*id).expect("Failed to find parent"))
            .collect();
        let parent_refs: Vec<&git2::Commit> = parents.iter().collect();
        self.repo
            .commit(None, &sig, &sig, message, &tree, &parent_refs)
            .expect("Failed to commit")
    }

    pub fn branch(&self, name: &str, target: Oid) {
        let commit = self.repo.find_commit(target).expect("Failed to find commit");
        self.repo
            .branch(name, &commit, true)
            .expect("Failed to create branch");
    }

    /// Create `name` at the current HEAD commit and make it the checked out branch.
    pub fn checkout_new_branch(&self, name: &str) {
        let head = self
            .repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .expect("Failed to read HEAD");
        self.repo
            .branch(name, &head, false)
            .expect("Failed to create branch");
        self.repo
            .set_head(&format!("refs/heads/{}", name))
            .expect("Failed to set HEAD");
    }

    /// Point `refname` at `target`, even when it is the checked out branch.
    pub fn move_ref(&self, refname: &str, target: Oid) {
        self.repo
            .reference(refname, target, true, "test: move ref")
            .expect("Failed to move ref");
    }

    pub fn tag(&self, name: &str, target: Oid) {
        let object = self
            .repo
            .find_object(target, None)
            .expect("Failed to find object");
        self.repo
            .tag_lightweight(name, &object, true)
            .expect("Failed to create tag");
    }

    pub fn annotated_tag(&self, name: &str, target: Oid) {
        let object = self
            .repo
            .find_object(target, None)
            .expect("Failed to find object");
        let sig = Signature::new(AUTHOR, EMAIL, &Time::new(self.clock, 0)).unwrap();
        self.repo
            .tag(name, &object, &sig, "release", true)
            .expect("Failed to create tag");
    }

    pub fn time_of(&self, id: Oid) -> i64 {
        self.repo
            .find_commit(id)
            .expect("Failed to find commit")
            .author()
            .when()
            .seconds()
    }

    fn stage(&self) -> git2::Tree<'_> {
        let mut index = self.repo.index().expect("Failed to open index");
        index
            .add_all(["*"].iter(), IndexAddOption::DEFAULT, None)
            .expect("Failed to stage files");
        index
            .update_all(["*"].iter(), None)
            .expect("Failed to stage removals");
        index.write().expect("Failed to write index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        self.repo.find_tree(tree_id).expect("Failed to find tree")
    }

    fn next_signature(&mut self) -> Signature<'static> {
        // One hour between commits keeps time-sorted walks deterministic
        self.clock += 3600;
        Signature::new(AUTHOR, EMAIL, &Time::new(self.clock, 0)).expect("Failed to sign")
    }
}
