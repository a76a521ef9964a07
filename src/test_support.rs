//! Test-only helpers for building throwaway repositories on disk.

use std::fs;
use std::path::{Path, PathBuf};

use git2::{Oid, Repository, RepositoryInitOptions, Signature, Time};
use tempfile::TempDir;

/// A real git repository in a temporary directory, HEAD on `main`.
pub struct FixtureRepo {
    _dir: TempDir,
    path: PathBuf,
    repo: Repository,
}

impl FixtureRepo {
    pub fn init() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = fs::canonicalize(dir.path()).expect("canonical tempdir");
        Self::init_at(dir, path)
    }

    /// Initialise the repository in `relative` below a fresh temp directory,
    /// so tests can start searches above the root.
    pub fn init_nested(relative: &str) -> (Self, PathBuf) {
        let dir = tempfile::tempdir().expect("tempdir");
        let outer = fs::canonicalize(dir.path()).expect("canonical tempdir");
        let path = outer.join(relative);
        fs::create_dir_all(&path).expect("create repo dir");
        (Self::init_at(dir, path), outer)
    }

    fn init_at(dir: TempDir, path: PathBuf) -> Self {
        let mut opts = RepositoryInitOptions::new();
        opts.initial_head("main");
        let repo = Repository::init_opts(&path, &opts).expect("init repository");
        Self {
            _dir: dir,
            path,
            repo,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn repo(&self) -> &Repository {
        &self.repo
    }

    pub fn mkdir(&self, relative: &str) -> PathBuf {
        let dir = self.path.join(relative);
        fs::create_dir_all(&dir).expect("create dir");
        dir
    }

    pub fn write_file(&self, relative: &str, contents: &str) {
        let file = self.path.join(relative);
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent).expect("create parent dir");
        }
        fs::write(file, contents).expect("write file");
    }

    pub fn stage(&self, relative: &str) {
        let mut index = self.repo.index().expect("index");
        index.add_path(Path::new(relative)).expect("add path");
        index.write().expect("write index");
    }

    pub fn commit_file(&self, relative: &str, contents: &str, message: &str) -> Oid {
        let now = Signature::now("Test User", "test@example.com").expect("signature");
        self.commit_with(relative, contents, message, &now)
    }

    pub fn commit_file_at(&self, relative: &str, contents: &str, message: &str, seconds: i64) -> Oid {
        let sig = Signature::new("Test User", "test@example.com", &Time::new(seconds, 0))
            .expect("signature");
        self.commit_with(relative, contents, message, &sig)
    }

    fn commit_with(&self, relative: &str, contents: &str, message: &str, sig: &Signature) -> Oid {
        self.write_file(relative, contents);
        self.stage(relative);

        let mut index = self.repo.index().expect("index");
        let tree_id = index.write_tree().expect("write tree");
        let tree = self.repo.find_tree(tree_id).expect("find tree");

        let parent = self
            .repo
            .head()
            .ok()
            .and_then(|head| head.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), sig, sig, message, &tree, &parents)
            .expect("commit")
    }

    pub fn create_branch(&self, name: &str) {
        let head = self
            .repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .expect("head commit");
        self.repo.branch(name, &head, false).expect("create branch");
    }

    pub fn add_remote(&self, name: &str, url: &str) {
        self.repo.remote(name, url).expect("add remote");
    }

    /// Point `<remote>/<branch>` at the current HEAD and make it the upstream
    /// of the local `branch`.
    pub fn track_upstream(&self, remote: &str, branch: &str) {
        if self.repo.find_remote(remote).is_err() {
            self.add_remote(remote, &format!("https://example.com/{remote}.git"));
        }

        let head = self
            .repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .expect("head commit");
        self.repo
            .reference(
                &format!("refs/remotes/{remote}/{branch}"),
                head.id(),
                true,
                "fixture upstream",
            )
            .expect("remote ref");

        let mut local = self
            .repo
            .find_branch(branch, git2::BranchType::Local)
            .expect("local branch");
        local
            .set_upstream(Some(&format!("{remote}/{branch}")))
            .expect("set upstream");
    }
}
