use chrono::{DateTime, Utc};
use git2::{ErrorCode, Repository};
use std::path::Path;

use crate::error::BackendError;
use crate::git::backend::{BackendResult, VcsBackend};
use crate::models::{CommitRecord, FileDiffStat, WorkingTreeStatus};

/// libgit2-backed reads.
///
/// Stateless: the repository is opened fresh for every call, so a single
/// backend can serve parallel calls from several blocking threads without a
/// shared `Repository` handle.
#[derive(Debug, Clone)]
pub struct Git2Backend {
    remote_name: String,
}

impl Default for Git2Backend {
    fn default() -> Self {
        Self::new("origin")
    }
}

impl Git2Backend {
    pub fn new(remote_name: impl Into<String>) -> Self {
        Self {
            remote_name: remote_name.into(),
        }
    }

    pub fn remote_name(&self) -> &str {
        &self.remote_name
    }

    pub fn with_repo<F, T>(&self, root: &Path, f: F) -> BackendResult<T>
    where
        F: FnOnce(&Repository) -> std::result::Result<T, git2::Error>,
    {
        let repo = Repository::open(root)?;
        Ok(f(&repo)?)
    }

    pub fn get_remote_url(&self, root: &Path) -> BackendResult<String> {
        let url = self.with_repo(root, |repo| {
            let remote = repo.find_remote(&self.remote_name)?;
            Ok(remote.url().map(str::to_string))
        })?;

        url.ok_or_else(|| {
            BackendError::Unavailable(format!("remote '{}' has a non UTF-8 url", self.remote_name))
        })
    }

    pub fn get_current_branch(&self, root: &Path) -> BackendResult<String> {
        self.with_repo(root, |repo| match repo.head() {
            Ok(head) if head.is_branch() => Ok(head.shorthand().unwrap_or("HEAD").to_string()),
            Ok(_) => Ok("HEAD".to_string()),
            Err(e) if e.code() == ErrorCode::UnbornBranch => {
                // No commits yet: HEAD still names the branch it will create.
                let head = repo.find_reference("HEAD")?;
                let target = head.symbolic_target().unwrap_or("HEAD");
                Ok(target.strip_prefix("refs/heads/").unwrap_or(target).to_string())
            }
            Err(e) => Err(e),
        })
    }
}

/// True when HEAD points at a branch that has no commits yet.
pub(crate) fn head_is_unborn(repo: &Repository) -> std::result::Result<bool, git2::Error> {
    match repo.head() {
        Ok(_) => Ok(false),
        Err(e) if e.code() == ErrorCode::UnbornBranch => Ok(true),
        Err(e) => Err(e),
    }
}

pub fn commit_to_record(commit: &git2::Commit) -> CommitRecord {
    let timestamp = commit.time().seconds();
    let hash = commit.id().to_string();
    CommitRecord {
        short_hash: hash.chars().take(7).collect(),
        hash,
        author: commit.author().name().unwrap_or("Unknown").to_string(),
        email: commit.author().email().unwrap_or("").to_string(),
        date: DateTime::<Utc>::from_timestamp(timestamp, 0).unwrap_or_default(),
        subject: commit.summary().unwrap_or("").trim().to_string(),
        relative_time: format_relative_time(timestamp),
    }
}

pub fn format_relative_time(timestamp: i64) -> String {
    let now = Utc::now().timestamp();
    let diff = now - timestamp;

    if diff < 60 {
        "just now".to_string()
    } else if diff < 3600 {
        let mins = diff / 60;
        format!("{} minute{} ago", mins, if mins == 1 { "" } else { "s" })
    } else if diff < 86400 {
        let hours = diff / 3600;
        format!("{} hour{} ago", hours, if hours == 1 { "" } else { "s" })
    } else if diff < 2592000 {
        let days = diff / 86400;
        format!("{} day{} ago", days, if days == 1 { "" } else { "s" })
    } else if diff < 31536000 {
        let months = diff / 2592000;
        format!("{} month{} ago", months, if months == 1 { "" } else { "s" })
    } else {
        let years = diff / 31536000;
        format!("{} year{} ago", years, if years == 1 { "" } else { "s" })
    }
}

impl VcsBackend for Git2Backend {
    fn remote_url(&self, root: &Path) -> BackendResult<String> {
        self.get_remote_url(root)
    }

    fn current_branch(&self, root: &Path) -> BackendResult<String> {
        self.get_current_branch(root)
    }

    fn status(&self, root: &Path) -> BackendResult<WorkingTreeStatus> {
        self.get_status(root)
    }

    fn log(
        &self,
        root: &Path,
        reference: Option<&str>,
        limit: Option<usize>,
    ) -> BackendResult<Vec<CommitRecord>> {
        self.get_log(root, reference, limit)
    }

    fn diff_summary(&self, root: &Path) -> BackendResult<Vec<FileDiffStat>> {
        self.get_diff_summary(root)
    }
}
