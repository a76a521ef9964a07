//! Working-tree status DTOs.
//!
//! - `WorkingTreeStatus`: staged/unstaged/untracked sets plus upstream tracking
//! - `FileChange`: a single changed path and how it changed
//! - `ChangeKind`: the kind of change, shared with diff summaries

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Added,
    Deleted,
    Modified,
    Renamed,
    Copied,
    TypeChanged,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileChange {
    pub path: String,
    pub kind: ChangeKind,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkingTreeStatus {
    /// Changes recorded in the index relative to HEAD.
    pub staged: Vec<FileChange>,
    /// Changes to tracked files not yet added to the index.
    pub unstaged: Vec<FileChange>,
    pub untracked: Vec<String>,
    pub conflicted: Vec<String>,
    /// Upstream of the current branch, e.g. `origin/main`.
    pub tracking: Option<String>,
    /// Full reference of the upstream, e.g. `refs/remotes/origin/main`.
    /// Unlike the shorthand it cannot be shadowed by a local branch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_ref: Option<String>,
    pub ahead: usize,
    pub behind: usize,
}

impl WorkingTreeStatus {
    pub fn is_clean(&self) -> bool {
        self.staged.is_empty()
            && self.unstaged.is_empty()
            && self.untracked.is_empty()
            && self.conflicted.is_empty()
    }
}
