use serde::{Deserialize, Serialize};

use super::{CommitRecord, DirectoryNode, FileDiffStat, WorkingTreeStatus};

/// Point-in-time view of a repository, captured in one discovery pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepositorySnapshot {
    /// Empty when no remote is configured or the lookup failed.
    pub remote_url: String,
    pub root_folder_name: String,
    pub current_branch: String,
    pub working_tree_status: WorkingTreeStatus,
    pub commit_history: Vec<CommitRecord>,
    pub commit_diff_stats: Vec<FileDiffStat>,
    /// Empty when the current branch has no upstream.
    pub tracking_branch_history: Vec<CommitRecord>,
    pub directory_topology: DirectoryNode,
    /// Every `url = ...` value in the local config, duplicates kept.
    pub remote_config_urls: Vec<String>,
}
