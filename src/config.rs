use serde::{Deserialize, Serialize};

pub const DEFAULT_MARKER: &str = ".git";
pub const DEFAULT_REMOTE: &str = "origin";

/// Knobs for one snapshot run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotOptions {
    /// Directory name that marks a repository root.
    pub marker: String,
    /// Remote whose URL becomes `remote_url`.
    pub remote_name: String,
    /// Levels below the start directory the root search descends.
    pub search_depth: Option<usize>,
    /// Levels below the root the topology may record; deeper directories
    /// fail the snapshot, and `.git` alone reaches about four levels.
    pub topology_depth: Option<usize>,
    /// Cap on commits per history; `None` walks everything.
    pub max_commits: Option<usize>,
}

impl Default for SnapshotOptions {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_string(),
            remote_name: DEFAULT_REMOTE.to_string(),
            search_depth: None,
            topology_depth: None,
            max_commits: None,
        }
    }
}
