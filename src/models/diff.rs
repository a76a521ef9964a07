use serde::{Deserialize, Serialize};

use super::ChangeKind;

/// Per-file line counts for the aggregate working-tree diff against HEAD.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileDiffStat {
    pub path: String,
    pub kind: ChangeKind,
    pub insertions: usize,
    pub deletions: usize,
    pub is_binary: bool,
}
