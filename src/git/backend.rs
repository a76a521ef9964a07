//! The version-control seam the snapshot pipeline reads through.
//!
//! Every method is a read. Implementations must be shareable across the
//! blocking threads the aggregator fans its calls out to.

use std::path::Path;

use crate::error::BackendError;
use crate::models::{CommitRecord, FileDiffStat, WorkingTreeStatus};

pub type BackendResult<T> = std::result::Result<T, BackendError>;

pub trait VcsBackend: Send + Sync {
    /// URL of the configured default remote.
    fn remote_url(&self, root: &Path) -> BackendResult<String>;

    /// Abbreviated name of HEAD, `"HEAD"` when detached.
    fn current_branch(&self, root: &Path) -> BackendResult<String>;

    fn status(&self, root: &Path) -> BackendResult<WorkingTreeStatus>;

    /// Commits reachable from `reference` (HEAD when `None`), newest first.
    fn log(
        &self,
        root: &Path,
        reference: Option<&str>,
        limit: Option<usize>,
    ) -> BackendResult<Vec<CommitRecord>>;

    /// Per-file changes between HEAD and the working tree, index included.
    fn diff_summary(&self, root: &Path) -> BackendResult<Vec<FileDiffStat>>;
}
