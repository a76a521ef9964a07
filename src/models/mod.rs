//! Data transfer objects making up a repository snapshot.
//!
//! These structs are serialized to JSON for whoever consumes the snapshot.
//! - `commit`: CommitRecord
//! - `status`: WorkingTreeStatus, FileChange, ChangeKind
//! - `diff`: FileDiffStat
//! - `topology`: DirectoryNode
//! - `snapshot`: RepositorySnapshot, the aggregate

pub mod commit;
pub mod diff;
pub mod snapshot;
pub mod status;
pub mod topology;

pub use commit::*;
pub use diff::*;
pub use snapshot::*;
pub use status::*;
pub use topology::*;
