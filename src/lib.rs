//! Repository discovery and snapshot aggregation.
//!
//! Given any starting directory, [`SnapshotAggregator`] finds the enclosing
//! (or nested) repository root and assembles one [`RepositorySnapshot`]:
//! remote, branch, working-tree status, history, diff summary, upstream
//! history, the full directory topology and every remote URL declared in the
//! local config.
//!
//! - [`discovery`]: root search, topology, config URL extraction
//! - [`git`]: the `VcsBackend` seam and its libgit2 implementation
//! - [`snapshot`]: the aggregator and its fatal/recoverable failure policy
//! - [`routes`]: HTTP adapter serving snapshots as JSON

pub mod config;
pub mod discovery;
pub mod error;
pub mod git;
pub mod models;
pub mod report;
pub mod routes;
pub mod snapshot;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use config::SnapshotOptions;
pub use error::{BackendError, SnapshotError, Stage};
pub use models::RepositorySnapshot;
pub use snapshot::{SharedAggregator, SnapshotAggregator};
