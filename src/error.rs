//! Error types for snapshot construction and their HTTP response mapping.
//!
//! `SnapshotError` is what `build_snapshot` returns when a fatal step fails.
//! Recoverable sub-failures (remote URL, config file) never surface here; they
//! go through the `ErrorReporter` side channel instead.
//!
//! Error mappings for the host adapter:
//! - `NoRepositoryFound` → 404
//! - `InvalidStartPath` → 400
//! - everything else → 500

use std::fmt;
use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

/// The pipeline step an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    ResolveStart,
    RootSearch,
    RemoteUrl,
    CurrentBranch,
    Status,
    CommitLog,
    DiffSummary,
    TrackingLog,
    Topology,
    ConfigRead,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::ResolveStart => "resolve start path",
            Stage::RootSearch => "root search",
            Stage::RemoteUrl => "remote url",
            Stage::CurrentBranch => "current branch",
            Stage::Status => "working tree status",
            Stage::CommitLog => "commit log",
            Stage::DiffSummary => "diff summary",
            Stage::TrackingLog => "tracking branch log",
            Stage::Topology => "directory topology",
            Stage::ConfigRead => "config read",
        };
        f.write_str(name)
    }
}

/// Failure reported by a version-control backend call.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Backend unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("No repository found under {}", .0.display())]
    NoRepositoryFound(PathBuf),

    #[error("Invalid start path {}: {source}", path.display())]
    InvalidStartPath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{stage} failed: {source}")]
    Backend {
        stage: Stage,
        #[source]
        source: BackendError,
    },

    #[error("{stage} failed reading {}: {source}", path.display())]
    Filesystem {
        stage: Stage,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{stage} exceeded depth limit {limit} at {}", path.display())]
    DepthLimitExceeded {
        stage: Stage,
        limit: usize,
        path: PathBuf,
    },

    #[error("{stage} task failed: {message}")]
    Task { stage: Stage, message: String },
}

impl SnapshotError {
    /// The pipeline step this error came from.
    pub fn stage(&self) -> Stage {
        match self {
            SnapshotError::NoRepositoryFound(_) => Stage::RootSearch,
            SnapshotError::InvalidStartPath { .. } => Stage::ResolveStart,
            SnapshotError::Backend { stage, .. }
            | SnapshotError::Filesystem { stage, .. }
            | SnapshotError::DepthLimitExceeded { stage, .. }
            | SnapshotError::Task { stage, .. } => *stage,
        }
    }
}

impl IntoResponse for SnapshotError {
    fn into_response(self) -> Response {
        let status = match &self {
            SnapshotError::NoRepositoryFound(_) => StatusCode::NOT_FOUND,
            SnapshotError::InvalidStartPath { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string(),
            "stage": self.stage(),
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, SnapshotError>;
