//! Snapshot aggregation.
//!
//! `SnapshotAggregator::build_snapshot` resolves the start path, locates the
//! repository root, then fans the independent reads out onto blocking
//! threads and joins them:
//!
//! - remote URL: recoverable, empty string on failure
//! - current branch, status, commit log, diff summary: fatal
//! - tracking-branch log: only when status names an upstream; fatal
//! - directory topology: fatal
//! - config URLs: recoverable, reported and replaced by an empty list
//!
//! Results are checked in that order once every read has finished, so the
//! error returned for several simultaneous failures is always the earliest
//! step's.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crate::config::SnapshotOptions;
use crate::discovery::{extract_urls, FsReader, LocalFs, RootLocator, TopologyBuilder};
use crate::error::{Result, SnapshotError, Stage};
use crate::git::{BackendResult, Git2Backend, VcsBackend};
use crate::models::{CommitRecord, DirectoryNode, RepositorySnapshot, WorkingTreeStatus};
use crate::report::{ErrorReporter, RecoveredFailure, TracingReporter};

pub type SharedAggregator = Arc<SnapshotAggregator>;

/// File inside the marker directory holding the local configuration.
const CONFIG_FILE: &str = "config";

pub struct SnapshotAggregator {
    backend: Arc<dyn VcsBackend>,
    fs: Arc<dyn FsReader>,
    reporter: Arc<dyn ErrorReporter>,
    options: SnapshotOptions,
}

impl SnapshotAggregator {
    pub fn new(backend: Arc<dyn VcsBackend>, fs: Arc<dyn FsReader>) -> Self {
        Self {
            backend,
            fs,
            reporter: Arc::new(TracingReporter),
            options: SnapshotOptions::default(),
        }
    }

    /// libgit2 reads over the local disk.
    pub fn local(options: SnapshotOptions) -> Self {
        let backend = Git2Backend::new(options.remote_name.clone());
        Self::new(Arc::new(backend), Arc::new(LocalFs)).with_options(options)
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn ErrorReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn with_options(mut self, options: SnapshotOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &SnapshotOptions {
        &self.options
    }

    /// Resolve `start` and find the repository root for it.
    pub async fn locate_root(&self, start: &Path) -> Result<PathBuf> {
        let start = self.resolve_start(start).await?;
        self.find_root(start).await
    }

    pub async fn build_snapshot(&self, start: &Path) -> Result<RepositorySnapshot> {
        let started = Instant::now();
        let root = self.locate_root(start).await?;
        tracing::debug!("Building snapshot for {}", root.display());

        let root_folder_name = root
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| root.to_string_lossy().to_string());
        let limit = self.options.max_commits;

        let (remote, branch, status, log, diff, topology, config_urls) = tokio::join!(
            self.backend_call(Stage::RemoteUrl, &root, |backend, root| backend.remote_url(root)),
            self.backend_call(Stage::CurrentBranch, &root, |backend, root| {
                backend.current_branch(root)
            }),
            self.status_with_tracking(&root),
            self.backend_call(Stage::CommitLog, &root, move |backend, root| {
                backend.log(root, None, limit)
            }),
            self.backend_call(Stage::DiffSummary, &root, |backend, root| {
                backend.diff_summary(root)
            }),
            self.topology(&root),
            self.config_urls(&root),
        );

        let remote_url = remote.unwrap_or_else(|err| {
            tracing::debug!("No remote url for {}: {}", root.display(), err);
            String::new()
        });
        let current_branch = branch?;
        let (working_tree_status, tracking) = status?;
        let commit_history = log?;
        let commit_diff_stats = diff?;
        let tracking_branch_history = tracking?;
        let directory_topology = topology?;
        let remote_config_urls = config_urls.unwrap_or_else(|err| {
            self.reporter.report(RecoveredFailure {
                stage: Stage::ConfigRead,
                message: err.to_string(),
            });
            Vec::new()
        });

        tracing::info!(
            "Snapshot of {} built: {} commits, {} directories in {:?}",
            root.display(),
            commit_history.len(),
            directory_topology.node_count(),
            started.elapsed()
        );

        Ok(RepositorySnapshot {
            remote_url,
            root_folder_name,
            current_branch,
            working_tree_status,
            commit_history,
            commit_diff_stats,
            tracking_branch_history,
            directory_topology,
            remote_config_urls,
        })
    }

    async fn resolve_start(&self, start: &Path) -> Result<PathBuf> {
        let fs = Arc::clone(&self.fs);
        let start = start.to_path_buf();
        run_blocking(Stage::ResolveStart, move || {
            fs.canonicalize(&start)
                .map_err(|source| SnapshotError::InvalidStartPath {
                    path: start.clone(),
                    source,
                })
        })
        .await
    }

    async fn find_root(&self, start: PathBuf) -> Result<PathBuf> {
        let fs = Arc::clone(&self.fs);
        let marker = self.options.marker.clone();
        let max_depth = self.options.search_depth;
        let search_from = start.clone();

        let found = run_blocking(Stage::RootSearch, move || {
            RootLocator::new(fs.as_ref(), &marker)
                .max_depth(max_depth)
                .locate(&search_from)
        })
        .await?;

        found.ok_or(SnapshotError::NoRepositoryFound(start))
    }

    async fn backend_call<T, F>(&self, stage: Stage, root: &Path, call: F) -> Result<T>
    where
        F: FnOnce(&dyn VcsBackend, &Path) -> BackendResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let backend = Arc::clone(&self.backend);
        let root = root.to_path_buf();
        run_blocking(stage, move || {
            call(backend.as_ref(), &root).map_err(|source| SnapshotError::Backend { stage, source })
        })
        .await
    }

    /// Status, then the upstream's log when status names one. The outer
    /// error is the status failure; the inner result is the tracking log.
    async fn status_with_tracking(
        &self,
        root: &Path,
    ) -> Result<(WorkingTreeStatus, Result<Vec<CommitRecord>>)> {
        let status = self
            .backend_call(Stage::Status, root, |backend, root| backend.status(root))
            .await?;

        // The full ref, so a local branch named like the upstream can't shadow it.
        let upstream = status.tracking_ref.clone().or_else(|| status.tracking.clone());
        let tracking = match upstream {
            Some(upstream) => {
                let limit = self.options.max_commits;
                self.backend_call(Stage::TrackingLog, root, move |backend, root| {
                    backend.log(root, Some(upstream.as_str()), limit)
                })
                .await
            }
            None => Ok(Vec::new()),
        };

        Ok((status, tracking))
    }

    async fn topology(&self, root: &Path) -> Result<DirectoryNode> {
        let fs = Arc::clone(&self.fs);
        let root = root.to_path_buf();
        let max_depth = self.options.topology_depth;
        run_blocking(Stage::Topology, move || {
            TopologyBuilder::new(fs.as_ref())
                .max_depth(max_depth)
                .build(&root)
        })
        .await
    }

    async fn config_urls(&self, root: &Path) -> Result<Vec<String>> {
        let fs = Arc::clone(&self.fs);
        let path = root.join(&self.options.marker).join(CONFIG_FILE);
        run_blocking(Stage::ConfigRead, move || {
            let raw = fs
                .read_to_string(&path)
                .map_err(|source| SnapshotError::Filesystem {
                    stage: Stage::ConfigRead,
                    path: path.clone(),
                    source,
                })?;
            Ok(extract_urls(&raw))
        })
        .await
    }
}

/// Run a filesystem or backend read off the async executor.
async fn run_blocking<T, F>(stage: Stage, job: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(job)
        .await
        .map_err(|e| SnapshotError::Task {
            stage,
            message: e.to_string(),
        })?
}
