//! Repository root discovery.
//!
//! The search first walks from the start directory up through its ancestors,
//! so a start path anywhere inside a repository resolves to the enclosing
//! root. When no ancestor carries the marker it descends depth-first
//! (pre-order, listing order) through the start directory's subtree and
//! stops at the first directory whose direct children include the marker.
//!
//! Read failures abort the search: a skipped unreadable directory could be
//! the one holding the root.

use std::path::{Path, PathBuf};

use crate::discovery::fs::{EntryKind, FsReader};
use crate::error::{Result, SnapshotError, Stage};

pub struct RootLocator<'a> {
    fs: &'a dyn FsReader,
    marker: &'a str,
    max_depth: Option<usize>,
}

impl<'a> RootLocator<'a> {
    pub fn new(fs: &'a dyn FsReader, marker: &'a str) -> Self {
        Self {
            fs,
            marker,
            max_depth: None,
        }
    }

    /// Bound how many levels below the start directory the descent visits.
    pub fn max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// `Ok(None)` when no root exists above or below `start`.
    pub fn locate(&self, start: &Path) -> Result<Option<PathBuf>> {
        if let Some(root) = self.locate_enclosing(start)? {
            tracing::debug!("Found enclosing root {}", root.display());
            return Ok(Some(root));
        }

        let root = self.locate_below(start)?;
        match &root {
            Some(root) => tracing::debug!("Found nested root {}", root.display()),
            None => tracing::debug!("No {} marker under {}", self.marker, start.display()),
        }
        Ok(root)
    }

    fn locate_enclosing(&self, start: &Path) -> Result<Option<PathBuf>> {
        for dir in start.ancestors() {
            let marker = dir.join(self.marker);
            let kind = self
                .fs
                .entry_kind(&marker)
                .map_err(|source| read_error(&marker, source))?;
            if kind.is_some() {
                return Ok(Some(dir.to_path_buf()));
            }
        }
        Ok(None)
    }

    fn locate_below(&self, start: &Path) -> Result<Option<PathBuf>> {
        let mut stack = vec![(start.to_path_buf(), 0usize)];

        while let Some((dir, depth)) = stack.pop() {
            let entries = self
                .fs
                .list_dir(&dir)
                .map_err(|source| read_error(&dir, source))?;

            if entries.iter().any(|entry| entry.name == self.marker) {
                return Ok(Some(dir));
            }
            if self.max_depth.is_some_and(|limit| depth >= limit) {
                continue;
            }

            // Reversed so the first listed child is searched first.
            stack.extend(
                entries
                    .into_iter()
                    .rev()
                    .filter(|entry| entry.kind == EntryKind::Directory)
                    .map(|entry| (entry.path, depth + 1)),
            );
        }

        Ok(None)
    }
}

fn read_error(path: &Path, source: std::io::Error) -> SnapshotError {
    SnapshotError::Filesystem {
        stage: Stage::RootSearch,
        path: path.to_path_buf(),
        source,
    }
}
