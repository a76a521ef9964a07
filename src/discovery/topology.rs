use std::path::{Path, PathBuf};

use crate::discovery::fs::{EntryKind, FsReader};
use crate::error::{Result, SnapshotError, Stage};
use crate::models::{DirectoryNode, ROOT_LABEL};

/// Mirrors the directory layout under a root into a `DirectoryNode` tree.
///
/// Every directory is recorded, the marker directory included. Files,
/// symlinks and other entry types are skipped. Any read failure aborts the
/// build; a partial tree is never returned.
pub struct TopologyBuilder<'a> {
    fs: &'a dyn FsReader,
    max_depth: Option<usize>,
}

/// A node whose children are still being collected.
struct PendingNode {
    path: PathBuf,
    relative: PathBuf,
    depth: usize,
    parent: Option<usize>,
    children: Vec<DirectoryNode>,
}

impl<'a> TopologyBuilder<'a> {
    pub fn new(fs: &'a dyn FsReader) -> Self {
        Self {
            fs,
            max_depth: None,
        }
    }

    /// Fail with `DepthLimitExceeded` instead of recording directories
    /// deeper than `max_depth` levels below the root.
    pub fn max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn build(&self, root: &Path) -> Result<DirectoryNode> {
        // Nodes are appended in discovery order, so a parent always sits at
        // a lower index than its children.
        let mut arena: Vec<PendingNode> = Vec::new();
        let mut stack: Vec<Option<usize>> = vec![None];

        while let Some(slot) = stack.pop() {
            let (dir, relative, depth) = match slot {
                Some(idx) => {
                    let node = &arena[idx];
                    (node.path.clone(), node.relative.clone(), node.depth)
                }
                None => (root.to_path_buf(), PathBuf::new(), 0),
            };

            let entries = self
                .fs
                .list_dir(&dir)
                .map_err(|source| SnapshotError::Filesystem {
                    stage: Stage::Topology,
                    path: dir.clone(),
                    source,
                })?;

            for entry in entries.into_iter().filter(|e| e.kind == EntryKind::Directory) {
                if let Some(limit) = self.max_depth.filter(|limit| depth + 1 > *limit) {
                    return Err(SnapshotError::DepthLimitExceeded {
                        stage: Stage::Topology,
                        limit,
                        path: entry.path,
                    });
                }

                // `entry.name` is lossy; the path is the real on-disk name.
                let child_relative = match entry.path.strip_prefix(root) {
                    Ok(rel) => rel.to_path_buf(),
                    Err(_) => relative.join(&entry.name),
                };
                arena.push(PendingNode {
                    path: entry.path,
                    relative: child_relative,
                    depth: depth + 1,
                    parent: slot,
                    children: Vec::new(),
                });
                stack.push(Some(arena.len() - 1));
            }
        }

        let directories = arena.len() + 1;

        // Children always finish before their parent when popping from the
        // back; they arrive reversed and are flipped once complete.
        let mut root_children = Vec::new();
        while let Some(mut pending) = arena.pop() {
            pending.children.reverse();
            let node = DirectoryNode {
                name: pending.relative.to_string_lossy().to_string(),
                absolute_path: pending.path,
                children: pending.children,
            };
            match pending.parent {
                Some(parent) => arena[parent].children.push(node),
                None => root_children.push(node),
            }
        }
        root_children.reverse();

        tracing::debug!("Topology of {} has {} directories", root.display(), directories);

        Ok(DirectoryNode {
            name: ROOT_LABEL.to_string(),
            absolute_path: root.to_path_buf(),
            children: root_children,
        })
    }
}
