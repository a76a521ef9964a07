use git2::{BranchType, ErrorCode, Repository, Status, StatusOptions};
use std::path::Path;

use crate::git::backend::BackendResult;
use crate::git::repository::Git2Backend;
use crate::models::{ChangeKind, FileChange, WorkingTreeStatus};

impl Git2Backend {
    pub fn get_status(&self, root: &Path) -> BackendResult<WorkingTreeStatus> {
        self.with_repo(root, |repo| {
            let mut opts = StatusOptions::new();
            opts.include_untracked(true)
                .recurse_untracked_dirs(true)
                .include_ignored(false)
                .renames_head_to_index(true);

            let statuses = repo.statuses(Some(&mut opts))?;
            let mut status = WorkingTreeStatus::default();

            for entry in statuses.iter() {
                let flags = entry.status();
                let path = entry.path().unwrap_or("").to_string();

                if flags.contains(Status::CONFLICTED) {
                    status.conflicted.push(path);
                    continue;
                }
                if flags.contains(Status::WT_NEW) {
                    status.untracked.push(path);
                    continue;
                }

                if let Some(kind) = index_kind(flags) {
                    // Renames report the destination path.
                    let staged_path = entry
                        .head_to_index()
                        .and_then(|d| d.new_file().path().map(|p| p.to_string_lossy().to_string()))
                        .unwrap_or_else(|| path.clone());
                    status.staged.push(FileChange {
                        path: staged_path,
                        kind,
                    });
                }
                if let Some(kind) = worktree_kind(flags) {
                    status.unstaged.push(FileChange { path, kind });
                }
            }

            if let Some(upstream) = tracking_branch(repo)? {
                status.tracking = Some(upstream.shorthand);
                status.tracking_ref = Some(upstream.reference);
                status.ahead = upstream.ahead;
                status.behind = upstream.behind;
            }

            Ok(status)
        })
    }
}

fn index_kind(flags: Status) -> Option<ChangeKind> {
    if flags.contains(Status::INDEX_NEW) {
        Some(ChangeKind::Added)
    } else if flags.contains(Status::INDEX_DELETED) {
        Some(ChangeKind::Deleted)
    } else if flags.contains(Status::INDEX_RENAMED) {
        Some(ChangeKind::Renamed)
    } else if flags.contains(Status::INDEX_TYPECHANGE) {
        Some(ChangeKind::TypeChanged)
    } else if flags.contains(Status::INDEX_MODIFIED) {
        Some(ChangeKind::Modified)
    } else {
        None
    }
}

fn worktree_kind(flags: Status) -> Option<ChangeKind> {
    if flags.contains(Status::WT_DELETED) {
        Some(ChangeKind::Deleted)
    } else if flags.contains(Status::WT_RENAMED) {
        Some(ChangeKind::Renamed)
    } else if flags.contains(Status::WT_TYPECHANGE) {
        Some(ChangeKind::TypeChanged)
    } else if flags.contains(Status::WT_MODIFIED) {
        Some(ChangeKind::Modified)
    } else {
        None
    }
}

struct Upstream {
    shorthand: String,
    reference: String,
    ahead: usize,
    behind: usize,
}

/// Upstream of the checked-out branch with ahead/behind counts.
///
/// `None` for detached or unborn HEADs and for branches without an upstream.
fn tracking_branch(repo: &Repository) -> std::result::Result<Option<Upstream>, git2::Error> {
    let head = match repo.head() {
        Ok(head) => head,
        Err(e) if e.code() == ErrorCode::UnbornBranch => return Ok(None),
        Err(e) => return Err(e),
    };
    if !head.is_branch() {
        return Ok(None);
    }
    let Some(name) = head.shorthand() else {
        return Ok(None);
    };

    let branch = repo.find_branch(name, BranchType::Local)?;
    let upstream = match branch.upstream() {
        Ok(upstream) => upstream,
        Err(e) if e.code() == ErrorCode::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };
    let Some(shorthand) = upstream.name()?.map(str::to_string) else {
        return Ok(None);
    };
    let Some(reference) = upstream.get().name().map(str::to_string) else {
        return Ok(None);
    };

    let (ahead, behind) = match (head.target(), upstream.get().target()) {
        (Some(local), Some(remote)) => repo.graph_ahead_behind(local, remote)?,
        _ => (0, 0),
    };

    Ok(Some(Upstream {
        shorthand,
        reference,
        ahead,
        behind,
    }))
}
