use git2::{Delta, DiffOptions, Patch};
use std::path::Path;

use crate::git::backend::BackendResult;
use crate::git::repository::{head_is_unborn, Git2Backend};
use crate::models::{ChangeKind, FileDiffStat};

impl Git2Backend {
    /// Line counts per file for HEAD against the working tree, staged
    /// changes included. Untracked files are not part of the diff.
    pub fn get_diff_summary(&self, root: &Path) -> BackendResult<Vec<FileDiffStat>> {
        self.with_repo(root, |repo| {
            let head_tree = if head_is_unborn(repo)? {
                None
            } else {
                Some(repo.head()?.peel_to_tree()?)
            };

            let mut opts = DiffOptions::new();
            opts.include_untracked(false);

            let diff = repo.diff_tree_to_workdir_with_index(head_tree.as_ref(), Some(&mut opts))?;

            let mut stats = Vec::new();
            for (delta_idx, delta) in diff.deltas().enumerate() {
                let Some(kind) = delta_kind(delta.status()) else {
                    continue;
                };

                let path = delta
                    .new_file()
                    .path()
                    .or_else(|| delta.old_file().path())
                    .map(|p| p.to_string_lossy().to_string())
                    .unwrap_or_default();

                let (insertions, deletions, is_binary) = match Patch::from_diff(&diff, delta_idx)? {
                    Some(patch) => {
                        let (_, insertions, deletions) = patch.line_stats()?;
                        (insertions, deletions, patch.delta().flags().is_binary())
                    }
                    None => (0, 0, delta.flags().is_binary()),
                };

                stats.push(FileDiffStat {
                    path,
                    kind,
                    insertions,
                    deletions,
                    is_binary,
                });
            }

            Ok(stats)
        })
    }
}

fn delta_kind(delta: Delta) -> Option<ChangeKind> {
    match delta {
        Delta::Added => Some(ChangeKind::Added),
        Delta::Deleted => Some(ChangeKind::Deleted),
        Delta::Modified | Delta::Conflicted => Some(ChangeKind::Modified),
        Delta::Renamed => Some(ChangeKind::Renamed),
        Delta::Copied => Some(ChangeKind::Copied),
        Delta::Typechange => Some(ChangeKind::TypeChanged),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crate::git::{Git2Backend, VcsBackend};
    use crate::models::ChangeKind;
    use crate::test_support::FixtureRepo;

    #[test]
    fn clean_tree_has_no_stats() {
        let fixture = FixtureRepo::init();
        fixture.commit_file("a.txt", "one\n", "Initial");
        let stats = Git2Backend::default().diff_summary(fixture.path()).unwrap();
        assert!(stats.is_empty());
    }

    #[test]
    fn counts_staged_and_unstaged_lines() {
        let fixture = FixtureRepo::init();
        fixture.commit_file("a.txt", "one\ntwo\n", "Initial");
        fixture.commit_file("b.txt", "keep\n", "Second");

        fixture.write_file("a.txt", "one\nTWO\nthree\n");
        fixture.write_file("c.txt", "new\n");
        fixture.stage("c.txt");
        fixture.write_file("untracked.txt", "ignored by diff\n");

        let stats = Git2Backend::default().diff_summary(fixture.path()).unwrap();
        assert_eq!(stats.len(), 2);

        let a = stats.iter().find(|s| s.path == "a.txt").unwrap();
        assert_eq!(a.kind, ChangeKind::Modified);
        assert_eq!(a.insertions, 2);
        assert_eq!(a.deletions, 1);
        assert!(!a.is_binary);

        let c = stats.iter().find(|s| s.path == "c.txt").unwrap();
        assert_eq!(c.kind, ChangeKind::Added);
        assert_eq!(c.insertions, 1);
        assert_eq!(c.deletions, 0);
    }

    #[test]
    fn unborn_head_diffs_against_empty_tree() {
        let fixture = FixtureRepo::init();
        fixture.write_file("first.txt", "a\nb\n");
        fixture.stage("first.txt");

        let stats = Git2Backend::default().diff_summary(fixture.path()).unwrap();
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].kind, ChangeKind::Added);
        assert_eq!(stats[0].insertions, 2);
    }
}
