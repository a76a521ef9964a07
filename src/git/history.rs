use git2::Sort;
use std::path::Path;

use crate::git::backend::BackendResult;
use crate::git::repository::{commit_to_record, head_is_unborn, Git2Backend};
use crate::models::CommitRecord;

impl Git2Backend {
    /// Walk history from `reference` (or HEAD), newest first.
    ///
    /// An unborn HEAD yields an empty history rather than an error.
    pub fn get_log(
        &self,
        root: &Path,
        reference: Option<&str>,
        limit: Option<usize>,
    ) -> BackendResult<Vec<CommitRecord>> {
        self.with_repo(root, |repo| {
            let mut revwalk = repo.revwalk()?;
            revwalk.set_sorting(Sort::TIME)?;

            match reference {
                Some(name) => {
                    let start = repo.revparse_single(name)?.peel_to_commit()?;
                    revwalk.push(start.id())?;
                }
                None => {
                    if head_is_unborn(repo)? {
                        return Ok(Vec::new());
                    }
                    revwalk.push_head()?;
                }
            }

            let mut commits = Vec::new();
            for oid in revwalk.take(limit.unwrap_or(usize::MAX)) {
                let commit = repo.find_commit(oid?)?;
                commits.push(commit_to_record(&commit));
            }

            tracing::debug!(
                "Walked {} commits from {}",
                commits.len(),
                reference.unwrap_or("HEAD")
            );
            Ok(commits)
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::git::{Git2Backend, VcsBackend};
    use crate::test_support::FixtureRepo;

    #[test]
    fn log_is_newest_first() {
        let fixture = FixtureRepo::init();
        fixture.commit_file_at("a.txt", "a\n", "First", 1_700_000_000);
        fixture.commit_file_at("b.txt", "b\n", "Second", 1_700_000_100);
        fixture.commit_file_at("c.txt", "c\n", "Third", 1_700_000_200);

        let commits = Git2Backend::default().log(fixture.path(), None, None).unwrap();
        let subjects: Vec<&str> = commits.iter().map(|c| c.subject.as_str()).collect();
        assert_eq!(subjects, vec!["Third", "Second", "First"]);
        assert_eq!(commits[0].author, "Test User");
        assert_eq!(commits[0].short_hash.len(), 7);
        assert!(commits[0].hash.starts_with(&commits[0].short_hash));
        assert_eq!(commits[2].date.timestamp(), 1_700_000_000);
    }

    #[test]
    fn log_respects_limit() {
        let fixture = FixtureRepo::init();
        for i in 0..5 {
            fixture.commit_file(&format!("f{i}.txt"), "x\n", &format!("Commit {i}"));
        }

        let commits = Git2Backend::default()
            .log(fixture.path(), None, Some(2))
            .unwrap();
        assert_eq!(commits.len(), 2);
    }

    #[test]
    fn log_of_unborn_head_is_empty() {
        let fixture = FixtureRepo::init();
        let commits = Git2Backend::default().log(fixture.path(), None, None).unwrap();
        assert!(commits.is_empty());
    }

    #[test]
    fn log_of_reference_starts_at_that_ref() {
        let fixture = FixtureRepo::init();
        fixture.commit_file_at("a.txt", "a\n", "Base", 1_700_000_000);
        fixture.create_branch("old");
        fixture.commit_file_at("b.txt", "b\n", "Newer", 1_700_000_100);

        let commits = Git2Backend::default()
            .log(fixture.path(), Some("old"), None)
            .unwrap();
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].subject, "Base");
    }

    #[test]
    fn log_of_unknown_reference_fails() {
        let fixture = FixtureRepo::init();
        fixture.commit_file("a.txt", "a\n", "Base");
        assert!(
            Git2Backend::default()
                .log(fixture.path(), Some("origin/nope"), None)
                .is_err()
        );
    }
}
