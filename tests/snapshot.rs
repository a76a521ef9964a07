//! End-to-end snapshots of real repositories built with libgit2.

use std::fs;

use repo_snapshot::models::ChangeKind;
use repo_snapshot::test_support::FixtureRepo;
use repo_snapshot::{SnapshotAggregator, SnapshotError, SnapshotOptions};

#[tokio::test]
async fn snapshot_of_tracked_repository() {
    let fixture = FixtureRepo::init();
    fixture.commit_file_at("README.md", "hello\n", "Initial commit", 1_700_000_000);
    fixture.add_remote("origin", "https://example.com/widget.git");
    fixture.track_upstream("origin", "main");
    fixture.commit_file_at("src/app/main.rs", "fn main() {}\n", "Add app", 1_700_000_100);
    fixture.mkdir("docs");
    fixture.write_file("README.md", "hello\nworld\n");

    let aggregator = SnapshotAggregator::local(SnapshotOptions::default());
    let snapshot = aggregator
        .build_snapshot(&fixture.path().join("src/app"))
        .await
        .expect("snapshot");

    let folder = fixture.path().file_name().unwrap().to_string_lossy();
    assert_eq!(snapshot.root_folder_name, folder);
    assert_eq!(snapshot.remote_url, "https://example.com/widget.git");
    assert_eq!(snapshot.current_branch, "main");

    let subjects: Vec<&str> = snapshot
        .commit_history
        .iter()
        .map(|c| c.subject.as_str())
        .collect();
    assert_eq!(subjects, vec!["Add app", "Initial commit"]);

    let status = &snapshot.working_tree_status;
    assert_eq!(status.tracking.as_deref(), Some("origin/main"));
    assert_eq!(status.ahead, 1);
    assert_eq!(status.unstaged.len(), 1);
    assert_eq!(status.unstaged[0].path, "README.md");

    assert_eq!(snapshot.tracking_branch_history.len(), 1);
    assert_eq!(snapshot.tracking_branch_history[0].subject, "Initial commit");

    assert_eq!(snapshot.commit_diff_stats.len(), 1);
    assert_eq!(snapshot.commit_diff_stats[0].kind, ChangeKind::Modified);
    assert_eq!(snapshot.commit_diff_stats[0].insertions, 1);

    assert_eq!(
        snapshot.remote_config_urls,
        vec!["https://example.com/widget.git"]
    );

    let topology = &snapshot.directory_topology;
    assert_eq!(topology.absolute_path, fixture.path());
    for name in [".git", "src", "src/app", "docs"] {
        assert!(topology.find(name).is_some(), "missing {name}");
    }
    for node in topology.iter() {
        assert_eq!(fixture.path().join(&node.name), node.absolute_path);
    }
}

#[tokio::test]
async fn snapshot_of_fresh_repository() {
    let fixture = FixtureRepo::init();

    let aggregator = SnapshotAggregator::local(SnapshotOptions::default());
    let snapshot = aggregator.build_snapshot(fixture.path()).await.expect("snapshot");

    assert_eq!(snapshot.current_branch, "main");
    assert_eq!(snapshot.remote_url, "");
    assert!(snapshot.commit_history.is_empty());
    assert!(snapshot.tracking_branch_history.is_empty());
    assert!(snapshot.commit_diff_stats.is_empty());
    assert!(snapshot.remote_config_urls.is_empty());
    assert!(snapshot.working_tree_status.is_clean());
}

#[tokio::test]
async fn tracking_history_ignores_local_branch_with_upstream_name() {
    let fixture = FixtureRepo::init();
    fixture.commit_file_at("a.txt", "a\n", "Base", 1_700_000_000);
    fixture.track_upstream("origin", "main");
    fixture.commit_file_at("b.txt", "b\n", "Local only", 1_700_000_100);
    // refs/heads/origin/main now shadows the `origin/main` shorthand.
    fixture.create_branch("origin/main");

    let aggregator = SnapshotAggregator::local(SnapshotOptions::default());
    let snapshot = aggregator.build_snapshot(fixture.path()).await.expect("snapshot");

    let status = &snapshot.working_tree_status;
    assert_eq!(status.tracking.as_deref(), Some("origin/main"));
    assert_eq!(status.tracking_ref.as_deref(), Some("refs/remotes/origin/main"));

    let subjects: Vec<&str> = snapshot
        .tracking_branch_history
        .iter()
        .map(|c| c.subject.as_str())
        .collect();
    assert_eq!(subjects, vec!["Base"]);
}

#[tokio::test]
async fn shallow_search_depth_leaves_topology_unbounded() {
    let fixture = FixtureRepo::init();
    fixture.commit_file("src/app/main.rs", "fn main() {}\n", "Add app");

    let aggregator = SnapshotAggregator::local(SnapshotOptions {
        search_depth: Some(0),
        ..SnapshotOptions::default()
    });
    let snapshot = aggregator
        .build_snapshot(&fixture.path().join("src/app"))
        .await
        .expect("snapshot");

    // .git/refs/heads alone is three levels below the root.
    assert!(snapshot.directory_topology.find(".git/refs/heads").is_some());
    assert!(snapshot.directory_topology.find("src/app").is_some());
}

#[tokio::test]
async fn nested_repository_found_below_start() {
    let (fixture, outer) = FixtureRepo::init_nested("projects/widget");
    fixture.commit_file("lib.rs", "\n", "Initial");
    fs::create_dir_all(outer.join("aaa-empty/sub")).unwrap();

    let aggregator = SnapshotAggregator::local(SnapshotOptions::default());
    let root = aggregator.locate_root(&outer).await.expect("root");
    assert_eq!(root, fixture.path());

    let snapshot = aggregator.build_snapshot(&outer).await.expect("snapshot");
    assert_eq!(snapshot.root_folder_name, "widget");
}

#[tokio::test]
async fn directory_without_repository_fails() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("a/b")).unwrap();

    let aggregator = SnapshotAggregator::local(SnapshotOptions::default());
    let err = aggregator.build_snapshot(dir.path()).await.unwrap_err();
    assert!(matches!(err, SnapshotError::NoRepositoryFound(_)));
}

#[tokio::test]
async fn snapshot_serializes_every_field() {
    let fixture = FixtureRepo::init();
    fixture.commit_file("a.txt", "a\n", "Initial");

    let aggregator = SnapshotAggregator::local(SnapshotOptions::default());
    let snapshot = aggregator.build_snapshot(fixture.path()).await.unwrap();
    let value = serde_json::to_value(&snapshot).unwrap();

    for key in [
        "remote_url",
        "root_folder_name",
        "current_branch",
        "working_tree_status",
        "commit_history",
        "commit_diff_stats",
        "tracking_branch_history",
        "directory_topology",
        "remote_config_urls",
    ] {
        assert!(value.get(key).is_some(), "missing {key}");
    }
    assert_eq!(value["directory_topology"]["name"], ".");
}
