//! End-to-end runs of the sync engine against in-memory platforms.

mod common;

use common::*;
use github::Identity;
use leetsync::{SyncEngine, SyncError, SyncMarker, SyncOptions, DEFAULT_MARKER};
use std::time::Duration;

fn owner() -> Identity {
    Identity::new("Ada", "ada@example.com")
}

fn sync_timestamps(host: &FakeHost) -> Vec<i64> {
    let mut stamps: Vec<i64> = host
        .history()
        .iter()
        .filter(|c| c.message.starts_with(DEFAULT_MARKER))
        .map(|c| c.committer.date.timestamp())
        .collect();
    stamps.reverse();
    stamps
}

#[tokio::test]
async fn test_first_run_commits_accepted_submissions_oldest_first() {
    let source = FakeSource::new(vec![
        summary(4, "Valid Parentheses", "python3", ACCEPTED, 1_700_000_400),
        summary(3, "Add Two Numbers", "cpp", WRONG_ANSWER, 1_700_000_300),
        summary(2, "Add Two Numbers", "cpp", ACCEPTED, 1_700_000_200),
        summary(1, "Two Sum", "java", ACCEPTED, 1_700_000_100),
    ]);
    let host = FakeHost::with_initial_commit(&owner());

    let engine = SyncEngine::new(source, host.clone(), test_options(20));
    let report = engine.run().await.unwrap();

    assert_eq!(report.checkpoint.resume_timestamp, 0);
    assert_eq!(report.pending, 3);
    let ids: Vec<u64> = report.committed.iter().map(|c| c.submission_id).collect();
    assert_eq!(ids, vec![1, 2, 4]);
    assert_eq!(
        sync_timestamps(&host),
        vec![1_700_000_100, 1_700_000_200, 1_700_000_400]
    );

    // commits chain onto the initial commit and carry the repository owner
    let history = host.history();
    assert_eq!(history.len(), 4);
    assert_eq!(history[0].sha, report.head.commit_sha);
    for commit in &history[..3] {
        assert_eq!(commit.author.identity(), owner());
        assert_eq!(commit.author.date, commit.committer.date);
    }

    let files = host.head_files();
    assert!(files.contains_key("README.md"));
    assert!(files.contains_key("two_sum/two-sum.java"));
    assert!(files.contains_key("add_two_numbers/add-two-numbers.cpp"));
    assert!(files.contains_key("valid_parentheses/valid-parentheses.py"));
    assert!(files["two_sum/README.md"].starts_with("# [1. Two Sum]"));

    let marker = SyncMarker::parse(DEFAULT_MARKER, &history[0].message).unwrap();
    assert_eq!(marker.title, "Valid Parentheses");
    assert_eq!(marker.lang, "python3");
    assert_eq!(marker.difficulty.as_deref(), Some("Easy"));
}

#[tokio::test]
async fn test_second_run_is_a_no_op() {
    let source = FakeSource::new(vec![
        summary(2, "Climbing Stairs", "golang", ACCEPTED, 1_700_000_200),
        summary(1, "Two Sum", "java", ACCEPTED, 1_700_000_100),
    ]);
    let host = FakeHost::with_initial_commit(&owner());
    let engine = SyncEngine::new(source.clone(), host.clone(), test_options(20));

    engine.run().await.unwrap();
    let head = host.head();
    let history_len = host.history().len();

    let report = engine.run().await.unwrap();
    assert!(report.committed.is_empty());
    assert_eq!(report.checkpoint.resume_timestamp, 1_700_000_200);
    assert_eq!(host.head(), head);
    assert_eq!(host.history().len(), history_len);
}

#[tokio::test]
async fn test_listing_stops_at_checkpoint() {
    let source = FakeSource::new(vec![
        summary(4, "D", "cpp", ACCEPTED, 50),
        summary(3, "C", "cpp", ACCEPTED, 40),
        summary(2, "B", "cpp", ACCEPTED, 30),
        summary(1, "A", "cpp", ACCEPTED, 20),
    ]);
    let host = FakeHost::with_initial_commit(&owner());
    host.seed_commit("Sync LeetCode submission - B (cpp)", &owner(), 30, &[]);

    let engine = SyncEngine::new(source.clone(), host.clone(), test_options(1));
    let report = engine.run().await.unwrap();

    assert_eq!(report.checkpoint.resume_timestamp, 30);
    assert_eq!(sync_timestamps(&host), vec![30, 40, 50]);
    // the page holding timestamp 20 is never requested
    assert_eq!(source.list_calls(), vec![0, 1, 2]);
    assert_eq!(source.detail_calls(), vec![3, 4]);
}

#[tokio::test]
async fn test_rejected_submission_does_not_stop_listing() {
    let source = FakeSource::new(vec![
        summary(2, "Two Sum", "cpp", WRONG_ANSWER, 50),
        summary(1, "Two Sum", "cpp", ACCEPTED, 40),
    ]);
    let host = FakeHost::with_initial_commit(&owner());

    let engine = SyncEngine::new(source, host.clone(), test_options(1));
    let report = engine.run().await.unwrap();

    let ids: Vec<u64> = report.committed.iter().map(|c| c.submission_id).collect();
    assert_eq!(ids, vec![1]);
    assert_eq!(sync_timestamps(&host), vec![40]);
}

#[tokio::test]
async fn test_checkpoint_taken_from_newest_marker_commit() {
    let marker_author = Identity::new("Grace", "grace@example.com");
    let host = FakeHost::with_initial_commit(&owner());
    host.seed_commit("Sync LeetCode submission - Old (cpp)", &owner(), 1_600_000_500, &[]);
    host.seed_commit(
        "Sync LeetCode submission - Two Sum (cpp)",
        &marker_author,
        1_672_531_200,
        &[],
    );
    host.seed_commit("Fix typo in README", &owner(), 1_700_000_000, &[]);
    host.seed_commit("Add notes", &owner(), 1_700_000_100, &[]);

    let engine = SyncEngine::new(FakeSource::default(), host, test_options(20));
    let (checkpoint, head) = engine.resolve().await.unwrap();

    assert_eq!(checkpoint.resume_timestamp, 1_672_531_200);
    assert_eq!(checkpoint.author, marker_author);
    assert!(checkpoint.marker_commit.is_some());
    assert_eq!(head.default_branch, "main");
}

#[tokio::test]
async fn test_unregistered_language_aborts_and_keeps_earlier_commits() {
    let source = FakeSource::new(vec![
        summary(3, "Merge Intervals", "rust", ACCEPTED, 60),
        summary(2, "Two Sum", "cpp", ACCEPTED, 50),
        summary(1, "Jump Game", "cpp", ACCEPTED, 40),
    ]);
    let host = FakeHost::with_initial_commit(&owner());
    let engine = SyncEngine::new(source, host.clone(), test_options(20));

    let err = engine.run().await.unwrap_err();
    match &err {
        SyncError::Aborted {
            committed,
            head,
            source,
        } => {
            assert_eq!(*committed, 2);
            assert_eq!(Some(head.clone()), host.head());
            assert!(matches!(
                source.as_ref(),
                SyncError::UnsupportedLanguage { lang } if lang == "rust"
            ));
        }
        other => panic!("expected Aborted, got {other:?}"),
    }
    assert!(err.is_mapping_error());
    assert_eq!(sync_timestamps(&host), vec![40, 50]);
    assert!(!host.head_files().keys().any(|p| p.starts_with("merge_intervals")));

    // the next run resumes after 50 and fails on the same entry without committing
    let err = engine.run().await.unwrap_err();
    assert!(matches!(err, SyncError::UnsupportedLanguage { .. }));
    assert_eq!(sync_timestamps(&host), vec![40, 50]);
}

#[tokio::test]
async fn test_resume_after_failure_matches_clean_run() {
    let listing = vec![
        summary(3, "C", "cpp", ACCEPTED, 300),
        summary(2, "B", "cpp", ACCEPTED, 200),
        summary(1, "A", "cpp", ACCEPTED, 100),
    ];

    let clean = FakeHost::with_initial_commit(&owner());
    SyncEngine::new(FakeSource::new(listing.clone()), clean.clone(), test_options(2))
        .run()
        .await
        .unwrap();

    let flaky = FakeHost::with_initial_commit(&owner());
    flaky.fail_create_commit_at(2);
    let engine = SyncEngine::new(FakeSource::new(listing), flaky.clone(), test_options(2));

    let err = engine.run().await.unwrap_err();
    assert_eq!(err.committed(), 1);
    assert_eq!(sync_timestamps(&flaky), vec![100]);

    let report = engine.run().await.unwrap();
    assert_eq!(report.checkpoint.resume_timestamp, 100);
    assert_eq!(report.committed.len(), 2);

    assert_eq!(sync_timestamps(&flaky), sync_timestamps(&clean));
    assert_eq!(flaky.head_files(), clean.head_files());
}

#[tokio::test]
async fn test_first_page_failure_is_not_retried() {
    let source = FakeSource::new(vec![summary(1, "A", "cpp", ACCEPTED, 100)]);
    source.fail_listing(0, 1);
    let host = FakeHost::with_initial_commit(&owner());

    let engine = SyncEngine::new(source.clone(), host.clone(), test_options(20));
    let err = engine.run().await.unwrap_err();

    assert!(matches!(err, SyncError::Source(_)));
    assert_eq!(source.list_calls(), vec![0]);
    assert_eq!(host.history().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_later_page_and_detail_failures_are_retried() {
    let source = FakeSource::new(vec![
        summary(2, "B", "cpp", ACCEPTED, 200),
        summary(1, "A", "cpp", ACCEPTED, 100),
    ]);
    source.fail_listing(1, 2);
    source.fail_detail(2, 1);
    let host = FakeHost::with_initial_commit(&owner());

    let engine = SyncEngine::new(source.clone(), host.clone(), test_options(1));
    let report = engine.run().await.unwrap();

    assert_eq!(report.committed.len(), 2);
    assert_eq!(source.list_calls(), vec![0, 1, 1, 1]);
    assert_eq!(source.detail_calls(), vec![1, 2, 2]);
}

#[tokio::test]
async fn test_near_duplicate_accepted_submissions_are_skipped() {
    let source = FakeSource::new(vec![
        summary(3, "Two Sum", "cpp", ACCEPTED, 10_000),
        summary(2, "Two Sum", "cpp", ACCEPTED, 9_000),
        summary(1, "Two Sum", "java", ACCEPTED, 8_000),
    ]);
    let host = FakeHost::with_initial_commit(&owner());

    let mut options = test_options(20);
    options.filter_duplicate_secs = 3_600;
    let report = SyncEngine::new(source, host.clone(), options).run().await.unwrap();

    let ids: Vec<u64> = report.committed.iter().map(|c| c.submission_id).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[tokio::test]
async fn test_out_of_order_listing_is_scanned_fully_and_sorted() {
    let source = FakeSource::new(vec![
        summary(4, "D", "cpp", ACCEPTED, 50),
        summary(3, "C", "cpp", ACCEPTED, 70),
        summary(2, "B", "cpp", ACCEPTED, 20),
        summary(1, "A", "cpp", ACCEPTED, 60),
    ]);
    let host = FakeHost::with_initial_commit(&owner());
    host.seed_commit("Sync LeetCode submission - X (cpp)", &owner(), 30, &[]);

    let report = SyncEngine::new(source.clone(), host.clone(), test_options(1))
        .run()
        .await
        .unwrap();

    let stamps: Vec<i64> = report.committed.iter().map(|c| c.timestamp).collect();
    assert_eq!(stamps, vec![50, 60, 70]);
    assert_eq!(source.list_calls(), vec![0, 1, 2, 3]);
}

#[tokio::test]
async fn test_destination_folder_prefixes_paths() {
    let source = FakeSource::new(vec![summary(1, "Two Sum", "python3", ACCEPTED, 100)]);
    let host = FakeHost::with_initial_commit(&owner());

    let mut options = test_options(20);
    options.destination_folder = Some("/problems/".to_string());
    SyncEngine::new(source, host.clone(), options).run().await.unwrap();

    let files = host.head_files();
    assert!(files.contains_key("problems/two_sum/two-sum.py"));
    assert!(files.contains_key("problems/two_sum/README.md"));
}

#[tokio::test]
async fn test_empty_repository_is_a_config_error() {
    let engine = SyncEngine::new(FakeSource::default(), FakeHost::default(), test_options(20));
    let err = engine.run().await.unwrap_err();
    assert!(matches!(err, SyncError::Config(_)));
}

#[tokio::test]
async fn test_default_options_commit_every_accepted_submission() {
    let source = FakeSource::new(vec![
        summary(2, "Two Sum", "cpp", ACCEPTED, 1_700_000_200),
        summary(1, "Two Sum", "cpp", ACCEPTED, 1_700_000_100),
    ]);
    let host = FakeHost::with_initial_commit(&owner());

    let options = SyncOptions {
        page_delay: Duration::ZERO,
        ..SyncOptions::default()
    };
    let report = SyncEngine::new(source, host.clone(), options).run().await.unwrap();

    assert_eq!(report.pending, 2);
    assert_eq!(report.committed.len(), 2);
    assert_eq!(sync_timestamps(&host), vec![1_700_000_100, 1_700_000_200]);
}

#[tokio::test(start_paused = true)]
async fn test_malformed_detail_is_not_retried() {
    let source = FakeSource::new(vec![summary(1, "Two Sum", "cpp", ACCEPTED, 100)]);
    source.malform_detail(1);
    let host = FakeHost::with_initial_commit(&owner());
    let started = tokio::time::Instant::now();

    let err = SyncEngine::new(source.clone(), host.clone(), test_options(20))
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, SyncError::Source(_)));
    assert_eq!(source.detail_calls(), vec![1]);
    assert_eq!(started.elapsed().as_secs(), 0);
    assert_eq!(host.history().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_transient_history_failure_is_retried() {
    let source = FakeSource::new(vec![summary(1, "Two Sum", "cpp", ACCEPTED, 100)]);
    let host = FakeHost::with_initial_commit(&owner());
    host.fail_list_commits(1);

    let report = SyncEngine::new(source, host.clone(), test_options(20))
        .run()
        .await
        .unwrap();

    assert_eq!(report.committed.len(), 1);
    assert_eq!(host.list_commits_calls(), 2);
}
