//! Integration tests for the snapshot sync engine.

use base64::Engine;
use chrono::Utc;
use docgate::mocks::{MockObjectStore, MockSnapshotStore};
use docgate::{DocumentSnapshot, SyncEngine, SyncOutcome, SyncReport};

fn engine(
    objects: &MockObjectStore,
    snapshots: &MockSnapshotStore,
) -> SyncEngine<MockObjectStore, MockSnapshotStore> {
    SyncEngine::new(objects.clone(), snapshots.clone())
}

fn outcome_for<'a>(report: &'a SyncReport, key: &str) -> &'a SyncOutcome {
    &report
        .results
        .iter()
        .find(|r| r.key == key)
        .unwrap_or_else(|| panic!("no result for {key}"))
        .outcome
}

#[tokio::test]
async fn mirrors_only_objects_missing_or_outdated() {
    let objects = MockObjectStore::new();
    objects.put("k1", "v1", b"one");
    objects.put("k2", "v1", b"two");

    let snapshots = MockSnapshotStore::new();
    snapshots.seed(DocumentSnapshot {
        key: "k1".to_string(),
        version: "v1".to_string(),
        content_base64: base64::engine::general_purpose::STANDARD.encode(b"one"),
        updated_at: Utc::now(),
    });
    let seeded_at = snapshots.get_row("k1").updated_at;

    let report = engine(&objects, &snapshots).sync().await.unwrap();

    // Only k2 needed syncing; k1 was already at v1 and is untouched.
    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results[0].key, "k2");
    assert_eq!(
        *outcome_for(&report, "k2"),
        SyncOutcome::Synced {
            version: "v1".to_string()
        }
    );
    assert_eq!(snapshots.get_row("k1").updated_at, seeded_at);
    assert_eq!(
        snapshots.get_row("k2").content_base64,
        base64::engine::general_purpose::STANDARD.encode(b"two")
    );
}

#[tokio::test]
async fn second_run_with_no_changes_writes_nothing() {
    let objects = MockObjectStore::new();
    objects.put("k1", "v1", b"one");
    objects.put("k2", "v1", b"two");
    let snapshots = MockSnapshotStore::new();
    let sync = engine(&objects, &snapshots);

    let first = sync.sync().await.unwrap();
    assert_eq!(first.synced_count(), 2);
    assert_eq!(snapshots.upsert_count(), 2);

    let second = sync.sync().await.unwrap();
    assert!(second.results.is_empty());
    assert_eq!(snapshots.upsert_count(), 2);
}

#[tokio::test]
async fn version_change_triggers_a_rewrite() {
    let objects = MockObjectStore::new();
    objects.put("k1", "v1", b"old bytes");
    let snapshots = MockSnapshotStore::new();
    let sync = engine(&objects, &snapshots);

    sync.sync().await.unwrap();

    objects.put("k1", "v2", b"new bytes");
    let report = sync.sync().await.unwrap();

    assert_eq!(
        *outcome_for(&report, "k1"),
        SyncOutcome::Synced {
            version: "v2".to_string()
        }
    );
    let row = snapshots.get_row("k1");
    assert_eq!(row.version, "v2");
    assert_eq!(
        row.content_base64,
        base64::engine::general_purpose::STANDARD.encode(b"new bytes")
    );
}

#[tokio::test]
async fn one_object_failing_does_not_block_the_others() {
    let objects = MockObjectStore::new();
    objects.put("broken", "v1", b"unreachable");
    objects.put("fine", "v1", b"reachable");
    objects.poison("broken");
    let snapshots = MockSnapshotStore::new();

    let report = engine(&objects, &snapshots).sync().await.unwrap();

    assert_eq!(report.results.len(), 2);
    assert_eq!(report.synced_count(), 1);
    assert_eq!(report.failed_count(), 1);
    assert!(matches!(
        outcome_for(&report, "broken"),
        SyncOutcome::Failed { .. }
    ));
    assert!(matches!(
        outcome_for(&report, "fine"),
        SyncOutcome::Synced { .. }
    ));
    // The healthy object's snapshot landed.
    assert_eq!(snapshots.get_row("fine").version, "v1");
}

#[tokio::test]
async fn object_vanishing_between_list_and_fetch_is_a_per_object_failure() {
    let objects = MockObjectStore::new();
    objects.put("ghost", "v1", b"now you see me");
    objects.vanish("ghost");
    let snapshots = MockSnapshotStore::new();

    let report = engine(&objects, &snapshots).sync().await.unwrap();

    match outcome_for(&report, "ghost") {
        SyncOutcome::Failed { reason } => assert!(reason.contains("missing")),
        other => panic!("expected failure, got {other:?}"),
    }
    assert_eq!(snapshots.upsert_count(), 0);
}

#[tokio::test]
async fn snapshots_of_deleted_objects_are_left_in_place() {
    let objects = MockObjectStore::new();
    objects.put("k1", "v1", b"one");
    let snapshots = MockSnapshotStore::new();
    let sync = engine(&objects, &snapshots);

    sync.sync().await.unwrap();
    objects.remove("k1");

    let report = sync.sync().await.unwrap();

    // Deletions are never reconciled; the stale snapshot stays readable.
    assert!(report.results.is_empty());
    assert_eq!(snapshots.get_row("k1").version, "v1");
}

#[tokio::test]
async fn overlapping_runs_converge_without_corruption() {
    let objects = MockObjectStore::new();
    objects.put("k1", "v1", b"one");
    objects.put("k2", "v1", b"two");
    let snapshots = MockSnapshotStore::new();
    let sync = engine(&objects, &snapshots);

    let (a, b) = tokio::join!(sync.sync(), sync.sync());
    a.unwrap();
    b.unwrap();

    // Worst case is a redundant rewrite of identical rows.
    assert_eq!(snapshots.get_row("k1").version, "v1");
    assert_eq!(snapshots.get_row("k2").version, "v1");

    let after = sync.sync().await.unwrap();
    assert!(after.results.is_empty());
}
