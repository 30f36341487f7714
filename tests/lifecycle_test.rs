//! Integration tests for the request lifecycle state machine.

use base64::Engine;
use chrono::Utc;
use docgate::config::DocumentConfig;
use docgate::mocks::{
    MockEmailSender, MockObjectStore, MockOperatorNotifier, MockRateLimiter, MockRequestStore,
    MockSnapshotStore,
};
use docgate::{
    CreateOutcome, DocgateError, DocumentRequest, DocumentSnapshot, ReleaseEnvironment, RequestId,
    RequestLifecycle, RequestStatus, SyncEngine, TransitionOutcome,
};
use std::sync::Arc;

type MockEnv = ReleaseEnvironment<
    MockObjectStore,
    MockEmailSender,
    MockOperatorNotifier,
    MockRequestStore,
    MockSnapshotStore,
    MockRateLimiter,
>;

/// Create a test environment with mock providers and the default config
/// (single "resume" kind mapped to "resume.pdf").
fn test_env() -> MockEnv {
    ReleaseEnvironment::new(
        MockObjectStore::new(),
        MockEmailSender::new(),
        MockOperatorNotifier::new(),
        MockRequestStore::new(),
        MockSnapshotStore::new(),
        MockRateLimiter::new(),
        Arc::new(DocumentConfig::default()),
    )
}

fn seed_snapshot(env: &MockEnv, content: &[u8]) {
    env.snapshots.seed(DocumentSnapshot {
        key: "resume.pdf".to_string(),
        version: "v1".to_string(),
        content_base64: base64::engine::general_purpose::STANDARD.encode(content),
        updated_at: Utc::now(),
    });
}

/// Seed a request record in a given status, returning its id as a string.
fn seed_request(env: &MockEnv, status: RequestStatus) -> String {
    let mut request = DocumentRequest::new(
        "resume".to_string(),
        "a@x.com".to_string(),
        "Alice".to_string(),
    );
    request.status = status;
    let id = request.id.to_string();
    env.requests.seed(request);
    id
}

#[tokio::test]
async fn create_inserts_requested_record_and_notifies() {
    let env = test_env();
    let lifecycle = RequestLifecycle::new(env.clone());

    let outcome = lifecycle.create("resume", "a@x.com", "Alice").await.unwrap();
    assert!(matches!(outcome, CreateOutcome::Created(_)));

    let records = env.requests.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status, RequestStatus::Requested);
    assert_eq!(records[0].requester_email, "a@x.com");

    let notifications = env.notifier.notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].request_id, outcome.request_id());
    assert!(notifications[0]
        .accept_url
        .ends_with(&format!("/accept/{}", outcome.request_id())));
}

#[tokio::test]
async fn create_is_idempotent_while_a_request_is_open() {
    let env = test_env();
    let lifecycle = RequestLifecycle::new(env.clone());

    let first = lifecycle.create("resume", "a@x.com", "Alice").await.unwrap();
    let second = lifecycle.create("resume", "a@x.com", "Alice").await.unwrap();

    assert_eq!(
        second,
        CreateOutcome::AlreadyRequested(first.request_id())
    );
    assert_eq!(env.requests.records().len(), 1);
    // No second operator ping either.
    assert_eq!(env.notifier.notifications().len(), 1);
}

#[tokio::test]
async fn create_allows_a_new_request_once_the_old_one_is_terminal() {
    let env = test_env();
    seed_snapshot(&env, b"pdf bytes");
    let lifecycle = RequestLifecycle::new(env.clone());

    let first = lifecycle.create("resume", "a@x.com", "Alice").await.unwrap();
    lifecycle
        .accept(&first.request_id().to_string())
        .await
        .unwrap();

    let again = lifecycle.create("resume", "a@x.com", "Alice").await.unwrap();
    assert!(matches!(again, CreateOutcome::Created(_)));
    assert_eq!(env.requests.records().len(), 2);
}

#[tokio::test]
async fn create_rejects_unsupported_kinds() {
    let env = test_env();
    let lifecycle = RequestLifecycle::new(env.clone());

    let err = lifecycle
        .create("cover-letter", "a@x.com", "Alice")
        .await
        .unwrap_err();
    assert_eq!(
        err,
        DocgateError::UnsupportedDocument {
            kind: "cover-letter".to_string()
        }
    );
    assert!(env.requests.records().is_empty());
}

#[tokio::test]
async fn notifier_failure_does_not_fail_create() {
    let env = test_env();
    env.notifier.fail_notifications(true);
    let lifecycle = RequestLifecycle::new(env.clone());

    let outcome = lifecycle.create("resume", "a@x.com", "Alice").await.unwrap();
    assert!(matches!(outcome, CreateOutcome::Created(_)));
    // The record is durable even though the operator never heard about it.
    assert_eq!(env.requests.records().len(), 1);
}

#[tokio::test]
async fn accept_unknown_or_malformed_id_is_not_found() {
    let env = test_env();
    let lifecycle = RequestLifecycle::new(env);

    let err = lifecycle.accept("not-a-uuid").await.unwrap_err();
    assert!(matches!(err, DocgateError::NotFound { .. }));

    let err = lifecycle
        .accept(&RequestId::generate().to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, DocgateError::NotFound { .. }));
}

#[tokio::test]
async fn accept_on_rejected_request_is_invalid_transition() {
    let env = test_env();
    let id = seed_request(&env, RequestStatus::Rejected);
    let lifecycle = RequestLifecycle::new(env.clone());

    // Regardless of call count.
    for _ in 0..3 {
        let err = lifecycle.accept(&id).await.unwrap_err();
        assert!(matches!(err, DocgateError::InvalidTransition { .. }));
    }
    assert_eq!(env.email.sent_count(), 0);
}

#[tokio::test]
async fn reject_on_accepted_request_is_invalid_transition() {
    let env = test_env();
    let id = seed_request(&env, RequestStatus::Accepted);
    let lifecycle = RequestLifecycle::new(env.clone());

    let err = lifecycle.reject(&id).await.unwrap_err();
    assert!(matches!(err, DocgateError::InvalidTransition { .. }));
    assert_eq!(env.email.sent_count(), 0);
}

#[tokio::test]
async fn accept_sends_document_and_is_idempotent_on_repeat() {
    let env = test_env();
    seed_snapshot(&env, b"pdf bytes");
    let id = seed_request(&env, RequestStatus::Requested);
    let lifecycle = RequestLifecycle::new(env.clone());

    let outcome = lifecycle.accept(&id).await.unwrap();
    assert_eq!(outcome, TransitionOutcome::Applied);

    let sent = env.email.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "a@x.com");
    assert_eq!(sent[0].attachment_filename.as_deref(), Some("resume.pdf"));

    let records = env.requests.records();
    assert_eq!(records[0].status, RequestStatus::Accepted);

    // Second accept on the same id: success, no second email.
    let outcome = lifecycle.accept(&id).await.unwrap();
    assert_eq!(outcome, TransitionOutcome::AlreadyApplied);
    assert_eq!(env.email.sent_count(), 1);
}

#[tokio::test]
async fn accept_without_snapshot_is_recoverable_via_sync() {
    let env = test_env();
    let id = seed_request(&env, RequestStatus::Requested);
    let lifecycle = RequestLifecycle::new(env.clone());

    let err = lifecycle.accept(&id).await.unwrap_err();
    assert_eq!(
        err,
        DocgateError::DocumentUnavailable {
            key: "resume.pdf".to_string()
        }
    );
    // No email, no transition.
    assert_eq!(env.email.sent_count(), 0);
    assert_eq!(env.requests.records()[0].status, RequestStatus::Requested);

    // Mirror the object, then retry.
    env.objects.put("resume.pdf", "v1", b"pdf bytes");
    SyncEngine::new(env.objects.clone(), env.snapshots.clone())
        .sync()
        .await
        .unwrap();

    let outcome = lifecycle.accept(&id).await.unwrap();
    assert_eq!(outcome, TransitionOutcome::Applied);
    assert_eq!(env.email.sent_count(), 1);
}

#[tokio::test]
async fn accept_treats_empty_snapshot_as_unavailable() {
    let env = test_env();
    env.snapshots.seed(DocumentSnapshot {
        key: "resume.pdf".to_string(),
        version: "v1".to_string(),
        content_base64: String::new(),
        updated_at: Utc::now(),
    });
    let id = seed_request(&env, RequestStatus::Requested);

    let err = RequestLifecycle::new(env).accept(&id).await.unwrap_err();
    assert!(matches!(err, DocgateError::DocumentUnavailable { .. }));
}

#[tokio::test]
async fn reject_sends_plain_rejection_and_is_idempotent_on_repeat() {
    let env = test_env();
    let id = seed_request(&env, RequestStatus::Requested);
    let lifecycle = RequestLifecycle::new(env.clone());

    let outcome = lifecycle.reject(&id).await.unwrap();
    assert_eq!(outcome, TransitionOutcome::Applied);

    let sent = env.email.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].template, "request-rejected");
    assert_eq!(sent[0].attachment_filename, None);
    assert_eq!(env.requests.records()[0].status, RequestStatus::Rejected);

    let outcome = lifecycle.reject(&id).await.unwrap();
    assert_eq!(outcome, TransitionOutcome::AlreadyApplied);
    assert_eq!(env.email.sent_count(), 1);

    // And the terminal state is final: accept can never flip it.
    let err = lifecycle.accept(&id).await.unwrap_err();
    assert!(matches!(err, DocgateError::InvalidTransition { .. }));
    assert_eq!(env.requests.records()[0].status, RequestStatus::Rejected);
}

#[tokio::test]
async fn email_failure_still_flips_status() {
    let env = test_env();
    seed_snapshot(&env, b"pdf bytes");
    env.email.fail_sends(true);
    let id = seed_request(&env, RequestStatus::Requested);

    let outcome = RequestLifecycle::new(env.clone()).accept(&id).await.unwrap();

    // The design accepts "email failed but status flips" over leaving the
    // request stuck.
    assert_eq!(outcome, TransitionOutcome::Applied);
    assert_eq!(env.requests.records()[0].status, RequestStatus::Accepted);
}

#[tokio::test]
async fn persist_failure_after_send_is_reported_distinctly() {
    let env = test_env();
    seed_snapshot(&env, b"pdf bytes");
    env.requests.fail_status_updates(true);
    let id = seed_request(&env, RequestStatus::Requested);

    let err = RequestLifecycle::new(env.clone()).accept(&id).await.unwrap_err();

    assert_eq!(err, DocgateError::PostSendPersistFailure { id: id.clone() });
    assert!(err.requires_manual_reconciliation());
    // Exactly one email went out before persistence failed.
    assert_eq!(env.email.sent_count(), 1);
    assert_eq!(env.requests.records()[0].status, RequestStatus::Requested);
}

#[tokio::test]
async fn reject_has_the_same_post_send_persist_semantics() {
    let env = test_env();
    env.requests.fail_status_updates(true);
    let id = seed_request(&env, RequestStatus::Requested);

    let err = RequestLifecycle::new(env.clone()).reject(&id).await.unwrap_err();

    assert!(matches!(err, DocgateError::PostSendPersistFailure { .. }));
    assert_eq!(env.email.sent_count(), 1);
}
