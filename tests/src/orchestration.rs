use std::sync::Arc;

use tlsgrade_common::domain::ValidationError;
use tlsgrade_common::models::host::AnalysisStatus;
use tlsgrade_core::analysis::Stage;
use tlsgrade_core::{AnalysisError, AnalysisService};
use tlsgrade_core::cache::memory::MemoryStore;
use tlsgrade_core::ports::ClientError;
use tokio_util::sync::CancellationToken;

use crate::support::*;

#[tokio::test(start_paused = true)]
async fn invalid_domain_never_reaches_the_network() {
    let client = ScriptedClient::new();
    let store = SpyStore::new();
    let svc = service(&client, &store, &RecordingReporter::default(), policy());

    for bad in ["", "not a domain", "-leading.example.com", "nodot"] {
        let err = svc.run(bad, &CancellationToken::new()).await.unwrap_err();
        assert!(
            matches!(err, AnalysisError::Validation(_)),
            "{bad:?} should fail validation, got {err:?}"
        );
    }

    let too_long = format!("{}.com", "a".repeat(260));
    let err = svc.run(&too_long, &CancellationToken::new()).await.unwrap_err();
    assert!(matches!(err, AnalysisError::Validation(ValidationError::TooLong(_))));

    assert_eq!(client.network_calls(), 0);
    assert_eq!(store.reads() + store.saves(), 0);
}

#[tokio::test(start_paused = true)]
async fn saturated_service_is_not_asked_to_start() {
    let client = ScriptedClient::new().with_info(Ok(service_info(25, 25)));
    let store = SpyStore::new();
    let svc = service(&client, &store, &RecordingReporter::default(), policy());

    let err = svc.run(DOMAIN, &CancellationToken::new()).await.unwrap_err();

    assert!(matches!(
        err,
        AnalysisError::CapacityExceeded { current: 25, max: 25 }
    ));
    assert_eq!(client.info_calls(), 1);
    assert_eq!(client.start_calls(), 0);
    assert_eq!(client.check_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn service_info_failure_aborts_before_start() {
    let client = ScriptedClient::new().with_info(Err(ClientError::Unavailable));
    let svc = service(&client, &SpyStore::new(), &RecordingReporter::default(), policy());

    let err = svc.run(DOMAIN, &CancellationToken::new()).await.unwrap_err();

    assert!(matches!(
        err,
        AnalysisError::Transport { stage: Stage::ServiceInfo, .. }
    ));
    assert_eq!(client.start_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn ready_at_start_returns_without_polling_or_cache() {
    let client = ScriptedClient::new().with_start(Ok(ready("A+")));
    let store = SpyStore::new();
    let svc = service(&client, &store, &RecordingReporter::default(), policy());

    let host = svc.run(DOMAIN, &CancellationToken::new()).await.unwrap();

    assert_eq!(host.status, AnalysisStatus::Ready);
    assert_eq!(host.endpoints[0].grade, "A+");
    assert_eq!(client.check_calls(), 0);
    assert_eq!(store.reads(), 0);
    assert_eq!(store.saves(), 0);
}

#[tokio::test(start_paused = true)]
async fn error_at_start_is_a_remote_failure() {
    let client = ScriptedClient::new().with_start(Ok(failed("Unable to resolve domain name")));
    let svc = service(&client, &SpyStore::new(), &RecordingReporter::default(), policy());

    let err = svc.run(DOMAIN, &CancellationToken::new()).await.unwrap_err();

    match err {
        AnalysisError::RemoteJob { domain, message } => {
            assert_eq!(domain, DOMAIN);
            assert_eq!(message, "Unable to resolve domain name");
        }
        other => panic!("expected RemoteJob, got {other:?}"),
    }
    assert_eq!(client.check_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn finished_cached_result_short_circuits_polling() {
    let client = ScriptedClient::new().with_start(Ok(host(AnalysisStatus::InProgress)));
    let store = SpyStore::new().with_entry(ready("B"));
    let svc = service(&client, &store, &RecordingReporter::default(), policy());

    let host = svc.run(DOMAIN, &CancellationToken::new()).await.unwrap();

    assert_eq!(host, ready("B"));
    assert_eq!(client.check_calls(), 0);
    assert_eq!(store.saves(), 0);
}

#[tokio::test(start_paused = true)]
async fn cached_failure_is_reported_as_remote_failure() {
    let client = ScriptedClient::new().with_start(Ok(host(AnalysisStatus::Dns)));
    let store = SpyStore::new().with_entry(failed("No secure protocols supported"));
    let svc = service(&client, &store, &RecordingReporter::default(), policy());

    let err = svc.run(DOMAIN, &CancellationToken::new()).await.unwrap_err();

    assert!(matches!(err, AnalysisError::RemoteJob { .. }));
    assert_eq!(client.check_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn unfinished_cached_result_is_ignored() {
    let client = ScriptedClient::new()
        .with_start(Ok(host(AnalysisStatus::Dns)))
        .with_statuses([Ok(ready("A"))]);
    let store = SpyStore::new().with_entry(running(40, "TESTING_PROTOCOLS"));
    let svc = service(&client, &store, &RecordingReporter::default(), policy());

    let host = svc.run(DOMAIN, &CancellationToken::new()).await.unwrap();

    assert_eq!(host.endpoints[0].grade, "A");
    assert_eq!(client.check_calls(), 1);
    assert_eq!(
        store.entry(DOMAIN).map(|h| h.status),
        Some(AnalysisStatus::Ready)
    );
}

#[tokio::test(start_paused = true)]
async fn transport_error_during_polling_is_not_retried() {
    let client = ScriptedClient::new()
        .with_start(Ok(host(AnalysisStatus::Dns)))
        .with_statuses([Err(ClientError::ServerError)])
        .repeating(ready("A"));
    let store = SpyStore::new();
    let svc = service(&client, &store, &RecordingReporter::default(), policy());

    let err = svc.run(DOMAIN, &CancellationToken::new()).await.unwrap_err();

    assert!(matches!(
        err,
        AnalysisError::Transport {
            stage: Stage::StatusCheck,
            source: ClientError::ServerError,
            ..
        }
    ));
    assert_eq!(client.check_calls(), 1);
    assert_eq!(store.saves(), 0);
}

#[tokio::test(start_paused = true)]
async fn result_saved_by_one_run_serves_the_next() {
    let shared = Arc::new(MemoryStore::new());

    let first = ScriptedClient::new()
        .with_start(Ok(host(AnalysisStatus::Dns)))
        .with_statuses([Ok(ready("A"))]);
    let svc = AnalysisService::new(
        Box::new(first.clone()),
        Box::new(ArcStore(shared.clone())),
        Box::new(RecordingReporter::default()),
    );
    svc.run(DOMAIN, &CancellationToken::new()).await.unwrap();
    assert_eq!(shared.len(), 1);

    let second = ScriptedClient::new().with_start(Ok(host(AnalysisStatus::InProgress)));
    let svc = AnalysisService::new(
        Box::new(second.clone()),
        Box::new(ArcStore(shared.clone())),
        Box::new(RecordingReporter::default()),
    );
    let host = svc.run("EXAMPLE.com", &CancellationToken::new()).await.unwrap();

    assert_eq!(host.endpoints[0].grade, "A");
    assert_eq!(second.check_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn endpoint_details_validate_the_domain() {
    let client = ScriptedClient::new();
    let svc = service(&client, &SpyStore::new(), &RecordingReporter::default(), policy());

    let err = svc.endpoint_details("bad domain", "192.0.2.1").await.unwrap_err();
    assert!(matches!(err, AnalysisError::Validation(_)));

    let endpoint = svc.endpoint_details(DOMAIN, "192.0.2.1").await.unwrap();
    assert_eq!(endpoint.ip_address, "192.0.2.1");
}
