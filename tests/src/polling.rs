use std::time::Duration;

use tlsgrade_common::config::PollPolicy;
use tlsgrade_common::models::host::{AnalysisStatus, Host};
use tlsgrade_core::AnalysisError;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::support::*;

fn gaps(start: Instant, times: &[Instant]) -> Vec<Duration> {
    let mut previous = start;
    times
        .iter()
        .map(|&at| {
            let gap = at - previous;
            previous = at;
            gap
        })
        .collect()
}

fn unknown() -> Host {
    host(AnalysisStatus::from("QUEUED".to_string()))
}

fn unknown_with_progress(progress: i32) -> Host {
    let mut host = running(progress, "TESTING_PROTOCOLS");
    host.status = AnalysisStatus::from("QUEUED".to_string());
    host
}

#[tokio::test(start_paused = true)]
async fn cadence_follows_the_reported_phase() {
    let client = ScriptedClient::new()
        .with_start(Ok(host(AnalysisStatus::Dns)))
        .with_statuses([
            Ok(host(AnalysisStatus::Dns)),
            Ok(running(10, "TESTING_PROTOCOLS")),
            Ok(running(60, "TESTING_SUITES")),
            Ok(ready("A")),
        ]);
    let store = SpyStore::new();
    let reporter = RecordingReporter::default();
    let svc = service(&client, &store, &reporter, policy());

    let start = Instant::now();
    let host = svc.run(DOMAIN, &CancellationToken::new()).await.unwrap();

    assert_eq!(host.status, AnalysisStatus::Ready);
    assert_eq!(
        gaps(start, &client.check_times()),
        [5, 5, 10, 10].map(Duration::from_secs)
    );
    assert_eq!(store.saves(), 4);

    let progress: Vec<_> = reporter.reports().into_iter().map(|p| p.progress).collect();
    assert_eq!(progress, [10, 60]);
}

#[tokio::test(start_paused = true)]
async fn falling_back_to_dns_restores_the_short_interval() {
    let client = ScriptedClient::new()
        .with_start(Ok(host(AnalysisStatus::Dns)))
        .with_statuses([
            Ok(running(5, "")),
            Ok(host(AnalysisStatus::Dns)),
            Ok(ready("A")),
        ]);
    let svc = service(&client, &SpyStore::new(), &RecordingReporter::default(), policy());

    let start = Instant::now();
    svc.run(DOMAIN, &CancellationToken::new()).await.unwrap();

    assert_eq!(
        gaps(start, &client.check_times()),
        [5, 10, 5].map(Duration::from_secs)
    );
}

#[tokio::test(start_paused = true)]
async fn gives_up_once_the_wait_budget_is_spent() {
    let policy = PollPolicy {
        max_wait: Duration::from_secs(60),
        ..PollPolicy::default()
    };
    let client = ScriptedClient::new()
        .with_start(Ok(host(AnalysisStatus::InProgress)))
        .repeating(running(50, "TESTING"));
    let svc = service(&client, &SpyStore::new(), &RecordingReporter::default(), policy);

    let err = svc.run(DOMAIN, &CancellationToken::new()).await.unwrap_err();

    match err {
        AnalysisError::Timeout { elapsed, limit, .. } => {
            assert_eq!(limit, Duration::from_secs(60));
            assert!(elapsed > limit);
        }
        other => panic!("expected Timeout, got {other:?}"),
    }
    // checks at 5, 15, 25, 35, 45 and 55 seconds
    assert_eq!(client.check_calls(), 6);
}

#[tokio::test(start_paused = true)]
async fn reply_arriving_after_the_budget_is_discarded() {
    let policy = PollPolicy {
        max_wait: Duration::from_secs(10),
        ..PollPolicy::default()
    };
    let client = ScriptedClient::new()
        .with_start(Ok(host(AnalysisStatus::Dns)))
        .with_statuses([Ok(ready("A"))])
        .slow_checks(Duration::from_secs(30));
    let store = SpyStore::new();
    let svc = service(&client, &store, &RecordingReporter::default(), policy);

    let err = svc.run(DOMAIN, &CancellationToken::new()).await.unwrap_err();

    match err {
        AnalysisError::Timeout { elapsed, limit, .. } => {
            assert_eq!(limit, Duration::from_secs(10));
            assert_eq!(elapsed, Duration::from_secs(35));
        }
        other => panic!("expected Timeout, got {other:?}"),
    }
    assert_eq!(client.check_calls(), 1);
    assert_eq!(store.saves(), 0);
}

#[tokio::test(start_paused = true)]
async fn cancellation_stops_further_checks() {
    let cancel = CancellationToken::new();
    let client = ScriptedClient::new()
        .with_start(Ok(host(AnalysisStatus::Dns)))
        .repeating(running(20, "TESTING"))
        .cancel_on_check(2, cancel.clone());
    let svc = service(&client, &SpyStore::new(), &RecordingReporter::default(), policy());

    let err = svc.run(DOMAIN, &cancel).await.unwrap_err();

    assert!(matches!(err, AnalysisError::Cancelled { .. }));
    assert_eq!(client.check_calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn cancelled_before_start_makes_no_network_calls() {
    let cancel = CancellationToken::new();
    cancel.cancel();
    let client = ScriptedClient::new();
    let svc = service(&client, &SpyStore::new(), &RecordingReporter::default(), policy());

    let err = svc.run(DOMAIN, &cancel).await.unwrap_err();

    assert!(matches!(err, AnalysisError::Cancelled { .. }));
    assert_eq!(client.start_calls(), 0);
    assert_eq!(client.check_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn cancellation_interrupts_a_sleep() {
    let cancel = CancellationToken::new();
    let client = ScriptedClient::new()
        .with_start(Ok(host(AnalysisStatus::InProgress)))
        .repeating(running(20, "TESTING"));
    let svc = service(&client, &SpyStore::new(), &RecordingReporter::default(), policy());

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(12)).await;
        trigger.cancel();
    });

    let start = Instant::now();
    let err = svc.run(DOMAIN, &cancel).await.unwrap_err();

    assert!(matches!(err, AnalysisError::Cancelled { .. }));
    assert_eq!(client.check_calls(), 1);
    assert!(start.elapsed() < Duration::from_secs(15));
}

#[tokio::test(start_paused = true)]
async fn cache_write_failures_do_not_fail_the_run() {
    let client = ScriptedClient::new()
        .with_start(Ok(host(AnalysisStatus::Dns)))
        .with_statuses([Ok(running(30, "TESTING")), Ok(ready("A-"))]);
    let store = SpyStore::failing_writes();
    let svc = service(&client, &store, &RecordingReporter::default(), policy());

    let host = svc.run(DOMAIN, &CancellationToken::new()).await.unwrap();

    assert_eq!(host.endpoints[0].grade, "A-");
    assert_eq!(store.saves(), 2);
}

#[tokio::test(start_paused = true)]
async fn error_while_polling_ends_the_run() {
    let client = ScriptedClient::new()
        .with_start(Ok(host(AnalysisStatus::Dns)))
        .with_statuses([
            Ok(running(10, "TESTING")),
            Ok(failed("Assessment failed: connection refused")),
        ])
        .repeating(ready("A"));
    let store = SpyStore::new();
    let svc = service(&client, &store, &RecordingReporter::default(), policy());

    let err = svc.run(DOMAIN, &CancellationToken::new()).await.unwrap_err();

    assert!(matches!(
        err,
        AnalysisError::RemoteJob { ref message, .. } if message.contains("connection refused")
    ));
    assert_eq!(client.check_calls(), 2);
    assert_eq!(store.saves(), 2);
}

#[tokio::test(start_paused = true)]
async fn unknown_status_keeps_polling_at_the_running_pace() {
    let client = ScriptedClient::new()
        .with_start(Ok(host(AnalysisStatus::Dns)))
        .with_statuses([
            Ok(unknown()),
            Ok(unknown_with_progress(70)),
            Ok(ready("B")),
        ]);
    let reporter = RecordingReporter::default();
    let svc = service(&client, &SpyStore::new(), &reporter, policy());

    let start = Instant::now();
    let host = svc.run(DOMAIN, &CancellationToken::new()).await.unwrap();

    assert_eq!(host.endpoints[0].grade, "B");
    assert_eq!(
        gaps(start, &client.check_times()),
        [5, 10, 10].map(Duration::from_secs)
    );

    let reports = reporter.reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].progress, 70);
    assert_eq!(reports[0].status_details, "TESTING_PROTOCOLS");
}

#[tokio::test(start_paused = true)]
async fn endpoints_without_progress_are_not_reported() {
    let mut waiting = running(-1, "");
    waiting.endpoints.push(
        tlsgrade_common::models::host::Endpoint::new("192.0.2.2").with_progress(35, "TESTING_HEARTBLEED"),
    );
    let client = ScriptedClient::new()
        .with_start(Ok(host(AnalysisStatus::Dns)))
        .with_statuses([Ok(waiting), Ok(ready("A"))]);
    let reporter = RecordingReporter::default();
    let svc = service(&client, &SpyStore::new(), &reporter, policy());

    svc.run(DOMAIN, &CancellationToken::new()).await.unwrap();

    let reports = reporter.reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].ip_address, "192.0.2.2");
    assert_eq!(reports[0].status_details, "TESTING_HEARTBLEED");
}
