use coredns_probe_application::services::TargetRegistry;
use coredns_probe_jobs::ProbeLoopJob;
use std::sync::Arc;
use tokio::time::{sleep, timeout, Duration};
use tokio_util::sync::CancellationToken;

mod helpers;
use helpers::{make_tick, target, CountingTransport};

#[tokio::test]
async fn test_probe_loop_ticks_repeatedly() {
    let registry = Arc::new(TargetRegistry::new(vec![target("10.0.0.1"), target("10.0.0.2")]));
    let transport = Arc::new(CountingTransport::new(Duration::ZERO));
    let tick = make_tick(registry.clone(), transport.clone(), Duration::from_millis(50));
    let token = CancellationToken::new();

    let job = Arc::new(
        ProbeLoopJob::new(tick, Duration::from_millis(10)).with_cancellation(token.clone()),
    );
    let handle = tokio::spawn(job.start());

    sleep(Duration::from_millis(75)).await;
    token.cancel();
    timeout(Duration::from_secs(1), handle).await.unwrap().unwrap();

    assert!(transport.calls() >= 6, "calls = {}", transport.calls());
    let stats = registry.stats_for(&target("10.0.0.1")).unwrap().snapshot();
    assert!(stats.total >= 3);
    assert_eq!(stats.failed, 0);
}

#[tokio::test]
async fn test_probe_loop_stops_on_cancel() {
    let registry = Arc::new(TargetRegistry::new(vec![target("10.0.0.1")]));
    let transport = Arc::new(CountingTransport::new(Duration::ZERO));
    let tick = make_tick(registry, transport.clone(), Duration::from_millis(50));
    let token = CancellationToken::new();

    let job = Arc::new(
        ProbeLoopJob::new(tick, Duration::from_millis(5)).with_cancellation(token.clone()),
    );
    let handle = tokio::spawn(job.start());
    sleep(Duration::from_millis(20)).await;
    token.cancel();
    timeout(Duration::from_secs(1), handle).await.unwrap().unwrap();

    let after_stop = transport.calls();
    sleep(Duration::from_millis(30)).await;
    assert_eq!(transport.calls(), after_stop);
}

#[tokio::test]
async fn test_slow_tick_never_overlaps_the_next() {
    let registry = Arc::new(TargetRegistry::new(vec![target("10.0.0.1")]));
    let transport = Arc::new(CountingTransport::new(Duration::from_millis(25)));
    let tick = make_tick(registry, transport.clone(), Duration::from_millis(100));
    let token = CancellationToken::new();

    let job = Arc::new(
        ProbeLoopJob::new(tick, Duration::from_millis(5)).with_cancellation(token.clone()),
    );
    let handle = tokio::spawn(job.start());
    sleep(Duration::from_millis(120)).await;
    token.cancel();
    timeout(Duration::from_secs(1), handle).await.unwrap().unwrap();

    assert!(transport.calls() >= 2);
    assert_eq!(transport.max_in_flight(), 1);
}

#[tokio::test]
async fn test_cancel_mid_tick_returns_without_waiting_for_probes() {
    let registry = Arc::new(TargetRegistry::new(vec![target("10.0.0.1")]));
    let transport = Arc::new(CountingTransport::new(Duration::from_millis(500)));
    let tick = make_tick(registry, transport.clone(), Duration::from_secs(1));
    let token = CancellationToken::new();

    let job = Arc::new(
        ProbeLoopJob::new(tick, Duration::from_millis(10)).with_cancellation(token.clone()),
    );
    let handle = tokio::spawn(job.start());
    sleep(Duration::from_millis(20)).await;
    token.cancel();

    timeout(Duration::from_millis(200), handle)
        .await
        .expect("loop should stop without awaiting in-flight probes")
        .unwrap();
    assert_eq!(transport.calls(), 1);
}
