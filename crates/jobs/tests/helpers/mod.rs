#![allow(dead_code)]

use async_trait::async_trait;
use coredns_probe_application::ports::{MetricsSink, ResolverTransport, TargetDiscovery};
use coredns_probe_application::services::TargetRegistry;
use coredns_probe_application::use_cases::{ProbeTargetUseCase, RunProbeTickUseCase};
use coredns_probe_domain::{DomainError, ProbeOutcome, Target};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub fn target(ip: &str) -> Target {
    ip.parse().unwrap()
}

/// Answers every lookup after `delay`, tracking concurrency per process.
pub struct CountingTransport {
    delay: Duration,
    calls: AtomicU64,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl CountingTransport {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            calls: AtomicU64::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ResolverTransport for CountingTransport {
    async fn lookup(&self, _target: &Target) -> Result<(), DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(())
    }
}

pub struct NullSink;

impl MetricsSink for NullSink {
    fn observe(&self, _target: &Target, _outcome: ProbeOutcome, _elapsed: Duration) {}

    fn forget(&self, _target: &Target) {}
}

pub fn make_tick(
    registry: Arc<TargetRegistry>,
    transport: Arc<CountingTransport>,
    timeout: Duration,
) -> Arc<RunProbeTickUseCase> {
    let probe = Arc::new(ProbeTargetUseCase::new(transport, Arc::new(NullSink), timeout));
    Arc::new(RunProbeTickUseCase::new(registry, probe))
}

pub struct ScriptedDiscovery {
    response: Mutex<Result<Vec<String>, DomainError>>,
    calls: AtomicU64,
}

impl ScriptedDiscovery {
    pub fn new(addresses: &[&str]) -> Self {
        Self {
            response: Mutex::new(Ok(addresses.iter().map(|a| a.to_string()).collect())),
            calls: AtomicU64::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            response: Mutex::new(Err(DomainError::DiscoveryFailed("api down".to_string()))),
            calls: AtomicU64::new(0),
        }
    }

    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TargetDiscovery for ScriptedDiscovery {
    async fn discover(&self) -> Result<Vec<String>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response.lock().unwrap().clone()
    }

    fn describe(&self) -> String {
        "scripted".to_string()
    }
}
