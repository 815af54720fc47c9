use async_trait::async_trait;
use coredns_probe_application::ports::{MetricsSink, ResolverTransport, TargetDiscovery};
use coredns_probe_domain::{DomainError, ProbeOutcome, Target};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
pub enum Behavior {
    Succeed,
    SucceedAfter(Duration),
    Fail(DomainError),
    Hang,
    Panic,
}

pub struct MockResolverTransport {
    behaviors: Arc<RwLock<HashMap<Target, Behavior>>>,
    calls: Arc<Mutex<HashMap<Target, u64>>>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

impl MockResolverTransport {
    pub fn new() -> Self {
        Self {
            behaviors: Arc::new(RwLock::new(HashMap::new())),
            calls: Arc::new(Mutex::new(HashMap::new())),
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub async fn set_behavior(&self, target: &Target, behavior: Behavior) {
        self.behaviors.write().await.insert(target.clone(), behavior);
    }

    pub fn call_count(&self, target: &Target) -> u64 {
        self.calls.lock().unwrap().get(target).copied().unwrap_or(0)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

struct InFlightGuard(Arc<AtomicUsize>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ResolverTransport for MockResolverTransport {
    async fn lookup(&self, target: &Target) -> Result<(), DomainError> {
        *self.calls.lock().unwrap().entry(target.clone()).or_insert(0) += 1;

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        let _guard = InFlightGuard(Arc::clone(&self.in_flight));

        let behavior = self
            .behaviors
            .read()
            .await
            .get(target)
            .cloned()
            .unwrap_or(Behavior::Succeed);

        match behavior {
            Behavior::Succeed => Ok(()),
            Behavior::SucceedAfter(delay) => {
                tokio::time::sleep(delay).await;
                Ok(())
            }
            Behavior::Fail(e) => Err(e),
            Behavior::Hang => std::future::pending().await,
            Behavior::Panic => panic!("injected transport panic for {}", target),
        }
    }
}

#[derive(Default)]
pub struct RecordingMetricsSink {
    observations: Mutex<Vec<(Target, ProbeOutcome, Duration)>>,
    forgotten: Mutex<Vec<Target>>,
}

impl RecordingMetricsSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observations(&self) -> Vec<(Target, ProbeOutcome, Duration)> {
        self.observations.lock().unwrap().clone()
    }

    pub fn forgotten(&self) -> Vec<Target> {
        self.forgotten.lock().unwrap().clone()
    }

    pub fn count_for(&self, target: &Target, outcome: ProbeOutcome) -> usize {
        self.observations
            .lock()
            .unwrap()
            .iter()
            .filter(|(t, o, _)| t == target && *o == outcome)
            .count()
    }
}

impl MetricsSink for RecordingMetricsSink {
    fn observe(&self, target: &Target, outcome: ProbeOutcome, elapsed: Duration) {
        self.observations
            .lock()
            .unwrap()
            .push((target.clone(), outcome, elapsed));
    }

    fn forget(&self, target: &Target) {
        self.forgotten.lock().unwrap().push(target.clone());
    }
}

pub struct MockTargetDiscovery {
    response: Arc<RwLock<Result<Vec<String>, DomainError>>>,
    call_count: Arc<AtomicU64>,
}

impl MockTargetDiscovery {
    pub fn with_addresses(addresses: &[&str]) -> Self {
        Self {
            response: Arc::new(RwLock::new(Ok(addresses
                .iter()
                .map(|a| a.to_string())
                .collect()))),
            call_count: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn failing(error: DomainError) -> Self {
        Self {
            response: Arc::new(RwLock::new(Err(error))),
            call_count: Arc::new(AtomicU64::new(0)),
        }
    }

    pub async fn set_addresses(&self, addresses: &[&str]) {
        *self.response.write().await = Ok(addresses.iter().map(|a| a.to_string()).collect());
    }

    pub async fn set_error(&self, error: DomainError) {
        *self.response.write().await = Err(error);
    }

    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl TargetDiscovery for MockTargetDiscovery {
    async fn discover(&self) -> Result<Vec<String>, DomainError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        self.response.read().await.clone()
    }

    fn describe(&self) -> String {
        "test/kube-dns".to_string()
    }
}
