use super::DiscoverTargetsUseCase;
use crate::ports::MetricsSink;
use crate::services::{RegistryChange, TargetRegistry};
use coredns_probe_domain::DomainError;
use std::sync::Arc;

/// Use case: re-run discovery and swap the result into the registry.
///
/// A failed or empty discovery leaves the current target set in place.
/// Metric series of removed targets are dropped after the swap.
pub struct RefreshTargetsUseCase {
    discover: Arc<DiscoverTargetsUseCase>,
    registry: Arc<TargetRegistry>,
    metrics: Arc<dyn MetricsSink>,
}

impl RefreshTargetsUseCase {
    pub fn new(
        discover: Arc<DiscoverTargetsUseCase>,
        registry: Arc<TargetRegistry>,
        metrics: Arc<dyn MetricsSink>,
    ) -> Self {
        Self {
            discover,
            registry,
            metrics,
        }
    }

    pub async fn execute(&self) -> Result<RegistryChange, DomainError> {
        let targets = self.discover.execute().await?;
        let change = self.registry.replace(targets);
        for target in &change.removed {
            self.metrics.forget(target);
        }
        Ok(change)
    }
}
