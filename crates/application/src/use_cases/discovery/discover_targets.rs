use crate::ports::TargetDiscovery;
use coredns_probe_domain::{DomainError, Target};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, warn};

/// Use case: ask the discovery collaborator for resolver addresses and turn
/// them into a de-duplicated, ordered target list.
pub struct DiscoverTargetsUseCase {
    discovery: Arc<dyn TargetDiscovery>,
}

impl DiscoverTargetsUseCase {
    pub fn new(discovery: Arc<dyn TargetDiscovery>) -> Self {
        Self { discovery }
    }

    pub fn source(&self) -> String {
        self.discovery.describe()
    }

    pub async fn execute(&self) -> Result<Vec<Target>, DomainError> {
        let addresses = self.discovery.discover().await?;

        let mut seen = HashSet::with_capacity(addresses.len());
        let mut targets = Vec::with_capacity(addresses.len());
        for address in &addresses {
            match address.parse::<Target>() {
                Ok(target) => {
                    if seen.insert(target.clone()) {
                        targets.push(target);
                    }
                }
                Err(e) => {
                    warn!(address = %address, error = %e, "Skipping invalid endpoint address");
                }
            }
        }

        if targets.is_empty() {
            return Err(DomainError::NoTargetsDiscovered(self.discovery.describe()));
        }

        info!(
            source = %self.discovery.describe(),
            count = targets.len(),
            endpoints = ?targets.iter().map(Target::as_str).collect::<Vec<_>>(),
            "Resolver endpoints discovered"
        );
        Ok(targets)
    }
}
