use async_trait::async_trait;
use coredns_probe_domain::DomainError;

#[async_trait]
pub trait TargetDiscovery: Send + Sync {
    /// Resolver addresses in discovery order.
    async fn discover(&self) -> Result<Vec<String>, DomainError>;

    /// Human-readable source, used in logs and diagnostics.
    fn describe(&self) -> String;
}
