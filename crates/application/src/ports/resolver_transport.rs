use async_trait::async_trait;
use coredns_probe_domain::{DomainError, Target};

/// Performs one name resolution directed at one specific server.
///
/// Implementations must not retry and must not fall back to the system
/// resolver. The deadline is applied by the caller, so a lookup may simply
/// never return.
#[async_trait]
pub trait ResolverTransport: Send + Sync {
    async fn lookup(&self, target: &Target) -> Result<(), DomainError>;
}
