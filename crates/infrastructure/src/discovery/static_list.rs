use async_trait::async_trait;
use coredns_probe_application::ports::TargetDiscovery;
use coredns_probe_domain::DomainError;

/// Targets given up front in the configuration, no cluster involved.
pub struct StaticDiscovery {
    addresses: Vec<String>,
}

impl StaticDiscovery {
    pub fn new(addresses: Vec<String>) -> Self {
        Self { addresses }
    }
}

#[async_trait]
impl TargetDiscovery for StaticDiscovery {
    async fn discover(&self) -> Result<Vec<String>, DomainError> {
        Ok(self.addresses.clone())
    }

    fn describe(&self) -> String {
        format!("static target list ({} entries)", self.addresses.len())
    }
}
