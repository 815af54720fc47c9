use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscoveryProvider {
    /// EndpointSlices of a cluster service
    #[default]
    Kubernetes,
    /// Fixed list from configuration
    Static,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DiscoveryConfig {
    #[serde(default)]
    pub provider: DiscoveryProvider,

    #[serde(default = "default_namespace")]
    pub namespace: String,

    #[serde(default = "default_service_name")]
    pub service_name: String,

    #[serde(default)]
    pub static_targets: Vec<String>,

    /// Re-discovery period in seconds; 0 keeps the startup set for the
    /// process lifetime.
    #[serde(default)]
    pub refresh_interval_secs: u64,
}

impl DiscoveryConfig {
    pub fn refresh_interval(&self) -> Option<Duration> {
        (self.refresh_interval_secs > 0).then(|| Duration::from_secs(self.refresh_interval_secs))
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            provider: DiscoveryProvider::default(),
            namespace: default_namespace(),
            service_name: default_service_name(),
            static_targets: Vec::new(),
            refresh_interval_secs: 0,
        }
    }
}

fn default_namespace() -> String {
    "kube-system".to_string()
}

fn default_service_name() -> String {
    "kube-dns".to_string()
}
