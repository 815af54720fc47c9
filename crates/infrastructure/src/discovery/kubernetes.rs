//! Resolver endpoint discovery from the EndpointSlices backing a Service.

use async_trait::async_trait;
use coredns_probe_application::ports::TargetDiscovery;
use coredns_probe_domain::DomainError;
use k8s_openapi::api::discovery::v1::EndpointSlice;
use kube::api::ListParams;
use kube::{Api, Client, Config};
use tracing::debug;

const SERVICE_NAME_LABEL: &str = "kubernetes.io/service-name";

pub struct KubernetesDiscovery {
    client: Client,
    namespace: String,
    service_name: String,
}

impl KubernetesDiscovery {
    /// Build a client from the in-cluster service account, falling back to
    /// `KUBECONFIG` / `~/.kube/config` when not running in a pod.
    pub async fn connect(namespace: &str, service_name: &str) -> Result<Self, DomainError> {
        let config = match Config::incluster() {
            Ok(config) => config,
            Err(e) => {
                debug!(error = %e, "In-cluster config unavailable, loading kubeconfig");
                Config::infer().await.map_err(|e| {
                    DomainError::DiscoveryFailed(format!("loading kubeconfig: {}", e))
                })?
            }
        };

        let client = Client::try_from(config).map_err(|e| {
            DomainError::DiscoveryFailed(format!("creating Kubernetes client: {}", e))
        })?;

        Ok(Self {
            client,
            namespace: namespace.to_string(),
            service_name: service_name.to_string(),
        })
    }

    pub fn label_selector(&self) -> String {
        label_selector_for(&self.service_name)
    }
}

pub fn label_selector_for(service_name: &str) -> String {
    format!("{}={}", SERVICE_NAME_LABEL, service_name)
}

/// Every endpoint address of every slice, in listing order.
pub fn addresses_from_slices(slices: &[EndpointSlice]) -> Vec<String> {
    slices
        .iter()
        .flat_map(|slice| slice.endpoints.iter())
        .flat_map(|endpoint| endpoint.addresses.iter().cloned())
        .collect()
}

#[async_trait]
impl TargetDiscovery for KubernetesDiscovery {
    async fn discover(&self) -> Result<Vec<String>, DomainError> {
        let api: Api<EndpointSlice> = Api::namespaced(self.client.clone(), &self.namespace);
        let params = ListParams::default().labels(&self.label_selector());

        let slices = api.list(&params).await.map_err(|e| {
            DomainError::DiscoveryFailed(format!(
                "listing EndpointSlices in {}: {}",
                self.namespace, e
            ))
        })?;

        debug!(
            namespace = %self.namespace,
            service = %self.service_name,
            slices = slices.items.len(),
            "EndpointSlices listed"
        );
        Ok(addresses_from_slices(&slices.items))
    }

    fn describe(&self) -> String {
        format!("EndpointSlices for {}/{}", self.namespace, self.service_name)
    }
}
