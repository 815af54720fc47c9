use coredns_probe_application::ports::TargetDiscovery;
use coredns_probe_domain::{Config, DiscoveryProvider};
use coredns_probe_infrastructure::discovery::StaticDiscovery;
use std::sync::Arc;

pub async fn build_discovery(config: &Config) -> anyhow::Result<Arc<dyn TargetDiscovery>> {
    match config.discovery.provider {
        DiscoveryProvider::Static => Ok(Arc::new(StaticDiscovery::new(
            config.discovery.static_targets.clone(),
        ))),
        DiscoveryProvider::Kubernetes => kubernetes(config).await,
    }
}

#[cfg(feature = "k8s")]
async fn kubernetes(config: &Config) -> anyhow::Result<Arc<dyn TargetDiscovery>> {
    use anyhow::Context;
    use coredns_probe_infrastructure::discovery::KubernetesDiscovery;

    let discovery =
        KubernetesDiscovery::connect(&config.discovery.namespace, &config.discovery.service_name)
            .await
            .context("Failed to create Kubernetes client")?;
    Ok(Arc::new(discovery))
}

#[cfg(not(feature = "k8s"))]
async fn kubernetes(_config: &Config) -> anyhow::Result<Arc<dyn TargetDiscovery>> {
    anyhow::bail!(
        "built without Kubernetes support; set discovery.provider = \"static\" or pass --target"
    )
}
