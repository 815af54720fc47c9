use coredns_probe_application::ports::TargetDiscovery;
use coredns_probe_application::services::TargetRegistry;
use coredns_probe_application::use_cases::{
    BuildSummaryUseCase, DiscoverTargetsUseCase, ProbeTargetUseCase, RefreshTargetsUseCase,
    RunProbeTickUseCase,
};
use coredns_probe_domain::Config;
use coredns_probe_infrastructure::dns::DnsProbeResolver;
use coredns_probe_infrastructure::metrics::ProbeMetrics;
use std::sync::Arc;
use tracing::{error, info};

pub struct ProbeServices {
    pub registry: Arc<TargetRegistry>,
    pub metrics: Arc<ProbeMetrics>,
    pub tick: Arc<RunProbeTickUseCase>,
    pub summary: Arc<BuildSummaryUseCase>,
    pub refresh: Option<Arc<RefreshTargetsUseCase>>,
}

impl ProbeServices {
    /// Run the initial discovery and wire the probe pipeline around its result.
    /// Failing or empty discovery is fatal here.
    pub async fn new(
        config: &Config,
        discovery: Arc<dyn TargetDiscovery>,
    ) -> anyhow::Result<Self> {
        let discover = Arc::new(DiscoverTargetsUseCase::new(discovery));
        let targets = match discover.execute().await {
            Ok(targets) => targets,
            Err(e) => {
                error!(source = %discover.source(), error = %e, "Endpoint discovery failed");
                return Err(e.into());
            }
        };
        info!(
            count = targets.len(),
            domain = %config.probe.domain,
            record_type = %config.probe.record_type,
            "Probing resolver endpoints"
        );

        let registry = Arc::new(TargetRegistry::new(targets));
        let metrics = Arc::new(ProbeMetrics::new()?);

        let resolver = Arc::new(
            DnsProbeResolver::new(
                &config.probe.domain,
                config.probe.record_type,
                config.probe.dns_port,
            )
            .with_tcp_fallback(config.probe.tcp_fallback),
        );
        let probe = Arc::new(ProbeTargetUseCase::new(
            resolver,
            metrics.clone(),
            config.probe.query_timeout(),
        ));

        let refresh = config
            .discovery
            .refresh_interval()
            .map(|_| {
                Arc::new(RefreshTargetsUseCase::new(
                    discover.clone(),
                    registry.clone(),
                    metrics.clone(),
                ))
            });

        Ok(Self {
            tick: Arc::new(RunProbeTickUseCase::new(registry.clone(), probe)),
            summary: Arc::new(BuildSummaryUseCase::new(registry.clone())),
            registry,
            metrics,
            refresh,
        })
    }
}
