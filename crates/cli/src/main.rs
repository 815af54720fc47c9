use anyhow::Context;
use clap::Parser;
use coredns_probe_api::AppState;
use coredns_probe_domain::config::MetricsConfig;
use coredns_probe_domain::CliOverrides;
use coredns_probe_jobs::{JobRunner, ProbeLoopJob, SummaryReportJob, TargetRefreshJob};
use std::net::{IpAddr, SocketAddr};
use tracing::{info, warn};

mod bootstrap;
mod di;
mod server;

#[derive(Parser, Debug)]
#[command(name = "coredns-probe")]
#[command(version)]
#[command(about = "Continuously probes every CoreDNS endpoint and reports latency and success rate")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE", env = "COREDNS_PROBE_CONFIG")]
    config: Option<String>,

    /// Domain name every probe resolves
    #[arg(long, env = "COREDNS_PROBE_DOMAIN")]
    domain: Option<String>,

    /// Per-query deadline in milliseconds
    #[arg(long, env = "COREDNS_PROBE_TIMEOUT_MS")]
    timeout_ms: Option<u64>,

    /// Probe tick interval in milliseconds
    #[arg(long, env = "COREDNS_PROBE_INTERVAL_MS")]
    interval_ms: Option<u64>,

    /// Console summary interval in seconds
    #[arg(long, env = "COREDNS_PROBE_SUMMARY_SECS")]
    summary_secs: Option<u64>,

    /// DNS port on each endpoint
    #[arg(short = 'p', long, env = "COREDNS_PROBE_DNS_PORT")]
    dns_port: Option<u16>,

    /// Namespace of the DNS service
    #[arg(short = 'n', long, env = "COREDNS_PROBE_NAMESPACE")]
    namespace: Option<String>,

    /// Name of the DNS service whose EndpointSlices are probed
    #[arg(short = 's', long, env = "COREDNS_PROBE_SERVICE")]
    service: Option<String>,

    /// Probe these addresses instead of discovering them (repeatable or comma separated)
    #[arg(short = 't', long = "target", value_delimiter = ',', env = "COREDNS_PROBE_TARGETS")]
    targets: Vec<String>,

    /// Metrics/HTTP port
    #[arg(short = 'm', long, env = "COREDNS_PROBE_METRICS_PORT")]
    metrics_port: Option<u16>,

    /// Metrics/HTTP bind address
    #[arg(short = 'b', long, env = "COREDNS_PROBE_BIND")]
    bind: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "COREDNS_PROBE_LOG_LEVEL")]
    log_level: Option<String>,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            domain: self.domain.clone(),
            query_timeout_ms: self.timeout_ms,
            interval_ms: self.interval_ms,
            summary_interval_secs: self.summary_secs,
            dns_port: self.dns_port,
            namespace: self.namespace.clone(),
            service_name: self.service.clone(),
            static_targets: self.targets.clone(),
            metrics_port: self.metrics_port,
            bind_address: self.bind.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = bootstrap::load_config(cli.config.as_deref(), cli.overrides())?;

    bootstrap::init_logging(&config);

    info!("Starting coredns-probe v{}", env!("CARGO_PKG_VERSION"));
    if config.timeout_exceeds_interval() {
        warn!(
            timeout_ms = config.probe.query_timeout_ms,
            interval_ms = config.probe.interval_ms,
            "Query timeout exceeds probe interval; slow ticks will delay the next one"
        );
    }

    let shutdown = bootstrap::shutdown_token();

    let discovery = di::build_discovery(&config).await?;
    let services = di::ProbeServices::new(&config, discovery).await?;
    info!(
        endpoints = services.registry.len(),
        refresh = services.refresh.is_some(),
        "Probe pipeline ready"
    );

    let mut runner = JobRunner::new()
        .with_probe_loop(ProbeLoopJob::new(
            services.tick.clone(),
            config.probe.interval(),
        ))
        .with_summary_report(SummaryReportJob::new(
            services.summary.clone(),
            config.probe.summary_interval(),
        ))
        .with_shutdown_token(shutdown.clone());
    if let (Some(refresh), Some(interval)) =
        (services.refresh.clone(), config.discovery.refresh_interval())
    {
        runner = runner.with_target_refresh(TargetRefreshJob::new(refresh, interval));
    }

    let web = if config.metrics.enabled {
        let web_addr = metrics_addr(&config.metrics)?;
        let app_state = AppState::new(services.metrics.clone(), services.summary.clone());
        Some(server::spawn_web_server(web_addr, app_state, shutdown.clone()).await?)
    } else {
        info!("Metrics endpoint disabled");
        None
    };

    let jobs = runner.start().await;

    shutdown.cancelled().await;
    info!("Shutting down");

    for job in jobs {
        let _ = job.await;
    }
    if let Some(web) = web {
        let _ = web.await;
    }

    info!("Probe shutdown complete");
    Ok(())
}

/// Bind address of the metrics endpoint; IPv6 literals need no brackets.
fn metrics_addr(metrics: &MetricsConfig) -> anyhow::Result<SocketAddr> {
    let ip: IpAddr = metrics
        .bind_address
        .trim_start_matches('[')
        .trim_end_matches(']')
        .parse()
        .with_context(|| format!("Invalid metrics bind address {}", metrics.bind_address))?;
    Ok(SocketAddr::new(ip, metrics.port))
}
