pub mod discovery;
pub mod errors;
pub mod logging;
pub mod metrics;
pub mod probe;

pub use discovery::{DiscoveryConfig, DiscoveryProvider};
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use metrics::MetricsConfig;
pub use probe::ProbeConfig;

use serde::{Deserialize, Serialize};
use std::path::Path;

const LOCAL_CONFIG_PATH: &str = "coredns-probe.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/coredns-probe/config.toml";

/// Upper bound for every periodic setting: one day.
pub const MAX_PERIOD_SECS: u64 = 86_400;

/// Main configuration structure for coredns-probe
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Probe cadence, deadline and query shape
    #[serde(default)]
    pub probe: ProbeConfig,

    /// Where resolver endpoints come from
    #[serde(default)]
    pub discovery: DiscoveryConfig,

    /// Pull endpoint for the latency histogram
    #[serde(default)]
    pub metrics: MetricsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. coredns-probe.toml in current directory
    /// 3. /etc/coredns-probe/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::get_config_path() {
                Some(found) => Self::from_file(&found)?,
                None => Self::default(),
            },
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    /// Parse a TOML document
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    /// Apply command-line (and environment) overrides to configuration
    pub fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(domain) = overrides.domain {
            self.probe.domain = domain;
        }
        if let Some(timeout) = overrides.query_timeout_ms {
            self.probe.query_timeout_ms = timeout;
        }
        if let Some(interval) = overrides.interval_ms {
            self.probe.interval_ms = interval;
        }
        if let Some(summary) = overrides.summary_interval_secs {
            self.probe.summary_interval_secs = summary;
        }
        if let Some(port) = overrides.dns_port {
            self.probe.dns_port = port;
        }
        if let Some(namespace) = overrides.namespace {
            self.discovery.namespace = namespace;
        }
        if let Some(service) = overrides.service_name {
            self.discovery.service_name = service;
        }
        if !overrides.static_targets.is_empty() {
            self.discovery.provider = DiscoveryProvider::Static;
            self.discovery.static_targets = overrides.static_targets;
        }
        if let Some(port) = overrides.metrics_port {
            self.metrics.port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.metrics.bind_address = bind;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.probe.domain.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Probe domain cannot be empty".to_string(),
            ));
        }
        if self.probe.query_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "Query timeout must be greater than 0".to_string(),
            ));
        }
        if self.probe.interval_ms == 0 {
            return Err(ConfigError::Validation(
                "Probe interval must be greater than 0".to_string(),
            ));
        }
        if self.probe.summary_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "Summary interval must be greater than 0".to_string(),
            ));
        }
        if self.probe.interval_ms > MAX_PERIOD_SECS * 1000
            || self.probe.query_timeout_ms > MAX_PERIOD_SECS * 1000
            || self.probe.summary_interval_secs > MAX_PERIOD_SECS
            || self.discovery.refresh_interval_secs > MAX_PERIOD_SECS
        {
            return Err(ConfigError::Validation(format!(
                "Intervals and timeouts cannot exceed {} seconds",
                MAX_PERIOD_SECS
            )));
        }
        if self.probe.summary_interval_secs * 1000 <= self.probe.interval_ms {
            return Err(ConfigError::Validation(
                "Summary interval must be longer than the probe interval".to_string(),
            ));
        }
        if self.probe.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }
        if self.metrics.enabled && self.metrics.port == 0 {
            return Err(ConfigError::Validation(
                "Metrics port cannot be 0".to_string(),
            ));
        }
        if self.discovery.provider == DiscoveryProvider::Static
            && self.discovery.static_targets.is_empty()
        {
            return Err(ConfigError::Validation(
                "Static discovery requires at least one target".to_string(),
            ));
        }
        Ok(())
    }

    /// True when a probe may still be in flight when the next tick is due.
    pub fn timeout_exceeds_interval(&self) -> bool {
        self.probe.query_timeout_ms > self.probe.interval_ms
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        [LOCAL_CONFIG_PATH, SYSTEM_CONFIG_PATH]
            .into_iter()
            .find(|p| Path::new(p).exists())
            .map(str::to_string)
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub domain: Option<String>,
    pub query_timeout_ms: Option<u64>,
    pub interval_ms: Option<u64>,
    pub summary_interval_secs: Option<u64>,
    pub dns_port: Option<u16>,
    pub namespace: Option<String>,
    pub service_name: Option<String>,
    pub static_targets: Vec<String>,
    pub metrics_port: Option<u16>,
    pub bind_address: Option<String>,
    pub log_level: Option<String>,
}
