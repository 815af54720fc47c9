use crate::RecordType;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProbeConfig {
    /// Name resolved by every probe
    #[serde(default = "default_domain")]
    pub domain: String,

    #[serde(default)]
    pub record_type: RecordType,

    #[serde(default = "default_dns_port")]
    pub dns_port: u16,

    /// Per-probe deadline in milliseconds
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,

    /// Tick cadence in milliseconds
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    #[serde(default = "default_summary_interval_secs")]
    pub summary_interval_secs: u64,

    /// Repeat a truncated UDP answer over TCP within the same deadline
    #[serde(default = "default_tcp_fallback")]
    pub tcp_fallback: bool,
}

impl ProbeConfig {
    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn summary_interval(&self) -> Duration {
        Duration::from_secs(self.summary_interval_secs)
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            domain: default_domain(),
            record_type: RecordType::default(),
            dns_port: default_dns_port(),
            query_timeout_ms: default_query_timeout_ms(),
            interval_ms: default_interval_ms(),
            summary_interval_secs: default_summary_interval_secs(),
            tcp_fallback: default_tcp_fallback(),
        }
    }
}

fn default_domain() -> String {
    "bing.com".to_string()
}

fn default_dns_port() -> u16 {
    53
}

fn default_query_timeout_ms() -> u64 {
    100
}

fn default_interval_ms() -> u64 {
    100
}

fn default_summary_interval_secs() -> u64 {
    10
}

fn default_tcp_fallback() -> bool {
    true
}
