//! coredns-probe domain layer
pub mod config;
pub mod endpoint_stats;
pub mod errors;
pub mod probe;
pub mod record_type;
pub mod target;

pub use config::{CliOverrides, Config, ConfigError, DiscoveryProvider};
pub use endpoint_stats::{EndpointSnapshot, EndpointStats};
pub use errors::DomainError;
pub use probe::{ProbeOutcome, ProbeRecord};
pub use record_type::RecordType;
pub use target::Target;
