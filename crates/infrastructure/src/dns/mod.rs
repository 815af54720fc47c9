pub mod forwarding;
pub mod probe_resolver;
pub mod transport;

pub use forwarding::{MessageBuilder, ProbeResponse, ResponseParser};
pub use probe_resolver::DnsProbeResolver;
