use super::forwarding::{MessageBuilder, ResponseParser};
use super::transport::Transport;
use async_trait::async_trait;
use coredns_probe_application::ports::ResolverTransport;
use coredns_probe_domain::{DomainError, RecordType, Target};
use std::sync::Arc;
use tracing::{debug, trace};

/// Sends the probe question straight to a target's DNS port.
///
/// A truncated UDP reply is retried once over TCP when `tcp_fallback` is on;
/// both legs count as the same lookup and share the caller's deadline.
pub struct DnsProbeResolver {
    domain: Arc<str>,
    record_type: RecordType,
    port: u16,
    tcp_fallback: bool,
}

impl DnsProbeResolver {
    pub fn new(domain: &str, record_type: RecordType, port: u16) -> Self {
        Self {
            domain: Arc::from(domain),
            record_type,
            port,
            tcp_fallback: true,
        }
    }

    pub fn with_tcp_fallback(mut self, enabled: bool) -> Self {
        self.tcp_fallback = enabled;
        self
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

#[async_trait]
impl ResolverTransport for DnsProbeResolver {
    async fn lookup(&self, target: &Target) -> Result<(), DomainError> {
        let server = target.socket_addr(self.port);
        let (id, query) = MessageBuilder::build_query_with_id(&self.domain, &self.record_type)?;

        let mut reply = Transport::udp(server).send(&query).await?;
        ResponseParser::validate_header(id, &reply.bytes, server)?;
        let mut response = ResponseParser::parse(&reply.bytes)?;

        if response.truncated && self.tcp_fallback {
            debug!(endpoint = %target, "Truncated UDP response, retrying over TCP");
            reply = Transport::tcp(server).send(&query).await?;
            ResponseParser::validate_header(id, &reply.bytes, server)?;
            response = ResponseParser::parse(&reply.bytes)?;
        }

        trace!(
            endpoint = %target,
            protocol = reply.protocol_used,
            rcode = ?response.rcode,
            answers = response.answer_count,
            "Lookup finished"
        );
        ResponseParser::check_rcode(&response, server)
    }
}
