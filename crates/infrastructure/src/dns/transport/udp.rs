//! UDP transport (RFC 1035 §4.2.1). Messages are sent as-is; a reply with
//! the TC bit set is the caller's cue to retry over TCP.

use super::TransportResponse;
use coredns_probe_domain::DomainError;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use tokio::net::UdpSocket;
use tracing::trace;

/// Maximum UDP DNS response size with EDNS(0)
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

pub struct UdpTransport {
    server_addr: SocketAddr,
}

impl UdpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    fn bind_addr(&self) -> SocketAddr {
        if self.server_addr.is_ipv4() {
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
        } else {
            SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
        }
    }

    pub async fn send(&self, message_bytes: &[u8]) -> Result<TransportResponse, DomainError> {
        let server = self.server_addr.to_string();

        let socket = UdpSocket::bind(self.bind_addr())
            .await
            .map_err(|e| DomainError::from_io(&server, &e))?;

        // A connected socket drops datagrams from other sources and surfaces
        // ICMP port-unreachable as ConnectionRefused.
        socket
            .connect(self.server_addr)
            .await
            .map_err(|e| DomainError::from_io(&server, &e))?;

        let bytes_sent = socket
            .send(message_bytes)
            .await
            .map_err(|e| DomainError::from_io(&server, &e))?;
        trace!(server = %self.server_addr, bytes_sent, "UDP query sent");

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];
        let bytes_received = socket
            .recv(&mut recv_buf)
            .await
            .map_err(|e| DomainError::from_io(&server, &e))?;
        recv_buf.truncate(bytes_received);

        trace!(server = %self.server_addr, bytes_received, "UDP response received");

        Ok(TransportResponse {
            bytes: recv_buf,
            protocol_used: "UDP",
        })
    }
}
