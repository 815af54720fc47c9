//! One-shot DNS transports. None of them enforce a deadline; the probe
//! wraps the whole lookup in its own.

pub mod tcp;
pub mod udp;

use coredns_probe_domain::DomainError;
use std::net::SocketAddr;

#[derive(Debug)]
pub struct TransportResponse {
    pub bytes: Vec<u8>,

    pub protocol_used: &'static str,
}

pub enum Transport {
    Udp(udp::UdpTransport),
    Tcp(tcp::TcpTransport),
}

impl Transport {
    pub fn udp(server_addr: SocketAddr) -> Self {
        Self::Udp(udp::UdpTransport::new(server_addr))
    }

    pub fn tcp(server_addr: SocketAddr) -> Self {
        Self::Tcp(tcp::TcpTransport::new(server_addr))
    }

    pub async fn send(&self, message_bytes: &[u8]) -> Result<TransportResponse, DomainError> {
        match self {
            Self::Udp(t) => t.send(message_bytes).await,
            Self::Tcp(t) => t.send(message_bytes).await,
        }
    }
}
