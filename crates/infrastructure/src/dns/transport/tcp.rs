use super::TransportResponse;
use coredns_probe_domain::DomainError;
use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::trace;

/// TCP transport with the two-byte length prefix of RFC 1035 §4.2.2.
/// One connection per query.
pub struct TcpTransport {
    server_addr: SocketAddr,
}

impl TcpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    pub async fn send(&self, message_bytes: &[u8]) -> Result<TransportResponse, DomainError> {
        let server = self.server_addr.to_string();

        let mut stream = TcpStream::connect(self.server_addr)
            .await
            .map_err(|e| DomainError::from_io(&server, &e))?;
        stream
            .set_nodelay(true)
            .map_err(|e| DomainError::from_io(&server, &e))?;

        send_with_length_prefix(&mut stream, message_bytes, &server).await?;
        trace!(server = %self.server_addr, message_len = message_bytes.len(), "TCP query sent");

        let response_bytes = read_with_length_prefix(&mut stream, &server).await?;
        trace!(
            server = %self.server_addr,
            response_len = response_bytes.len(),
            "TCP response received"
        );

        Ok(TransportResponse {
            bytes: response_bytes,
            protocol_used: "TCP",
        })
    }
}

pub(crate) async fn send_with_length_prefix<S>(
    stream: &mut S,
    message_bytes: &[u8],
    server: &str,
) -> Result<(), DomainError>
where
    S: AsyncWriteExt + Unpin,
{
    let length = u16::try_from(message_bytes.len()).map_err(|_| {
        DomainError::InvalidDnsResponse(format!(
            "Query of {} bytes does not fit a TCP frame",
            message_bytes.len()
        ))
    })?;

    stream
        .write_all(&length.to_be_bytes())
        .await
        .map_err(|e| DomainError::from_io(server, &e))?;
    stream
        .write_all(message_bytes)
        .await
        .map_err(|e| DomainError::from_io(server, &e))?;
    stream
        .flush()
        .await
        .map_err(|e| DomainError::from_io(server, &e))?;

    Ok(())
}

pub(crate) async fn read_with_length_prefix<S>(
    stream: &mut S,
    server: &str,
) -> Result<Vec<u8>, DomainError>
where
    S: AsyncReadExt + Unpin,
{
    let mut len_buf = [0u8; 2];
    stream
        .read_exact(&mut len_buf)
        .await
        .map_err(|e| DomainError::from_io(server, &e))?;

    let response_len = u16::from_be_bytes(len_buf) as usize;
    let mut response = vec![0u8; response_len];
    stream
        .read_exact(&mut response)
        .await
        .map_err(|e| DomainError::from_io(server, &e))?;

    Ok(response)
}
