use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::oneshot;

#[derive(Debug, Clone, Copy)]
pub enum ReplyMode {
    /// Echo the question back with the given rcode; NOERROR carries one A record.
    Answer(u8),
    /// NOERROR with an empty answer section.
    NoData,
    /// Answer over UDP with TC set and no records; answer in full over TCP.
    Truncate,
    WrongId,
    NotAResponse,
    Silent,
}

/// Loopback resolver on 127.0.0.1 listening on UDP and TCP on the same port.
pub struct MockDnsServer {
    addr: SocketAddr,
    udp_queries: Arc<AtomicU64>,
    tcp_queries: Arc<AtomicU64>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(mode: ReplyMode) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = socket.local_addr()?;
        let listener = TcpListener::bind(addr).await?;

        let udp_queries = Arc::new(AtomicU64::new(0));
        let tcp_queries = Arc::new(AtomicU64::new(0));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let udp_count = Arc::clone(&udp_queries);
        let tcp_count = Arc::clone(&tcp_queries);
        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            udp_count.fetch_add(1, Ordering::SeqCst);
                            if let Some(response) = Self::build_response(&buf[..len], mode, false) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                    accepted = listener.accept() => {
                        if let Ok((mut stream, _)) = accepted {
                            tcp_count.fetch_add(1, Ordering::SeqCst);
                            let mut len_buf = [0u8; 2];
                            if stream.read_exact(&mut len_buf).await.is_err() {
                                continue;
                            }
                            let mut query = vec![0u8; u16::from_be_bytes(len_buf) as usize];
                            if stream.read_exact(&mut query).await.is_err() {
                                continue;
                            }
                            if let Some(response) = Self::build_response(&query, mode, true) {
                                let _ = stream.write_all(&(response.len() as u16).to_be_bytes()).await;
                                let _ = stream.write_all(&response).await;
                            }
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            udp_queries,
            tcp_queries,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    pub fn udp_queries(&self) -> u64 {
        self.udp_queries.load(Ordering::SeqCst)
    }

    pub fn tcp_queries(&self) -> u64 {
        self.tcp_queries.load(Ordering::SeqCst)
    }

    fn build_response(query: &[u8], mode: ReplyMode, over_tcp: bool) -> Option<Vec<u8>> {
        if query.len() < 12 {
            return None;
        }

        let mut response = query.to_vec();
        // QR + RD, RA
        response[2] = 0x81;
        response[3] = 0x80;

        match mode {
            ReplyMode::Answer(0) => Self::append_answer(&mut response),
            ReplyMode::Answer(rcode) => response[3] |= rcode & 0x0F,
            ReplyMode::NoData => {}
            ReplyMode::Truncate if !over_tcp => response[2] |= 0x02,
            ReplyMode::Truncate => Self::append_answer(&mut response),
            ReplyMode::WrongId => {
                response[0] = !response[0];
            }
            ReplyMode::NotAResponse => response[2] = 0x01,
            ReplyMode::Silent => return None,
        }

        Some(response)
    }

    /// One A record for the first question name, 127.0.0.1 with a 60s TTL.
    fn append_answer(response: &mut Vec<u8>) {
        response[6] = 0;
        response[7] = 1;
        response.extend_from_slice(&[0xC0, 0x0C, 0, 1, 0, 1, 0, 0, 0, 60, 0, 4, 127, 0, 0, 1]);
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
