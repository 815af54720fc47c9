use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid IP address: {0}")]
    InvalidIpAddress(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Server {server} answered with {rcode}")]
    ServerFailure { server: String, rcode: String },

    #[error("Query timeout")]
    QueryTimeout,

    #[error("Transport connection refused by {server}")]
    TransportConnectionRefused { server: String },

    #[error("Transport connection reset by {server}")]
    TransportConnectionReset { server: String },

    #[error("Transport I/O error with {server}: {message}")]
    TransportIo { server: String, message: String },

    #[error("Discovery failed: {0}")]
    DiscoveryFailed(String),

    #[error("No resolver endpoints found in {0}")]
    NoTargetsDiscovered(String),
}

impl DomainError {
    /// Map an I/O error raised while talking to `server` onto a transport variant.
    pub fn from_io(server: impl Into<String>, err: &std::io::Error) -> Self {
        let server = server.into();
        match err.kind() {
            std::io::ErrorKind::ConnectionRefused => Self::TransportConnectionRefused { server },
            std::io::ErrorKind::ConnectionReset => Self::TransportConnectionReset { server },
            _ => Self::TransportIo {
                server,
                message: err.to_string(),
            },
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::QueryTimeout)
    }
}
