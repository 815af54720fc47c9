use crate::DomainError;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::sync::Arc;

/// One resolver endpoint under test.
///
/// The textual form is the canonical IP string, which is also the value of
/// the `endpoint` metric label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target {
    ip: IpAddr,
    label: Arc<str>,
}

impl Target {
    pub fn new(ip: IpAddr) -> Self {
        Self {
            ip,
            label: ip.to_string().into(),
        }
    }

    pub fn ip(&self) -> IpAddr {
        self.ip
    }

    pub fn as_str(&self) -> &str {
        &self.label
    }

    pub fn socket_addr(&self, port: u16) -> SocketAddr {
        SocketAddr::new(self.ip, port)
    }
}

impl FromStr for Target {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        // EndpointSlices of type IPv6 may carry bracketed literals.
        let bare = trimmed
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .unwrap_or(trimmed);

        bare.parse::<IpAddr>()
            .map(Self::new)
            .map_err(|_| DomainError::InvalidIpAddress(s.to_string()))
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

impl From<IpAddr> for Target {
    fn from(ip: IpAddr) -> Self {
        Self::new(ip)
    }
}
