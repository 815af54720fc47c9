use coredns_probe_domain::DomainError;
use hickory_proto::op::{Message, ResponseCode};
use std::net::SocketAddr;
use tracing::trace;

const DNS_HEADER_LEN: usize = 12;
const QR_BIT: u8 = 0x80;

/// The parts of a reply the probe cares about. Answer records are only
/// counted, never kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeResponse {
    pub rcode: ResponseCode,
    pub truncated: bool,
    pub answer_count: usize,
}

impl ProbeResponse {
    /// A lookup resolves only on NOERROR with at least one answer. A
    /// truncated NOERROR reply stands in for the full answer it withholds.
    pub fn is_answered(&self) -> bool {
        self.rcode == ResponseCode::NoError && (self.answer_count > 0 || self.truncated)
    }
}

pub struct ResponseParser;

impl ResponseParser {
    /// Reject replies that are too short, carry another ID or are not
    /// flagged as responses.
    pub fn validate_header(
        query_id: u16,
        response_bytes: &[u8],
        server: SocketAddr,
    ) -> Result<(), DomainError> {
        if response_bytes.len() < DNS_HEADER_LEN {
            return Err(DomainError::InvalidDnsResponse(format!(
                "{} sent {} bytes, shorter than a DNS header",
                server,
                response_bytes.len()
            )));
        }

        let response_id = u16::from_be_bytes([response_bytes[0], response_bytes[1]]);
        if response_id != query_id {
            return Err(DomainError::InvalidDnsResponse(format!(
                "ID mismatch from {}: expected {}, got {}",
                server, query_id, response_id
            )));
        }

        if response_bytes[2] & QR_BIT == 0 {
            return Err(DomainError::InvalidDnsResponse(format!(
                "{} sent a message without the QR bit",
                server
            )));
        }

        Ok(())
    }

    pub fn parse(response_bytes: &[u8]) -> Result<ProbeResponse, DomainError> {
        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        let response = ProbeResponse {
            rcode: message.response_code(),
            truncated: message.truncated(),
            answer_count: message.answers().len(),
        };
        trace!(
            rcode = ?response.rcode,
            truncated = response.truncated,
            answers = response.answer_count,
            "DNS response parsed"
        );
        Ok(response)
    }

    pub fn check_rcode(response: &ProbeResponse, server: SocketAddr) -> Result<(), DomainError> {
        if response.is_answered() {
            return Ok(());
        }
        let rcode = if response.rcode == ResponseCode::NoError {
            "NoError without answers".to_string()
        } else {
            format!("{:?}", response.rcode)
        };
        Err(DomainError::ServerFailure {
            server: server.to_string(),
            rcode,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr() -> SocketAddr {
        "10.0.0.1:53".parse().unwrap()
    }

    fn header(id: u16, flags_hi: u8, flags_lo: u8) -> Vec<u8> {
        let mut bytes = id.to_be_bytes().to_vec();
        bytes.extend_from_slice(&[flags_hi, flags_lo, 0, 0, 0, 0, 0, 0, 0, 0]);
        bytes
    }

    #[test]
    fn test_validate_header_matching_response_ok() {
        let bytes = header(0xABCD, 0x81, 0x80);
        assert!(ResponseParser::validate_header(0xABCD, &bytes, addr()).is_ok());
    }

    #[test]
    fn test_validate_header_id_mismatch() {
        let bytes = header(0x1234, 0x81, 0x80);
        let err = ResponseParser::validate_header(0xABCD, &bytes, addr()).unwrap_err();
        assert!(err.to_string().contains("mismatch"), "{}", err);
    }

    #[test]
    fn test_validate_header_requires_qr_bit() {
        let bytes = header(0xABCD, 0x01, 0x00);
        assert!(matches!(
            ResponseParser::validate_header(0xABCD, &bytes, addr()),
            Err(DomainError::InvalidDnsResponse(_))
        ));
    }

    #[test]
    fn test_validate_header_short_response() {
        assert!(ResponseParser::validate_header(0xABCD, &[0xAB, 0xCD, 0x81], addr()).is_err());
    }

    #[test]
    fn test_parse_reads_rcode_and_truncation() {
        let parsed = ResponseParser::parse(&header(7, 0x83, 0x83)).unwrap();
        assert_eq!(parsed.rcode, ResponseCode::NXDomain);
        assert!(parsed.truncated);
        assert_eq!(parsed.answer_count, 0);
        assert!(!parsed.is_answered());
    }

    #[test]
    fn test_check_rcode_classification() {
        for (rcode, ok) in [
            (ResponseCode::NoError, true),
            (ResponseCode::NXDomain, false),
            (ResponseCode::ServFail, false),
            (ResponseCode::Refused, false),
            (ResponseCode::NotImp, false),
            (ResponseCode::FormErr, false),
        ] {
            let response = ProbeResponse {
                rcode,
                truncated: false,
                answer_count: 1,
            };
            assert_eq!(
                ResponseParser::check_rcode(&response, addr()).is_ok(),
                ok,
                "{:?}",
                rcode
            );
        }
    }

    #[test]
    fn test_noerror_without_answers_is_failure() {
        let response = ProbeResponse {
            rcode: ResponseCode::NoError,
            truncated: false,
            answer_count: 0,
        };
        let err = ResponseParser::check_rcode(&response, addr()).unwrap_err();
        assert!(err.to_string().contains("without answers"), "{}", err);
    }

    #[test]
    fn test_truncated_noerror_is_answered() {
        let response = ProbeResponse {
            rcode: ResponseCode::NoError,
            truncated: true,
            answer_count: 0,
        };
        assert!(response.is_answered());
    }

    #[test]
    fn test_parse_garbage_is_invalid_response() {
        let mut bytes = header(7, 0x81, 0x80);
        // QDCOUNT = 1 with no question following
        bytes[5] = 1;
        assert!(matches!(
            ResponseParser::parse(&bytes),
            Err(DomainError::InvalidDnsResponse(_))
        ));
    }
}
