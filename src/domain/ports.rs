use crate::core::request::HttpMethod;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// A completed HTTP exchange as seen by the core.
///
/// Status interpretation is the classifier's job; the transport reports
/// every completed response, success or not.
#[derive(Debug, Clone)]
pub struct WireResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl WireResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Retry-After header in seconds, when the service sent one.
    pub fn retry_after(&self) -> Option<Duration> {
        self.header("Retry-After")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
    }
}

/// One request/response exchange against the remote service.
///
/// Implementations open connections and stream bodies; they never retry
/// and never interpret status codes. Errors are network-level only
/// (`ApiError::Network`).
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(
        &self,
        method: HttpMethod,
        url: &str,
        headers: &[(String, String)],
        body: Option<&[u8]>,
    ) -> Result<WireResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let response = WireResponse {
            status: 429,
            headers: vec![("retry-after".to_string(), "12".to_string())],
            body: Vec::new(),
        };
        assert_eq!(response.header("Retry-After"), Some("12"));
        assert_eq!(response.retry_after(), Some(Duration::from_secs(12)));
    }

    #[test]
    fn test_malformed_retry_after_is_ignored() {
        let response = WireResponse {
            status: 429,
            headers: vec![("Retry-After".to_string(), "soon".to_string())],
            body: Vec::new(),
        };
        assert_eq!(response.retry_after(), None);
    }
}
