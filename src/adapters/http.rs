use crate::config::ClientConfig;
use crate::core::request::HttpMethod;
use crate::domain::ports::{Transport, WireResponse};
use crate::utils::error::{ApiError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Production transport backed by a shared reqwest client.
///
/// Executes exactly one exchange per call; retry and status interpretation
/// live in the execution core.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(timeout));
        }
        let client = builder.build().map_err(|e| ApiError::Network {
            message: e.to_string(),
        })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(
        &self,
        method: HttpMethod,
        url: &str,
        headers: &[(String, String)],
        body: Option<&[u8]>,
    ) -> Result<WireResponse> {
        let method = match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        // 構建請求
        let mut request = self.client.request(method, url);
        for (key, value) in headers {
            request = request.header(key, value);
        }
        if let Some(body) = body {
            request = request.body(body.to_vec());
        }

        // 執行請求
        let response = request.send().await.map_err(|e| ApiError::Network {
            message: e.to_string(),
        })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(key, value)| {
                (
                    key.to_string(),
                    String::from_utf8_lossy(value.as_bytes()).to_string(),
                )
            })
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network {
                message: e.to_string(),
            })?
            .to_vec();

        Ok(WireResponse {
            status,
            headers,
            body,
        })
    }
}
