use crate::config::ClientConfig;
use crate::core::request::RequestDescriptor;
use crate::core::retry::{self, OpRng, RetryDecision, RetrySettings};
use crate::domain::ports::Transport;
use crate::utils::error::{ApiError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use url::Url;

const DEFAULT_USER_AGENT: &str = concat!("gridhub-rust/", env!("CARGO_PKG_VERSION"));

/// The request execution core shared by every resource facade.
///
/// Stateless between operations: one call to [`execute_raw`] is one
/// operation, strictly sequential across its retried attempts. Dropping
/// the returned future cancels the operation at the next await point
/// (transport call or backoff sleep) with no further attempts.
pub struct RequestExecutor {
    transport: Arc<dyn Transport>,
    base_url: Url,
    access_token: String,
    user_agent: String,
    retry: RetrySettings,
}

impl RequestExecutor {
    pub fn new(config: &ClientConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        // Url::join drops the last path segment without a trailing slash.
        let mut base = config.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base).map_err(|e| ApiError::InvalidConfigValue {
            field: "base_url".to_string(),
            value: config.base_url.clone(),
            reason: format!("Invalid URL format: {}", e),
        })?;

        Ok(Self {
            transport,
            base_url,
            access_token: config.access_token.clone(),
            user_agent: config
                .user_agent
                .clone()
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            retry: config.retry,
        })
    }

    fn absolute_url(&self, path: &str) -> Result<String> {
        self.base_url
            .join(path)
            .map(|u| u.to_string())
            .map_err(|e| ApiError::InvalidConfigValue {
                field: "path".to_string(),
                value: path.to_string(),
                reason: format!("Cannot join onto base URL: {}", e),
            })
    }

    fn default_headers(&self, has_body: bool) -> Vec<(String, String)> {
        let mut headers = vec![
            (
                "Authorization".to_string(),
                format!("Bearer {}", self.access_token),
            ),
            ("User-Agent".to_string(), self.user_agent.clone()),
            ("Accept".to_string(), "application/json".to_string()),
        ];
        if has_body {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }
        headers
    }

    /// Run one operation to completion under the retry policy and return
    /// the raw response body. No decoding happens here.
    pub async fn execute_raw(&self, request: &RequestDescriptor) -> Result<Vec<u8>> {
        let url = self.absolute_url(&request.path)?;
        let mut headers = self.default_headers(request.body.is_some());
        headers.extend(request.headers.iter().cloned());

        let started = Instant::now();
        let mut rng = OpRng::seeded();
        let mut attempts_made: u32 = 0;

        loop {
            attempts_made += 1;
            tracing::debug!("{} {} (attempt {})", request.method, url, attempts_made);

            let outcome = self
                .transport
                .execute(request.method, &url, &headers, request.body.as_deref())
                .await;

            let error = match outcome {
                Ok(response) if response.is_success() => {
                    tracing::debug!("API response status: {}", response.status);
                    return Ok(response.body);
                }
                Ok(response) => {
                    let retry_after = response.retry_after();
                    ApiError::from_response(response.status, retry_after, &response.body)
                }
                Err(e) => e,
            };

            match retry::evaluate(
                &self.retry,
                &error,
                request.idempotent,
                attempts_made,
                started.elapsed(),
                rng.next_bits(),
            ) {
                RetryDecision::Backoff(delay) => {
                    tracing::warn!(
                        "Attempt {} failed ({}), retrying in {:?}",
                        attempts_made,
                        error,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                }
                RetryDecision::Fatal => {
                    tracing::debug!("Giving up after {} attempt(s): {}", attempts_made, error);
                    return Err(error);
                }
            }
        }
    }

    /// Execute and decode a JSON response body.
    pub async fn execute_json<R: DeserializeOwned>(&self, request: &RequestDescriptor) -> Result<R> {
        let body = self.execute_raw(request).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    pub async fn get_json<R: DeserializeOwned>(&self, path: impl Into<String>) -> Result<R> {
        self.execute_json(&RequestDescriptor::get(path)).await
    }

    pub async fn post_json<B: Serialize, R: DeserializeOwned>(
        &self,
        path: impl Into<String>,
        body: &B,
    ) -> Result<R> {
        let request = RequestDescriptor::post(path).with_json(body)?;
        self.execute_json(&request).await
    }

    pub async fn put_json<B: Serialize, R: DeserializeOwned>(
        &self,
        path: impl Into<String>,
        body: &B,
    ) -> Result<R> {
        let request = RequestDescriptor::put(path).with_json(body)?;
        self.execute_json(&request).await
    }

    pub async fn delete_json<R: DeserializeOwned>(&self, path: impl Into<String>) -> Result<R> {
        self.execute_json(&RequestDescriptor::delete(path)).await
    }
}
