use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid request (HTTP {status}): {message}")]
    InvalidRequest {
        status: u16,
        error_code: Option<u64>,
        message: String,
    },

    #[error("Authorization failure (HTTP {status}): {message}")]
    AuthorizationFailure {
        status: u16,
        error_code: Option<u64>,
        message: String,
    },

    #[error("Resource not found: {message}")]
    NotFound {
        status: u16,
        error_code: Option<u64>,
        message: String,
    },

    #[error("Rate limited (HTTP {status}): {message}")]
    RateLimited {
        status: u16,
        error_code: Option<u64>,
        message: String,
        retry_after: Option<Duration>,
    },

    #[error("Service unavailable (HTTP {status}): {message}")]
    ServiceUnavailable {
        status: u16,
        error_code: Option<u64>,
        message: String,
    },

    #[error("Failed to decode response body: {message}")]
    Decode { message: String },

    #[error("Network failure: {message}")]
    Network { message: String },

    #[error("Unexpected service error (HTTP {status}): {message}")]
    UnknownService {
        status: u16,
        error_code: Option<u64>,
        message: String,
    },

    #[error("Invalid configuration value for '{field}' ({value}): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Pagination inconsistency: {message}")]
    PaginationInconsistent { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode {
            message: e.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// Error envelope the service embeds in non-2xx response bodies.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceError {
    pub error_code: Option<u64>,
    pub message: Option<String>,
    pub ref_id: Option<String>,
}

// Service-level codes that mark a response as retryable regardless of the
// HTTP status it arrived with.
const CODE_SERVICE_UNAVAILABLE: u64 = 4001;
const CODE_SERVER_TIMEOUT: u64 = 4002;
const CODE_RATE_LIMITED: u64 = 4003;
const CODE_TRANSIENT_FAILURE: u64 = 4004;

impl ApiError {
    /// Classify a completed non-2xx response into exactly one error kind.
    ///
    /// Total: every (status, body) combination maps to a variant, falling
    /// back to `UnknownService` when nothing more specific applies.
    pub fn from_response(status: u16, retry_after: Option<Duration>, body: &[u8]) -> ApiError {
        let parsed: Option<ServiceError> = serde_json::from_slice(body).ok();
        let error_code = parsed.as_ref().and_then(|e| e.error_code);
        let message = parsed
            .and_then(|e| e.message)
            .unwrap_or_else(|| String::from_utf8_lossy(body).trim().to_string());

        match (status, error_code) {
            (429, _) | (_, Some(CODE_RATE_LIMITED)) => ApiError::RateLimited {
                status,
                error_code,
                message,
                retry_after,
            },
            (_, Some(CODE_SERVICE_UNAVAILABLE))
            | (_, Some(CODE_SERVER_TIMEOUT))
            | (_, Some(CODE_TRANSIENT_FAILURE)) => ApiError::ServiceUnavailable {
                status,
                error_code,
                message,
            },
            (401 | 403, _) => ApiError::AuthorizationFailure {
                status,
                error_code,
                message,
            },
            (404, _) => ApiError::NotFound {
                status,
                error_code,
                message,
            },
            (500..=599, _) => ApiError::ServiceUnavailable {
                status,
                error_code,
                message,
            },
            (400..=499, _) => ApiError::InvalidRequest {
                status,
                error_code,
                message,
            },
            _ => ApiError::UnknownService {
                status,
                error_code,
                message,
            },
        }
    }

    /// Whether a retry may ever be attempted for this error.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ApiError::RateLimited { .. }
                | ApiError::ServiceUnavailable { .. }
                | ApiError::Network { .. }
        )
    }

    /// Whether a retry is safe when the operation may have mutated state.
    ///
    /// Rate-limited calls are rejected before any processing, so they are
    /// the only failures a create/update/delete may be retried on.
    pub fn is_retryable_for_mutation(&self) -> bool {
        matches!(self, ApiError::RateLimited { .. })
    }

    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            ApiError::RateLimited { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::InvalidRequest { status, .. }
            | ApiError::AuthorizationFailure { status, .. }
            | ApiError::NotFound { status, .. }
            | ApiError::RateLimited { status, .. }
            | ApiError::ServiceUnavailable { status, .. }
            | ApiError::UnknownService { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn error_code(&self) -> Option<u64> {
        match self {
            ApiError::InvalidRequest { error_code, .. }
            | ApiError::AuthorizationFailure { error_code, .. }
            | ApiError::NotFound { error_code, .. }
            | ApiError::RateLimited { error_code, .. }
            | ApiError::ServiceUnavailable { error_code, .. }
            | ApiError::UnknownService { error_code, .. } => *error_code,
            _ => None,
        }
    }
}
