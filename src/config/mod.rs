use crate::core::retry::RetrySettings;
use crate::utils::error::{ApiError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything the client captures at construction time. Immutable for the
/// lifetime of the client instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub base_url: String,
    pub access_token: String,
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
    #[serde(default)]
    pub retry: RetrySettings,
}

impl ClientConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.gridhub.example.com/2.0/";

    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            access_token: access_token.into(),
            timeout_seconds: None,
            user_agent: None,
            retry: RetrySettings::default(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_seconds(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = Some(timeout_seconds);
        self
    }

    pub fn with_retry(mut self, retry: RetrySettings) -> Self {
        self.retry = retry;
        self
    }

    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ApiError::Io)?;
        Self::from_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ApiError::ConfigValidation {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("base_url", &self.base_url)?;
        validation::validate_non_empty_string("access_token", &self.access_token)?;

        if let Some(timeout) = self.timeout_seconds {
            validation::validate_range("timeout_seconds", timeout, 1, 600)?;
        }

        validation::validate_positive_number(
            "retry.max_attempts",
            self.retry.max_attempts as usize,
            1,
        )?;
        validation::validate_range("retry.jitter_pct", self.retry.jitter_pct, 0, 100)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_parsing() {
        let toml_content = r#"
base_url = "https://api.gridhub.example.com/2.0/"
access_token = "tok-abc123"
timeout_seconds = 30

[retry]
max_attempts = 6
base_delay_ms = 500
"#;

        let config = ClientConfig::from_str(toml_content).unwrap();
        assert_eq!(config.base_url, "https://api.gridhub.example.com/2.0/");
        assert_eq!(config.access_token, "tok-abc123");
        assert_eq!(config.timeout_seconds, Some(30));
        assert_eq!(config.retry.max_attempts, 6);
        assert_eq!(config.retry.base_delay_ms, 500);
        // Unset retry knobs keep their defaults.
        assert_eq!(config.retry.jitter_pct, RetrySettings::default().jitter_pct);
    }

    #[test]
    fn test_retry_table_is_optional() {
        let toml_content = r#"
base_url = "https://api.gridhub.example.com/2.0/"
access_token = "tok-abc123"
"#;
        let config = ClientConfig::from_str(toml_content).unwrap();
        assert_eq!(config.retry, RetrySettings::default());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("GRIDHUB_TEST_TOKEN", "tok-from-env");
        let toml_content = r#"
base_url = "https://api.gridhub.example.com/2.0/"
access_token = "${GRIDHUB_TEST_TOKEN}"
"#;
        let config = ClientConfig::from_str(toml_content).unwrap();
        assert_eq!(config.access_token, "tok-from-env");
    }

    #[test]
    fn test_unknown_env_var_is_left_verbatim() {
        let toml_content = r#"
base_url = "https://api.gridhub.example.com/2.0/"
access_token = "${GRIDHUB_DEFINITELY_UNSET_VAR}"
"#;
        let config = ClientConfig::from_str(toml_content).unwrap();
        assert_eq!(config.access_token, "${GRIDHUB_DEFINITELY_UNSET_VAR}");
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = ClientConfig::new("tok");
        assert!(config.validate().is_ok());

        config.base_url = "ftp://api.example.com".to_string();
        assert!(config.validate().is_err());

        config = ClientConfig::new("   ");
        assert!(config.validate().is_err());

        config = ClientConfig::new("tok");
        config.retry.max_attempts = 0;
        assert!(config.validate().is_err());
    }
}
