use anyhow::Result;
use gridhub::utils::validation::Validate;
use gridhub::{ApiError, ClientConfig, GridClient};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_load_config_from_file() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    write!(
        file,
        r#"
base_url = "https://api.gridhub.example.com/2.0/"
access_token = "tok-from-file"
timeout_seconds = 45

[retry]
max_attempts = 5
base_delay_ms = 250
max_delay_ms = 8000
max_elapsed_ms = 20000
jitter_pct = 10
"#
    )?;

    let config = ClientConfig::from_file(file.path())?;
    config.validate()?;

    assert_eq!(config.access_token, "tok-from-file");
    assert_eq!(config.timeout_seconds, Some(45));
    assert_eq!(config.retry.max_attempts, 5);
    assert_eq!(config.retry.jitter_pct, 10);
    Ok(())
}

#[test]
fn test_missing_config_file_is_an_io_error() {
    let result = ClientConfig::from_file("/definitely/not/a/real/path.toml");
    assert!(matches!(result, Err(ApiError::Io(_))));
}

#[test]
fn test_invalid_toml_reports_the_parse_failure() {
    let result = ClientConfig::from_str("base_url = [not toml");
    assert!(matches!(result, Err(ApiError::ConfigValidation { .. })));
}

#[tokio::test]
async fn test_client_construction_rejects_invalid_config() {
    let config = ClientConfig::new("tok").with_base_url("ftp://api.example.com");
    let result = GridClient::new(config);
    assert!(matches!(
        result,
        Err(ApiError::InvalidConfigValue { .. })
    ));
}
