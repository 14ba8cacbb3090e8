//! Configuration loading from disk.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::ProxyConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
///
/// Every variant is fatal at startup; the proxy never begins serving with a
/// configuration it could not load.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ProxyConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: ProxyConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_valid_file() {
        let file = write_config(
            r#"
            [github]
            app_id = 42
            installation_id = 7
            private_key_path = "app.pem"

            [server]
            listen_addr = "127.0.0.1:8443"
            tls_cert_path = "tls.crt"
            tls_key_path = "tls.key"
            "#,
        );

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.github.app_id, 42);
        assert_eq!(config.github.installation_id, 7);
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/gh-app-proxy.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_malformed_toml() {
        let file = write_config("[github\napp_id = ");
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_failure_lists_fields() {
        let file = write_config(
            r#"
            [github]
            app_id = 0
            installation_id = 7
            private_key_path = "app.pem"

            [server]
            listen_addr = "nowhere"
            tls_cert_path = "tls.crt"
            tls_key_path = "tls.key"
            "#,
        );

        let err = load_config(file.path()).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Validation failed: "));
        assert!(message.contains("github.app_id must be non-zero"));
        assert!(message.contains("server.listen_addr"));
    }
}
