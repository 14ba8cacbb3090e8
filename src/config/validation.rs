//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate identifiers and addresses
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Does not touch the filesystem; key and certificate loading reports its own errors

use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::ProxyConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required numeric identifier was zero.
    #[error("{0} must be non-zero")]
    ZeroId(&'static str),

    /// A required path was empty.
    #[error("{0} must not be empty")]
    EmptyPath(&'static str),

    /// An address did not parse as `host:port`.
    #[error("{field} is not a valid socket address: {value}")]
    InvalidAddress { field: &'static str, value: String },
}

/// Validate a parsed configuration.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.github.app_id == 0 {
        errors.push(ValidationError::ZeroId("github.app_id"));
    }
    if config.github.installation_id == 0 {
        errors.push(ValidationError::ZeroId("github.installation_id"));
    }

    check_path(&mut errors, "github.private_key_path", &config.github.private_key_path);
    check_path(&mut errors, "server.tls_cert_path", &config.server.tls_cert_path);
    check_path(&mut errors, "server.tls_key_path", &config.server.tls_key_path);

    check_addr(&mut errors, "server.listen_addr", &config.server.listen_addr);
    if let Some(addr) = &config.observability.metrics_address {
        check_addr(&mut errors, "observability.metrics_address", addr);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_path(errors: &mut Vec<ValidationError>, field: &'static str, path: &Path) {
    if path.as_os_str().is_empty() {
        errors.push(ValidationError::EmptyPath(field));
    }
}

fn check_addr(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}
