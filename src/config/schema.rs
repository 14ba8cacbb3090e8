//! Configuration schema definitions.
//!
//! Mirrors the TOML layout: a `[github]` table identifying the App installation,
//! a `[server]` table for the HTTPS listener, and an optional `[observability]` table.

use serde::Deserialize;
use std::path::PathBuf;

/// Root configuration for the proxy.
#[derive(Debug, Clone, Deserialize)]
pub struct ProxyConfig {
    /// GitHub App identity the proxy authenticates as.
    pub github: GitHubAppConfig,

    /// Listener settings.
    pub server: ServerConfig,

    /// Metrics settings.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// GitHub App installation identity.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubAppConfig {
    /// Numeric App ID (the JWT issuer).
    pub app_id: u64,

    /// Installation the access tokens are minted for.
    pub installation_id: u64,

    /// Path to the App's RSA private key (PEM).
    pub private_key_path: PathBuf,
}

/// HTTPS listener configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8443").
    pub listen_addr: String,

    /// Path to certificate file (PEM).
    pub tls_cert_path: PathBuf,

    /// Path to private key file (PEM).
    pub tls_key_path: PathBuf,
}

/// Observability configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Prometheus scrape address. The exporter is not started when unset.
    pub metrics_address: Option<String>,
}
