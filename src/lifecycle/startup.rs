//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the token source from the App's private key
//! - Build the director and HTTP server
//! - Load TLS material for the listener
//!
//! # Design Decisions
//! - Fail fast: any startup error is returned before a socket is bound
//! - No network calls here; the first token is fetched by the first request

use std::net::SocketAddr;
use std::sync::Arc;

use axum_server::tls_rustls::RustlsConfig;
use thiserror::Error;

use crate::auth::{AuthError, CachingTokenSource, GitHubAppExchange};
use crate::config::ProxyConfig;
use crate::http::HttpServer;
use crate::net::load_tls_config;
use crate::routing::{Director, Upstreams};

/// Errors that prevent the proxy from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid listen address {addr:?}: {source}")]
    ListenAddr {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("failed to create GitHub App token source: {0}")]
    TokenSource(#[from] AuthError),

    #[error("failed to build upstream client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("failed to load TLS material: {0}")]
    Tls(#[source] std::io::Error),
}

/// Everything needed to start serving.
pub struct Prepared {
    pub listen_addr: SocketAddr,
    pub server: HttpServer,
    pub tls: RustlsConfig,
}

/// Build the serving stack from a validated configuration.
pub async fn prepare(config: &ProxyConfig) -> Result<Prepared, StartupError> {
    let listen_addr = config
        .server
        .listen_addr
        .parse()
        .map_err(|source| StartupError::ListenAddr {
            addr: config.server.listen_addr.clone(),
            source,
        })?;

    let exchange = GitHubAppExchange::from_key_file(
        config.github.app_id,
        config.github.installation_id,
        &config.github.private_key_path,
    )?;
    let tokens = Arc::new(CachingTokenSource::new(exchange));
    tracing::info!(
        app_id = config.github.app_id,
        installation_id = config.github.installation_id,
        "GitHub App token source ready"
    );

    let director = Director::new(tokens, Upstreams::default());
    let server = HttpServer::new(director)?;

    let tls = load_tls_config(&config.server.tls_cert_path, &config.server.tls_key_path)
        .await
        .map_err(StartupError::Tls)?;

    Ok(Prepared {
        listen_addr,
        server,
        tls,
    })
}
