//! GitHub App proxy
//!
//! Lets a GitHub CLI configured for a GitHub Enterprise Server host reach the
//! public GitHub APIs while authenticating as a GitHub App installation.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────┐
//!                        │                 GITHUB PROXY                 │
//!   gh (GHES mode)       │  ┌─────────┐   ┌──────────┐   ┌───────────┐  │
//!   ─────────────────────┼─▶│  http   │──▶│ routing  │──▶│  reqwest  │──┼──▶ api.github.com
//!                        │  │ server  │   │ director │   │  client   │──┼──▶ github.com
//!                        │  └─────────┘   └────┬─────┘   └───────────┘  │
//!                        │                     │                        │
//!                        │                     ▼                        │
//!                        │              ┌─────────────┐                 │
//!                        │              │ auth token  │──────────────── ┼──▶ POST /app/installations/
//!                        │              │   source    │                 │        {id}/access_tokens
//!                        │              └─────────────┘                 │
//!                        └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use gh_app_proxy::config::load_config;
use gh_app_proxy::lifecycle::{prepare, signals, Shutdown};
use gh_app_proxy::net::install_crypto_provider;
use gh_app_proxy::observability::{logging, metrics};
use gh_app_proxy::routing::upstream::{GITHUB_API_ORIGIN, GITHUB_WEB_ORIGIN};

#[derive(Parser)]
#[command(name = "gh-app-proxy", version)]
#[command(about = "GitHub Enterprise-style proxy authenticating as a GitHub App installation", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(default_value = "config.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    logging::init();
    install_crypto_provider();

    let config = load_config(&cli.config).map_err(|e| {
        tracing::error!(path = ?cli.config, error = %e, "Failed to load config");
        e
    })?;

    tracing::info!(
        path = ?cli.config,
        listen_addr = %config.server.listen_addr,
        app_id = config.github.app_id,
        installation_id = config.github.installation_id,
        "Configuration loaded"
    );

    if let Some(addr) = &config.observability.metrics_address {
        metrics::init_metrics(addr.parse()?)?;
    }

    let prepared = prepare(&config).await.map_err(|e| {
        tracing::error!(error = %e, "Startup failed");
        e
    })?;

    tracing::info!("Starting GitHub proxy on {}", prepared.listen_addr);
    tracing::info!("  /api/v3/*    → {}", GITHUB_API_ORIGIN);
    tracing::info!("  /api/graphql → {}/graphql", GITHUB_API_ORIGIN);
    tracing::info!("  /*           → {}", GITHUB_WEB_ORIGIN);

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let mut server = tokio::spawn(
        prepared
            .server
            .run_tls(prepared.listen_addr, prepared.tls, server_shutdown),
    );

    tokio::select! {
        result = &mut server => {
            result??;
        }
        _ = signals::wait_for_signal() => {
            shutdown.trigger();
            server.await??;
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
