//! GitHub App credential-injecting reverse proxy.
//!
//! Presents a GitHub Enterprise Server-style endpoint to clients such as `gh`
//! and forwards every request to github.com or api.github.com, authenticated
//! as a GitHub App installation.

pub mod auth;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod routing;
pub mod security;

pub use auth::{CachingTokenSource, GitHubAppExchange, TokenSource};
pub use config::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{Director, Upstreams};
