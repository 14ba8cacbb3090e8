//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Certificate + key files (PEM)
//!     → tls.rs (validate presence, build rustls config)
//!     → http::server (axum-server TLS acceptor)
//! ```
//!
//! # Design Decisions
//! - TLS material is loaded once at startup; a failure is fatal
//! - The listener always serves HTTPS in production

pub mod tls;

pub use tls::{install_crypto_provider, load_tls_config};
