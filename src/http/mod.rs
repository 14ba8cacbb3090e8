//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TLS connection
//!     → server.rs (axum router, every path and method)
//!     → routing::Director (credential, scrub, rewrite)
//!     → request.rs (convert to upstream request, stream body)
//!     → upstream (api.github.com or github.com)
//!     → response.rs (strip hop-by-hop, stream back)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use response::ProxyError;
pub use server::{build_upstream_client, HttpServer};
