//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request:
//!     → headers.rs (drop X-Forwarded-For, strip hop-by-hop)
//!     → Forward upstream
//!
//! Upstream response:
//!     → headers.rs (strip hop-by-hop)
//!     → Return to client
//! ```
//!
//! # Design Decisions
//! - No trust in client-supplied forwarding headers
//! - Client credentials never reach the upstream; see `routing::director`

pub mod headers;
