//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path, headers)
//!     → director.rs (attach credential, scrub headers)
//!     → matcher.rs (classify path → upstream + rewritten path)
//!     → director.rs (rewrite scheme, host, path in place)
//!     → Hand off to http::server for forwarding
//! ```
//!
//! # Design Decisions
//! - Classification is a pure function of the path, testable without a network
//! - Exactly two upstream origins, fixed for the process lifetime
//! - First match wins; the web origin is the catch-all
//! - Stateless per request; the only shared state is the token cache

pub mod director;
pub mod matcher;
pub mod upstream;

pub use director::Director;
pub use matcher::{classify, Classification};
pub use upstream::{Origin, OriginError, Upstream, Upstreams};
