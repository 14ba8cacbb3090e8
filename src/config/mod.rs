//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config.toml
//!     → loader.rs (read & deserialize)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → consumed once by lifecycle::startup
//! ```
//!
//! # Design Decisions
//! - Config is loaded once before serving and never mutated
//! - Validation separates syntactic (serde) from semantic checks
//! - Upstream origins are not configurable here; see `routing::Upstreams`

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{GitHubAppConfig, ObservabilityConfig, ProxyConfig, ServerConfig};
pub use validation::{validate_config, ValidationError};
