//! GitHub App installation authentication.
//!
//! # Data Flow
//! ```text
//! Director asks for a token
//!     → source.rs (cached token still fresh? return it)
//!     → on miss: single refresh in flight, racing callers wait for it
//!     → exchange.rs (sign app JWT, POST /app/installations/{id}/access_tokens)
//!     → token.rs (InstallationToken cached until it nears expiry)
//! ```
//!
//! # Design Decisions
//! - Tokens are fetched lazily on first use, never pre-warmed
//! - Reads of a fresh token are lock-free
//! - Failed exchanges are not cached; the next request tries again

pub mod error;
pub mod exchange;
pub mod source;
pub mod token;

pub use error::{AuthError, AuthResult};
pub use exchange::{GitHubAppExchange, GITHUB_API_BASE};
pub use source::{CachingTokenSource, TokenExchange, TokenSource};
pub use token::InstallationToken;
