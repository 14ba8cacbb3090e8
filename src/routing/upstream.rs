//! Upstream origins.

use std::str::FromStr;

use axum::http::uri::{Authority, Scheme};
use axum::http::Uri;
use thiserror::Error;

/// Public GitHub web origin.
pub const GITHUB_WEB_ORIGIN: &str = "https://github.com";
/// Public GitHub REST/GraphQL origin.
pub const GITHUB_API_ORIGIN: &str = "https://api.github.com";

/// The two logical destinations a request can be sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Upstream {
    /// The web host (git smart HTTP, archives, everything else).
    Web,
    /// The REST and GraphQL API host.
    Api,
}

impl Upstream {
    /// Label for logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Upstream::Web => "web",
            Upstream::Api => "api",
        }
    }
}

impl std::fmt::Display for Upstream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing an origin.
#[derive(Debug, Error)]
pub enum OriginError {
    #[error("invalid origin URI: {0}")]
    InvalidUri(#[from] axum::http::uri::InvalidUri),

    #[error("origin {0:?} must have a scheme and host")]
    Incomplete(String),
}

/// Scheme and authority of an upstream, e.g. `https://api.github.com`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    scheme: Scheme,
    authority: Authority,
}

impl Origin {
    pub fn scheme(&self) -> &Scheme {
        &self.scheme
    }

    pub fn authority(&self) -> &Authority {
        &self.authority
    }
}

impl FromStr for Origin {
    type Err = OriginError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s.parse::<Uri>()?.into_parts();
        match (parts.scheme, parts.authority) {
            (Some(scheme), Some(authority)) => Ok(Self { scheme, authority }),
            _ => Err(OriginError::Incomplete(s.to_string())),
        }
    }
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}://{}", self.scheme, self.authority)
    }
}

/// The web and API origins requests are forwarded to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upstreams {
    pub web: Origin,
    pub api: Origin,
}

impl Upstreams {
    pub fn new(web: Origin, api: Origin) -> Self {
        Self { web, api }
    }

    /// Origin for a classified destination.
    pub fn origin(&self, upstream: Upstream) -> &Origin {
        match upstream {
            Upstream::Web => &self.web,
            Upstream::Api => &self.api,
        }
    }
}

impl Default for Upstreams {
    fn default() -> Self {
        Self {
            web: Origin {
                scheme: Scheme::HTTPS,
                authority: Authority::from_static("github.com"),
            },
            api: Origin {
                scheme: Scheme::HTTPS,
                authority: Authority::from_static("api.github.com"),
            },
        }
    }
}
