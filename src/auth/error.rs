//! Authentication error definitions.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors raised while obtaining an installation token.
///
/// On the request path any of these means the credential is unavailable for
/// that request. During startup the key-loading variants are fatal.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The private key file could not be read.
    #[error("failed to read private key {path:?}: {source}")]
    KeyFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The private key is not a usable RSA PEM key.
    #[error("invalid private key: {0}")]
    InvalidKey(#[source] jsonwebtoken::errors::Error),

    /// Signing the app JWT failed.
    #[error("failed to sign app JWT: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    /// The exchange request could not be completed or decoded.
    #[error("token exchange request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// GitHub refused to issue a token (revoked installation, bad JWT, ...).
    #[error("token exchange rejected with {status}: {body}")]
    Rejected {
        status: reqwest::StatusCode,
        body: String,
    },

    /// A concurrent refresh this caller waited on failed.
    #[error("token refresh failed: {0}")]
    RefreshFailed(String),

    /// The issuer handed back a token that is already expired.
    #[error("installation token already expired at {0}")]
    Expired(DateTime<Utc>),
}

/// Result type for authentication operations.
pub type AuthResult<T> = Result<T, AuthError>;
