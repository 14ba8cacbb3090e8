//! Installation access token value type.

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

/// A short-lived installation access token and its expiry.
///
/// Deserializes directly from the body of GitHub's access token endpoint;
/// fields other than `token` and `expires_at` are ignored.
#[derive(Clone, Deserialize)]
pub struct InstallationToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl InstallationToken {
    pub fn new(token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            expires_at,
        }
    }

    /// True once `now` has reached the expiry instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// True while more than `leeway` of lifetime remains.
    pub fn is_fresh_at(&self, now: DateTime<Utc>, leeway: Duration) -> bool {
        self.expires_at - leeway > now
    }

    pub fn is_fresh(&self, leeway: Duration) -> bool {
        self.is_fresh_at(Utc::now(), leeway)
    }
}

// Keep the secret out of logs.
impl std::fmt::Debug for InstallationToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstallationToken")
            .field("token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
