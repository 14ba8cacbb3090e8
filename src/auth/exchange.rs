//! GitHub App token exchange.
//!
//! GitHub Apps authenticate in two steps:
//! 1. An app JWT, signed RS256 with the app's private key, identifies the App itself
//! 2. That JWT is exchanged for an installation access token scoped to one installation

use std::path::Path;
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::Serialize;

use crate::auth::error::{AuthError, AuthResult};
use crate::auth::source::TokenExchange;
use crate::auth::token::InstallationToken;

/// Default REST API origin used for the exchange.
pub const GITHUB_API_BASE: &str = "https://api.github.com";

const USER_AGENT: &str = concat!("gh-app-proxy/", env!("CARGO_PKG_VERSION"));
const GITHUB_API_VERSION: &str = "2022-11-28";

/// JWT claims for GitHub App authentication.
/// GitHub requires: iat (issued at), exp (expiration), iss (issuer = app_id)
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub(crate) struct AppClaims {
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
}

/// Exchanges a freshly signed app JWT for an installation access token.
pub struct GitHubAppExchange {
    app_id: u64,
    installation_id: u64,
    key: EncodingKey,
    client: reqwest::Client,
    api_base: String,
}

impl GitHubAppExchange {
    /// Create an exchange from a PEM-encoded RSA private key.
    ///
    /// The key is parsed here so a bad key fails at startup rather than on the
    /// first proxied request.
    pub fn new(app_id: u64, installation_id: u64, private_key_pem: &[u8]) -> AuthResult<Self> {
        let key = EncodingKey::from_rsa_pem(private_key_pem).map_err(AuthError::InvalidKey)?;

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .min_tls_version(reqwest::tls::Version::TLS_1_2)
            .connect_timeout(StdDuration::from_secs(10))
            .build()?;

        Ok(Self {
            app_id,
            installation_id,
            key,
            client,
            api_base: GITHUB_API_BASE.to_string(),
        })
    }

    /// Create an exchange reading the private key from disk.
    pub fn from_key_file(app_id: u64, installation_id: u64, path: &Path) -> AuthResult<Self> {
        let pem = std::fs::read(path).map_err(|source| AuthError::KeyFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::new(app_id, installation_id, &pem)
    }

    /// Point the exchange at a different API origin.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Sign a JWT identifying the App, valid for ten minutes (GitHub's maximum).
    pub fn app_jwt(&self) -> AuthResult<String> {
        let now = Utc::now();
        let claims = AppClaims {
            // Backdated to tolerate clock drift against GitHub.
            iat: (now - Duration::seconds(60)).timestamp(),
            exp: (now + Duration::minutes(10)).timestamp(),
            iss: self.app_id.to_string(),
        };

        encode(&Header::new(Algorithm::RS256), &claims, &self.key).map_err(AuthError::Signing)
    }

    fn access_tokens_url(&self) -> String {
        format!(
            "{}/app/installations/{}/access_tokens",
            self.api_base, self.installation_id
        )
    }
}

#[async_trait]
impl TokenExchange for GitHubAppExchange {
    async fn exchange(&self) -> AuthResult<InstallationToken> {
        let jwt = self.app_jwt()?;

        let response = self
            .client
            .post(self.access_tokens_url())
            .header(AUTHORIZATION, format!("Bearer {}", jwt))
            .header(ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Rejected { status, body });
        }

        let token: InstallationToken = response.json().await?;
        tracing::debug!(
            installation_id = self.installation_id,
            expires_at = %token.expires_at,
            "Installation token issued"
        );
        Ok(token)
    }
}
