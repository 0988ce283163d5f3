use anyhow::{Context, Result};
use http::StatusCode;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::settings::UpstreamConfig;

/// Successful auth response body. OneMap returns more fields
/// (`expiry_timestamp` among them); only the token itself is interpreted.
#[derive(Debug, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
}

/// Outcome of one authentication attempt.
#[derive(Debug)]
pub enum AuthOutcome {
    Granted(TokenGrant),
    /// Upstream rejected the credentials. Status and JSON body are carried
    /// back to the caller untouched, no translation and no retry.
    Denied { status: StatusCode, body: Value },
}

/// Client for the OneMap authentication endpoint.
#[derive(Debug, Clone)]
pub struct OneMapClient {
    client: Client,
    url: String,
}

impl OneMapClient {
    pub fn new(cfg: &UpstreamConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(cfg.timeout_ms))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self { client, url: cfg.url.clone() })
    }

    /// POST the credential pair, return token-or-error.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<AuthOutcome> {
        let response = self
            .client
            .post(&self.url)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .context("upstream auth request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body: Value = response
                .json()
                .await
                .context("upstream error body is not JSON")?;
            warn!(%status, "onemap rejected the authentication request");
            return Ok(AuthOutcome::Denied { status, body });
        }

        let grant: TokenGrant = response
            .json()
            .await
            .context("unexpected auth response body")?;
        debug!("onemap issued a token");
        Ok(AuthOutcome::Granted(grant))
    }
}
