use anyhow::{anyhow, Result};
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Claims read from a bearer token payload.
///
/// Only expiry facts are interpreted. The signature segment is never
/// verified, structural decoding is all this module claims.
#[derive(Debug, Deserialize)]
pub struct TokenClaims {
    pub exp: i64,
    pub iat: Option<i64>,
}

/// Expiry facts reported by `/token/status`.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct TokenStatus {
    pub valid: bool,
    pub expires_at: i64,
    pub time_left_seconds: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<i64>,
}

/// Decode the payload segment of a `header.payload.signature` token.
pub fn decode_claims(token: &str) -> Result<TokenClaims> {
    let parts: Vec<&str> = token.split('.').collect();
    let payload = parts
        .get(1)
        .ok_or_else(|| anyhow!("token has no payload segment"))?;

    let decoded = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| anyhow!("base64 decode error: {}", e))?;

    serde_json::from_slice::<TokenClaims>(&decoded)
        .map_err(|e| anyhow!("invalid token payload: {}", e))
}

impl TokenClaims {
    /// Expiry facts relative to `now` (UNIX seconds). `time_left_seconds`
    /// goes negative once the token is expired.
    pub fn status_at(&self, now: i64) -> TokenStatus {
        TokenStatus {
            valid: self.exp >= now,
            expires_at: self.exp,
            time_left_seconds: self.exp - now,
            issued_at: self.iat,
        }
    }
}
