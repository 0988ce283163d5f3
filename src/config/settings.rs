use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::{env, fs};

use crate::utils::constants::{DEFAULT_CACHE_TTL_SECS, DEFAULT_HTTP_TIMEOUT_MS, DEFAULT_UPSTREAM_URL};

/// ================================
/// Full service configuration
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    pub settings: SettingsConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    pub credentials: CredentialsConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

/// ================================
/// Global service-wide settings
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct SettingsConfig {
    pub server: ServerConfig,
    pub logging: Option<LoggingConfig>,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_path")]
    pub path: String,
    #[serde(default)]
    pub is_enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { path: default_metrics_path(), is_enabled: false }
    }
}

/// ================================
/// Upstream authentication service
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    #[serde(default = "default_upstream_url")]
    pub url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self { url: default_upstream_url(), timeout_ms: default_timeout_ms() }
    }
}

/// ================================
/// Credentials
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct CredentialsConfig {
    pub email: SecretValue,
    pub password: SecretValue,
}

impl CredentialsConfig {
    /// Resolve both secrets, presence-checking only. Resolution happens per
    /// request so a missing env var degrades to an error response instead
    /// of a startup failure.
    pub fn resolve(&self) -> Result<(String, String)> {
        let email = self.email.resolve()?;
        let password = self.password.resolve()?;
        Ok((email, password))
    }
}

/// Secret value sources
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum SecretValue {
    Literal { value: String },
    FromEnv { from_env: String },
    FromFile { path: String },
}

impl SecretValue {
    pub fn resolve(&self) -> Result<String> {
        let value = match self {
            SecretValue::Literal { value } => value.clone(),
            SecretValue::FromEnv { from_env } => env::var(from_env)
                .map_err(|_| anyhow!("env var '{}' is not set", from_env))?,
            SecretValue::FromFile { path } => fs::read_to_string(path)
                .map_err(|e| anyhow!("cannot read secret file '{}': {}", path, e))?
                .trim()
                .to_string(),
        };
        if value.is_empty() {
            return Err(anyhow!("secret resolved to an empty value"));
        }
        Ok(value)
    }
}

/// ================================
/// Cache
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    #[serde(default)]
    pub kind: CacheKind,
    #[serde(default = "default_cache_ttl")]
    pub ttl_seconds: u64,
    pub redis_url: Option<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { kind: CacheKind::Disabled, ttl_seconds: default_cache_ttl(), redis_url: None }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CacheKind {
    Memory,
    Redis,
    #[default]
    Disabled,
}

/// ================================
/// Logging
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String, // allowed: trace, debug, info, warn, error
    pub format: LogFormat,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Compact,
}

fn default_metrics_path() -> String {
    "/metrics".to_string()
}

fn default_upstream_url() -> String {
    DEFAULT_UPSTREAM_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_HTTP_TIMEOUT_MS
}

fn default_cache_ttl() -> u64 {
    DEFAULT_CACHE_TTL_SECS
}
