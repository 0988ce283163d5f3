// tests/common/mod.rs
pub use axum::Router;
pub use serde_json::json;
pub use tokio::task::JoinHandle;

use reqwest::Client;
use std::net::SocketAddr;

use crate::config::settings::{
    CacheConfig, CacheKind, CredentialsConfig, MetricsConfig, SecretValue, ServerConfig,
    ServiceConfig, SettingsConfig, UpstreamConfig,
};

/// Spawn an Axum router on an ephemeral port and return (JoinHandle, SocketAddr)
pub async fn spawn_axum(router: Router) -> (JoinHandle<()>, SocketAddr) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });
    (handle, addr)
}

pub fn build_reqwest_client() -> Client {
    Client::builder()
        .timeout(std::time::Duration::from_secs(5))
        .build()
        .expect("reqwest client")
}

/// Gateway config pointed at a stand-in upstream, with literal credentials.
pub fn gateway_config(upstream_url: &str, cache_kind: CacheKind) -> ServiceConfig {
    ServiceConfig {
        settings: SettingsConfig {
            server: ServerConfig { host: "127.0.0.1".into(), port: "0".into() },
            logging: None,
            metrics: MetricsConfig::default(),
        },
        upstream: UpstreamConfig { url: upstream_url.to_string(), timeout_ms: 5_000 },
        credentials: CredentialsConfig {
            email: SecretValue::Literal { value: "agent@example.com".into() },
            password: SecretValue::Literal { value: "hunter2".into() },
        },
        cache: CacheConfig { kind: cache_kind, ttl_seconds: 216_000, redis_url: None },
    }
}

/// Craft a `header.payload.signature` token with the given payload claims.
pub fn make_bearer_token(payload: serde_json::Value) -> String {
    use base64::Engine;
    let engine = &base64::engine::general_purpose::URL_SAFE_NO_PAD;
    format!(
        "{}.{}.{}",
        engine.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
        engine.encode(payload.to_string()),
        engine.encode("sig")
    )
}
