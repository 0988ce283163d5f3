use std::sync::Arc;

use anyhow::Result;
use axum::routing::get;
use axum::Router;
use http::{header::CONTENT_TYPE, Method};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::cache::StoreKind;
use crate::config::settings::ServiceConfig;
use crate::observability::metrics::get_metrics;
use crate::observability::routes::MetricsState;
use crate::server::handlers;
use crate::upstream::onemap::OneMapClient;

/// Everything a request handler needs, injected explicitly so tests can
/// substitute the store and point the client at a mock server.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServiceConfig>,
    pub store: Option<StoreKind>,
    pub onemap: OneMapClient,
}

impl AppState {
    pub fn new(config: ServiceConfig, store: Option<StoreKind>) -> Result<Self> {
        let onemap = OneMapClient::new(&config.upstream)?;
        Ok(Self { config: Arc::new(config), store, onemap })
    }
}

/// Build the gateway router with the JSON + CORS envelope applied to every
/// route, the fallbacks included.
pub async fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    let metrics = get_metrics().await;
    let metrics_state = MetricsState::new(metrics.registry.clone());

    Router::new()
        .route(
            "/token",
            get(handlers::issue_token)
                .post(handlers::issue_token)
                .options(handlers::preflight),
        )
        .route(
            "/token/status",
            get(handlers::token_status).options(handlers::preflight),
        )
        .merge(metrics_state.router(&state.config.settings.metrics))
        .fallback(handlers::fallback)
        .method_not_allowed_fallback(handlers::fallback)
        .layer(cors)
        .with_state(state)
}

/// Start one Axum server on the configured address.
pub async fn start(state: AppState) -> Result<()> {
    let bind_addr = &state.config.settings.server.host;
    let port = &state.config.settings.server.port;
    let addr = format!("{}:{}", bind_addr, port);

    let app = router(state).await;
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("listening on {}", addr);

    get_metrics().await.up.set(1);
    axum::serve(listener, app).await?;
    Ok(())
}
