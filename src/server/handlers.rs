use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use http::{Method, StatusCode};
use serde::Deserialize;
use serde_json::json;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::helpers::time::now_i64;
use crate::observability::metrics::get_metrics;
use crate::parser::claims::{decode_claims, TokenStatus};
use crate::server::error::GatewayError;
use crate::server::server::AppState;
use crate::upstream::onemap::AuthOutcome;
use crate::utils::constants::CACHE_KEY_ACCESS_TOKEN;

static CACHE_SOURCE: &str = "cache";
static ONEMAP_SOURCE: &str = "onemap";

/// GET | POST `/token`.
///
/// Cache hit is a strict short-circuit: the store's own TTL is the only
/// freshness check, and no upstream call is made.
pub async fn issue_token(State(state): State<AppState>) -> Result<Response, GatewayError> {
    let metrics = get_metrics().await;

    let (email, password) = state.config.credentials.resolve().map_err(|e| {
        warn!(error = %e, "credential resolution failed");
        GatewayError::ServerConfiguration
    })?;

    // 1. Try to get from cache
    if let Some(store) = &state.store {
        if let Some(token) = store.get(CACHE_KEY_ACCESS_TOKEN).await? {
            metrics.cache_hits.inc();
            metrics.token_requests.with_label_values(&[CACHE_SOURCE]).inc();
            debug!("serving token from cache");
            return Ok(Json(json!({ "access_token": token, "source": CACHE_SOURCE })).into_response());
        }
        metrics.cache_misses.inc();
    }

    // 2. Not in cache, fetch from OneMap
    metrics.upstream_requests.inc();
    let started = Instant::now();
    let outcome = state.onemap.authenticate(&email, &password).await;
    let elapsed = started.elapsed().as_secs_f64();
    let label = match &outcome {
        Ok(AuthOutcome::Granted(_)) => "granted",
        Ok(AuthOutcome::Denied { .. }) => "denied",
        Err(_) => "error",
    };
    metrics.upstream_duration.with_label_values(&[label]).observe(elapsed);

    match outcome? {
        AuthOutcome::Granted(grant) => {
            // 3. Save to cache. OneMap tokens usually last 3 days; the
            //    configured TTL stays below that to leave a safety margin.
            if let Some(store) = &state.store {
                if !grant.access_token.is_empty() {
                    store
                        .put(CACHE_KEY_ACCESS_TOKEN, &grant.access_token, state.config.cache.ttl_seconds)
                        .await?;
                }
            }
            metrics.token_requests.with_label_values(&[ONEMAP_SOURCE]).inc();
            info!("token issued by onemap");
            Ok(Json(json!({ "access_token": grant.access_token, "source": ONEMAP_SOURCE })).into_response())
        }
        AuthOutcome::Denied { status, body } => {
            metrics.upstream_failures.with_label_values(&[status.as_str()]).inc();
            Err(GatewayError::Upstream { status, body })
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct StatusParams {
    token: Option<String>,
}

/// GET `/token/status?token=...`
pub async fn token_status(
    Query(params): Query<StatusParams>,
) -> Result<Json<TokenStatus>, GatewayError> {
    let metrics = get_metrics().await;

    let token = params.token.filter(|t| !t.is_empty()).ok_or_else(|| {
        metrics.status_checks.with_label_values(&["missing"]).inc();
        GatewayError::MissingParameter("token")
    })?;

    let claims = decode_claims(&token).map_err(|e| {
        debug!(error = %e, "token decode failed");
        metrics.status_checks.with_label_values(&["invalid"]).inc();
        GatewayError::InvalidTokenFormat
    })?;

    metrics.status_checks.with_label_values(&["ok"]).inc();
    Ok(Json(claims.status_at(now_i64())))
}

/// OPTIONS preflight responder. The CORS headers themselves come from the
/// shared `CorsLayer`.
pub async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// Any unmatched path or method.
pub async fn fallback(method: Method) -> Response {
    if method == Method::OPTIONS {
        return StatusCode::NO_CONTENT.into_response();
    }
    GatewayError::NotFound.into_response()
}
