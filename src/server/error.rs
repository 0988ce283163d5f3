use axum::{
    response::{IntoResponse, Response},
    Json,
};
use http::StatusCode;
use serde_json::{json, Value};
use tracing::error;

/// Terminal request errors. Every variant is surfaced to the caller as a
/// JSON body, nothing is retried.
#[derive(Debug)]
pub enum GatewayError {
    /// Credentials are missing from the service configuration.
    ServerConfiguration,
    /// Upstream rejected the request; status and body are mirrored verbatim.
    Upstream { status: StatusCode, body: Value },
    MissingParameter(&'static str),
    InvalidTokenFormat,
    NotFound,
    /// Blanket net for anything unhandled (transport failures included).
    Internal(anyhow::Error),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        match self {
            GatewayError::ServerConfiguration => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Server configuration error: Missing OneMap credentials." })),
            )
                .into_response(),
            GatewayError::Upstream { status, body } => (status, Json(body)).into_response(),
            GatewayError::MissingParameter(name) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": format!("Missing {} parameter.", name) })),
            )
                .into_response(),
            GatewayError::InvalidTokenFormat => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Invalid token format." })),
            )
                .into_response(),
            GatewayError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Not Found" })),
            )
                .into_response(),
            GatewayError::Internal(e) => {
                error!(error = ?e, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": e.to_string() })),
                )
                    .into_response()
            }
        }
    }
}

impl From<anyhow::Error> for GatewayError {
    fn from(e: anyhow::Error) -> Self {
        GatewayError::Internal(e)
    }
}
