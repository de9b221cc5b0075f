//! HTTP error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Handler-level failures, each tied to a status code.
///
/// Per-collection backend failures never appear here — they travel inside
/// the aggregated response. This type is for failures of the request
/// itself: bad input, missing stored query, infrastructure trouble, or an
/// internal invariant violation.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
    BadGateway(String),
    GatewayTimeout(String),
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &str) {
        match self {
            Self::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
            Self::NotFound(m) => (StatusCode::NOT_FOUND, m),
            Self::Internal(m) => (StatusCode::INTERNAL_SERVER_ERROR, m),
            Self::BadGateway(m) => (StatusCode::BAD_GATEWAY, m),
            Self::GatewayTimeout(m) => (StatusCode::GATEWAY_TIMEOUT, m),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = self.parts();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), detail, "request failed");
        } else {
            tracing::warn!(status = status.as_u16(), detail, "request rejected");
        }
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

impl From<fangate_core::Error> for ApiError {
    fn from(err: fangate_core::Error) -> Self {
        match err {
            fangate_core::Error::InvalidRequest(m) => Self::BadRequest(m),
            fangate_core::Error::InvalidConfig(m) => Self::Internal(m),
            fangate_core::Error::Invariant(m) => Self::Internal(m),
        }
    }
}
