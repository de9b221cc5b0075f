//! Request and response bodies for the HTTP surface.
//!
//! The aggregated search response itself lives in `fangate_core::types`;
//! these are the remaining edge DTOs.

use serde::{Deserialize, Serialize};

/// Body of `POST /search`.
///
/// `blend` absent or 0 selects keyword search; a positive `blend` selects
/// blended search and (unless the backend embeds queries itself) requires
/// `vector`.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query_text: String,
    pub limit: Option<usize>,
    pub blend: Option<f64>,
    pub vector: Option<Vec<f32>>,
}

/// Body of `POST /search/lookup`.
#[derive(Debug, Deserialize)]
pub struct LookupRequest {
    pub query_text: String,
}

/// Body of `POST /graphql`: a raw GraphQL document, forwarded unchanged.
#[derive(Debug, Deserialize)]
pub struct PassthroughRequest {
    pub query: String,
}

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub backend_url: String,
}

/// Body of `GET /selfcheck`.
#[derive(Debug, Serialize)]
pub struct SelfcheckResponse {
    pub status: &'static str,
    pub backend_url: String,
    pub reachable: bool,
    pub response_time_ms: f64,
    pub collections_available: Vec<String>,
    pub errors: Vec<String>,
}
