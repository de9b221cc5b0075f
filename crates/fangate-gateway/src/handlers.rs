//! HTTP handlers.
//!
//! Logging convention: every search request gets a request id and a span;
//! the dispatch summary (successful/failed/total, elapsed) is logged at
//! info, per-collection failures at warn inside the dispatcher.

use std::time::{Duration, Instant};

use axum::extract::State;
use axum::Json;
use serde_json::json;
use tracing::Instrument;

use fangate_backend::BackendError;
use fangate_core::types::{AggregatedResponse, ResultLimit, SearchMode, SearchQuery};
use fangate_dispatch::{aggregate, fan_out};

use crate::error::ApiError;
use crate::models::{
    HealthResponse, LookupRequest, PassthroughRequest, SearchRequest, SelfcheckResponse,
};
use crate::state::AppState;

/// Connectivity probes keep a short budget of their own.
const SELFCHECK_TIMEOUT: Duration = Duration::from_secs(5);

fn request_span(endpoint: &'static str) -> tracing::Span {
    let request_id = uuid::Uuid::new_v4();
    tracing::info_span!("request", endpoint, request_id = %request_id)
}

/// `POST /search`: validate, fan out to every configured collection,
/// aggregate. Individual collection failures end up inside the 200
/// response; only bad input or an internal defect fails the request.
pub async fn search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<AggregatedResponse>, ApiError> {
    let span = request_span("/search");
    async move {
        let limit = match request.limit {
            Some(n) => ResultLimit::new(n)?,
            None => state.default_limit,
        };
        let mode = SearchMode::from_parts(request.blend, request.vector, state.backend_embeds)?;
        let query = SearchQuery::new(request.query_text, limit, mode)?;
        run_fan_out(&state, query).await.map(Json)
    }
    .instrument(span)
    .await
}

/// `POST /search/lookup`: resolve the full query (limit, blend, vector)
/// from the stored-queries file, then run the normal fan-out.
pub async fn search_lookup(
    State(state): State<AppState>,
    Json(request): Json<LookupRequest>,
) -> Result<Json<AggregatedResponse>, ApiError> {
    let span = request_span("/search/lookup");
    async move {
        let store = state.query_store.as_ref().ok_or_else(|| {
            ApiError::BadRequest("stored-query lookup is not configured".to_string())
        })?;
        let stored = store.find(&request.query_text).ok_or_else(|| {
            ApiError::NotFound(format!(
                "query text '{}' not found in the stored-queries file",
                request.query_text
            ))
        })?;

        let limit = match stored.limit {
            Some(n) => ResultLimit::new(n).map_err(|e| {
                ApiError::Internal(format!("stored query has an invalid limit: {}", e))
            })?,
            None => state.default_limit,
        };
        let blend = stored.resolve_blend();
        let vector = stored.resolve_vector();
        tracing::info!(
            limit = limit.value(),
            blend = blend.unwrap_or(0.0),
            has_vector = vector.is_some(),
            "stored query resolved"
        );
        let mode = SearchMode::from_parts(blend, vector, state.backend_embeds)?;
        let query = SearchQuery::new(stored.query_text.clone(), limit, mode)?;
        run_fan_out(&state, query).await.map(Json)
    }
    .instrument(span)
    .await
}

async fn run_fan_out(
    state: &AppState,
    query: SearchQuery,
) -> Result<AggregatedResponse, ApiError> {
    tracing::info!(
        query_text = %query.text,
        limit = query.limit.value(),
        keyword = query.mode.is_keyword(),
        targets = state.targets.len(),
        "dispatching fan-out"
    );
    let result = fan_out(&state.client, &state.targets, &query, &state.fields).await?;
    let response = aggregate(&query, &state.targets, result.outcomes, result.elapsed_ms);
    tracing::info!(
        successful = response.successful_count,
        failed = response.failed_count,
        total = response.total_targets,
        total_time_ms = response.total_time_ms,
        "fan-out complete"
    );
    Ok(response)
}

/// `POST /graphql`: forward one caller-supplied GraphQL document to the
/// backend unchanged and relay the answer.
pub async fn graphql_passthrough(
    State(state): State<AppState>,
    Json(request): Json<PassthroughRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let span = request_span("/graphql");
    async move {
        if request.query.trim().is_empty() {
            return Err(ApiError::BadRequest("query must not be empty".to_string()));
        }
        match state.client.graphql(&request.query).await {
            Ok(body) => Ok(Json(body)),
            Err(err @ BackendError::Timeout(_)) => Err(ApiError::GatewayTimeout(err.to_string())),
            Err(BackendError::GraphQl(errors)) => {
                Err(ApiError::BadRequest(format!("GraphQL errors: {}", errors)))
            }
            Err(err) => Err(ApiError::BadGateway(err.to_string())),
        }
    }
    .instrument(span)
    .await
}

/// `GET /health`: process liveness only, no backend call.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        backend_url: state.client.base_url().to_string(),
    })
}

/// `GET /selfcheck`: one lightweight backend probe. Failures are reported
/// in the body, never as a request failure.
pub async fn selfcheck(State(state): State<AppState>) -> Json<SelfcheckResponse> {
    let started = Instant::now();
    let probe = state.client.schema(SELFCHECK_TIMEOUT).await;
    let response_time_ms = started.elapsed().as_secs_f64() * 1000.0;
    let backend_url = state.client.base_url().to_string();
    match probe {
        Ok(schema) => Json(SelfcheckResponse {
            status: "ok",
            backend_url,
            reachable: true,
            response_time_ms,
            collections_available: schema.collections,
            errors: Vec::new(),
        }),
        Err(err) => {
            tracing::warn!(error = %err, "selfcheck probe failed");
            Json(SelfcheckResponse {
                status: "error",
                backend_url,
                reachable: false,
                response_time_ms,
                collections_available: Vec::new(),
                errors: vec![err.to_string()],
            })
        }
    }
}

/// `GET /`: endpoint directory.
pub async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "message": "fangate - fan-out search gateway",
        "endpoints": {
            "/search": "Fan-out search across all configured collections (keyword or blended)",
            "/search/lookup": "Fan-out search resolved from the stored-queries file",
            "/graphql": "Raw GraphQL passthrough to the backend",
            "/health": "Process liveness",
            "/selfcheck": "Backend connectivity probe"
        }
    }))
}
