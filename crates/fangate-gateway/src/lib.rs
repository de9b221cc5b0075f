//! fangate-gateway
//!
//! HTTP surface of the fan-out gateway: request/response models, handlers,
//! the stored-query lookup, and the axum router. All backend traffic goes
//! through the shared [`fangate_backend::BackendClient`] held in
//! [`state::AppState`].

pub mod error;
pub mod handlers;
pub mod models;
pub mod query_store;
pub mod state;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Assemble the application router over a ready state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/search", post(handlers::search))
        .route("/search/lookup", post(handlers::search_lookup))
        .route("/graphql", post(handlers::graphql_passthrough))
        .route("/health", get(handlers::health))
        .route("/selfcheck", get(handlers::selfcheck))
        .with_state(state)
}
