//! Concurrent fan-out over the configured collections.
//!
//! All documents are built and mode-checked before anything is sent: a
//! build failure is a defect and aborts the request with no partial
//! dispatch. After that point nothing fails — each collection's call is
//! converted into a `CollectionOutcome` whatever happens, and the join
//! waits for every call. A slow collection delays only the overall join,
//! bounded by the per-call timeout; it never cancels its siblings.

use std::time::Instant;

use fangate_backend::BackendClient;
use fangate_core::types::{CollectionOutcome, CollectionTarget, SearchQuery};
use fangate_core::Result;
use fangate_query::builder::{build_collection_query, BuiltQuery, FieldSelection};
use fangate_query::validate::check_mode_markers;
use futures::future::join_all;

/// Outcomes of one fan-out plus the wall-clock time from first dispatch
/// to last termination.
#[derive(Debug)]
pub struct FanOut {
    pub outcomes: Vec<CollectionOutcome>,
    pub elapsed_ms: f64,
}

/// Build, validate and dispatch one query per target; wait for all.
///
/// Returns `Err` only for a pre-dispatch failure (a built document failing
/// its mode check). Backend failures never surface here — they are data,
/// one outcome per target.
pub async fn fan_out(
    client: &BackendClient,
    targets: &[CollectionTarget],
    query: &SearchQuery,
    fields: &FieldSelection,
) -> Result<FanOut> {
    // Phase 1: build everything before sending anything.
    let mut built: Vec<BuiltQuery> = Vec::with_capacity(targets.len());
    for target in targets {
        let doc = build_collection_query(query, target, fields);
        check_mode_markers(&doc, &query.mode)?;
        built.push(doc);
    }
    tracing::debug!(targets = targets.len(), keyword = query.mode.is_keyword(), "fan-out ready");

    // Phase 2: all calls in flight at once; join preserves target order.
    let started = Instant::now();
    let outcomes = join_all(built.into_iter().map(|doc| query_one(client, doc))).await;
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

    debug_assert_eq!(outcomes.len(), targets.len());
    Ok(FanOut { outcomes, elapsed_ms })
}

/// One collection's call, converted to an outcome whatever happens.
async fn query_one(client: &BackendClient, doc: BuiltQuery) -> CollectionOutcome {
    let started = Instant::now();
    match client.graphql(&doc.graphql).await {
        Ok(body) => {
            let hits = hit_count(&body, &doc.target);
            tracing::debug!(
                collection = %doc.target,
                hits,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "collection answered"
            );
            CollectionOutcome::success(doc.target, 200, body)
        }
        Err(err) => {
            tracing::warn!(
                collection = %doc.target,
                status = err.status_code(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                error = %err,
                "collection failed"
            );
            CollectionOutcome::failure(doc.target, err.status_code(), err.to_string())
        }
    }
}

/// Number of hits in a successful body: `data.Get.<collection>` array length.
fn hit_count(body: &serde_json::Value, target: &CollectionTarget) -> usize {
    body.get("data")
        .and_then(|d| d.get("Get"))
        .and_then(|g| g.get(target.as_str()))
        .and_then(|c| c.as_array())
        .map_or(0, Vec::len)
}
