//! Pure aggregation of collection outcomes.

use std::collections::HashMap;

use fangate_core::types::{
    AggregatedResponse, CollectionOutcome, CollectionTarget, SearchQuery,
};

/// Fold per-collection outcomes into the unified response.
///
/// Accepts outcomes in any completion order and re-sorts them into the
/// configured target order so the response is deterministic. Zero
/// successes is a normal result, not an error.
pub fn aggregate(
    query: &SearchQuery,
    targets: &[CollectionTarget],
    mut outcomes: Vec<CollectionOutcome>,
    total_time_ms: f64,
) -> AggregatedResponse {
    let order: HashMap<&str, usize> = targets
        .iter()
        .enumerate()
        .map(|(i, t)| (t.as_str(), i))
        .collect();
    outcomes.sort_by_key(|o| order.get(o.collection.as_str()).copied().unwrap_or(usize::MAX));

    let successful = outcomes.iter().filter(|o| o.is_success()).count();
    let failed = outcomes.len() - successful;

    AggregatedResponse {
        query_text: query.text.clone(),
        limit: query.limit.value(),
        blend: query.mode.blend_value(),
        total_targets: outcomes.len(),
        successful_count: successful,
        failed_count: failed,
        outcomes,
        total_time_ms,
    }
}
