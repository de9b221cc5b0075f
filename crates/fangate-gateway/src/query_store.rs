//! Stored-query file support for the lookup endpoint.
//!
//! A stored-queries file is a JSON array of objects keyed by `query_text`;
//! each entry may carry its own limit, blend weight, vector, and/or a full
//! GraphQL document. Older files embed the vector only inside the GraphQL
//! text, so resolution falls back to extracting it from there.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use fangate_query::extract::extract_vector;

/// One entry of a stored-queries file.
#[derive(Debug, Clone, Deserialize)]
pub struct StoredQuery {
    pub query_text: String,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub alpha: Option<f64>,
    #[serde(default)]
    pub vector: Option<Vec<f32>>,
    #[serde(default)]
    pub graphql: Option<String>,
}

impl StoredQuery {
    /// The entry's vector: stored directly, or recovered from the stored
    /// GraphQL document.
    pub fn resolve_vector(&self) -> Option<Vec<f32>> {
        self.vector
            .clone()
            .or_else(|| self.graphql.as_deref().and_then(extract_vector))
    }

    /// The entry's blend weight. An explicit `alpha` wins; otherwise the
    /// stored GraphQL document decides: a `bm25:` clause means keyword
    /// search, anything else defaults to a 0.9 blend.
    pub fn resolve_blend(&self) -> Option<f64> {
        if let Some(alpha) = self.alpha {
            return if alpha == 0.0 { None } else { Some(alpha) };
        }
        match &self.graphql {
            Some(doc) if doc.to_lowercase().contains("bm25:") => None,
            Some(_) => Some(0.9),
            None => None,
        }
    }
}

/// In-memory index over a stored-queries file, loaded once at startup.
pub struct QueryStore {
    queries: Vec<StoredQuery>,
}

impl QueryStore {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read queries file {}: {}", path.display(), e))?;
        let queries: Vec<StoredQuery> = serde_json::from_str(&raw)
            .map_err(|e| anyhow::anyhow!("Failed to parse queries file {}: {}", path.display(), e))?;
        Ok(Self { queries })
    }

    /// Exact-match lookup by query text.
    pub fn find(&self, query_text: &str) -> Option<&StoredQuery> {
        self.queries.iter().find(|q| q.query_text == query_text)
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}
