//! Domain types for the fan-out gateway.
//!
//! The keyword-vs-blended distinction is a tagged enum rather than a
//! nullable weight plus a nullable vector, so a blended query without its
//! weight, or a keyword query carrying one, cannot be constructed at all.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Smallest accepted per-collection result limit.
pub const LIMIT_MIN: usize = 1;
/// Largest accepted per-collection result limit.
pub const LIMIT_MAX: usize = 1000;
/// Limit applied when the caller does not send one.
pub const LIMIT_DEFAULT: usize = 200;

/// Name of one backend collection to query.
///
/// Collection names are interpolated into GraphQL documents, so only
/// identifier characters are accepted (letter first, then letters, digits
/// and underscores).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectionTarget(String);

impl CollectionTarget {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let mut chars = name.chars();
        let valid = match chars.next() {
            Some(c) if c.is_ascii_alphabetic() => {
                chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            }
            _ => false,
        };
        if !valid {
            return Err(Error::InvalidConfig(format!(
                "collection name '{}' is not a valid GraphQL identifier",
                name
            )));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CollectionTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Blend weight for blended search, constrained to `0 < w <= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BlendWeight(f64);

impl BlendWeight {
    pub fn new(value: f64) -> Result<Self> {
        if value > 0.0 && value <= 1.0 {
            Ok(Self(value))
        } else {
            Err(Error::InvalidRequest(format!(
                "blend must be in (0, 1], got {}",
                value
            )))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

/// Per-collection result limit, constrained to `[{LIMIT_MIN}, {LIMIT_MAX}]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResultLimit(usize);

impl ResultLimit {
    pub fn new(value: usize) -> Result<Self> {
        if (LIMIT_MIN..=LIMIT_MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(Error::InvalidRequest(format!(
                "limit must be in [{}, {}], got {}",
                LIMIT_MIN, LIMIT_MAX, value
            )))
        }
    }

    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for ResultLimit {
    fn default() -> Self {
        Self(LIMIT_DEFAULT)
    }
}

/// One of the two mutually exclusive search modes.
///
/// The vector inside `Blended` is optional only because a backend with a
/// query-time vectorizer can embed the query text itself; whether the
/// option may be `None` is decided at construction time by
/// [`SearchMode::from_parts`], never downstream.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchMode {
    Keyword,
    Blended {
        alpha: BlendWeight,
        vector: Option<Vec<f32>>,
    },
}

impl SearchMode {
    /// Classify the raw `blend`/`vector` pair a caller sent.
    ///
    /// `backend_embeds` states whether the backend can embed the query
    /// text itself; when it cannot, a blended request without a vector is
    /// rejected up front rather than failing on every collection.
    pub fn from_parts(
        blend: Option<f64>,
        vector: Option<Vec<f32>>,
        backend_embeds: bool,
    ) -> Result<Self> {
        match blend {
            Some(a) if a != 0.0 => {
                let alpha = BlendWeight::new(a)?;
                if vector.is_none() && !backend_embeds {
                    return Err(Error::InvalidRequest(format!(
                        "blend {} requires a vector: the backend has no \
                         query-time vectorizer",
                        a
                    )));
                }
                if let Some(v) = &vector {
                    if v.is_empty() {
                        return Err(Error::InvalidRequest(
                            "vector must not be empty".to_string(),
                        ));
                    }
                    if v.iter().any(|x| !x.is_finite()) {
                        return Err(Error::InvalidRequest(
                            "vector components must be finite numbers".to_string(),
                        ));
                    }
                }
                Ok(Self::Blended { alpha, vector })
            }
            _ => {
                if vector.is_some() {
                    return Err(Error::InvalidRequest(
                        "vector was supplied but blend is absent or 0; \
                         keyword search does not use a vector"
                            .to_string(),
                    ));
                }
                Ok(Self::Keyword)
            }
        }
    }

    pub fn is_keyword(&self) -> bool {
        matches!(self, Self::Keyword)
    }

    /// Effective blend weight on the wire: 0.0 for keyword mode.
    pub fn blend_value(&self) -> f64 {
        match self {
            Self::Keyword => 0.0,
            Self::Blended { alpha, .. } => alpha.value(),
        }
    }
}

/// A fully validated logical search, ready to fan out.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub text: String,
    pub limit: ResultLimit,
    pub mode: SearchMode,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>, limit: ResultLimit, mode: SearchMode) -> Result<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(Error::InvalidRequest("query_text must not be empty".to_string()));
        }
        Ok(Self { text, limit, mode })
    }
}

/// Terminal result of one collection's backend call.
///
/// Created exactly once per target per request, immutable afterwards.
/// `status_code` is the backend HTTP status, or 0 when the call never got
/// a status line (timeout, connect failure).
#[derive(Debug, Clone, Serialize)]
pub struct CollectionOutcome {
    pub collection: CollectionTarget,
    pub status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CollectionOutcome {
    pub fn success(
        collection: CollectionTarget,
        status_code: u16,
        payload: serde_json::Value,
    ) -> Self {
        Self { collection, status_code, payload: Some(payload), error: None }
    }

    pub fn failure(
        collection: CollectionTarget,
        status_code: u16,
        error: impl Into<String>,
    ) -> Self {
        Self { collection, status_code, payload: None, error: Some(error.into()) }
    }

    pub fn is_success(&self) -> bool {
        self.payload.is_some() && self.error.is_none()
    }
}

/// Unified response for one fan-out request.
///
/// Invariant: `successful_count + failed_count ==
/// total_targets == outcomes.len()`.
#[derive(Debug, Serialize)]
pub struct AggregatedResponse {
    pub query_text: String,
    pub limit: usize,
    pub blend: f64,
    pub total_targets: usize,
    pub successful_count: usize,
    pub failed_count: usize,
    pub outcomes: Vec<CollectionOutcome>,
    pub total_time_ms: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_mode_from_absent_or_zero_blend() {
        let m = SearchMode::from_parts(None, None, false).expect("absent blend");
        assert!(m.is_keyword());
        let m = SearchMode::from_parts(Some(0.0), None, false).expect("zero blend");
        assert!(m.is_keyword());
        assert_eq!(m.blend_value(), 0.0);
    }

    #[test]
    fn keyword_mode_rejects_vector() {
        let err = SearchMode::from_parts(None, Some(vec![0.1, 0.2]), false);
        assert!(err.is_err());
        let err = SearchMode::from_parts(Some(0.0), Some(vec![0.1]), false);
        assert!(err.is_err());
    }

    #[test]
    fn blended_mode_requires_vector_without_vectorizer() {
        assert!(SearchMode::from_parts(Some(0.9), None, false).is_err());
        let m = SearchMode::from_parts(Some(0.9), None, true).expect("backend embeds");
        assert!(!m.is_keyword());
        let m = SearchMode::from_parts(Some(0.9), Some(vec![0.5; 4]), false).expect("vector given");
        assert!((m.blend_value() - 0.9).abs() < 1e-9);
    }

    #[test]
    fn blend_bounds() {
        assert!(SearchMode::from_parts(Some(-0.1), None, true).is_err());
        assert!(SearchMode::from_parts(Some(1.5), None, true).is_err());
        assert!(SearchMode::from_parts(Some(1.0), None, true).is_ok());
    }

    #[test]
    fn limit_bounds() {
        assert!(ResultLimit::new(0).is_err());
        assert!(ResultLimit::new(1001).is_err());
        assert_eq!(ResultLimit::new(1).expect("min").value(), 1);
        assert_eq!(ResultLimit::new(1000).expect("max").value(), 1000);
        assert_eq!(ResultLimit::default().value(), LIMIT_DEFAULT);
    }

    #[test]
    fn collection_names_are_identifiers() {
        assert!(CollectionTarget::new("SongLyrics_400k").is_ok());
        assert!(CollectionTarget::new("").is_err());
        assert!(CollectionTarget::new("9lives").is_err());
        assert!(CollectionTarget::new("Bad Name").is_err());
        assert!(CollectionTarget::new("Inject) { }").is_err());
    }

    #[test]
    fn outcome_success_requires_data_and_no_error() {
        let t = CollectionTarget::new("A").expect("name");
        assert!(CollectionOutcome::success(t.clone(), 200, serde_json::json!({})).is_success());
        assert!(!CollectionOutcome::failure(t, 200, "GraphQL errors: ...").is_success());
    }
}
