//! GraphQL document construction, one collection per document.
//!
//! The document shape mirrors the backend's `Get` query syntax:
//! a `bm25` or `hybrid` clause, a `limit`, the returned object fields and
//! the `_additional { score }` block.

use fangate_core::types::{CollectionTarget, SearchMode, SearchQuery};

/// Which properties the match runs against and which object fields come
/// back per hit.
#[derive(Debug, Clone)]
pub struct FieldSelection {
    pub properties: Vec<String>,
    pub return_fields: Vec<String>,
}

/// One collection's ready-to-send GraphQL document.
#[derive(Debug, Clone)]
pub struct BuiltQuery {
    pub target: CollectionTarget,
    pub graphql: String,
}

/// Escape a string for literal inclusion inside GraphQL double quotes.
fn escape_graphql_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

fn quoted_list(items: &[String]) -> String {
    let quoted: Vec<String> = items.iter().map(|p| format!("\"{}\"", escape_graphql_string(p))).collect();
    format!("[{}]", quoted.join(", "))
}

/// Build the mode-specific search clause.
fn search_clause(query: &SearchQuery, fields: &FieldSelection) -> String {
    let escaped = escape_graphql_string(&query.text);
    let properties = quoted_list(&fields.properties);
    match &query.mode {
        SearchMode::Keyword => format!(
            "bm25: {{\n        query: \"{}\"\n        properties: {}\n      }}",
            escaped, properties
        ),
        SearchMode::Blended { alpha, vector } => {
            let mut params = format!("query: \"{}\"\n        alpha: {}", escaped, alpha.value());
            if let Some(v) = vector {
                // Large vectors (thousands of dimensions) serialize on one line.
                let vector_json =
                    serde_json::to_string(v).unwrap_or_else(|_| "[]".to_string());
                params.push_str(&format!("\n        vector: {}", vector_json));
            }
            params.push_str(&format!("\n        properties: {}", properties));
            format!("hybrid: {{\n        {}\n      }}", params)
        }
    }
}

/// Produce the full single-collection GraphQL document for `query`.
pub fn build_collection_query(
    query: &SearchQuery,
    target: &CollectionTarget,
    fields: &FieldSelection,
) -> BuiltQuery {
    let clause = search_clause(query, fields);
    let return_fields = fields.return_fields.join("\n      ");
    let graphql = format!(
        "{{\n  Get {{\n    {collection}(\n      {clause}\n      limit: {limit}\n    ) {{\n      {return_fields}\n      _additional {{\n        score\n      }}\n    }}\n  }}\n}}",
        collection = target,
        clause = clause,
        limit = query.limit.value(),
        return_fields = return_fields,
    );
    BuiltQuery { target: target.clone(), graphql }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fangate_core::types::ResultLimit;

    fn fields() -> FieldSelection {
        FieldSelection {
            properties: vec!["title".to_string(), "lyrics".to_string()],
            return_fields: vec!["title".to_string(), "artist".to_string()],
        }
    }

    fn target() -> CollectionTarget {
        CollectionTarget::new("SongLyrics").expect("name")
    }

    #[test]
    fn keyword_document_has_bm25_clause_only() {
        let q = SearchQuery::new(
            "love and heartbreak",
            ResultLimit::new(10).expect("limit"),
            SearchMode::Keyword,
        )
        .expect("query");
        let built = build_collection_query(&q, &target(), &fields());
        assert!(built.graphql.contains("bm25:"));
        assert!(!built.graphql.contains("hybrid:"));
        assert!(!built.graphql.contains("alpha:"));
        assert!(!built.graphql.contains("vector:"));
        assert!(built.graphql.contains("limit: 10"));
        assert!(built.graphql.contains("SongLyrics("));
        assert!(built.graphql.contains("_additional"));
    }

    #[test]
    fn blended_document_has_hybrid_clause_with_vector() {
        let mode = SearchMode::from_parts(Some(0.9), Some(vec![0.25, -0.5]), false).expect("mode");
        let q = SearchQuery::new("desert blues", ResultLimit::default(), mode).expect("query");
        let built = build_collection_query(&q, &target(), &fields());
        assert!(built.graphql.contains("hybrid:"));
        assert!(built.graphql.contains("alpha: 0.9"));
        assert!(built.graphql.contains("vector: [0.25,-0.5]"));
        assert!(!built.graphql.contains("bm25:"));
    }

    #[test]
    fn blended_document_omits_vector_when_backend_embeds() {
        let mode = SearchMode::from_parts(Some(0.5), None, true).expect("mode");
        let q = SearchQuery::new("desert blues", ResultLimit::default(), mode).expect("query");
        let built = build_collection_query(&q, &target(), &fields());
        assert!(built.graphql.contains("hybrid:"));
        assert!(!built.graphql.contains("vector:"));
    }

    #[test]
    fn embedded_quotes_are_escaped() {
        let q = SearchQuery::new(
            r#"she said "goodbye""#,
            ResultLimit::default(),
            SearchMode::Keyword,
        )
        .expect("query");
        let built = build_collection_query(&q, &target(), &fields());
        assert!(built.graphql.contains(r#"query: "she said \"goodbye\"""#));
    }

    #[test]
    fn backslashes_are_escaped_before_quotes() {
        let q = SearchQuery::new(r"a\b", ResultLimit::default(), SearchMode::Keyword)
            .expect("query");
        let built = build_collection_query(&q, &target(), &fields());
        assert!(built.graphql.contains(r#"query: "a\\b""#));
    }
}
