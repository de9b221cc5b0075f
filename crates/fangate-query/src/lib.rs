//! fangate-query
//!
//! Builds single-collection GraphQL documents for the two search modes
//! (`bm25` keyword match, `hybrid` keyword+vector blend), checks built
//! documents against their mode markers, and extracts fields back out of
//! documents for lookup and round-trip verification.

pub mod builder;
pub mod extract;
pub mod validate;

pub use builder::{build_collection_query, BuiltQuery, FieldSelection};
pub use extract::{extract_limit, extract_query_text, extract_vector};
pub use validate::check_mode_markers;
