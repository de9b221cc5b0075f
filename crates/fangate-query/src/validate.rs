//! Post-construction mode check on built documents.
//!
//! The builder cannot produce a mixed-mode document by construction, so a
//! failure here is a programming defect, never bad caller input. The check
//! stays cheap (case-insensitive marker scan) and runs before dispatch so a
//! defective build aborts the whole request instead of fanning out.

use fangate_core::error::{Error, Result};
use fangate_core::types::SearchMode;

use crate::builder::BuiltQuery;

const KEYWORD_MARKER: &str = "bm25:";
const BLENDED_MARKER: &str = "hybrid:";

/// Verify that `built` carries exactly the marker its mode requires.
pub fn check_mode_markers(built: &BuiltQuery, mode: &SearchMode) -> Result<()> {
    let lowered = built.graphql.to_lowercase();
    let has_keyword = lowered.contains(KEYWORD_MARKER);
    let has_blended = lowered.contains(BLENDED_MARKER);

    let fragment = || {
        let mut end = built.graphql.len().min(200);
        while !built.graphql.is_char_boundary(end) {
            end -= 1;
        }
        &built.graphql[..end]
    };

    match mode {
        SearchMode::Keyword => {
            if !has_keyword {
                return Err(Error::Invariant(format!(
                    "keyword query for '{}' is missing its '{}' clause: {}",
                    built.target, KEYWORD_MARKER, fragment()
                )));
            }
            if has_blended {
                return Err(Error::Invariant(format!(
                    "keyword query for '{}' contains a '{}' clause: {}",
                    built.target, BLENDED_MARKER, fragment()
                )));
            }
        }
        SearchMode::Blended { vector, .. } => {
            if !has_blended {
                return Err(Error::Invariant(format!(
                    "blended query for '{}' is missing its '{}' clause: {}",
                    built.target, BLENDED_MARKER, fragment()
                )));
            }
            if has_keyword {
                return Err(Error::Invariant(format!(
                    "blended query for '{}' contains a '{}' clause: {}",
                    built.target, KEYWORD_MARKER, fragment()
                )));
            }
            if vector.is_some() && !lowered.contains("vector:") {
                return Err(Error::Invariant(format!(
                    "blended query for '{}' dropped its vector payload: {}",
                    built.target, fragment()
                )));
            }
        }
    }
    Ok(())
}
