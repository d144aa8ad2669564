//! Response-shape normalisation at the collaborator boundary.
//!
//! The KEDB API has grown several equivalent response shapes over time:
//! suggestions arrive as `{"kedbs": [...]}` or as a bare array, and
//! generated content as `{"content": ...}`, `{"kedbContent": ...}` or a
//! bare string. Rather than letting that ambiguity leak into the session,
//! each endpoint gets one explicit parse function here that accepts every
//! known shape and fails loudly on anything else.

use kedb_core::{ApiFailure, SuggestedEntry};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum SuggestionsPayload {
    Wrapped { kedbs: Vec<SuggestedEntry> },
    Bare(Vec<SuggestedEntry>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum GeneratedPayload {
    Content {
        content: String,
    },
    KedbContent {
        #[serde(rename = "kedbContent")]
        kedb_content: String,
    },
    Bare(String),
}

/// Normalises a suggestions response body into an entry list.
///
/// # Errors
///
/// Returns `ApiFailure` if the body matches none of the known shapes.
pub fn parse_suggestions(body: serde_json::Value) -> Result<Vec<SuggestedEntry>, ApiFailure> {
    match serde_json::from_value(body) {
        Ok(SuggestionsPayload::Wrapped { kedbs }) => Ok(kedbs),
        Ok(SuggestionsPayload::Bare(kedbs)) => Ok(kedbs),
        Err(e) => Err(ApiFailure(format!(
            "unrecognised suggestions response shape: {e}"
        ))),
    }
}

/// Normalises a generation response body into the draft content string.
///
/// # Errors
///
/// Returns `ApiFailure` if the body matches none of the known shapes.
pub fn parse_generated(body: serde_json::Value) -> Result<String, ApiFailure> {
    match serde_json::from_value(body) {
        Ok(GeneratedPayload::Content { content }) => Ok(content),
        Ok(GeneratedPayload::KedbContent { kedb_content }) => Ok(kedb_content),
        Ok(GeneratedPayload::Bare(content)) => Ok(content),
        Err(e) => Err(ApiFailure(format!(
            "unrecognised generation response shape: {e}"
        ))),
    }
}
