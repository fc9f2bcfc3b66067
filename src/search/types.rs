//! Document index types and error definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A document accepted by the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl Document {
    /// Reject documents the index would refuse, before any network call.
    pub fn validate(&self) -> SearchResult<()> {
        if self.id.trim().is_empty() {
            return Err(SearchError::InvalidInput("missing 'id' field".into()));
        }
        Ok(())
    }
}

/// Acknowledgement returned by the index for a stored document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IndexAck {
    pub status: String,
    pub id: String,
}

/// A single ranked match.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchHit {
    pub id: String,
    #[serde(default)]
    pub score: f64,
}

/// Ranked results of a query. Ranking is entirely the index's business.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub total_hits: u64,
    #[serde(default)]
    pub hits: Vec<SearchHit>,
}

/// Errors at the document index boundary.
///
/// None of these affect monitoring state.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Input rejected locally (empty id, empty query).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The index answered 400.
    #[error("rejected by index: {0}")]
    Rejected(String),

    /// Shared secret missing or wrong.
    #[error("unauthorized")]
    Unauthorized,

    /// Any other non-success status.
    #[error("index returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Connection, timeout or decoding failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl SearchError {
    /// Whether the caller, not the index, is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            SearchError::InvalidInput(_) | SearchError::Rejected(_) | SearchError::Unauthorized
        )
    }
}

/// Result type for document index operations.
pub type SearchResult<T> = Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_without_id_is_client_error() {
        let doc = Document {
            id: "  ".into(),
            title: "t".into(),
            description: String::new(),
        };
        let err = doc.validate().unwrap_err();
        assert!(err.is_client_error());
        assert_eq!(err.to_string(), "invalid input: missing 'id' field");
    }

    #[test]
    fn test_results_decode_ignores_extra_fields() {
        let results: SearchResults = serde_json::from_str(
            r#"{"status":{"total":1},"total_hits":2,"took":1200,
                "hits":[{"index":"mem","id":"a","score":0.9},{"id":"b","score":0.4}]}"#,
        )
        .unwrap();
        assert_eq!(results.total_hits, 2);
        assert_eq!(results.hits[0].id, "a");
        assert_eq!(results.hits[1].score, 0.4);
    }
}
