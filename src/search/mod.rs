//! Document index collaborator.
//!
//! The full-text index is an external service; this module only speaks its
//! two operations (`index`, `search`) and never owns index state.
//!
//! # Data Flow
//! ```text
//! monitor-cli index/search
//!     → types.rs (local validation)
//!     → client.rs (HTTP + shared secret)
//!     → search service
//! ```

pub mod client;
pub mod types;

pub use client::{DocumentIndex, HttpDocumentIndex, SearchConfig};
pub use types::{Document, IndexAck, SearchError, SearchHit, SearchResult, SearchResults};
