//! HTTP client for the document index service.
//!
//! # Responsibilities
//! - Index documents and run queries, nothing else
//! - Attach the shared secret header to every call
//! - Map HTTP statuses onto `SearchError`

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use url::Url;

use crate::search::types::{Document, IndexAck, SearchError, SearchResult, SearchResults};

/// Header carrying the shared secret.
pub const SECRET_HEADER: &str = "x-search-secret";

/// Where the search service lives and how to authenticate against it.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub base_url: String,

    /// Shared secret sent in `x-search-secret`.
    pub secret: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8082".to_string(),
            secret: "changeme".to_string(),
        }
    }
}

/// The two operations offered by the document index.
pub trait DocumentIndex: Send + Sync {
    fn index(&self, document: &Document) -> impl Future<Output = SearchResult<IndexAck>> + Send;

    fn search(&self, query: &str) -> impl Future<Output = SearchResult<SearchResults>> + Send;
}

/// Document index reached over HTTP.
#[derive(Clone)]
pub struct HttpDocumentIndex {
    client: Client,
    base_url: Url,
    secret: String,
}

impl HttpDocumentIndex {
    /// Create a client rooted at `base_url`.
    ///
    /// A trailing slash is added to the base path so that `index` and `search`
    /// resolve below it rather than replacing its last segment.
    pub fn new(mut base_url: Url, secret: impl Into<String>) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url,
            secret: secret.into(),
        }
    }

    pub fn from_config(config: &SearchConfig) -> SearchResult<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            SearchError::InvalidInput(format!("invalid search URL '{}': {}", config.base_url, e))
        })?;
        Ok(Self::new(base_url, config.secret.clone()))
    }

    fn endpoint(&self, path: &str) -> SearchResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| SearchError::InvalidInput(format!("invalid search URL: {}", e)))
    }
}

async fn check_status(response: Response) -> SearchResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(match status {
        StatusCode::BAD_REQUEST => SearchError::Rejected(body),
        StatusCode::UNAUTHORIZED => SearchError::Unauthorized,
        _ => SearchError::Status {
            status: status.as_u16(),
            body,
        },
    })
}

impl DocumentIndex for HttpDocumentIndex {
    async fn index(&self, document: &Document) -> SearchResult<IndexAck> {
        document.validate()?;

        let response = self
            .client
            .post(self.endpoint("index")?)
            .header(SECRET_HEADER, &self.secret)
            .json(document)
            .send()
            .await?;

        let ack = check_status(response).await?.json::<IndexAck>().await?;
        tracing::debug!(id = %ack.id, "Document indexed");
        Ok(ack)
    }

    async fn search(&self, query: &str) -> SearchResult<SearchResults> {
        if query.trim().is_empty() {
            return Err(SearchError::InvalidInput("missing query".into()));
        }

        let response = self
            .client
            .get(self.endpoint("search")?)
            .header(SECRET_HEADER, &self.secret)
            .query(&[("q", query)])
            .send()
            .await?;

        Ok(check_status(response).await?.json::<SearchResults>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::Query,
        http::HeaderMap,
        routing::{get, post},
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::collections::HashMap;

    fn authorized(headers: &HeaderMap) -> bool {
        headers.get(SECRET_HEADER).and_then(|v| v.to_str().ok()) == Some("s3cret")
    }

    async fn start_mock_index() -> Url {
        let app = Router::new()
            .route(
                "/index",
                post(|headers: HeaderMap, Json(doc): Json<Value>| async move {
                    if !authorized(&headers) {
                        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "Unauthorized"})));
                    }
                    (StatusCode::OK, Json(json!({"status": "indexed", "id": doc["id"]})))
                }),
            )
            .route(
                "/search",
                get(|headers: HeaderMap, Query(q): Query<HashMap<String, String>>| async move {
                    if !authorized(&headers) {
                        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "Unauthorized"})));
                    }
                    let term = q.get("q").cloned().unwrap_or_default();
                    (
                        StatusCode::OK,
                        Json(json!({"total_hits": 1, "hits": [{"id": term, "score": 1.5}]})),
                    )
                }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Url::parse(&format!("http://{}/", addr)).unwrap()
    }

    #[tokio::test]
    async fn test_index_and_search_roundtrip() {
        let index = HttpDocumentIndex::new(start_mock_index().await, "s3cret");

        let ack = index
            .index(&Document {
                id: "42".into(),
                title: "Hello".into(),
                description: "world".into(),
            })
            .await
            .unwrap();
        assert_eq!(ack, IndexAck { status: "indexed".into(), id: "42".into() });

        let results = index.search("chat").await.unwrap();
        assert_eq!(results.total_hits, 1);
        assert_eq!(results.hits[0].id, "chat");
    }

    #[test]
    fn test_base_path_without_trailing_slash_is_kept() {
        let index = HttpDocumentIndex::from_config(&SearchConfig {
            base_url: "http://search.local/api".into(),
            secret: "s".into(),
        })
        .unwrap();
        assert_eq!(index.endpoint("index").unwrap().as_str(), "http://search.local/api/index");
        assert_eq!(index.endpoint("search").unwrap().as_str(), "http://search.local/api/search");

        let rooted = HttpDocumentIndex::new(Url::parse("http://search.local").unwrap(), "s");
        assert_eq!(rooted.endpoint("index").unwrap().as_str(), "http://search.local/index");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let err = HttpDocumentIndex::from_config(&SearchConfig {
            base_url: "not a url".into(),
            ..SearchConfig::default()
        })
        .err()
        .unwrap();
        assert!(matches!(err, SearchError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_wrong_secret_is_unauthorized() {
        let index = HttpDocumentIndex::new(start_mock_index().await, "nope");
        let err = index.search("x").await.unwrap_err();
        assert!(matches!(err, SearchError::Unauthorized));
        assert!(err.is_client_error());
    }

    #[tokio::test]
    async fn test_invalid_input_never_reaches_network() {
        // Nothing listens here; a network attempt would yield Transport instead.
        let index = HttpDocumentIndex::new(Url::parse("http://127.0.0.1:9/").unwrap(), "s");

        let err = index.search("   ").await.unwrap_err();
        assert!(matches!(err, SearchError::InvalidInput(_)));

        let err = index
            .index(&Document {
                id: String::new(),
                title: "t".into(),
                description: "d".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::InvalidInput(_)));
    }
}
