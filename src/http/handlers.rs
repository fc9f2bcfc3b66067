use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse},
    Json,
};

use crate::health::Snapshot;
use crate::http::server::AppState;
use crate::observability::metrics::CONTENT_TYPE;

const DASHBOARD: &str = include_str!("assets/dashboard.html");

/// Full snapshot keyed by service identifier.
pub async fn get_status(State(state): State<AppState>) -> Json<Snapshot> {
    Json(state.store.snapshot())
}

/// Prometheus scrape endpoint.
pub async fn get_metrics(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.store.snapshot();
    tracing::trace!(services = snapshot.len(), "Rendering metrics");
    (
        [(header::CONTENT_TYPE, CONTENT_TYPE)],
        state.exporter.render(&snapshot),
    )
}

pub async fn get_dashboard() -> Html<&'static str> {
    Html(DASHBOARD)
}
