//! Snapshot endpoint.
//!
//! GET /api/v1/snapshot?path=
//!
//! Builds a fresh snapshot for `path` (the server's default start path when
//! omitted) and returns it as JSON. Nothing is cached between requests.

use std::path::PathBuf;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::error::Result;
use crate::models::RepositorySnapshot;
use crate::routes::AppState;

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/snapshot", get(get_snapshot))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct SnapshotQuery {
    path: Option<String>,
}

async fn get_snapshot(
    State(state): State<AppState>,
    Query(query): Query<SnapshotQuery>,
) -> Result<Json<RepositorySnapshot>> {
    let start = query
        .path
        .map(PathBuf::from)
        .unwrap_or_else(|| state.default_path.to_path_buf());
    let snapshot = state.aggregator.build_snapshot(&start).await?;
    Ok(Json(snapshot))
}
