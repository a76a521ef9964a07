//! HTTP adapter - exposes the snapshot pipeline to a host UI.
//!
//! - `snapshot`: one-shot snapshot as JSON (GET /api/v1/snapshot)

pub mod snapshot;

use std::path::Path;
use std::sync::Arc;

use axum::Router;

use crate::snapshot::SharedAggregator;

#[derive(Clone)]
pub struct AppState {
    pub aggregator: SharedAggregator,
    /// Start path used when a request does not name one.
    pub default_path: Arc<Path>,
}

pub fn create_router(state: AppState) -> Router {
    Router::new().merge(snapshot::routes(state))
}
