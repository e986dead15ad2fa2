//! Host endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::Response,
};
use tokio::sync::RwLock;

use super::{authorize, not_found, paginate, ListQuery};
use crate::mock_server::state::MockState;

/// GET /hosts
pub async fn list_hosts(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Response {
    let state = state.read().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }

    let hosts = state.list_hosts(
        query.location_id,
        query.kind.as_deref(),
        query.search_pattern.as_deref(),
    );
    paginate(&state.base_url, "/hosts", hosts, &query)
}

/// GET /hosts/{kind}/{id}/ptr_records
pub async fn list_ptr_records(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path((kind, host_id)): Path<(String, String)>,
    Query(query): Query<ListQuery>,
) -> Response {
    let state = state.read().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }

    match state.list_ptr_records(&kind, &host_id) {
        Some(records) => {
            let path = format!("/hosts/{kind}/{host_id}/ptr_records");
            paginate(&state.base_url, &path, records, &query)
        }
        None => not_found(format!("Host not found: {kind}/{host_id}")),
    }
}
