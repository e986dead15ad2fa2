//! Network pool and subnetwork endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tokio::sync::RwLock;

use super::{authorize, not_found, paginate, ListQuery};
use crate::mock_server::state::MockState;

/// GET /network_pools
pub async fn list_network_pools(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Response {
    let state = state.read().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }

    let mut pools = state.list_network_pools(query.search_pattern.as_deref());
    if let Some(ref kind) = query.kind {
        pools.retain(|p| &p.pool_type == kind);
    }
    if let Some(location_id) = query.location_id {
        pools.retain(|p| p.location_ids.contains(&location_id));
    }
    paginate(&state.base_url, "/network_pools", pools, &query)
}

/// GET /network_pools/{id}
pub async fn get_network_pool(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let state = state.read().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }

    match state.get_network_pool(&id) {
        Some(pool) => (StatusCode::OK, Json(pool.clone())).into_response(),
        None => not_found(format!("Network pool not found: {id}")),
    }
}

/// GET /network_pools/{id}/subnetworks
pub async fn list_subnetworks(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path(pool_id): Path<String>,
    Query(query): Query<ListQuery>,
) -> Response {
    let state = state.read().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }

    match state.list_subnetworks(&pool_id) {
        Some(subnets) => {
            let path = format!("/network_pools/{pool_id}/subnetworks");
            paginate(&state.base_url, &path, subnets, &query)
        }
        None => not_found(format!("Network pool not found: {pool_id}")),
    }
}
