//! SSH key and location endpoint handlers.

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

/// GET /ssh_keys
pub async fn list_ssh_keys(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Response {
    let state = state.read().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }

    paginate(&state.base_url, "/ssh_keys", state.ssh_keys.clone(), &query)
}

/// GET /ssh_keys/{fingerprint}
pub async fn get_ssh_key(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path(fingerprint): Path<String>,
) -> Response {
    let state = state.read().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }

    match state.get_ssh_key(&fingerprint) {
        Some(key) => (StatusCode::OK, Json(key.clone())).into_response(),
        None => not_found(format!("SSH key not found: {fingerprint}")),
    }
}

/// GET /locations
pub async fn list_locations(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Response {
    let state = state.read().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }

    let locations = state.list_locations(query.search_pattern.as_deref());
    paginate(&state.base_url, "/locations", locations, &query)
}

/// GET /locations/{id}
pub async fn get_location(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    let state = state.read().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }

    match state.get_location(id) {
        Some(location) => (StatusCode::OK, Json(location.clone())).into_response(),
        None => not_found(format!("Location not found: {id}")),
    }
}
