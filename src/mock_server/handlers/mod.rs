//! HTTP request handlers for the mock server.
//!
//! List handlers serve one page at a time and describe the neighbouring
//! pages with an RFC 5988 `Link` header, the way the real API does.

pub mod accounts;
pub mod hosts;
pub mod networks;

pub use accounts::*;
pub use hosts::*;
pub use networks::*;

use axum::{
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::mock_server::state::MockState;

/// Page size used when the request does not name one.
pub const DEFAULT_PER_PAGE: u32 = 20;

/// Query parameters shared by the list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub search_pattern: Option<String>,
    pub location_id: Option<i64>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Error body in the API's `{code, message}` shape.
pub(crate) fn error_response(status: StatusCode, code: &str, message: String) -> Response {
    (
        status,
        Json(serde_json::json!({
            "code": code,
            "message": message,
        })),
    )
        .into_response()
}

pub(crate) fn not_found(message: String) -> Response {
    error_response(StatusCode::NOT_FOUND, "NOT_FOUND", message)
}

/// Rejects the request with 401 when the state requires a token it lacks.
pub(crate) fn authorize(state: &MockState, headers: &HeaderMap) -> Result<(), Response> {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    if state.is_authorized(authorization) {
        Ok(())
    } else {
        Err(error_response(
            StatusCode::UNAUTHORIZED,
            "UNAUTHORIZED",
            "Invalid or missing API token".to_string(),
        ))
    }
}

/// Serve one page of `items` with a `Link` header.
///
/// `first` and `last` are always present, `prev` and `next` only when that
/// page exists. Link targets are absolute and carry `page` and `per_page`.
pub(crate) fn paginate<T: Serialize>(
    base_url: &str,
    path: &str,
    items: Vec<T>,
    query: &ListQuery,
) -> Response {
    let per_page = query.per_page.filter(|n| *n > 0).unwrap_or(DEFAULT_PER_PAGE);
    let page = query.page.filter(|n| *n > 0).unwrap_or(1);
    let total = items.len() as u32;
    let last = total.div_ceil(per_page).max(1);

    let start = (page as usize - 1).saturating_mul(per_page as usize);
    let slice: Vec<T> = items
        .into_iter()
        .skip(start)
        .take(per_page as usize)
        .collect();

    let link = |target: u32, rel: &str| {
        format!("<{base_url}{path}?page={target}&per_page={per_page}>; rel=\"{rel}\"")
    };

    let mut links = Vec::new();
    if page < last {
        links.push(link(page + 1, "next"));
    }
    if page > 1 {
        links.push(link((page - 1).min(last), "prev"));
    }
    links.push(link(1, "first"));
    links.push(link(last, "last"));

    (
        StatusCode::OK,
        [(header::LINK, links.join(", "))],
        Json(slice),
    )
        .into_response()
}
