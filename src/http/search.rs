//! The search proxy handler.
//!
//! One pass per request: normalize the query, call the upstream once,
//! map every result item, answer. Upstream failures follow the single
//! [`ErrorPolicy`] chosen at startup.

use std::time::Instant;

use axum::{
    extract::{RawQuery, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::catalog::Product;
use crate::config::ErrorPolicy;
use crate::error::SearchError;
use crate::http::request::{request_id, SearchRequest};
use crate::http::server::AppState;
use crate::observability::metrics;

/// `GET /search?q=&limit=&sort=`
pub async fn search_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    RawQuery(raw): RawQuery,
) -> Response {
    let start_time = Instant::now();
    let request_id = request_id(&headers);

    let response = match handle(&state, raw.as_deref(), request_id).await {
        Ok(products) => {
            metrics::record_products(products.len());
            (StatusCode::OK, Json(products)).into_response()
        }
        Err(err) => err.into_response(),
    };

    metrics::record_request(response.status().as_u16(), start_time);
    response
}

/// Run one search end to end.
///
/// Returns the product list to send with HTTP 200, or the error to render.
pub async fn handle(
    state: &AppState,
    raw_query: Option<&str>,
    request_id: &str,
) -> Result<Vec<Product>, SearchError> {
    let request = SearchRequest::from_raw_query(raw_query, &state.config.search)?;

    tracing::debug!(
        request_id = %request_id,
        query = %request.query,
        limit = request.limit,
        sort = ?request.sort,
        "Forwarding search upstream"
    );

    let page = match state.upstream.search(&request).await {
        Ok(Some(page)) => page,
        Ok(None) => {
            tracing::warn!(request_id = %request_id, "Upstream body has no results array");
            return Ok(Vec::new());
        }
        Err(err) => {
            metrics::record_upstream_error(err.kind());
            return match state.config.upstream.error_policy {
                ErrorPolicy::Strict => {
                    tracing::error!(request_id = %request_id, error = %err, "Upstream search failed");
                    Err(err.into())
                }
                ErrorPolicy::Lenient => {
                    tracing::warn!(
                        request_id = %request_id,
                        error = %err,
                        "Upstream search failed, answering with empty list"
                    );
                    Ok(Vec::new())
                }
            };
        }
    };

    Ok(state.mapper.map_all(&page.results))
}
