//! Response shaping.
//!
//! # Responsibilities
//! - Cross-origin and shared-cache headers on every response
//! - JSON error bodies
//! - CORS preflight and unknown-route replies
//!
//! # Design Decisions
//! - Headers are set by a layer, so error paths and preflights carry them too
//! - Errors are always JSON objects, never plain text

use axum::{
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tower_http::set_header::SetResponseHeaderLayer;

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type";

/// Message for requests cut off by the server deadline.
pub const TIMEOUT_MESSAGE: &str = "Request timed out";

/// Structured error body: `{"error": true, "message": ..., "detail"?: ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: true,
            message: message.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Header layers applied to every response, in application order.
pub fn default_header_layers(cache_control: HeaderValue) -> [SetResponseHeaderLayer<HeaderValue>; 4] {
    let layer = |name: HeaderName, value: HeaderValue| SetResponseHeaderLayer::overriding(name, value);
    [
        layer(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static(ALLOW_ORIGIN),
        ),
        layer(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        ),
        layer(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        ),
        layer(header::CACHE_CONTROL, cache_control),
    ]
}

/// CORS preflight: 200 with no body.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Unknown route.
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(ErrorBody::new("Not found")))
}

/// Known route, unsupported method.
pub async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorBody::new("Method not allowed")),
    )
}

/// Replace the timeout layer's empty 408 with a JSON error body.
pub async fn timeout_as_json(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT
        && !response.headers().contains_key(header::CONTENT_TYPE)
    {
        return (StatusCode::REQUEST_TIMEOUT, Json(ErrorBody::new(TIMEOUT_MESSAGE))).into_response();
    }
    response
}
