//! Request-level error type and its HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::http::response::ErrorBody;
use crate::upstream::UpstreamError;

/// Generic message for upstream failures under the strict policy.
pub const UPSTREAM_FAILURE_MESSAGE: &str = "Falha ao conectar com a API do Mercado Livre.";

/// Errors a search request can end in.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Missing or blank required parameter. Never reaches the upstream.
    #[error("{0}")]
    Validation(String),

    /// The upstream call failed and the policy surfaces it.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl SearchError {
    pub fn status(&self) -> StatusCode {
        match self {
            SearchError::Validation(_) => StatusCode::BAD_REQUEST,
            SearchError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            SearchError::Validation(message) => ErrorBody::new(message),
            SearchError::Upstream(err) => {
                ErrorBody::new(UPSTREAM_FAILURE_MESSAGE).with_detail(err.to_string())
            }
        };

        (status, Json(body)).into_response()
    }
}
