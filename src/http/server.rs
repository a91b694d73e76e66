//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, request ID, response headers)
//! - Bind server to listener
//! - Graceful shutdown on the lifecycle broadcast

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::HeaderValue,
    middleware::map_response,
    routing::get,
    Router,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::catalog::{AffiliateTagger, ProductMapper};
use crate::config::validation::validate_config;
use crate::config::{ProxyConfig, ValidationError};
use crate::http::health::get_status;
use crate::http::request::MakeRequestUuidV4;
use crate::http::response::{
    default_header_layers, method_not_allowed, not_found, preflight, timeout_as_json,
};
use crate::http::search::search_handler;
use crate::upstream::{UpstreamClient, UpstreamError};

/// Public search route.
pub const SEARCH_PATH: &str = "/search";

/// Path the serverless deployment exposed; kept as an alias.
pub const LEGACY_SEARCH_PATH: &str = "/api/buscar";

/// Application state injected into handlers. Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ProxyConfig>,
    pub upstream: UpstreamClient,
    pub mapper: Arc<ProductMapper>,
}

impl AppState {
    pub fn new(config: ProxyConfig) -> Result<Self, UpstreamError> {
        let upstream = UpstreamClient::new(&config.upstream)?;
        let mapper = ProductMapper::new(AffiliateTagger::new(&config.affiliate));

        Ok(Self {
            config: Arc::new(config),
            upstream,
            mapper: Arc::new(mapper),
        })
    }
}

/// Reasons the server cannot be assembled.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid configuration: {}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join(", "))]
    Config(Vec<ValidationError>),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// HTTP server for the search proxy.
pub struct HttpServer {
    router: Router,
    config: Arc<ProxyConfig>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// The configuration is validated again here, so configs built in code
    /// are held to the same rules as loaded ones.
    pub fn new(config: ProxyConfig) -> Result<Self, ServerError> {
        validate_config(&config).map_err(ServerError::Config)?;
        let cache_control = HeaderValue::from_str(&config.http.cache_control)
            .map_err(|_| ServerError::Config(vec![ValidationError::InvalidCacheControl]))?;

        let state = AppState::new(config)?;
        let config = state.config.clone();
        let router = Self::build_router(&config, cache_control, state);

        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Header layers wrap the timeout, so timed-out requests still carry
    /// CORS and cache headers.
    #[allow(deprecated)]
    fn build_router(config: &ProxyConfig, cache_control: HeaderValue, state: AppState) -> Router {
        let [allow_origin, allow_methods, allow_headers, cache] =
            default_header_layers(cache_control);

        Router::new()
            .route(SEARCH_PATH, get(search_handler).options(preflight))
            .route(LEGACY_SEARCH_PATH, get(search_handler).options(preflight))
            .route("/health", get(get_status))
            .fallback(not_found)
            .method_not_allowed_fallback(method_not_allowed)
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(map_response(timeout_as_json))
            .layer(allow_origin)
            .layer(allow_methods)
            .layer(allow_headers)
            .layer(cache)
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
    }

    /// The fully layered router, for driving the service without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until the shutdown broadcast fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.base_url,
            error_policy = ?self.config.upstream.error_policy,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use tower::ServiceExt;

    fn server() -> HttpServer {
        HttpServer::new(ProxyConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_preflight_is_empty_200_with_cors() {
        let response = server()
            .router()
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/search")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "GET, OPTIONS");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
        assert_eq!(
            headers[header::CACHE_CONTROL],
            "s-maxage=60, stale-while-revalidate=120"
        );
        assert!(headers.contains_key("x-request-id"));

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_missing_query_short_circuits() {
        let response = server()
            .router()
            .oneshot(Request::get("/api/buscar").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[tokio::test]
    async fn test_request_id_propagated() {
        let response = server()
            .router()
            .oneshot(
                Request::get("/health")
                    .header("x-request-id", "abc-123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-request-id"], "abc-123");
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = ProxyConfig::default();
        config.http.cache_control = "max-age=60\n".into();
        match HttpServer::new(config) {
            Err(ServerError::Config(errors)) => {
                assert_eq!(errors, vec![ValidationError::InvalidCacheControl]);
            }
            Err(other) => panic!("expected config error, got {other}"),
            Ok(_) => panic!("invalid cache_control accepted"),
        }

        let mut config = ProxyConfig::default();
        config.search.max_limit = 1000;
        assert!(matches!(HttpServer::new(config), Err(ServerError::Config(_))));
    }

    #[tokio::test]
    async fn test_wrong_method_is_json_405_with_cors() {
        for (method, uri) in [(Method::POST, "/search"), (Method::OPTIONS, "/health")] {
            let response = server()
                .router()
                .oneshot(Request::builder().method(method).uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "{uri}");
            assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
            let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
            assert_eq!(json["error"], true);
        }
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let response = server()
            .router()
            .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], true);
    }
}
