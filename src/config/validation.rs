//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (limits ordered, timeouts > 0)
//! - Check addresses, URLs and header values parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::HeaderValue;
use thiserror::Error;
use url::Url;

use crate::config::schema::{ProxyConfig, LIMIT_CEILING};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid socket address '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("upstream.base_url: invalid http(s) URL '{0}'")]
    InvalidBaseUrl(String),

    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("search limits out of order: require 1 <= default_limit ({default}) <= max_limit ({max})")]
    LimitRange { default: u32, max: u32 },

    #[error("search.max_limit ({0}) exceeds the upstream page size of {max}", max = LIMIT_CEILING)]
    LimitCeiling(u32),

    #[error("http.cache_control is not a valid header value")]
    InvalidCacheControl,

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,
}

/// Check a parsed configuration, collecting every problem found.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    match Url::parse(&config.upstream.base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && !url.cannot_be_a_base() => {}
        _ => errors.push(ValidationError::InvalidBaseUrl(config.upstream.base_url.clone())),
    }

    if config.upstream.user_agent.trim().is_empty() {
        errors.push(ValidationError::Empty("upstream.user_agent"));
    }
    if config.affiliate.id.trim().is_empty() {
        errors.push(ValidationError::Empty("affiliate.id"));
    }
    if config.affiliate.param.trim().is_empty() {
        errors.push(ValidationError::Empty("affiliate.param"));
    }

    let search = &config.search;
    if search.default_limit < 1 || search.default_limit > search.max_limit {
        errors.push(ValidationError::LimitRange {
            default: search.default_limit,
            max: search.max_limit,
        });
    }
    if search.max_limit > LIMIT_CEILING {
        errors.push(ValidationError::LimitCeiling(search.max_limit));
    }

    if HeaderValue::from_str(&config.http.cache_control).is_err() {
        errors.push(ValidationError::InvalidCacheControl);
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
