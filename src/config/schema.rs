//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the search proxy.
//! All types derive Serde traits for deserialization from config files, and every
//! section has defaults so the service runs without any file at all.

use serde::{Deserialize, Serialize};

/// Partner-tracking token appended to every product permalink.
pub const DEFAULT_AFFILIATE_ID: &str = "df20251014105211";

/// Query parameter carrying the affiliate identifier.
pub const DEFAULT_AFFILIATE_PARAM: &str = "affiliateId";

/// Largest page the upstream serves; `search.max_limit` may not exceed it.
pub const LIMIT_CEILING: u32 = 50;

/// Root configuration for the search proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Upstream marketplace API settings.
    pub upstream: UpstreamConfig,

    /// Query normalization bounds.
    pub search: SearchConfig,

    /// Affiliate tagging settings.
    pub affiliate: AffiliateConfig,

    /// Response header settings.
    pub http: HttpConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Inbound request deadline in seconds. The handler sets no timeout of
    /// its own; the upstream call inherits this one.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// How upstream failures are surfaced to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// HTTP 500 with a structured error body.
    #[default]
    Strict,
    /// HTTP 200 with an empty array; the failure is only logged.
    Lenient,
}

/// Upstream marketplace API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL; `/search` is appended to it.
    pub base_url: String,

    /// Fixed identifying User-Agent sent on every outbound call.
    pub user_agent: String,

    /// Upstream failure policy, selected once for the whole process.
    pub error_policy: ErrorPolicy,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.mercadolibre.com/sites/MLB".to_string(),
            user_agent: "ComparaMais/1.0".to_string(),
            error_policy: ErrorPolicy::Strict,
        }
    }
}

/// Search parameter bounds.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Limit used when the caller sends none, zero, or garbage.
    pub default_limit: u32,

    /// Upper bound forwarded to the upstream (one page, no pagination).
    /// At most [`LIMIT_CEILING`].
    pub max_limit: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: 20,
            max_limit: LIMIT_CEILING,
        }
    }
}

/// Affiliate tagging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AffiliateConfig {
    /// Affiliate identifier written into permalinks.
    pub id: String,

    /// Query parameter name for the identifier.
    pub param: String,
}

impl Default for AffiliateConfig {
    fn default() -> Self {
        Self {
            id: DEFAULT_AFFILIATE_ID.to_string(),
            param: DEFAULT_AFFILIATE_PARAM.to_string(),
        }
    }
}

/// Response header configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpConfig {
    /// `Cache-Control` value for shared caches. Assistive only.
    pub cache_control: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            cache_control: "s-maxage=60, stale-while-revalidate=120".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON log lines instead of the human-readable format.
    pub json_logs: bool,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
