//! HTTP client for the marketplace search API.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::config::UpstreamConfig;
use crate::http::request::SearchRequest;
use crate::upstream::error::UpstreamError;
use crate::upstream::types::SearchPage;

/// Issues search calls against the upstream API.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
    search_url: Url,
}

impl UpstreamClient {
    /// Build a client from configuration.
    ///
    /// Every request carries `Accept: application/json` and the configured
    /// User-Agent. No client-side timeout is set.
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let search_url = Url::parse(&format!("{}/search", config.base_url.trim_end_matches('/')))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()
            .map_err(UpstreamError::Client)?;

        Ok(Self { client, search_url })
    }

    /// Outbound URL for a normalized request.
    pub fn search_url(&self, request: &SearchRequest) -> Url {
        let mut url = self.search_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("q", &request.query)
                .append_pair("limit", &request.limit.to_string());
            if let Some(sort) = &request.sort {
                query.append_pair("sort", sort);
            }
        }
        url
    }

    /// Run one search. Exactly one outbound call, never retried.
    ///
    /// `Ok(None)` means the upstream answered with valid JSON that carries
    /// no `results` array.
    pub async fn search(&self, request: &SearchRequest) -> Result<Option<SearchPage>, UpstreamError> {
        let url = self.search_url(request);
        tracing::debug!(url = %url, "Calling upstream search");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(UpstreamError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status));
        }

        let bytes = response.bytes().await.map_err(UpstreamError::Transport)?;
        let body: Value = serde_json::from_slice(&bytes)?;

        Ok(SearchPage::from_body(body))
    }
}
