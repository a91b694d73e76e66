//! Upstream marketplace search API.
//!
//! # Responsibilities
//! - Build the outbound search URL from a normalized request
//! - Issue exactly one GET per inbound search, no retries
//! - Classify failures (transport, status, decode)
//! - Strip the upstream envelope down to its `results` array

pub mod client;
pub mod error;
pub mod types;

pub use client::UpstreamClient;
pub use error::UpstreamError;
pub use types::SearchPage;
