//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → shared via Arc to the request handlers
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the affiliate identifier and error
//!   policy are fixed for the process lifetime
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_or_default, parse_config, ConfigError};
pub use schema::{
    AffiliateConfig, ErrorPolicy, HttpConfig, ListenerConfig, ObservabilityConfig, ProxyConfig,
    SearchConfig, TimeoutConfig, UpstreamConfig, LIMIT_CEILING,
};
pub use validation::ValidationError;
