//! Compara+ marketplace search proxy library.

pub mod catalog;
pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod upstream;

pub use config::schema::ProxyConfig;
pub use error::SearchError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
