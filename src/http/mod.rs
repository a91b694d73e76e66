//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, query normalization)
//!     → search.rs (upstream call, policy, product mapping)
//!     → response.rs (CORS/cache headers, JSON errors)
//!     → Send to client
//! ```

pub mod health;
pub mod request;
pub mod response;
pub mod search;
pub mod server;

pub use request::{SearchRequest, X_REQUEST_ID};
pub use server::{AppState, HttpServer, ServerError};
