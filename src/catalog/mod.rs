//! Product catalog shaping.
//!
//! # Data Flow
//! ```text
//! upstream result item (raw JSON)
//!     → mapping.rs (FIELD_MAP: source path, fallback, rewrite)
//!         → thumbnail.rs (-I.jpg → -O.jpg)
//!         → affiliate.rs (permalink ?affiliateId=...)
//!     → product.rs (constant-shape Product)
//! ```
//!
//! # Design Decisions
//! - Items are mapped independently; one bad item never fails the page
//! - Upstream numbers are forwarded untouched, never re-parsed
//! - Key order is the table order

pub mod affiliate;
pub mod mapping;
pub mod product;
pub mod thumbnail;

pub use affiliate::AffiliateTagger;
pub use mapping::{ProductMapper, FIELD_MAP};
pub use product::Product;
