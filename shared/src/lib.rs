//! Shared types for the menu ordering client
//!
//! Catalog and history models plus the request/response bodies exchanged
//! with the restaurant backend.

pub mod api;
pub mod models;
pub mod util;

// Re-exports
pub use models::{MenuItem, PastOrder};
pub use rust_decimal::Decimal;
pub use serde::{Deserialize, Serialize};
