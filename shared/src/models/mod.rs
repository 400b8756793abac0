//! Data models
//!
//! `MenuItem` comes from the backend catalog and is never mutated locally.
//! `PastOrder` is the archived record written to local history.

pub mod menu_item;
pub mod past_order;

// Re-exports
pub use menu_item::*;
pub use past_order::*;
