//! Client error types

use thiserror::Error;
use uuid::Uuid;

use crate::storage::StorageError;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// `/categories` returned a non-200 status or an undecodable body
    #[error("Categories not found: {0}")]
    CategoriesNotFound(String),

    /// `/menu` returned a non-200 status or an undecodable body
    #[error("Menu items not found for category '{category}': {reason}")]
    MenuItemsNotFound { category: String, reason: String },

    /// `/order` returned a non-200 status or an undecodable body
    #[error("Order request failed: {0}")]
    OrderRequestFailed(String),

    /// Image URL returned a non-200 status or a payload that is not an image
    #[error("Image data missing: {0}")]
    ImageDataMissing(String),

    /// Removal position outside the current order
    #[error("Index {index} out of range for order with {len} items")]
    IndexOutOfRange { index: usize, len: usize },

    /// Durable history write failed; the in-memory history already holds the order
    #[error("Failed to persist order history: {0}")]
    PersistenceWrite(#[source] StorageError),

    /// Stored history could not be decoded
    #[error("Failed to decode order history: {0}")]
    PersistenceDecode(#[source] serde_json::Error),

    /// The backend accepted the order but it could not be archived locally
    #[error("Order {order_id} was placed ({minutes_to_prepare} min) but could not be archived: {source}")]
    ArchiveFailed {
        order_id: Uuid,
        minutes_to_prepare: u32,
        #[source]
        source: StorageError,
    },

    /// Submit was requested with nothing in the order
    #[error("Cannot submit an empty order")]
    EmptyOrder,

    /// The operation was cancelled before it completed
    #[error("Request cancelled")]
    Cancelled,

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// HTTP transport failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Local storage failed outside of a history write
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
