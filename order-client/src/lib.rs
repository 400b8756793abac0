//! Order Client - menu browsing, the current order and past order history
//!
//! Talks to the restaurant backend over HTTP (`/categories`, `/menu`,
//! `/order`) and keeps the in-progress order plus a durable, newest-first
//! history of submitted orders.

pub mod app;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod history;
pub mod http;
pub mod image_loader;
pub mod logger;
pub mod notify;
pub mod order_state;
pub mod storage;
pub mod submission;

pub use app::AppContext;
pub use catalog::MenuCatalog;
pub use checkout::{Checkout, OrderConfirmation};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use history::{HistoryChanged, HistoryLoad, OrderHistoryStore};
pub use http::HttpClient;
pub use image_loader::{ImageLoader, ImageTaskRegistry, ImageTicket, LoadedImage};
pub use notify::{Notifier, Subscription};
pub use order_state::{OrderChanged, OrderState};
pub use storage::{KeyValueStore, LocalStore, StorageError};
pub use submission::{HttpOrderSubmission, OrderSubmission};

// Re-export shared types for convenience
pub use shared::{MenuItem, PastOrder};
