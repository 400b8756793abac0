//! Application context
//!
//! One instance per process, holding shared handles to the current order,
//! the history store and the backend services. UI components receive the
//! handles they need from here instead of reaching for globals.

use std::sync::Arc;

use crate::catalog::MenuCatalog;
use crate::checkout::Checkout;
use crate::history::OrderHistoryStore;
use crate::image_loader::ImageLoader;
use crate::order_state::OrderState;
use crate::storage::{KeyValueStore, LocalStore};
use crate::submission::HttpOrderSubmission;
use crate::logger;
use crate::{ClientConfig, ClientResult};

#[derive(Clone)]
pub struct AppContext {
    pub config: ClientConfig,
    pub catalog: MenuCatalog,
    pub images: ImageLoader,
    pub order: Arc<OrderState>,
    pub history: Arc<OrderHistoryStore>,
    pub checkout: Checkout,
}

impl AppContext {
    /// Build the context with history stored at `config.history_path`
    ///
    /// Also installs the logger at `config.log_level` unless one is already set.
    pub fn open(config: ClientConfig) -> ClientResult<Self> {
        config.validate()?;
        logger::init_logger_with_level(&config.log_level);
        let storage = LocalStore::open(&config.history_path)?;
        Self::with_storage(config, Arc::new(storage))
    }

    /// Build the context over the given history storage
    pub fn with_storage(config: ClientConfig, storage: Arc<dyn KeyValueStore>) -> ClientResult<Self> {
        let http = config.build_http_client()?;
        let order = Arc::new(OrderState::new());
        let history = Arc::new(OrderHistoryStore::open(storage));
        let checkout = Checkout::new(
            order.clone(),
            history.clone(),
            Arc::new(HttpOrderSubmission::new(http.clone())),
        );

        tracing::info!(
            base_url = %config.base_url,
            past_orders = history.len(),
            "Application context ready"
        );

        Ok(Self {
            catalog: MenuCatalog::new(http.clone()),
            images: ImageLoader::new(http),
            order,
            history,
            checkout,
            config,
        })
    }
}
