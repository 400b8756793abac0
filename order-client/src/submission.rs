//! Order submission
//!
//! One round trip to `POST /order`. There is no retry and no idempotency
//! key: calling `submit` twice for the same order places it twice.

use async_trait::async_trait;
use shared::api::{OrderRequest, OrderResponse, paths};

use crate::http::HttpClient;
use crate::{ClientError, ClientResult};

/// Sends an order to the kitchen and returns the preparation estimate
#[async_trait]
pub trait OrderSubmission: Send + Sync {
    /// Submit the menu identifiers, returning minutes to prepare
    async fn submit(&self, menu_ids: &[i64]) -> ClientResult<u32>;
}

/// `OrderSubmission` over the backend HTTP API
#[derive(Debug, Clone)]
pub struct HttpOrderSubmission {
    http: HttpClient,
}

impl HttpOrderSubmission {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl OrderSubmission for HttpOrderSubmission {
    async fn submit(&self, menu_ids: &[i64]) -> ClientResult<u32> {
        let request = OrderRequest {
            menu_ids: menu_ids.to_vec(),
        };

        let response = self.http.post(paths::ORDER, &request).await?;
        let body: OrderResponse =
            HttpClient::decode(response, ClientError::OrderRequestFailed).await?;

        Ok(body.preparation_time)
    }
}
