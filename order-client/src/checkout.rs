//! Submit → archive → clear sequencing
//!
//! `submit` sends the current order and archives it; the current order is
//! only cleared later, when the caller dismisses the confirmation (or
//! cancels). The steps are not transactional: once the backend accepts the
//! order it is placed, whatever happens locally afterwards. A failed archive
//! write is reported as `ArchiveFailed` with the preparation estimate so the
//! caller can still confirm the order to the user.

use shared::util::format_usd;
use shared::{MenuItem, PastOrder};
use std::sync::Arc;
use uuid::Uuid;

use crate::history::OrderHistoryStore;
use crate::order_state::OrderState;
use crate::submission::OrderSubmission;
use crate::{ClientError, ClientResult};

/// Result of a successful submission
#[derive(Debug, Clone)]
pub struct OrderConfirmation {
    pub order_id: Uuid,
    pub minutes_to_prepare: u32,
}

impl OrderConfirmation {
    /// Text shown on the confirmation screen
    pub fn message(&self) -> String {
        format!(
            "Thank you for your order! Your wait time is approximately {} minutes.",
            self.minutes_to_prepare
        )
    }
}

/// Drives an order from the bag to the history
#[derive(Clone)]
pub struct Checkout {
    order: Arc<OrderState>,
    history: Arc<OrderHistoryStore>,
    submission: Arc<dyn OrderSubmission>,
}

impl Checkout {
    pub fn new(
        order: Arc<OrderState>,
        history: Arc<OrderHistoryStore>,
        submission: Arc<dyn OrderSubmission>,
    ) -> Self {
        Self {
            order,
            history,
            submission,
        }
    }

    /// Prompt shown before submitting
    pub fn confirmation_prompt(&self) -> String {
        format!(
            "You are about to submit your order with a total of {}",
            format_usd(self.order.total())
        )
    }

    /// Submit the current order and archive it
    ///
    /// On any submission failure the current order is left untouched.
    pub async fn submit(&self) -> ClientResult<OrderConfirmation> {
        let items: Vec<MenuItem> = self.order.snapshot();
        if items.is_empty() {
            return Err(ClientError::EmptyOrder);
        }
        let menu_ids: Vec<i64> = items.iter().map(|item| item.id).collect();

        tracing::info!(items = menu_ids.len(), "Submitting order");
        let minutes_to_prepare = match self.submission.submit(&menu_ids).await {
            Ok(minutes) => minutes,
            Err(e) => {
                tracing::warn!(error = %e, "Order submission failed");
                return Err(e);
            }
        };

        let past_order = PastOrder::new(items, minutes_to_prepare);
        let order_id = past_order.id();
        tracing::info!(order_id = %order_id, minutes_to_prepare, "Order accepted");

        match self.history.add(past_order) {
            Ok(()) => Ok(OrderConfirmation {
                order_id,
                minutes_to_prepare,
            }),
            Err(ClientError::PersistenceWrite(source)) => Err(ClientError::ArchiveFailed {
                order_id,
                minutes_to_prepare,
                source,
            }),
            Err(e) => Err(e),
        }
    }

    /// The user dismissed the confirmation: start a fresh order
    pub fn dismiss_confirmation(&self) {
        self.order.clear();
    }

    /// The user abandoned the order
    pub fn cancel(&self) {
        self.order.clear();
    }
}
