//! Past Order Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::menu_item::{MenuItem, total_price};
use crate::util::{format_order_date, format_usd};

/// Archived record of a successfully submitted order
///
/// Built once at submission time and never mutated afterwards. The total is
/// computed from the item prices at construction and stored with the record,
/// so later catalog price changes do not affect it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PastOrder {
    id: Uuid,
    menu_items: Vec<MenuItem>,
    minutes_to_prepare: u32,
    date: DateTime<Utc>,
    total: Decimal,
}

impl PastOrder {
    /// Create a record for items that were just submitted
    pub fn new(menu_items: Vec<MenuItem>, minutes_to_prepare: u32) -> Self {
        let total = total_price(&menu_items);
        Self {
            id: Uuid::new_v4(),
            menu_items,
            minutes_to_prepare,
            date: Utc::now(),
            total,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn menu_items(&self) -> &[MenuItem] {
        &self.menu_items
    }

    pub fn minutes_to_prepare(&self) -> u32 {
        self.minutes_to_prepare
    }

    /// When the record was created
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// Total captured at creation
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Section title used by the history list, e.g.
    /// `Order from Oct 18, 2026 at 3:04 PM - 20 min`
    pub fn title(&self) -> String {
        format!(
            "Order from {} - {} min",
            format_order_date(&self.date),
            self.minutes_to_prepare
        )
    }

    pub fn formatted_total(&self) -> String {
        format_usd(self.total)
    }
}
