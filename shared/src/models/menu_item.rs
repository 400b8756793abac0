//! Menu Item Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Menu item entity, as returned by `/menu`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Catalog-unique identifier
    pub id: i64,
    pub name: String,
    pub description: String,
    /// Unit price in dollars; read from a JSON number or string, written as a string
    pub price: Decimal,
    /// Category name this item was listed under
    pub category: String,
    /// Absolute URL of the item photo
    pub image_url: String,
}

impl MenuItem {
    /// Whether the price is usable for totals (catalog prices are never negative)
    pub fn has_valid_price(&self) -> bool {
        !self.price.is_sign_negative()
    }
}

/// Sum of the item prices, in order
pub fn total_price<'a>(items: impl IntoIterator<Item = &'a MenuItem>) -> Decimal {
    items.into_iter().map(|item| item.price).sum()
}
