//! Request and response bodies for the backend endpoints

use serde::{Deserialize, Serialize};

use crate::models::MenuItem;

/// Backend paths, relative to the configured base URL
pub mod paths {
    pub const CATEGORIES: &str = "categories";
    pub const MENU: &str = "menu";
    pub const ORDER: &str = "order";
}

/// `GET /categories`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
}

/// `GET /menu?category=<name>`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuResponse {
    pub items: Vec<MenuItem>,
}

/// `POST /order` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRequest {
    #[serde(rename = "menuIds")]
    pub menu_ids: Vec<i64>,
}

/// `POST /order` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResponse {
    /// Estimated minutes until the order is ready
    pub preparation_time: u32,
}
