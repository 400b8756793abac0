//! Menu catalog queries

use shared::MenuItem;
use shared::api::{CategoriesResponse, MenuResponse, paths};

use crate::http::HttpClient;
use crate::{ClientError, ClientResult};

/// Read-only access to the backend catalog
#[derive(Debug, Clone)]
pub struct MenuCatalog {
    http: HttpClient,
}

impl MenuCatalog {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// `GET /categories`
    pub async fn fetch_categories(&self) -> ClientResult<Vec<String>> {
        let response = self.http.get(paths::CATEGORIES, &[]).await?;
        let body: CategoriesResponse =
            HttpClient::decode(response, ClientError::CategoriesNotFound).await?;

        tracing::debug!(count = body.categories.len(), "Categories fetched");
        Ok(body.categories)
    }

    /// `GET /menu?category=<name>`
    pub async fn fetch_menu_items(&self, category: &str) -> ClientResult<Vec<MenuItem>> {
        let not_found = |reason: String| ClientError::MenuItemsNotFound {
            category: category.to_string(),
            reason,
        };

        let response = self.http.get(paths::MENU, &[("category", category)]).await?;
        let body: MenuResponse = HttpClient::decode(response, not_found).await?;

        if let Some(item) = body.items.iter().find(|item| !item.has_valid_price()) {
            return Err(not_found(format!(
                "item {} has negative price {}",
                item.id, item.price
            )));
        }

        tracing::debug!(category = %category, count = body.items.len(), "Menu items fetched");
        Ok(body.items)
    }
}
