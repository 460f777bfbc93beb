use reqwest::Method;

use super::ApiClient;
use crate::error::Result;
use crate::models::Product;

impl ApiClient {
    /// `GET /api/products`, with `?search=` when a non-blank query is given.
    pub async fn list_products(&self, search: Option<&str>) -> Result<Vec<Product>> {
        let mut url = self.endpoint("/api/products")?;
        if let Some(query) = search.filter(|q| !q.trim().is_empty()) {
            url.query_pairs_mut().append_pair("search", query);
        }

        let products: Vec<Product> = self.send_json(self.request(Method::GET, url)).await?;
        tracing::debug!("Fetched {} products", products.len());
        Ok(products)
    }
}
