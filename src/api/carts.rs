use reqwest::Method;

use super::ApiClient;
use crate::error::Result;
use crate::models::{AddToCartRequest, Cart, UpdateCartItemRequest};

impl ApiClient {
    pub async fn get_cart(&self) -> Result<Cart> {
        let url = self.endpoint("/api/carts")?;
        self.send_json(self.request(Method::GET, url)).await
    }

    pub async fn add_to_cart(&self, product_id: i64, quantity: i64) -> Result<()> {
        let url = self.endpoint("/api/carts")?;
        let body = AddToCartRequest {
            product_id,
            quantity,
        };

        self.send_empty(self.request(Method::POST, url).json(&body)).await?;
        tracing::info!("Added {} x product {} to cart", quantity, product_id);
        Ok(())
    }

    pub async fn update_cart_item(&self, item_id: i64, quantity: i64) -> Result<()> {
        let url = self.endpoint(&format!("/api/carts/{}", item_id))?;
        let body = UpdateCartItemRequest { quantity };

        self.send_empty(self.request(Method::PUT, url).json(&body)).await?;
        tracing::info!("Cart item {} set to quantity {}", item_id, quantity);
        Ok(())
    }

    pub async fn remove_cart_item(&self, item_id: i64) -> Result<()> {
        let url = self.endpoint(&format!("/api/carts/{}", item_id))?;

        self.send_empty(self.request(Method::DELETE, url)).await?;
        tracing::info!("Cart item {} removed", item_id);
        Ok(())
    }

    pub async fn clear_cart(&self) -> Result<()> {
        let url = self.endpoint("/api/carts")?;

        self.send_empty(self.request(Method::DELETE, url)).await?;
        tracing::info!("Cart cleared");
        Ok(())
    }
}
