use reqwest::Method;

use super::ApiClient;
use crate::error::Result;
use crate::models::{CheckoutResponse, Transaction};

impl ApiClient {
    /// `POST /api/transactions`: turns the current cart into an order.
    pub async fn checkout(&self) -> Result<CheckoutResponse> {
        let url = self.endpoint("/api/transactions")?;
        let response: CheckoutResponse = self.send_json(self.request(Method::POST, url)).await?;

        tracing::info!(
            "Checkout accepted (payment redirect: {})",
            response.redirect_url().is_some()
        );
        Ok(response)
    }

    pub async fn list_transactions(&self) -> Result<Vec<Transaction>> {
        let url = self.endpoint("/api/transactions")?;
        self.send_json(self.request(Method::GET, url)).await
    }

    pub async fn get_transaction(&self, id: i64) -> Result<Transaction> {
        let url = self.endpoint(&format!("/api/transactions/{}", id))?;
        self.send_json(self.request(Method::GET, url)).await
    }
}
