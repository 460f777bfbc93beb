use url::Url;

use crate::api::ApiClient;
use crate::models::Cart;
use crate::notify::Toaster;

/// What a successful checkout leads to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Leave the application for the payment provider.
    Redirect(Url),
    /// Order placed; stay on the cart page.
    Placed,
}

/// Cart screen state. Every mutation re-fetches the cart from the server; nothing
/// is updated ahead of the server's answer.
pub struct CartPage {
    api: ApiClient,
    pub cart: Option<Cart>,
    pub loading: bool,
    pub error: Option<String>,
    /// Item whose controls are disabled while a request for it is pending.
    ///
    /// Actions already serialise through `&mut self`; the marker is render state.
    /// A mutation dropped mid-request leaves it set until the next `mount`.
    pub updating_item: Option<i64>,
    pub processing_checkout: bool,
    pub toasts: Toaster,
}

impl CartPage {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            cart: None,
            loading: true,
            error: None,
            updating_item: None,
            processing_checkout: false,
            toasts: Toaster::default(),
        }
    }

    pub async fn mount(&mut self) {
        self.updating_item = None;
        self.fetch_cart().await;
    }

    pub fn is_busy(&self, item_id: i64) -> bool {
        self.updating_item == Some(item_id)
    }

    pub async fn fetch_cart(&mut self) {
        self.loading = true;
        self.error = None;

        match self.api.get_cart().await {
            Ok(cart) => self.cart = Some(cart),
            Err(e) => {
                tracing::error!("Error fetching cart: {}", e);
                self.error = Some("Failed to load cart items. Please try again later.".to_string());
            }
        }

        self.loading = false;
    }

    /// Sets an item's quantity. Quantities below 1 are ignored without a request.
    pub async fn update_quantity(&mut self, item_id: i64, quantity: i64) {
        if quantity < 1 || self.is_busy(item_id) {
            return;
        }

        self.updating_item = Some(item_id);
        match self.api.update_cart_item(item_id, quantity).await {
            Ok(()) => {
                self.fetch_cart().await;
                self.toasts.success("Cart updated", None);
            }
            Err(e) => {
                tracing::warn!("Updating cart item {} failed: {}", item_id, e);
                self.toasts
                    .error("Error", Some(e.user_message("Failed to update item")));
            }
        }
        self.updating_item = None;
    }

    pub async fn increment(&mut self, item_id: i64) {
        if let Some(quantity) = self.quantity_of(item_id) {
            self.update_quantity(item_id, quantity + 1).await;
        }
    }

    pub async fn decrement(&mut self, item_id: i64) {
        if let Some(quantity) = self.quantity_of(item_id) {
            self.update_quantity(item_id, quantity - 1).await;
        }
    }

    fn quantity_of(&self, item_id: i64) -> Option<i64> {
        self.cart
            .as_ref()
            .and_then(|cart| cart.item(item_id))
            .map(|item| item.quantity)
    }

    pub async fn remove_item(&mut self, item_id: i64) {
        if self.is_busy(item_id) {
            return;
        }

        self.updating_item = Some(item_id);
        match self.api.remove_cart_item(item_id).await {
            Ok(()) => {
                self.fetch_cart().await;
                self.toasts.success("Item removed from cart", None);
            }
            Err(e) => {
                tracing::error!("Error removing item {}: {}", item_id, e);
                let description = e.body().and_then(|body| body.message.clone());
                self.toasts.error("Error removing item", description);
            }
        }
        self.updating_item = None;
    }

    /// Empties the cart. On success local state becomes the empty cart directly.
    pub async fn clear_cart(&mut self) {
        self.loading = true;

        match self.api.clear_cart().await {
            Ok(()) => {
                self.cart = Some(Cart::default());
                self.toasts.success("Cart cleared", None);
            }
            Err(e) => {
                tracing::error!("Error clearing cart: {}", e);
                let description = e.body().and_then(|body| body.message.clone());
                self.toasts.error("Error clearing cart", description);
            }
        }

        self.loading = false;
    }

    /// Places the order. `None` means the checkout failed (see the toasts).
    pub async fn checkout(&mut self) -> Option<CheckoutOutcome> {
        if self.processing_checkout {
            return None;
        }

        self.processing_checkout = true;
        let result = self.api.checkout().await;
        self.processing_checkout = false;

        match result {
            Ok(response) => {
                self.toasts.success("Order placed successfully!", None);

                let Some(raw) = response.redirect_url() else {
                    return Some(CheckoutOutcome::Placed);
                };

                match Url::parse(raw) {
                    Ok(url) => {
                        tracing::info!("Handing off to payment page {}", url);
                        Some(CheckoutOutcome::Redirect(url))
                    }
                    Err(e) => {
                        tracing::warn!("Ignoring malformed payment redirect '{}': {}", raw, e);
                        Some(CheckoutOutcome::Placed)
                    }
                }
            }
            Err(e) => {
                tracing::warn!("Checkout failed: {}", e);
                self.toasts
                    .error("Error", Some(e.user_message("Checkout failed. Please try again.")));
                None
            }
        }
    }
}
