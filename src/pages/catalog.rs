use crate::api::ApiClient;
use crate::catalog::{CatalogView, QuantityPicker};
use crate::models::Product;
use crate::notify::Toaster;

/// The product detail dialog: the product it was opened on and its quantity stepper.
#[derive(Debug, Clone)]
pub struct ProductDialog {
    pub product: Product,
    pub picker: QuantityPicker,
}

pub struct CatalogPage {
    api: ApiClient,
    pub products: Vec<Product>,
    pub loading: bool,
    pub error: Option<String>,
    pub search_query: String,
    pub view: CatalogView,
    pub dialog: Option<ProductDialog>,
    pub adding_to_cart: bool,
    pub toasts: Toaster,
}

impl CatalogPage {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            products: Vec::new(),
            loading: true,
            error: None,
            search_query: String::new(),
            view: CatalogView::default(),
            dialog: None,
            adding_to_cart: false,
            toasts: Toaster::default(),
        }
    }

    pub async fn mount(&mut self) {
        self.fetch_products().await;
    }

    pub async fn fetch_products(&mut self) {
        self.loading = true;
        self.error = None;

        match self.api.list_products(None).await {
            Ok(products) => self.products = products,
            Err(e) => {
                tracing::error!("Error fetching products: {}", e);
                self.error = Some("Failed to load products. Please try again later.".to_string());
            }
        }

        self.loading = false;
    }

    /// Server-side search; a blank query falls back to the full list.
    pub async fn search(&mut self) {
        if self.search_query.trim().is_empty() {
            self.fetch_products().await;
            return;
        }

        self.loading = true;
        self.error = None;

        match self.api.list_products(Some(&self.search_query)).await {
            Ok(products) => self.products = products,
            Err(e) => {
                tracing::error!("Error searching products: {}", e);
                self.error = Some("Failed to search products. Please try again later.".to_string());
            }
        }

        self.loading = false;
    }

    pub async fn clear_search(&mut self) {
        self.search_query.clear();
        self.fetch_products().await;
    }

    /// The list as rendered: filters and sort applied to a copy.
    pub fn visible_products(&self) -> Vec<Product> {
        self.view.apply(&self.products)
    }

    /// Opens the detail dialog with the quantity reset to 1. False when the id is
    /// not in the current list.
    pub fn open_product(&mut self, product_id: i64) -> bool {
        let Some(product) = self.products.iter().find(|p| p.id == product_id) else {
            return false;
        };

        self.dialog = Some(ProductDialog {
            picker: QuantityPicker::new(product.stock),
            product: product.clone(),
        });
        true
    }

    pub fn close_dialog(&mut self) {
        self.dialog = None;
    }

    /// Adds the dialog's product at the dialog's quantity, then refreshes stock.
    pub async fn add_to_cart(&mut self) {
        let Some(dialog) = self.dialog.clone() else {
            return;
        };

        if let Err(e) = self.api.require_token() {
            tracing::debug!("Add to cart blocked: {}", e);
            self.toasts.error(
                "Authentication required",
                Some("Please login to add items to your cart".to_string()),
            );
            return;
        }

        // The add control is disabled for out-of-stock products.
        if dialog.product.stock <= 0 || self.adding_to_cart {
            return;
        }

        self.adding_to_cart = true;
        let quantity = dialog.picker.quantity();
        let result = self.api.add_to_cart(dialog.product.id, quantity).await;

        match result {
            Ok(()) => {
                self.toasts.success(
                    "Added to cart",
                    Some(format!(
                        "{} × {} added to your cart.",
                        quantity, dialog.product.name
                    )),
                );
                self.dialog = None;
                self.fetch_products().await;
            }
            Err(e) => {
                tracing::warn!("Add to cart failed: {}", e);
                self.toasts
                    .error("Error", Some(e.user_message("Failed to add item to cart")));
            }
        }

        self.adding_to_cart = false;
    }
}
