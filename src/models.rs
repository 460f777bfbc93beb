//! View-models mirrored from API responses.
//!
//! Field names follow the wire format of the storefront API; Rust names are the
//! English equivalents. Nothing here is derived locally: totals, subtotals and
//! stock are whatever the server last said.

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// A monetary amount as sent by the server.
///
/// The API sends numbers for some amounts and decimal strings for others, so
/// both are accepted. Amounts are rupiah and rendered without decimals.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Money(pub f64);

impl Money {
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MoneyVisitor;

        impl<'de> Visitor<'de> for MoneyVisitor {
            type Value = Money;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a number, a numeric string or null")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
                Ok(Money(v as f64))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
                Ok(Money(v as f64))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
                Ok(Money(v))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
                v.trim()
                    .parse::<f64>()
                    .map(Money)
                    .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
            }

            // A null amount reads as zero rather than failing the whole response.
            fn visit_unit<E: de::Error>(self) -> Result<Money, E> {
                Ok(Money::default())
            }

            fn visit_none<E: de::Error>(self) -> Result<Money, E> {
                Ok(Money::default())
            }
        }

        deserializer.deserialize_any(MoneyVisitor)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    #[serde(rename = "id_produk")]
    pub product_code: String,
    #[serde(rename = "nama_produk")]
    pub name: String,
    /// Price as the server formats it, e.g. `"15000"` or `"15000.00"`.
    #[serde(rename = "harga")]
    pub price: String,
    #[serde(rename = "kategori_id")]
    pub category_id: i64,
    #[serde(rename = "status_id", default)]
    pub status_id: Option<i64>,
    #[serde(rename = "stok")]
    pub stock: i64,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// The slimmer product shape embedded in cart items and order details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: i64,
    #[serde(rename = "id_produk")]
    pub product_code: String,
    #[serde(rename = "nama_produk")]
    pub name: String,
    #[serde(rename = "harga")]
    pub price: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub product: ProductSummary,
    pub subtotal: Money,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    #[serde(default)]
    pub items: Vec<CartItem>,
    #[serde(default)]
    pub total: Money,
    #[serde(default)]
    pub count: i64,
}

impl Cart {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, id: i64) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AddToCartRequest {
    #[serde(rename = "productId")]
    pub product_id: i64,
    pub quantity: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateCartItemRequest {
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDetail {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub price: Money,
    #[serde(rename = "Product", default)]
    pub product: Option<ProductSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    pub order_id: i64,
    #[serde(rename = "payment_method", default)]
    pub method: Option<String>,
    #[serde(rename = "payment_status")]
    pub status: String,
    #[serde(rename = "payment_token", default)]
    pub token: Option<String>,
    pub amount: Money,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub user_id: i64,
    pub total: Money,
    pub status: String,
    #[serde(default)]
    pub order_date: Option<DateTime<Utc>>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(rename = "orderDetails", default)]
    pub order_details: Vec<OrderDetail>,
    #[serde(default)]
    pub payment: Option<Payment>,
    #[serde(rename = "User", default)]
    pub user: Option<Customer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopCustomer {
    pub customer_id: i64,
    pub username: String,
    pub email: String,
    pub order_count: i64,
    pub total_spent: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopCustomersResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub customers: Vec<TopCustomer>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CheckoutPayment {
    #[serde(default)]
    pub redirect_url: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CheckoutResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub payment: Option<CheckoutPayment>,
}

impl CheckoutResponse {
    pub fn redirect_url(&self) -> Option<&str> {
        self.payment
            .as_ref()
            .and_then(|p| p.redirect_url.as_deref())
            .filter(|url| !url.is_empty())
    }
}
