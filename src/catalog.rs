//! Client-side catalog controls: category and availability filters, sort order,
//! and the quantity stepper of the product dialog.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::models::Product;

/// Hardcoded category labels keyed by `kategori_id`.
pub const CATEGORIES: [(i64, &str); 3] = [
    (1, "Prescription"),
    (2, "Over-the-Counter"),
    (3, "Medical Equipment"),
];

pub fn category_label(id: i64) -> Option<&'static str> {
    CATEGORIES
        .iter()
        .find(|(category_id, _)| *category_id == id)
        .map(|(_, label)| *label)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(i64),
}

impl CategoryFilter {
    pub fn label(self) -> &'static str {
        match self {
            CategoryFilter::All => "All Categories",
            CategoryFilter::Category(id) => category_label(id).unwrap_or("Unknown Category"),
        }
    }

    fn matches(self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(id) => product.category_id == id,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        if value.eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }

        if let Ok(id) = value.parse::<i64>() {
            if category_label(id).is_some() {
                return Ok(CategoryFilter::Category(id));
            }
        }

        CATEGORIES
            .iter()
            .find(|(_, label)| label.eq_ignore_ascii_case(value))
            .map(|(id, _)| CategoryFilter::Category(*id))
            .ok_or_else(|| format!("Invalid category '{}'. Use all, 1, 2 or 3", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Availability {
    #[default]
    All,
    InStock,
    OutOfStock,
}

impl Availability {
    pub fn label(self) -> &'static str {
        match self {
            Availability::All => "All Products",
            Availability::InStock => "In Stock",
            Availability::OutOfStock => "Out of Stock",
        }
    }

    fn matches(self, product: &Product) -> bool {
        match self {
            Availability::All => true,
            Availability::InStock => product.stock > 0,
            Availability::OutOfStock => product.stock == 0,
        }
    }
}

impl FromStr for Availability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Availability::All),
            "in-stock" => Ok(Availability::InStock),
            "out-of-stock" => Ok(Availability::OutOfStock),
            _ => Err(format!(
                "Invalid availability '{}'. Use all, in-stock or out-of-stock",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    NameAsc,
    NameDesc,
    PriceAsc,
    PriceDesc,
}

impl SortKey {
    pub fn label(self) -> &'static str {
        match self {
            SortKey::NameAsc => "Name (A-Z)",
            SortKey::NameDesc => "Name (Z-A)",
            SortKey::PriceAsc => "Price (Low-High)",
            SortKey::PriceDesc => "Price (High-Low)",
        }
    }

    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortKey::NameAsc => compare_names(&a.name, &b.name),
            SortKey::NameDesc => compare_names(&b.name, &a.name),
            SortKey::PriceAsc => price_key(a).cmp(&price_key(b)),
            SortKey::PriceDesc => price_key(b).cmp(&price_key(a)),
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name-asc" => Ok(SortKey::NameAsc),
            "name-desc" => Ok(SortKey::NameDesc),
            "price-asc" => Ok(SortKey::PriceAsc),
            "price-desc" => Ok(SortKey::PriceDesc),
            _ => Err(format!(
                "Invalid sort '{}'. Use name-asc, name-desc, price-asc or price-desc",
                s
            )),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Parses the leading integer of a price string: `"15000.00"` -> 15000.
///
/// Returns `None` when the string does not start with a number.
pub fn parse_price(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

fn price_key(product: &Product) -> i64 {
    parse_price(&product.price).unwrap_or(0)
}

/// The three orthogonal catalog controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CatalogView {
    pub category: CategoryFilter,
    pub availability: Availability,
    pub sort: SortKey,
}

impl CatalogView {
    /// Filters by category, then availability, then sorts. `products` is untouched.
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        let mut filtered: Vec<Product> = products
            .iter()
            .filter(|p| self.category.matches(p))
            .filter(|p| self.availability.matches(p))
            .cloned()
            .collect();

        filtered.sort_by(|a, b| self.sort.compare(a, b));
        filtered
    }
}

/// Quantity stepper for adding a product to the cart: starts at 1, bounded by stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityPicker {
    quantity: i64,
    max: i64,
}

impl QuantityPicker {
    pub fn new(stock: i64) -> Self {
        Self {
            quantity: 1,
            max: stock.max(0),
        }
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    pub fn can_decrement(&self) -> bool {
        self.quantity > 1
    }

    pub fn can_increment(&self) -> bool {
        self.quantity < self.max
    }

    pub fn decrement(&mut self) {
        self.quantity = (self.quantity - 1).max(1);
    }

    pub fn increment(&mut self) {
        self.quantity = (self.quantity + 1).min(self.max.max(1));
    }

    /// Clamps an arbitrary requested quantity into `1..=max`.
    pub fn set(&mut self, quantity: i64) {
        self.quantity = quantity.clamp(1, self.max.max(1));
    }
}

/// Formats an amount as Indonesian rupiah: `Rp 15.000`, `-Rp 1.500`.
pub fn format_rupiah(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if rounded < 0 {
        format!("-Rp {}", grouped)
    } else {
        format!("Rp {}", grouped)
    }
}

pub fn format_price(raw: &str) -> String {
    format_rupiah(parse_price(raw).unwrap_or(0) as f64)
}
