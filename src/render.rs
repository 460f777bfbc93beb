//! Plain-text rendering of page state for the terminal.

use chrono::{DateTime, Utc};
use std::fmt::Write;

use crate::catalog::{category_label, format_price, format_rupiah, CatalogView, QuantityPicker};
use crate::models::{Cart, Product, TopCustomer, Transaction};
use crate::pages::top_buyers::{rank_label, TopBuyersSummary};
use crate::pages::transactions::{detail_payment_badge, list_payment_badge, order_status_badge};

fn format_date(date: Option<&DateTime<Utc>>) -> String {
    date.map(|d| d.format("%d %b %Y, %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn stock_label(stock: i64) -> String {
    if stock > 0 {
        format!("{} in stock", stock)
    } else {
        "Out of stock".to_string()
    }
}

pub fn products_table(products: &[Product], view: &CatalogView) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Filters: {} | {} | {}",
        view.category.label(),
        view.availability.label(),
        view.sort.label()
    );

    if products.is_empty() {
        let _ = writeln!(out, "No products found. Try adjusting your search or filters.");
        return out;
    }

    let _ = writeln!(
        out,
        "{:<6} {:<12} {:<32} {:<20} {:>14} {:<14}",
        "ID", "Code", "Name", "Category", "Price", "Stock"
    );
    let _ = writeln!(out, "{}", "-".repeat(103));

    for p in products {
        let _ = writeln!(
            out,
            "{:<6} {:<12} {:<32} {:<20} {:>14} {:<14}",
            p.id,
            p.product_code,
            p.name,
            category_label(p.category_id).unwrap_or("-"),
            format_price(&p.price),
            stock_label(p.stock)
        );
    }
    out
}

pub fn product_detail(product: &Product, picker: &QuantityPicker) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", product.name);
    let _ = writeln!(out, "  Product ID: {}", product.product_code);
    let _ = writeln!(
        out,
        "  Category:   {}",
        category_label(product.category_id).unwrap_or("-")
    );
    let _ = writeln!(out, "  Price:      {}", format_price(&product.price));
    let _ = writeln!(out, "  Stock:      {}", stock_label(product.stock));
    if product.stock > 0 {
        let _ = writeln!(out, "  Maximum:    {} units", picker.max());
    }
    out
}

pub fn cart_table(cart: &Cart) -> String {
    let mut out = String::new();

    if cart.is_empty() {
        let _ = writeln!(out, "Your cart is empty. Start shopping to add items to your cart.");
        return out;
    }

    let _ = writeln!(out, "Items ({})", cart.count);
    let _ = writeln!(
        out,
        "{:<6} {:<32} {:>14} {:>8} {:>14}",
        "Item", "Product", "Price", "Qty", "Subtotal"
    );
    let _ = writeln!(out, "{}", "-".repeat(78));

    for item in &cart.items {
        let _ = writeln!(
            out,
            "{:<6} {:<32} {:>14} {:>8} {:>14}",
            item.id,
            format!("{} ({})", item.product.name, item.product.product_code),
            format_price(&item.product.price),
            item.quantity,
            format_rupiah(item.subtotal.value())
        );
    }

    let _ = writeln!(out, "{}", "-".repeat(78));
    let _ = writeln!(out, "Total: {}", format_rupiah(cart.total.value()));
    out
}

pub fn transactions_list(transactions: &[&Transaction]) -> String {
    let mut out = String::new();

    if transactions.is_empty() {
        let _ = writeln!(out, "No transactions found.");
        return out;
    }

    let _ = writeln!(
        out,
        "{:<10} {:<20} {:<14} {:>6} {:>14} {:<14}",
        "Order", "Placed on", "Status", "Items", "Total", "Payment"
    );
    let _ = writeln!(out, "{}", "-".repeat(83));

    for t in transactions {
        let _ = writeln!(
            out,
            "{:<10} {:<20} {:<14} {:>6} {:>14} {:<14}",
            format!("#{}", t.id),
            format_date(t.created_at.as_ref()),
            order_status_badge(&t.status).to_string(),
            t.order_details.len(),
            format_rupiah(t.total.value()),
            list_payment_badge(t.payment.as_ref()).to_string()
        );
    }
    out
}

pub fn transaction_detail(t: &Transaction) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Order #{} - {}", t.id, format_date(t.created_at.as_ref()));
    let _ = writeln!(out, "  Status:  {}", order_status_badge(&t.status));
    let _ = writeln!(out, "  Payment: {}", detail_payment_badge(t.payment.as_ref()));
    let _ = writeln!(out, "  Total:   {}", format_rupiah(t.total.value()));
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "  {:<32} {:>14} {:>8} {:>14}",
        "Product", "Price", "Qty", "Subtotal"
    );

    for item in &t.order_details {
        let name = item
            .product
            .as_ref()
            .map(|p| format!("{} ({})", p.name, p.product_code))
            .unwrap_or_else(|| format!("Product {}", item.product_id));
        let _ = writeln!(
            out,
            "  {:<32} {:>14} {:>8} {:>14}",
            name,
            format_rupiah(item.price.value()),
            item.quantity,
            format_rupiah(item.price.value() * item.quantity as f64)
        );
    }

    if let Some(payment) = &t.payment {
        let _ = writeln!(out);
        let _ = writeln!(out, "  Payment Details");
        let _ = writeln!(
            out,
            "    Method: {}",
            payment.method.as_deref().unwrap_or("-")
        );
        let _ = writeln!(out, "    Status: {}", detail_payment_badge(Some(payment)));
        let _ = writeln!(out, "    Date:   {}", format_date(payment.created_at.as_ref()));
        let _ = writeln!(out, "    Amount: {}", format_rupiah(payment.amount.value()));
    }
    out
}

pub fn top_customers_table(customers: &[TopCustomer], summary: &TopBuyersSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Total Customers: {} | Total Orders: {} | Total Revenue: {}",
        summary.total_customers,
        summary.total_orders,
        format_rupiah(summary.total_revenue.value())
    );

    if customers.is_empty() {
        let _ = writeln!(out, "No customers found for this time period.");
        return out;
    }

    let _ = writeln!(
        out,
        "{:<8} {:<20} {:<30} {:>8} {:>16}",
        "Rank", "Customer", "Email", "Orders", "Total Spent"
    );
    let _ = writeln!(out, "{}", "-".repeat(86));

    for (index, c) in customers.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:<8} {:<20} {:<30} {:>8} {:>16}",
            rank_label(index),
            c.username,
            c.email,
            c.order_count,
            format_rupiah(c.total_spent.value())
        );
    }
    out
}
