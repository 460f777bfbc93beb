pub mod auth;
pub mod carts;
pub mod client;
pub mod products;
pub mod transactions;
pub mod users;

pub use client::ApiClient;
pub use users::Period;
