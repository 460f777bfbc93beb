//! Page view-models. Each one owns the state its screen renders and the actions
//! its controls trigger; nothing is shared between pages except the API client.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod home;
pub mod top_buyers;
pub mod transactions;

pub use auth::{LoginForm, LoginPage, RegisterForm, RegisterPage};
pub use cart::{CartPage, CheckoutOutcome};
pub use catalog::CatalogPage;
pub use home::HomePage;
pub use top_buyers::TopBuyersPage;
pub use transactions::TransactionsPage;
