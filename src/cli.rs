use clap::{Parser, Subcommand};
use std::time::Duration;

use crate::api::{ApiClient, Period};
use crate::catalog::{Availability, CategoryFilter, SortKey};
use crate::config::Config;
use crate::nav::{NavItem, Navbar};
use crate::notify::Toast;
use crate::pages::transactions::StatusTab;
use crate::pages::{
    CartPage, CatalogPage, CheckoutOutcome, HomePage, LoginPage, RegisterPage, TopBuyersPage,
    TransactionsPage,
};
use crate::render;
use crate::routes::{self, Navigation, Route};
use crate::session::{self, Session};

#[derive(Parser)]
#[command(name = "nexmedis")]
#[command(about = "NexMedis storefront - healthcare products from the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the home page (default)
    Home,

    /// Sign in and store the session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Create an account
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long = "confirm-password")]
        confirm_password: String,
    },

    /// Remove the stored session token
    Logout,

    /// Show whether a session token is stored
    Status,

    /// Show the navigation links for the current session
    Nav,

    /// Resolve a client path through the route guards
    Route {
        #[arg(value_name = "PATH")]
        path: String,
    },

    /// Product catalog commands
    #[command(subcommand)]
    Products(ProductCommands),

    /// Shopping cart commands
    #[command(subcommand)]
    Cart(CartCommands),

    /// Order history commands
    #[command(subcommand)]
    Transactions(TransactionCommands),

    /// Top customers by spending
    TopBuyers {
        /// 7 days, 14 days, 1 month, 3 months, 6 months or 1 year
        #[arg(short, long, default_value = "1 month")]
        period: String,
    },

    /// Session commands
    #[command(subcommand)]
    Session(SessionCommands),

    /// Configuration validation
    Config,
}

#[derive(Subcommand)]
pub enum ProductCommands {
    /// List products with optional search, filters and sort
    List {
        #[arg(short, long)]
        search: Option<String>,
        /// all, 1 (Prescription), 2 (Over-the-Counter) or 3 (Medical Equipment)
        #[arg(short, long, default_value = "all")]
        category: String,
        /// all, in-stock or out-of-stock
        #[arg(short, long, default_value = "all")]
        availability: String,
        /// name-asc, name-desc, price-asc or price-desc
        #[arg(long, default_value = "name-asc")]
        sort: String,
    },

    /// Show a product's details
    Show {
        #[arg(value_name = "PRODUCT_ID")]
        product_id: i64,
    },

    /// Add a product to the cart
    Add {
        #[arg(value_name = "PRODUCT_ID")]
        product_id: i64,
        #[arg(short, long, default_value_t = 1)]
        quantity: i64,
    },
}

#[derive(Subcommand)]
pub enum CartCommands {
    /// Show the cart
    Show,
    /// Set an item's quantity
    Set {
        #[arg(value_name = "ITEM_ID")]
        item_id: i64,
        #[arg(value_name = "QUANTITY")]
        quantity: i64,
    },
    /// Increase an item's quantity by one
    Inc {
        #[arg(value_name = "ITEM_ID")]
        item_id: i64,
    },
    /// Decrease an item's quantity by one (never below 1)
    Dec {
        #[arg(value_name = "ITEM_ID")]
        item_id: i64,
    },
    /// Remove an item
    Remove {
        #[arg(value_name = "ITEM_ID")]
        item_id: i64,
    },
    /// Remove every item
    Clear,
    /// Place the order and hand off to payment
    Checkout,
}

#[derive(Subcommand)]
pub enum TransactionCommands {
    /// List orders, optionally by status
    List {
        #[arg(short, long, default_value = "all")]
        status: String,
    },
    /// Show one order in detail
    Show {
        #[arg(value_name = "ORDER_ID")]
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum SessionCommands {
    /// Print login/logout changes made by other processes until interrupted
    Watch {
        #[arg(long, default_value_t = 1000)]
        interval_ms: u64,
    },
}

/// Everything a command needs: the API client and the session over the same storage.
pub struct App {
    pub config: Config,
    pub api: ApiClient,
    pub session: Session,
}

impl App {
    pub fn new(config: Config, api: ApiClient, session: Session) -> Self {
        Self {
            config,
            api,
            session,
        }
    }
}

fn print_toasts(toasts: Vec<Toast>) {
    for toast in toasts {
        println!("{}", toast);
    }
}

/// Runs the route guard for the page a command stands in for.
fn enter(route: Route, session: &Session) -> anyhow::Result<()> {
    match routes::resolve(route.path(), session) {
        Navigation::Render(_) => Ok(()),
        Navigation::Redirect(to) if to == Route::Login.path() => {
            anyhow::bail!("Not logged in. Run `nexmedis login` first.")
        }
        Navigation::Redirect(to) => {
            anyhow::bail!("Already logged in (redirected to {}). Run `nexmedis logout` first.", to)
        }
        Navigation::NotFound(path) => anyhow::bail!("No page at {}", path),
    }
}

pub fn handle_home(app: &App) -> anyhow::Result<()> {
    enter(Route::Home, &app.session)?;
    println!("{}", HomePage::TITLE);
    println!("{}", HomePage::WELCOME);
    Ok(())
}

pub async fn handle_login(app: &mut App, email: String, password: String) -> anyhow::Result<()> {
    enter(Route::Login, &app.session)?;

    let mut page = LoginPage::new(app.api.clone());
    page.form.email = email;
    page.form.password = password;

    let next = page.submit(&mut app.session).await;
    for error in &page.field_errors {
        println!("✗ {}", error);
    }
    print_toasts(page.toasts.drain());

    match next {
        Some(nav) => {
            tracing::info!("Login complete, next: {:?}", nav);
            Ok(())
        }
        None => anyhow::bail!("Login failed"),
    }
}

pub async fn handle_register(
    app: &App,
    username: String,
    email: String,
    password: String,
    confirm_password: String,
) -> anyhow::Result<()> {
    enter(Route::Register, &app.session)?;

    let mut page = RegisterPage::new(app.api.clone());
    page.form.username = username;
    page.form.email = email;
    page.form.password = password;
    page.form.confirm_password = confirm_password;

    let next = page.submit().await;
    for error in &page.field_errors {
        println!("✗ {}", error);
    }
    print_toasts(page.toasts.drain());

    match next {
        Some(_) => {
            println!("Next: nexmedis login --email <EMAIL> --password <PASSWORD>");
            Ok(())
        }
        None => anyhow::bail!("Registration failed"),
    }
}

pub fn handle_logout(app: &mut App) -> anyhow::Result<()> {
    let mut navbar = Navbar::default();
    navbar.select(NavItem::Logout, &mut app.session)?;
    println!("✓ Logged out");
    Ok(())
}

pub fn handle_status(app: &App) -> anyhow::Result<()> {
    if app.session.is_logged_in() {
        println!("Logged in (token stored in {})", app.config.storage_path.display());
    } else {
        println!("Not logged in");
    }
    Ok(())
}

pub fn handle_nav(app: &App) -> anyhow::Result<()> {
    let navbar = Navbar::default();
    println!("{}", Navbar::BRAND);
    for item in navbar.items(&app.session) {
        match item {
            NavItem::Link(route) => println!("  {:<14} {}", item.label(), route.path()),
            NavItem::Logout => println!("  {:<14} nexmedis logout", item.label()),
        }
    }
    Ok(())
}

pub fn handle_route(app: &App, path: &str) -> anyhow::Result<()> {
    match routes::resolve(path, &app.session) {
        Navigation::Render(route) => println!("render {} ({})", route.title(), route.path()),
        Navigation::Redirect(to) => println!("redirect {}", to),
        Navigation::NotFound(path) => println!("not found {}", path),
    }
    Ok(())
}

pub async fn handle_products_list(
    app: &App,
    search: Option<String>,
    category: &str,
    availability: &str,
    sort: &str,
) -> anyhow::Result<()> {
    enter(Route::Products, &app.session)?;

    let mut page = CatalogPage::new(app.api.clone());
    page.view.category = category.parse::<CategoryFilter>().map_err(anyhow::Error::msg)?;
    page.view.availability = availability.parse::<Availability>().map_err(anyhow::Error::msg)?;
    page.view.sort = sort.parse::<SortKey>().map_err(anyhow::Error::msg)?;

    match search {
        Some(query) => {
            page.search_query = query;
            page.search().await;
        }
        None => page.mount().await,
    }

    if let Some(error) = page.error {
        anyhow::bail!(error);
    }

    print!("{}", render::products_table(&page.visible_products(), &page.view));
    Ok(())
}

pub async fn handle_products_show(app: &App, product_id: i64) -> anyhow::Result<()> {
    enter(Route::Products, &app.session)?;

    let mut page = CatalogPage::new(app.api.clone());
    page.mount().await;
    if let Some(error) = page.error {
        anyhow::bail!(error);
    }

    if !page.open_product(product_id) {
        anyhow::bail!("Product {} not found", product_id);
    }

    if let Some(dialog) = &page.dialog {
        print!("{}", render::product_detail(&dialog.product, &dialog.picker));
    }
    Ok(())
}

pub async fn handle_products_add(app: &App, product_id: i64, quantity: i64) -> anyhow::Result<()> {
    enter(Route::Products, &app.session)?;

    let mut page = CatalogPage::new(app.api.clone());
    page.mount().await;
    if let Some(error) = page.error {
        anyhow::bail!(error);
    }

    if !page.open_product(product_id) {
        anyhow::bail!("Product {} not found", product_id);
    }

    if let Some(dialog) = page.dialog.as_mut() {
        if dialog.product.stock <= 0 {
            anyhow::bail!("{} is out of stock", dialog.product.name);
        }
        dialog.picker.set(quantity);
        if dialog.picker.quantity() != quantity {
            println!(
                "Quantity adjusted to {} (maximum: {} units)",
                dialog.picker.quantity(),
                dialog.picker.max()
            );
        }
    }

    page.add_to_cart().await;
    let added = page.dialog.is_none();
    print_toasts(page.toasts.drain());

    if !added {
        anyhow::bail!("Product was not added to the cart");
    }
    Ok(())
}

pub async fn handle_cart(app: &App, command: CartCommands) -> anyhow::Result<()> {
    enter(Route::Carts, &app.session)?;

    let mut page = CartPage::new(app.api.clone());
    page.mount().await;
    if let Some(error) = page.error.take() {
        anyhow::bail!(error);
    }

    match command {
        CartCommands::Show => {}
        CartCommands::Set { item_id, quantity } => page.update_quantity(item_id, quantity).await,
        CartCommands::Inc { item_id } => page.increment(item_id).await,
        CartCommands::Dec { item_id } => page.decrement(item_id).await,
        CartCommands::Remove { item_id } => page.remove_item(item_id).await,
        CartCommands::Clear => page.clear_cart().await,
        CartCommands::Checkout => {
            let outcome = page.checkout().await;
            print_toasts(page.toasts.drain());

            return match outcome {
                Some(CheckoutOutcome::Redirect(url)) => {
                    println!("Continue to payment: {}", url);
                    Ok(())
                }
                Some(CheckoutOutcome::Placed) => {
                    print!("{}", render::cart_table(page.cart.as_ref().unwrap_or(&Default::default())));
                    Ok(())
                }
                None => anyhow::bail!("Checkout failed"),
            };
        }
    }

    print_toasts(page.toasts.drain());
    if let Some(error) = page.error {
        anyhow::bail!(error);
    }
    if let Some(cart) = &page.cart {
        print!("{}", render::cart_table(cart));
    }
    Ok(())
}

pub async fn handle_transactions_list(app: &App, status: &str) -> anyhow::Result<()> {
    enter(Route::Transactions, &app.session)?;

    let mut page = TransactionsPage::new(app.api.clone());
    page.tab = status.parse::<StatusTab>().map_err(anyhow::Error::msg)?;
    page.mount().await;

    if let Some(error) = page.error {
        anyhow::bail!(error);
    }

    println!("{}", page.tab.label());
    print!("{}", render::transactions_list(&page.visible_transactions()));
    Ok(())
}

pub async fn handle_transactions_show(app: &App, id: i64) -> anyhow::Result<()> {
    enter(Route::Transactions, &app.session)?;

    let mut page = TransactionsPage::new(app.api.clone());
    page.open_detail(id).await;
    print_toasts(page.toasts.drain());

    match &page.selected {
        Some(transaction) => {
            print!("{}", render::transaction_detail(transaction));
            Ok(())
        }
        None => anyhow::bail!("Could not load order #{}", id),
    }
}

pub async fn handle_top_buyers(app: &App, period: &str) -> anyhow::Result<()> {
    enter(Route::TopBuyer, &app.session)?;

    let period = period.parse::<Period>().map_err(anyhow::Error::msg)?;
    let mut page = TopBuyersPage::new(app.api.clone());
    page.set_period(period).await;

    if let Some(error) = page.error {
        anyhow::bail!(error);
    }

    println!("Top Customers by Spending ({})", period.label());
    println!("{}", page.description());
    print!("{}", render::top_customers_table(&page.customers, &page.summary()));
    Ok(())
}

pub async fn handle_session_watch(app: &App, interval_ms: u64) -> anyhow::Result<()> {
    let mut rx = session::spawn_storage_watcher(
        app.session.storage().clone(),
        Duration::from_millis(interval_ms.max(50)),
    );

    println!(
        "Watching {} ({})",
        app.config.storage_path.display(),
        if *rx.borrow() { "logged in" } else { "logged out" }
    );

    loop {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let logged_in = *rx.borrow();
                println!("{}", if logged_in { "→ logged in" } else { "→ logged out" });
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }
    Ok(())
}

pub fn handle_config_validate(config: &Config) -> anyhow::Result<()> {
    tracing::info!("Validating configuration...");

    println!("Configuration:");
    println!("  API URL: {}", config.api_base_url);
    println!("  Storage: {}", config.storage_path.display());
    match config.http_timeout {
        Some(timeout) => println!("  HTTP timeout: {}s", timeout.as_secs()),
        None => println!("  HTTP timeout: transport default"),
    }

    tracing::info!("Configuration is valid");
    println!("✓ Configuration is valid");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use clap::CommandFactory;
    use std::sync::Arc;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_products_list_defaults() {
        let cli = Cli::try_parse_from(["nexmedis", "products", "list"]).unwrap();
        match cli.command {
            Some(Commands::Products(ProductCommands::List {
                search,
                category,
                availability,
                sort,
            })) => {
                assert!(search.is_none());
                assert_eq!(category, "all");
                assert_eq!(availability, "all");
                assert_eq!(sort, "name-asc");
            }
            _ => panic!("expected products list"),
        }
    }

    #[test]
    fn test_parse_cart_set() {
        let cli = Cli::try_parse_from(["nexmedis", "cart", "set", "4", "2"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Cart(CartCommands::Set { item_id: 4, quantity: 2 }))
        ));
    }

    #[test]
    fn test_enter_guards() {
        let guest = Session::new(Arc::new(MemoryStorage::new()));
        assert!(enter(Route::Carts, &guest).is_err());
        assert!(enter(Route::Login, &guest).is_ok());

        let member = Session::new(Arc::new(MemoryStorage::with_token("tok")));
        assert!(enter(Route::Carts, &member).is_ok());
        assert!(enter(Route::Register, &member).is_err());
    }
}
