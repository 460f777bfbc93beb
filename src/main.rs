use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nexmedis_storefront::cli::{
    self, Cli, Commands, ProductCommands, SessionCommands, TransactionCommands,
};
use nexmedis_storefront::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Setup logging; stderr keeps command output clean.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let mut app = nexmedis_storefront::create_app(config);
    tracing::debug!("Storefront API at {}", app.config.api_base_url);

    match cli.command.unwrap_or(Commands::Home) {
        Commands::Home => cli::handle_home(&app),
        Commands::Login { email, password } => cli::handle_login(&mut app, email, password).await,
        Commands::Register {
            username,
            email,
            password,
            confirm_password,
        } => cli::handle_register(&app, username, email, password, confirm_password).await,
        Commands::Logout => cli::handle_logout(&mut app),
        Commands::Status => cli::handle_status(&app),
        Commands::Nav => cli::handle_nav(&app),
        Commands::Route { path } => cli::handle_route(&app, &path),
        Commands::Products(ProductCommands::List {
            search,
            category,
            availability,
            sort,
        }) => cli::handle_products_list(&app, search, &category, &availability, &sort).await,
        Commands::Products(ProductCommands::Show { product_id }) => {
            cli::handle_products_show(&app, product_id).await
        }
        Commands::Products(ProductCommands::Add {
            product_id,
            quantity,
        }) => cli::handle_products_add(&app, product_id, quantity).await,
        Commands::Cart(command) => cli::handle_cart(&app, command).await,
        Commands::Transactions(TransactionCommands::List { status }) => {
            cli::handle_transactions_list(&app, &status).await
        }
        Commands::Transactions(TransactionCommands::Show { id }) => {
            cli::handle_transactions_show(&app, id).await
        }
        Commands::TopBuyers { period } => cli::handle_top_buyers(&app, &period).await,
        Commands::Session(SessionCommands::Watch { interval_ms }) => {
            cli::handle_session_watch(&app, interval_ms).await
        }
        Commands::Config => cli::handle_config_validate(&app.config),
    }
}
