//! ShopSmart CLI - the storefront shell.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! shopsmart products --search "sh" --max-price 30 --sort price-asc
//!
//! # Work the cart (persisted between invocations)
//! shopsmart cart add 3
//! shopsmart cart set 3 2
//! shopsmart cart show
//! shopsmart cart clear
//!
//! # Talk to the support bot
//! shopsmart chat "where is my order?"
//!
//! # Log in (password read from stdin)
//! shopsmart login user@example.com
//! ```
//!
//! # Commands
//!
//! - `products` - Fetch the catalog and print the filtered, sorted view
//! - `cart` - Show or mutate the persisted cart
//! - `chat` - One exchange with the chat collaborator
//! - `login` - Obtain and store a bearer token

#![cfg_attr(not(test), forbid(unsafe_code))]
// A CLI talks on stdout.
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};

use shopsmart_core::SortKey;
use shopsmart_storefront::{AppState, ShopsmartConfig};

mod commands;

#[derive(Parser)]
#[command(name = "shopsmart")]
#[command(version, about = "ShopSmart storefront shell")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Products {
        /// Case-insensitive name search
        #[arg(short, long)]
        search: Option<String>,

        /// Exact category (omit for all)
        #[arg(short, long)]
        category: Option<String>,

        /// Inclusive lower price bound
        #[arg(long)]
        min_price: Option<rust_decimal::Decimal>,

        /// Inclusive upper price bound
        #[arg(long)]
        max_price: Option<rust_decimal::Decimal>,

        /// Sort order: featured, price-asc, price-desc, rating-desc
        #[arg(long, default_value = "featured", value_parser = parse_sort_key)]
        sort: SortKey,
    },
    /// Show or mutate the cart
    Cart {
        #[command(subcommand)]
        action: commands::cart::CartAction,
    },
    /// Send one message to the support bot
    Chat {
        /// Message text
        message: String,
    },
    /// Log in and store the access token
    Login {
        /// Account email; the password is read from stdin
        email: String,
    },
}

fn parse_sort_key(raw: &str) -> Result<SortKey, String> {
    match raw {
        "featured" => Ok(SortKey::Featured),
        "price-asc" => Ok(SortKey::PriceAsc),
        "price-desc" => Ok(SortKey::PriceDesc),
        "rating-desc" => Ok(SortKey::RatingDesc),
        other => Err(format!(
            "unknown sort key {other:?} (expected featured, price-asc, price-desc, rating-desc)"
        )),
    }
}

#[tokio::main]
async fn main() {
    // Load .env before reading configuration
    dotenvy::dotenv().ok();

    // Initialize tracing with EnvFilter; default to warnings only so command
    // output stays clean
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shopsmart=warn".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        println!("{}", e.user_message());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> shopsmart_storefront::error::Result<()> {
    let config = ShopsmartConfig::from_env()?;
    let state = AppState::new(config)?;

    match cli.command {
        Commands::Products {
            search,
            category,
            min_price,
            max_price,
            sort,
        } => commands::products::list(&state, search, category, min_price, max_price, sort).await,
        Commands::Cart { action } => commands::cart::run(&state, action).await,
        Commands::Chat { message } => commands::chat::send(&state, &message).await,
        Commands::Login { email } => commands::login::run(&state, &email).await,
    }
}
