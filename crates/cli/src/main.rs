//! Sample Site CLI - drive the storefront from a terminal.
//!
//! Every command loads the page over the file store (seeding it on first use)
//! and then acts through the same controllers and services the page uses.
//!
//! # Usage
//!
//! ```bash
//! # Seed the store
//! site-cli seed
//!
//! # Register and log in
//! site-cli register -u alice -p secret1 -e alice@example.com -n "Alice Nguyen"
//! site-cli login -u alice -p secret1
//!
//! # Shop
//! site-cli search router
//! site-cli cart add 2
//! site-cli cart total
//! ```
//!
//! # Commands
//!
//! - `seed` - Write default collections that are missing
//! - `register`, `login`, `logout`, `whoami` - Accounts
//! - `products`, `news`, `search` - Catalog
//! - `cart show|add|remove|total` - Cart

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sample_site_core::ProductId;
use sample_site_storefront::SiteConfig;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "site-cli")]
#[command(author, version, about = "Sample Site CLI tools")]
struct Cli {
    /// Storage file (overrides `SITE_STORAGE_PATH`)
    #[arg(long, global = true)]
    storage: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed missing collections with default data
    Seed,
    /// Submit the registration form
    Register {
        /// Login name
        #[arg(short, long)]
        username: String,

        /// Password
        #[arg(short, long)]
        password: String,

        /// Password confirmation (defaults to the password)
        #[arg(short, long)]
        confirm: Option<String>,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Full name
        #[arg(short = 'n', long)]
        fullname: String,
    },
    /// Submit the login form and wait for the redirect
    Login {
        /// Login name
        #[arg(short, long)]
        username: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Log out
    Logout,
    /// Show the logged-in user
    Whoami,
    /// List products
    Products,
    /// List news articles
    News,
    /// Submit the search form and list matching products
    Search {
        /// Search text
        query: String,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// List cart lines
    Show,
    /// Add one unit of a product
    Add {
        /// Product id
        id: ProductId,
    },
    /// Remove a product's line
    Remove {
        /// Product id
        id: ProductId,
    },
    /// Show the cart total
    Total,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = SiteConfig::from_env()?;
    if let Some(path) = cli.storage {
        config.storage_path = path;
    }

    match cli.command {
        Commands::Seed => commands::seed::run(config)?,
        Commands::Register {
            username,
            password,
            confirm,
            email,
            fullname,
        } => {
            let confirm = confirm.unwrap_or_else(|| password.clone());
            commands::account::register(config, &username, &password, &confirm, &email, &fullname)?;
        }
        Commands::Login { username, password } => {
            commands::account::login(config, &username, &password).await?;
        }
        Commands::Logout => commands::account::logout(config)?,
        Commands::Whoami => commands::account::whoami(config)?,
        Commands::Products => commands::catalog::products(config)?,
        Commands::News => commands::catalog::news(config)?,
        Commands::Search { query } => commands::catalog::search(config, &query)?,
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(config)?,
            CartAction::Add { id } => commands::cart::add(config, id)?,
            CartAction::Remove { id } => commands::cart::remove(config, id)?,
            CartAction::Total => commands::cart::total(config)?,
        },
    }
    Ok(())
}
