//! TWB CLI - Database migrations and catalog tools.
//!
//! # Usage
//!
//! ```bash
//! # Run storefront database migrations
//! twb-cli migrate
//!
//! # Insert (or update) the sample breakfast menu
//! twb-cli seed products
//!
//! # Replace the whole catalog with the sample menu
//! twb-cli seed products --clear
//!
//! # List available products
//! twb-cli catalog list
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "twb-cli")]
#[command(author, version, about = "TWB CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run storefront database migrations
    Migrate,
    /// Seed the database with sample data
    Seed {
        #[command(subcommand)]
        target: SeedTarget,
    },
    /// Inspect the catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Subcommand)]
enum SeedTarget {
    /// Seed the sample breakfast menu
    Products {
        /// Delete existing products first
        #[arg(long)]
        clear: bool,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List available products
    List,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::storefront().await?,
        Commands::Seed { target } => match target {
            SeedTarget::Products { clear } => commands::seed::products(clear).await?,
        },
        Commands::Catalog { action } => match action {
            CatalogAction::List => commands::catalog::list().await?,
        },
    }
    Ok(())
}
