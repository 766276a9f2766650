//! Tidewater CLI - Catalog search and merchandising tools.
//!
//! # Usage
//!
//! ```bash
//! # Search a catalog snapshot the way the storefront does
//! tw-cli search "red jacket" --catalog catalog.json
//!
//! # Preview a product rail mixed from two collections
//! tw-cli mix --catalog catalog.json -c new-arrivals -c sale --strategy weighted --seed 7
//!
//! # Check a snapshot for duplicate IDs and dangling collection references
//! tw-cli validate --catalog catalog.json
//! ```
//!
//! `--catalog` falls back to `STOREFRONT_CATALOG_PATH` (a `.env` file is read
//! if present).

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "tw-cli")]
#[command(author, version, about = "Tidewater CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search products in a catalog snapshot
    Search {
        /// Search query
        query: String,

        /// Catalog snapshot JSON file
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Only match product text, not collection names
        #[arg(long)]
        no_categories: bool,

        /// Maximum number of products to print
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Mix several collections into one product rail
    Mix {
        /// Catalog snapshot JSON file
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Collection ID to draw from (repeatable, in order)
        #[arg(short = 'c', long = "collection", required = true)]
        collections: Vec<String>,

        /// Mixing strategy (`round-robin`, `sequential`, `weighted`)
        #[arg(short, long, default_value = "round-robin")]
        strategy: String,

        /// Maximum number of products in the rail
        #[arg(short, long, default_value_t = 12)]
        limit: usize,

        /// Seed for reproducible shuffles
        #[arg(long)]
        seed: Option<u64>,

        /// Shuffle the order collections are visited in
        #[arg(long)]
        shuffle_collections: bool,

        /// Shuffle each collection's products before mixing
        #[arg(long)]
        shuffle_items: bool,
    },
    /// Validate a catalog snapshot
    Validate {
        /// Catalog snapshot JSON file
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Search {
            query,
            catalog,
            no_categories,
            limit,
        } => {
            let snapshot = commands::catalog::load(catalog).await?;
            commands::search::run(&snapshot, &query, !no_categories, limit)?;
        }
        Commands::Mix {
            catalog,
            collections,
            strategy,
            limit,
            seed,
            shuffle_collections,
            shuffle_items,
        } => {
            let snapshot = commands::catalog::load(catalog).await?;
            let request = commands::mix::MixRequest {
                collections,
                strategy: strategy.parse()?,
                limit,
                seed,
                shuffle_collections,
                shuffle_items,
            };
            commands::mix::run(&snapshot, &request)?;
        }
        Commands::Validate { catalog } => {
            let snapshot = commands::catalog::load(catalog).await?;
            commands::validate::run(&snapshot)?;
        }
    }
    Ok(())
}
