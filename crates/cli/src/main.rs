//! Góndola CLI - Session-store migration and catalog seeding tools.
//!
//! # Usage
//!
//! ```bash
//! # Create the tower_sessions table in the configured SQLite database
//! gondola-cli migrate sessions
//!
//! # Write the sample catalog document
//! gondola-cli seed catalog
//!
//! # Write the sample catalog document to a custom path
//! gondola-cli seed catalog --out /tmp/products.json
//! ```
//!
//! # Commands
//!
//! - `migrate sessions` - Create the session-store table
//! - `seed catalog` - Write the sample catalog JSON document

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "gondola-cli")]
#[command(author, version, about = "Góndola CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate {
        #[command(subcommand)]
        target: MigrateTarget,
    },
    /// Seed data files
    Seed {
        #[command(subcommand)]
        target: SeedTarget,
    },
}

#[derive(Subcommand)]
enum MigrateTarget {
    /// Create the tower-sessions table in the session store
    Sessions,
}

#[derive(Subcommand)]
enum SeedTarget {
    /// Write the sample catalog document
    Catalog {
        /// Output path for the catalog JSON
        #[arg(
            short,
            long,
            default_value = "crates/storefront/static/data/products.json"
        )]
        out: String,
    },
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
        Commands::Migrate { target } => match target {
            MigrateTarget::Sessions => commands::migrate::sessions().await?,
        },
        Commands::Seed { target } => match target {
            SeedTarget::Catalog { out } => commands::seed::catalog(&out).await?,
        },
    }
    Ok(())
}
