//! ShelfMerch CLI - database migrations and operator tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! sm-cli migrate
//!
//! # Create a merchant (prints the API token once)
//! sm-cli merchant create -e owner@acme.test -n "Acme Tees"
//!
//! # Issue a new API token for an existing merchant
//! sm-cli merchant rotate-token -e owner@acme.test
//!
//! # Load catalogue products, replacing existing ones
//! sm-cli seed catalog catalog.yaml --clear
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "sm-cli")]
#[command(author, version, about = "ShelfMerch CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage merchant accounts
    Merchant {
        #[command(subcommand)]
        action: MerchantAction,
    },
    /// Seed the database
    Seed {
        #[command(subcommand)]
        target: SeedTarget,
    },
}

#[derive(Subcommand)]
enum MerchantAction {
    /// Create a merchant and print its API token
    Create {
        /// Merchant email address
        #[arg(short, long)]
        email: String,

        /// Merchant display name
        #[arg(short, long)]
        name: String,
    },
    /// Replace a merchant's API token
    RotateToken {
        /// Merchant email address
        #[arg(short, long)]
        email: String,
    },
}

#[derive(Subcommand)]
enum SeedTarget {
    /// Load catalogue products from a YAML file
    Catalog {
        /// Path to the YAML file
        file: String,

        /// Delete every existing product first
        #[arg(long)]
        clear: bool,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Merchant { action } => match action {
            MerchantAction::Create { email, name } => {
                commands::merchant::create(&email, &name).await?;
            }
            MerchantAction::RotateToken { email } => {
                commands::merchant::rotate_token(&email).await?;
            }
        },
        Commands::Seed { target } => match target {
            SeedTarget::Catalog { file, clear } => {
                commands::seed::catalog(&file, clear).await?;
            }
        },
    }
    Ok(())
}
