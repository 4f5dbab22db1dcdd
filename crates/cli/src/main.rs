//! Storeroom CLI - schema creation, seeding and inspection tools.
//!
//! # Usage
//!
//! ```bash
//! # Create the shop tables
//! storeroom schema shop
//!
//! # Create every table for both services
//! storeroom schema all
//!
//! # Load users and products from a fixture
//! storeroom seed shop --file crates/cli/fixtures/shop_seed.yaml
//!
//! # List shop users
//! storeroom users list
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "storeroom")]
#[command(author, version, about = "Storeroom CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create database tables
    Schema {
        #[command(subcommand)]
        target: SchemaTarget,
    },
    /// Load fixture data
    Seed {
        #[command(subcommand)]
        target: SeedTarget,
    },
    /// Inspect shop users
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },
}

#[derive(Subcommand)]
enum SchemaTarget {
    /// Create the shop tables
    Shop,
    /// Create the pet registry tables
    Pets,
    /// Create the tables of both services
    All,
}

#[derive(Subcommand)]
enum SeedTarget {
    /// Seed shop users and products
    Shop {
        /// Path to the YAML fixture
        #[arg(short, long)]
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum UsersAction {
    /// List all shop users
    List,
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

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Schema { target } => match target {
            SchemaTarget::Shop => commands::schema::shop().await?,
            SchemaTarget::Pets => commands::schema::pets().await?,
            SchemaTarget::All => {
                commands::schema::shop().await?;
                commands::schema::pets().await?;
            }
        },
        Commands::Seed { target } => match target {
            SeedTarget::Shop { file } => commands::seed::shop(&file).await?,
        },
        Commands::Users { action } => match action {
            UsersAction::List => commands::users::list().await?,
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_seed_command() {
        let cli = Cli::try_parse_from(["storeroom", "seed", "shop", "--file", "seed.yaml"])
            .unwrap_or_else(|e| panic!("{e}"));
        assert!(matches!(
            cli.command,
            Commands::Seed {
                target: SeedTarget::Shop { file }
            } if file == PathBuf::from("seed.yaml")
        ));
    }
}
