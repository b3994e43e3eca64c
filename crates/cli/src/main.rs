//! Frost Bites CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run storefront database migrations
//! fb-cli migrate
//!
//! # Grant the admin claim to an existing account
//! fb-cli user promote -e owner@frostbites.co
//!
//! # Take it away again
//! fb-cli user promote -e owner@frostbites.co --revoke
//!
//! # Load catalog products from a YAML file
//! fb-cli seed -f data/products.yaml
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `user promote` - Set or clear the admin flag on an account
//! - `seed` - Insert catalog products from YAML

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "fb-cli")]
#[command(author, version, about = "Frost Bites CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Seed the product catalog from a YAML file
    Seed {
        /// Path to the products YAML file
        #[arg(short, long)]
        file: String,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Grant (or revoke) the admin claim for an account
    Promote {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Clear the admin flag instead of setting it
        #[arg(long)]
        revoke: bool,
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
        Commands::Migrate => commands::migrate::storefront().await?,
        Commands::User { action } => match action {
            UserAction::Promote { email, revoke } => {
                commands::user::promote(&email, !revoke).await?;
            }
        },
        Commands::Seed { file } => commands::seed::products(&file).await?,
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_promote_with_revoke() {
        let cli = Cli::try_parse_from([
            "fb-cli",
            "user",
            "promote",
            "-e",
            "owner@frostbites.co",
            "--revoke",
        ])
        .unwrap();

        match cli.command {
            Commands::User {
                action: UserAction::Promote { email, revoke },
            } => {
                assert_eq!(email, "owner@frostbites.co");
                assert!(revoke);
            }
            _ => panic!("expected user promote"),
        }
    }

    #[test]
    fn test_seed_requires_file() {
        assert!(Cli::try_parse_from(["fb-cli", "seed"]).is_err());
    }
}
