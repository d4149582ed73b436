//! Gemvault CLI - database migrations and operator tools.
//!
//! # Usage
//!
//! ```bash
//! # Run admin database migrations
//! gemvault-cli migrate admin
//!
//! # Create or replace the administrator login
//! GEMVAULT_ADMIN_PASSWORD='...' gemvault-cli admin set-credentials -u owner
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "gemvault-cli")]
#[command(author, version, about = "Gemvault operator tools")]
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
    /// Manage the administrator login
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum MigrateTarget {
    /// Run admin database migrations
    Admin,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create or replace the administrator credential.
    ///
    /// The password is read from `GEMVAULT_ADMIN_PASSWORD`.
    SetCredentials {
        /// Administrator username
        #[arg(short, long)]
        username: String,
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
        Commands::Migrate { target } => match target {
            MigrateTarget::Admin => commands::migrate::admin().await?,
        },
        Commands::Admin { action } => match action {
            AdminAction::SetCredentials { username } => {
                commands::admin::set_credentials(&username).await?;
            }
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
    fn test_parse_set_credentials() {
        let cli = Cli::try_parse_from(["gemvault-cli", "admin", "set-credentials", "-u", "owner"]);
        assert!(matches!(
            cli.map(|c| c.command),
            Ok(Commands::Admin {
                action: AdminAction::SetCredentials { username }
            }) if username == "owner"
        ));
    }
}
